//! Pantry backend library.
//!
//! Ingredients with unit costs and availability, plus owner-scoped shopping
//! lists whose totals are derived from current ingredient prices. The crate
//! follows a ports-and-adapters layout: [`domain`] holds the rules and ports,
//! [`inbound`] exposes them over HTTP, and [`outbound`] provides Diesel and
//! in-memory storage.

pub mod doc;
pub mod domain;
pub mod fixtures;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
