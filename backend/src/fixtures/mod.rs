//! Startup wiring for fixture import.

mod config;
mod startup;

pub use config::FixtureImportSettings;
pub use startup::{FixtureImportError, import_fixtures, import_fixtures_on_startup, read_records};
