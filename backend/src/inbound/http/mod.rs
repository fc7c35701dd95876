//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod health;
pub mod ingredients;
pub mod schemas;
pub mod session;
pub mod shopping;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;

use actix_web::web;

/// Register the REST endpoints and extractor settings.
///
/// Callers supply [`state::HttpState`] as app data and wrap the app in a
/// session middleware; health probes are mounted separately.
///
/// # Examples
/// ```no_run
/// use actix_web::App;
/// use pantry::inbound::http::configure;
///
/// let app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(validation::json_config())
        .app_data(validation::query_config())
        .service(users::login)
        .service(ingredients::create_ingredient)
        .service(ingredients::get_ingredient)
        .service(ingredients::update_cost_per_unit)
        .service(ingredients::flag_unavailable)
        .service(shopping::create_shopping_list)
        .service(shopping::get_shopping_list)
        .service(shopping::add_item);
}
