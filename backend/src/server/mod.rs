//! Server construction and middleware wiring.

mod config;
mod settings;
mod state_builders;

pub use config::ServerConfig;
pub use settings::ServerSettings;
pub(crate) use state_builders::Persistence;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use pantry::Trace;
#[cfg(debug_assertions)]
use pantry::doc::ApiDoc;
use pantry::inbound::http::configure;
use pantry::inbound::http::health::{HealthState, live, ready};
use pantry::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build();

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(session)
        .wrap(Trace)
        .configure(configure)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server over the prepared handler state.
///
/// Readiness is left to the caller, which flips it once startup work such as
/// fixture import has finished.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    http_state: HttpState,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = web::Data::new(http_state);
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    })
    .bind(bind_addr)?
    .run();

    Ok(server)
}
