//! Backend entry-point: loads settings, prepares stores, and serves the REST
//! API.

mod server;

use std::ffi::OsString;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use pantry::fixtures::FixtureImportSettings;
use pantry::inbound::http::health::HealthState;

use server::{Persistence, ServerConfig, ServerSettings, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load().map_err(|err| eyre!("load server settings: {err}"))?;
    // Fixture settings come from the environment only; CLI flags belong to
    // the server settings.
    let fixture_settings = FixtureImportSettings::load_from_iter([OsString::from("pantry")])
        .map_err(|err| eyre!("load fixture settings: {err}"))?;
    let config = ServerConfig::from_settings(&settings).wrap_err("resolve server settings")?;

    let health_state = web::Data::new(HealthState::new());
    let persistence = Persistence::from_settings(&settings).await?;
    let login = persistence.login_service().await?;
    let http_state = persistence.http_state(login);
    let bind_addr = config.bind_addr;
    let server = create_server(health_state.clone(), http_state, config)
        .wrap_err_with(|| format!("bind {bind_addr}"))?;

    if let Some(summary) = persistence.import_fixtures(&fixture_settings).await? {
        info!(
            ingredients = summary.ingredients_created,
            lists = summary.lists_created,
            items = summary.items_created,
            "fixtures imported"
        );
    }
    health_state.mark_ready();
    info!(%bind_addr, "listening");
    server.await.wrap_err("server terminated")
}
