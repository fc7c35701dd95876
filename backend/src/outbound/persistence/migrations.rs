//! Embedded Diesel migrations applied at startup.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

/// Migrations from the `backend/migrations` directory.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Failure while applying migrations.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("failed to connect for migrations: {0}")]
    Connection(#[from] diesel::ConnectionError),
    #[error("failed to apply migrations: {0}")]
    Apply(String),
    #[error("migration task panicked: {0}")]
    Join(String),
}

/// Apply pending migrations over a dedicated synchronous connection.
///
/// Runs on the blocking thread pool so the async runtime is never stalled.
///
/// # Errors
///
/// Returns [`MigrationError`] when the database is unreachable or a
/// migration fails.
pub async fn run_migrations(database_url: &str) -> Result<(), MigrationError> {
    let url = database_url.to_owned();
    tokio::task::spawn_blocking(move || apply_pending(&url))
        .await
        .map_err(|err| MigrationError::Join(err.to_string()))?
}

fn apply_pending(database_url: &str) -> Result<(), MigrationError> {
    let mut conn = PgConnection::establish(database_url)?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::Apply(err.to_string()))?;
    info!(count = applied.len(), "database migrations applied");
    Ok(())
}
