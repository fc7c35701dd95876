//! Import ingredient and shopping list fixtures into PostgreSQL.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use pantry::fixtures::{FixtureImportSettings, import_fixtures};
use pantry::outbound::persistence::{
    DbPool, DieselIngredientRepository, DieselShoppingListRepository, PoolConfig, run_migrations,
};
use tokio::runtime::Builder;

/// `seed-fixtures` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "seed-fixtures",
    about = "Import ingredient and shopping list fixtures; safe to re-run",
    version
)]
struct CliArgs {
    /// Path to `ingredients.json`. Defaults to the bundled fixture.
    #[arg(long = "ingredients", value_name = "path")]
    ingredients_path: Option<PathBuf>,
    /// Path to `shopping_lists.json`. Defaults to the bundled fixture.
    #[arg(long = "shopping-lists", value_name = "path")]
    shopping_lists_path: Option<PathBuf>,
    /// User id that will own every imported list.
    #[arg(long = "owner", value_name = "uuid")]
    owner_id: Option<String>,
    /// Database connection URL. Falls back to `DATABASE_URL` when omitted.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
}

impl CliArgs {
    fn settings(&self) -> FixtureImportSettings {
        FixtureImportSettings {
            enabled: true,
            ingredients_path: self.ingredients_path.clone(),
            shopping_lists_path: self.shopping_lists_path.clone(),
            owner_id: self.owner_id.clone(),
        }
    }
}

fn main() -> io::Result<()> {
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let settings = args.settings();
    let database_url = resolve_database_url(args.database_url)?;

    run_migrations(&database_url)
        .await
        .map_err(|error| io::Error::other(format!("run migrations: {error}")))?;
    let pool = DbPool::new(PoolConfig::new(&database_url))
        .await
        .map_err(|error| io::Error::other(format!("create database pool: {error}")))?;

    let summary = import_fixtures(
        &settings,
        Arc::new(DieselShoppingListRepository::new(pool.clone())),
        Arc::new(DieselIngredientRepository::new(pool)),
    )
    .await
    .map_err(|error| io::Error::other(format!("import fixtures: {error}")))?;

    let mut out = io::stdout().lock();
    writeln!(out, "ingredients_created={}", summary.ingredients_created)?;
    writeln!(out, "ingredients_existing={}", summary.ingredients_existing)?;
    writeln!(out, "ingredients_skipped={}", summary.ingredients_skipped)?;
    writeln!(out, "lists_created={}", summary.lists_created)?;
    writeln!(out, "items_created={}", summary.items_created)?;
    writeln!(out, "items_existing={}", summary.items_existing)?;
    writeln!(out, "items_skipped={}", summary.items_skipped)?;
    Ok(())
}

fn resolve_database_url(explicit: Option<String>) -> io::Result<String> {
    if let Some(value) = explicit {
        if value.trim().is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "--database-url must not be empty when provided",
            ));
        }
        return Ok(value);
    }

    let from_env = env::var("DATABASE_URL").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "database URL missing: set --database-url or DATABASE_URL",
        )
    })?;
    if from_env.trim().is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "DATABASE_URL must not be empty",
        ));
    }
    Ok(from_env)
}
