//! Builders for the stores and HTTP state behind the server.

use std::sync::Arc;

use color_eyre::eyre::{Result, eyre};
use tracing::info;

use pantry::domain::ports::{
    FIXTURE_USER_ID, FixtureLoginService, IngredientRepository, LoginService,
    ShoppingListRepository,
};
use pantry::domain::{
    ImportSummary, IngredientService, LoginCredentials, ShoppingListService, UserId,
};
use pantry::fixtures::{FixtureImportSettings, import_fixtures_on_startup};
use pantry::inbound::http::state::HttpState;
use pantry::outbound::memory::{InMemoryIngredientRepository, InMemoryShoppingListRepository};
use pantry::outbound::persistence::{
    DbPool, DieselIngredientRepository, DieselLoginService, DieselShoppingListRepository,
    PoolConfig, run_migrations,
};

use super::ServerSettings;

/// Stores selected at startup.
pub(crate) enum Persistence {
    InMemory {
        ingredients: Arc<InMemoryIngredientRepository>,
        shopping_lists: Arc<InMemoryShoppingListRepository>,
    },
    Diesel(DbPool),
}

impl Persistence {
    /// Connect to PostgreSQL and migrate when a database URL is configured,
    /// otherwise start with empty in-memory stores.
    pub(crate) async fn from_settings(settings: &ServerSettings) -> Result<Self> {
        let Some(database_url) = settings.database_url() else {
            info!(mode = "in-memory", "no database configured");
            let ingredients = Arc::new(InMemoryIngredientRepository::new());
            let shopping_lists = Arc::new(InMemoryShoppingListRepository::new(ingredients.clone()));
            return Ok(Self::InMemory {
                ingredients,
                shopping_lists,
            });
        };

        run_migrations(database_url)
            .await
            .map_err(|err| eyre!("run migrations: {err}"))?;
        let mut config = PoolConfig::new(database_url);
        if let Some(max_size) = settings.pool_max_size {
            config = config.with_max_size(max_size);
        }
        let pool = DbPool::new(config)
            .await
            .map_err(|err| eyre!("create database pool: {err}"))?;
        info!(mode = "postgres", "database pool ready");
        Ok(Self::Diesel(pool))
    }

    /// Login adapter matching the store.
    ///
    /// The database store is seeded with the development account so both
    /// modes accept the same credentials.
    pub(crate) async fn login_service(&self) -> Result<Arc<dyn LoginService>> {
        match self {
            Self::InMemory { .. } => Ok(Arc::new(FixtureLoginService)),
            Self::Diesel(pool) => {
                let service = DieselLoginService::new(pool.clone());
                let credentials = LoginCredentials::try_from_parts("admin", "password")
                    .map_err(|err| eyre!("fixture credentials: {err}"))?;
                let id = UserId::new(FIXTURE_USER_ID)
                    .map_err(|err| eyre!("fixture user id: {err}"))?;
                service
                    .ensure_account(&credentials, &id)
                    .await
                    .map_err(|err| eyre!("seed login account: {err}"))?;
                Ok(Arc::new(service))
            }
        }
    }

    pub(crate) async fn import_fixtures(
        &self,
        settings: &FixtureImportSettings,
    ) -> Result<Option<ImportSummary>> {
        let outcome = match self {
            Self::InMemory {
                ingredients,
                shopping_lists,
            } => import_fixtures_on_startup(settings, shopping_lists.clone(), ingredients.clone())
                .await,
            Self::Diesel(pool) => {
                import_fixtures_on_startup(
                    settings,
                    Arc::new(DieselShoppingListRepository::new(pool.clone())),
                    Arc::new(DieselIngredientRepository::new(pool.clone())),
                )
                .await
            }
        };
        outcome.map_err(|err| eyre!("{err}"))
    }

    pub(crate) fn http_state(&self, login: Arc<dyn LoginService>) -> HttpState {
        match self {
            Self::InMemory {
                ingredients,
                shopping_lists,
            } => build_http_state(login, shopping_lists.clone(), ingredients.clone()),
            Self::Diesel(pool) => build_http_state(
                login,
                Arc::new(DieselShoppingListRepository::new(pool.clone())),
                Arc::new(DieselIngredientRepository::new(pool.clone())),
            ),
        }
    }
}

/// Wire both domain services over one pair of repositories.
///
/// Each service implements its command and query port, so the same `Arc`
/// is handed out once per trait object.
fn build_http_state<S, I>(
    login: Arc<dyn LoginService>,
    shopping_list_repo: Arc<S>,
    ingredient_repo: Arc<I>,
) -> HttpState
where
    S: ShoppingListRepository + 'static,
    I: IngredientRepository + 'static,
{
    let ingredients = Arc::new(IngredientService::new(ingredient_repo.clone()));
    let shopping_lists = Arc::new(ShoppingListService::new(shopping_list_repo, ingredient_repo));
    HttpState::new(
        login,
        ingredients.clone(),
        ingredients,
        shopping_lists.clone(),
        shopping_lists,
    )
}
