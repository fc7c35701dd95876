//! Fixture import configuration loaded via OrthoConfig.

use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::ports::FIXTURE_USER_ID;
use crate::domain::{UserId, UserValidationError};

fn default_fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// Configuration values controlling fixture import at startup.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "FIXTURES")]
pub struct FixtureImportSettings {
    /// Import fixtures once the stores are ready.
    #[ortho_config(default = false)]
    pub enabled: bool,
    /// Path to `ingredients.json`.
    pub ingredients_path: Option<PathBuf>,
    /// Path to `shopping_lists.json`.
    pub shopping_lists_path: Option<PathBuf>,
    /// Owner assigned to every imported list.
    pub owner_id: Option<String>,
}

impl FixtureImportSettings {
    /// Return the configured ingredients path, falling back to the bundled
    /// fixture.
    pub fn ingredients_path(&self) -> PathBuf {
        self.ingredients_path
            .clone()
            .unwrap_or_else(|| default_fixture_dir().join("ingredients.json"))
    }

    /// Return the configured shopping lists path, falling back to the
    /// bundled fixture.
    pub fn shopping_lists_path(&self) -> PathBuf {
        self.shopping_lists_path
            .clone()
            .unwrap_or_else(|| default_fixture_dir().join("shopping_lists.json"))
    }

    /// Owner of imported lists; defaults to the fixture login account.
    pub fn owner(&self) -> Result<UserId, UserValidationError> {
        UserId::new(self.owner_id.as_deref().unwrap_or(FIXTURE_USER_ID))
    }
}
