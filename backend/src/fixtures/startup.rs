//! Fixture import orchestration.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use cap_std::{ambient_authority, fs::Dir};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::info;

use crate::domain::ports::{IngredientRepository, ShoppingListRepository};
use crate::domain::{
    Error, FixtureImporter, ImportSummary, IngredientRecord, ShoppingListRecord,
    UserValidationError,
};
use crate::fixtures::config::FixtureImportSettings;

/// Errors returned while importing fixtures.
#[derive(Debug, Error)]
pub enum FixtureImportError {
    /// A fixture file could not be read.
    #[error("failed to read fixture at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A fixture file is not the expected JSON array.
    #[error("failed to parse fixture at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The configured owner id is not a UUID.
    #[error("invalid fixture owner: {0}")]
    Owner(#[from] UserValidationError),
    /// A repository failed during import.
    #[error("fixture import failed: {0}")]
    Import(#[from] Error),
}

/// Read a JSON array of fixture rows through a capability-scoped directory
/// handle.
pub fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, FixtureImportError> {
    let read_error = |source| FixtureImportError::Read {
        path: path.to_path_buf(),
        source,
    };
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| {
        read_error(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "fixture path must be a file",
        ))
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
    let payload = dir.read(Path::new(file_name)).map_err(read_error)?;
    serde_json::from_slice(&payload).map_err(|source| FixtureImportError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Read both fixture files and import them through the given repositories.
pub async fn import_fixtures<S, I>(
    settings: &FixtureImportSettings,
    shopping_lists: Arc<S>,
    ingredients: Arc<I>,
) -> Result<ImportSummary, FixtureImportError>
where
    S: ShoppingListRepository,
    I: IngredientRepository,
{
    let owner = settings.owner()?;
    let ingredient_rows: Vec<IngredientRecord> = read_records(&settings.ingredients_path())?;
    let list_rows: Vec<ShoppingListRecord> = read_records(&settings.shopping_lists_path())?;

    let importer = FixtureImporter::new(shopping_lists, ingredients, owner);
    Ok(importer.import(&ingredient_rows, &list_rows).await?)
}

/// Import fixtures on startup when enabled.
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
///
/// use pantry::fixtures::{FixtureImportSettings, import_fixtures_on_startup};
/// use pantry::outbound::memory::{InMemoryIngredientRepository, InMemoryShoppingListRepository};
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let settings = FixtureImportSettings {
///     enabled: false,
///     ingredients_path: None,
///     shopping_lists_path: None,
///     owner_id: None,
/// };
/// let ingredients = Arc::new(InMemoryIngredientRepository::new());
/// let lists = Arc::new(InMemoryShoppingListRepository::new(ingredients.clone()));
/// let summary = import_fixtures_on_startup(&settings, lists, ingredients).await?;
/// assert!(summary.is_none());
/// # Ok(())
/// # }
/// ```
pub async fn import_fixtures_on_startup<S, I>(
    settings: &FixtureImportSettings,
    shopping_lists: Arc<S>,
    ingredients: Arc<I>,
) -> Result<Option<ImportSummary>, FixtureImportError>
where
    S: ShoppingListRepository,
    I: IngredientRepository,
{
    if !settings.enabled {
        info!(reason = "disabled", "fixture import skipped");
        return Ok(None);
    }
    import_fixtures(settings, shopping_lists, ingredients)
        .await
        .map(Some)
}

#[cfg(test)]
mod tests {
    //! Unit tests for fixture file loading.

    use super::*;
    use std::io::Write;

    use rstest::rstest;
    use tempfile::NamedTempFile;

    fn write_fixture(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write fixture");
        file
    }

    #[rstest]
    fn reads_rows_with_fixture_column_names() {
        let file = write_fixture(
            r#"[{"Shopping List": "Party", "Ingredient": "Tomato", "Amount": "2"}]"#,
        );

        let rows: Vec<ShoppingListRecord> = read_records(file.path()).expect("rows");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "Party");
    }

    #[rstest]
    fn malformed_json_reports_parse_error() {
        let file = write_fixture("{not json");

        let err = read_records::<IngredientRecord>(file.path()).expect_err("parse failure");
        assert!(matches!(err, FixtureImportError::Parse { .. }));
    }

    #[rstest]
    fn missing_file_reports_read_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("absent.json");

        let err = read_records::<IngredientRecord>(&path).expect_err("read failure");
        assert!(matches!(err, FixtureImportError::Read { .. }));
    }
}
