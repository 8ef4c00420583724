//! Storage initialization
//!
//! Handles first-run setup: directories, settings file and empty data files.

use crate::config::paths::LensPaths;
use crate::config::settings::Settings;
use crate::error::LensError;

use super::file_io::write_json_atomic;

/// Initialize storage for a fresh installation. Existing files are left alone.
/// Returns `true` if anything was created.
pub fn initialize_storage(paths: &LensPaths) -> Result<bool, LensError> {
    paths.ensure_directories()?;
    let mut created = false;

    if !paths.settings_file().exists() {
        Settings::default().save(paths)?;
        created = true;
    }

    if !paths.transactions_file().exists() {
        write_json_atomic(paths.transactions_file(), &serde_json::json!({ "transactions": [] }))?;
        created = true;
    }

    if !paths.budgets_file().exists() {
        write_json_atomic(paths.budgets_file(), &serde_json::json!({ "budgets": [] }))?;
        created = true;
    }

    if created {
        tracing::info!(base_dir = %paths.base_dir().display(), "initialized data directory");
    }
    Ok(created)
}
