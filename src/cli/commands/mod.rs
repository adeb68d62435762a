//! CLI command handlers for `coursereg`.
//!
//! Each command is implemented in its own submodule. Handlers return a
//! printable error message on failure; `main` reports it and exits non-zero.

pub mod catalog;
pub mod config;
pub mod enroll;
pub mod student;
pub mod timetable;

use coursereg::config::Config;
use coursereg::{debug, Catalog, FileStore, Reconciler};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Load the configured catalog, or the built-in one when none is set
///
/// # Errors
/// Returns a message if the catalog file cannot be loaded
pub fn load_catalog(config: &Config) -> Result<Catalog, String> {
    if config.paths.catalog_file.is_empty() {
        return Ok(Catalog::builtin());
    }
    let path = Path::new(&config.paths.catalog_file);
    debug!("Loading catalog from {}", path.display());
    Catalog::load(path).map_err(|e| format!("✗ {e}"))
}

/// Open the file store and build a reconciler from the configuration
///
/// # Errors
/// Returns a message if the catalog or data directory cannot be opened
pub fn open_reconciler(config: &Config) -> Result<Reconciler<FileStore>, String> {
    let catalog = load_catalog(config)?;
    let data_dir = PathBuf::from(&config.paths.data_dir);
    let store = FileStore::open(&data_dir).map_err(|e| {
        format!(
            "✗ Failed to open data directory {}: {e}",
            data_dir.display()
        )
    })?;
    debug!("Using enrollment data in {}", data_dir.display());
    Ok(Reconciler::new(Arc::new(catalog), store).with_credit_ceiling(config.enrollment.credit_ceiling))
}
