//! Content loaders for reading battle data from files.
//!
//! Loaders convert RON/TOML files into the read-only structures consumed by
//! the simulator. Every loader validates cross-references before returning,
//! so the engine can assume internally consistent tables.

mod config;
mod sheets;

pub use config::ConfigLoader;
pub use sheets::SheetsLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
