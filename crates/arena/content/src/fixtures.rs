//! Bundled default table set.
//!
//! A small but complete content bundle embedded at compile time, enough to
//! run full battles in tests and downstream tooling without shipping data
//! files separately. The bundle goes through the same loaders (and the same
//! validation) as external content.

use arena_core::{SimulatorConfig, SimulatorSheets};

use crate::loaders::{ConfigLoader, LoadResult, SheetsLoader};

const SHEETS_RON: &str = include_str!("../data/sheets.ron");
const CONFIG_TOML: &str = include_str!("../data/config.toml");

/// The bundled sheet set.
pub fn default_sheets() -> LoadResult<SimulatorSheets> {
    SheetsLoader::parse(SHEETS_RON)
}

/// The bundled simulator configuration.
pub fn default_config() -> LoadResult<SimulatorConfig> {
    ConfigLoader::parse(CONFIG_TOML)
}
