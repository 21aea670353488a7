//! Simulator configuration loader.

use std::path::Path;

use arena_core::SimulatorConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for simulator configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load simulator configuration from a TOML file.
    pub fn load(path: &Path) -> LoadResult<SimulatorConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse a TOML string into a validated configuration.
    pub fn parse(content: &str) -> LoadResult<SimulatorConfig> {
        let config: SimulatorConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse simulator config TOML: {}", e))?;
        if config.hp_modifier <= 0 {
            anyhow::bail!("hp_modifier must be positive, got {}", config.hp_modifier);
        }
        if config.max_turns == 0 {
            anyhow::bail!("max_turns must be positive");
        }
        tracing::debug!(
            hp_modifier = config.hp_modifier,
            max_turns = config.max_turns,
            "loaded simulator config"
        );
        Ok(config)
    }
}
