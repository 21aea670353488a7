//! Simulator sheet loader.

use std::path::Path;

use arena_core::SimulatorSheets;

use crate::loaders::{LoadResult, read_file};

/// Loader for the simulator sheet bundle from RON files.
pub struct SheetsLoader;

impl SheetsLoader {
    /// Load the sheet bundle from a RON file.
    pub fn load(path: &Path) -> LoadResult<SimulatorSheets> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse a RON string into validated sheets.
    pub fn parse(content: &str) -> LoadResult<SimulatorSheets> {
        let sheets: SimulatorSheets = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse sheets RON: {}", e))?;
        Self::validate(&sheets)?;
        tracing::debug!(
            characters = sheets.characters.len(),
            skills = sheets.skills.len(),
            buffs = sheets.buffs.len(),
            set_effects = sheets.set_effects.len(),
            materials = sheets.materials.len(),
            "loaded simulator sheets"
        );
        Ok(sheets)
    }

    /// Cross-reference validation.
    ///
    /// The simulator treats dangling ids as fatal configuration errors;
    /// catching them at load time turns a mid-action abort into a content
    /// authoring error.
    fn validate(sheets: &SimulatorSheets) -> LoadResult<()> {
        for (key, row) in &sheets.characters {
            if *key != row.id {
                anyhow::bail!("character row {} keyed under {}", row.id, key);
            }
            if row.stats.spd <= 0 {
                anyhow::bail!("character {} has non-positive SPD {}", row.id, row.stats.spd);
            }
        }
        for (key, row) in &sheets.skills {
            if *key != row.id {
                anyhow::bail!("skill row {} keyed under {}", row.id, key);
            }
            for buff_id in &row.buff_ids {
                if !sheets.buffs.contains_key(buff_id) {
                    anyhow::bail!("skill {} references unknown buff {}", row.id, buff_id);
                }
            }
        }
        for (key, row) in &sheets.buffs {
            if *key != row.id {
                anyhow::bail!("buff row {} keyed under {}", row.id, key);
            }
            if row.duration == 0 {
                tracing::warn!(buff = row.id, "buff has zero duration and will never apply");
            }
        }
        for (key, row) in &sheets.set_effects {
            if *key != row.id {
                anyhow::bail!("set effect row {} keyed under {}", row.id, key);
            }
        }
        for (key, row) in &sheets.materials {
            if *key != row.id {
                anyhow::bail!("material row {} keyed under {}", row.id, key);
            }
        }
        Ok(())
    }
}
