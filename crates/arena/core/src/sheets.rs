//! Read-only lookup tables consumed by the simulator.
//!
//! Sheets are supplied fully-populated by the game-data loader; the engine
//! never fetches or mutates them. Every lookup returns a [`SheetError`] on a
//! missing row — an unresolvable reference is a fatal configuration error,
//! not something to skip, because a silently-shortened battle would put this
//! node out of consensus.
//!
//! `BTreeMap` keys keep iteration order deterministic wherever a consumer
//! walks a whole table.

use std::collections::BTreeMap;

use crate::error::SheetError;
use crate::skill::SkillKind;
use crate::stats::{ModifierOperation, StatModifier, StatType, Stats};

/// Character sheet row: base stats at level 1 plus per-level growth.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterRow {
    pub id: u32,
    pub stats: Stats,
    pub growth: Stats,
}

impl CharacterRow {
    /// Stats at the given level: `base + growth × (level − 1)`.
    pub fn stats_at(&self, level: u32) -> Stats {
        self.stats.grown(&self.growth, level.saturating_sub(1) as i64)
    }
}

/// Skill sheet row.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillRow {
    pub id: u32,
    pub kind: SkillKind,
    /// Flat power added to the effect amount.
    pub power: i64,
    /// Percent of the caster's ATK added to the effect amount.
    pub power_pct: i64,
    /// Cast chance (percent) rolled each turn the skill is off cooldown.
    /// Ignored for the default slot, which always fires.
    pub chance: u32,
    /// Turns of cooldown after a cast.
    pub cooldown: u32,
    /// Buff payload applied on resolution (may be empty).
    pub buff_ids: Vec<u32>,
}

/// Buff sheet row.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuffRow {
    pub id: u32,
    /// Buffs sharing a group replace each other on application.
    pub group_id: u32,
    /// Application chance (percent), rolled per payload entry.
    pub chance: u32,
    /// Duration in owner turns.
    pub duration: u32,
    pub effect: BuffEffect,
}

/// What a buff does while active. Closed set; resolution and log consumers
/// match exhaustively so a new variant cannot go silently unhandled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BuffEffect {
    /// Contributes a stat modifier while active.
    Stat {
        stat_type: StatType,
        operation: ModifierOperation,
        value: i64,
    },
    /// Reflects a percentage of received skill damage back at the attacker
    /// as tick damage (only when counter effects are enabled).
    Thorns { power_pct: i64 },
}

/// Equipment set-effect row: modifiers granted by a completed set,
/// applied once at spawn alongside caller-supplied modifiers.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SetEffectRow {
    pub id: u32,
    pub modifiers: Vec<StatModifier>,
}

/// Material item row, the target of reward draws.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MaterialRow {
    pub id: u32,
    pub grade: u32,
}

/// The full table bundle one simulation reads from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulatorSheets {
    pub characters: BTreeMap<u32, CharacterRow>,
    pub skills: BTreeMap<u32, SkillRow>,
    pub buffs: BTreeMap<u32, BuffRow>,
    pub set_effects: BTreeMap<u32, SetEffectRow>,
    pub materials: BTreeMap<u32, MaterialRow>,
}

impl SimulatorSheets {
    pub fn character(&self, id: u32) -> Result<&CharacterRow, SheetError> {
        self.characters
            .get(&id)
            .ok_or(SheetError::CharacterNotFound { id })
    }

    pub fn skill(&self, id: u32) -> Result<&SkillRow, SheetError> {
        self.skills.get(&id).ok_or(SheetError::SkillNotFound { id })
    }

    pub fn buff(&self, id: u32) -> Result<&BuffRow, SheetError> {
        self.buffs.get(&id).ok_or(SheetError::BuffNotFound { id })
    }

    pub fn set_effect(&self, id: u32) -> Result<&SetEffectRow, SheetError> {
        self.set_effects
            .get(&id)
            .ok_or(SheetError::SetEffectNotFound { id })
    }

    pub fn material(&self, id: u32) -> Result<&MaterialRow, SheetError> {
        self.materials
            .get(&id)
            .ok_or(SheetError::ItemNotFound { id })
    }
}
