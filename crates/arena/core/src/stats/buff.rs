//! Timed buff/debuff state attached to one combatant.
//!
//! Buffs are instantiated from sheet rows when a skill's buff payload
//! resolves, live in a bounded set owned exclusively by the affected
//! combatant, and lose one turn of duration after each of the owner's
//! actions. A combatant never holds a reference into another combatant's
//! buff set.

use arrayvec::ArrayVec;

use crate::config::SimulatorConfig;
use crate::sheets::{BuffEffect, BuffRow};

use super::StatModifier;

/// A live buff instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Buff {
    pub id: u32,
    /// Buffs sharing a group replace each other instead of stacking.
    pub group_id: u32,
    pub effect: BuffEffect,
    pub remaining_turns: u32,
}

impl Buff {
    /// Instantiates a buff from its sheet row at full duration.
    pub fn from_row(row: &BuffRow) -> Self {
        Self {
            id: row.id,
            group_id: row.group_id,
            effect: row.effect,
            remaining_turns: row.duration,
        }
    }
}

/// Active buffs on a combatant.
///
/// Insertion order is preserved, so the stat modifiers contributed by the
/// set are applied in a reproducible order on every node.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuffSet {
    buffs: ArrayVec<Buff, { SimulatorConfig::MAX_ACTIVE_BUFFS }>,
}

impl BuffSet {
    pub fn empty() -> Self {
        Self {
            buffs: ArrayVec::new(),
        }
    }

    /// Adds a buff instantiated from `row`.
    ///
    /// A buff sharing a group with an active one replaces it in place
    /// (refresh semantics). When the set is full a genuinely new buff is
    /// dropped, matching the bounded-storage policy for status effects.
    pub fn add(&mut self, row: &BuffRow) {
        let buff = Buff::from_row(row);
        if let Some(existing) = self.buffs.iter_mut().find(|b| b.group_id == row.group_id) {
            *existing = buff;
            return;
        }
        if !self.buffs.is_full() {
            self.buffs.push(buff);
        }
    }

    /// Decrements every buff by one owner turn and drops the expired.
    ///
    /// Returns the ids of expired buffs so the caller knows the effective
    /// stat block must be recomputed.
    pub fn tick(&mut self) -> ArrayVec<u32, { SimulatorConfig::MAX_ACTIVE_BUFFS }> {
        let mut expired = ArrayVec::new();
        for buff in self.buffs.iter_mut() {
            buff.remaining_turns = buff.remaining_turns.saturating_sub(1);
            if buff.remaining_turns == 0 {
                expired.push(buff.id);
            }
        }
        self.buffs.retain(|b| b.remaining_turns > 0);
        expired
    }

    /// Stat modifiers contributed by the active set, in insertion order.
    pub fn stat_modifiers(&self) -> impl Iterator<Item = StatModifier> + '_ {
        self.buffs.iter().filter_map(|b| match b.effect {
            BuffEffect::Stat {
                stat_type,
                operation,
                value,
            } => Some(StatModifier::new(stat_type, operation, value)),
            BuffEffect::Thorns { .. } => None,
        })
    }

    /// Strongest active thorns reflection, as a percent of received damage.
    pub fn thorns_power(&self) -> Option<i64> {
        self.buffs
            .iter()
            .filter_map(|b| match b.effect {
                BuffEffect::Thorns { power_pct } => Some(power_pct),
                _ => None,
            })
            .max()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Buff> {
        self.buffs.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.buffs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.buffs.len()
    }
}
