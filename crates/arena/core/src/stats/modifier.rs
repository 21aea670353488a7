//! Stat modifier application.
//!
//! Modifiers come from three places — equipment set effects, caller-supplied
//! battle bonuses, and active buffs — and all flow through the same pipeline
//! so the result is independent of the order the caller lists them in:
//! per stat, `Add` values are summed first, then `Percentage` values are
//! summed and applied once to the post-Add total (not compounded).

use strum::IntoEnumIterator;

use super::{StatType, Stats};

/// How a modifier combines with the stat it targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModifierOperation {
    /// Flat addition, applied before any percentage.
    Add,
    /// Percentage of the post-Add total, stored as an integer
    /// (e.g. `30` = +30%). Multiple percentages on one stat are summed
    /// before multiplying.
    Percentage,
}

/// A single `(stat, operation, value)` adjustment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatModifier {
    pub stat_type: StatType,
    pub operation: ModifierOperation,
    pub value: i64,
}

impl StatModifier {
    pub const fn new(stat_type: StatType, operation: ModifierOperation, value: i64) -> Self {
        Self {
            stat_type,
            operation,
            value,
        }
    }
}

/// Applies a modifier list to a base block.
///
/// # Formula
///
/// ```text
/// result = clamp((base + add_sum) × (100 + pct_sum) / 100, 0, ∞)
/// ```
///
/// Integer division; every stat is clamped non-negative afterwards so a
/// heavy debuff cannot drive a stat below zero.
pub fn apply_modifiers(base: &Stats, modifiers: &[StatModifier]) -> Stats {
    let mut result = *base;

    for stat in StatType::iter() {
        let add_sum: i64 = modifiers
            .iter()
            .filter(|m| m.stat_type == stat && m.operation == ModifierOperation::Add)
            .map(|m| m.value)
            .sum();

        let pct_sum: i64 = modifiers
            .iter()
            .filter(|m| m.stat_type == stat && m.operation == ModifierOperation::Percentage)
            .map(|m| m.value)
            .sum();

        let after_add = base.get(stat) + add_sum;
        let value = if pct_sum == 0 {
            after_add
        } else {
            (after_add * (100 + pct_sum)) / 100
        };

        result.set(stat, value.max(0));
    }

    result
}
