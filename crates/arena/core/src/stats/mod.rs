//! Combatant stat model.
//!
//! A [`Stats`] block holds one integer value per [`StatType`]. Base blocks
//! come from the character sheet (scaled by level); effective blocks are
//! recomputed from the base whenever the owner's buff set changes, via the
//! same [`apply_modifiers`] pipeline used for spawn-time modifiers.

mod buff;
mod modifier;

pub use buff::{Buff, BuffSet};
pub use modifier::{ModifierOperation, StatModifier, apply_modifiers};

/// The stats tracked for every combatant.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StatType {
    /// Base hit points (scaled by the HP modifier at spawn).
    Hp,
    /// Attack power (damage scaling).
    Atk,
    /// Defense (damage reduction).
    Def,
    /// Critical chance, percent.
    Cri,
    /// Accuracy; opposed HIT values set the hit chance.
    Hit,
    /// Speed; drives turn-scheduling priority.
    Spd,
}

/// One value per stat. All arithmetic is integer; percentages divide by 100
/// after multiplication so results are identical on every node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stats {
    pub hp: i64,
    pub atk: i64,
    pub def: i64,
    pub cri: i64,
    pub hit: i64,
    pub spd: i64,
}

impl Stats {
    pub const fn new(hp: i64, atk: i64, def: i64, cri: i64, hit: i64, spd: i64) -> Self {
        Self {
            hp,
            atk,
            def,
            cri,
            hit,
            spd,
        }
    }

    pub const fn get(&self, stat: StatType) -> i64 {
        match stat {
            StatType::Hp => self.hp,
            StatType::Atk => self.atk,
            StatType::Def => self.def,
            StatType::Cri => self.cri,
            StatType::Hit => self.hit,
            StatType::Spd => self.spd,
        }
    }

    pub fn set(&mut self, stat: StatType, value: i64) {
        match stat {
            StatType::Hp => self.hp = value,
            StatType::Atk => self.atk = value,
            StatType::Def => self.def = value,
            StatType::Cri => self.cri = value,
            StatType::Hit => self.hit = value,
            StatType::Spd => self.spd = value,
        }
    }

    /// Component-wise `self + other × factor`; used for level growth.
    pub fn grown(&self, growth: &Stats, levels: i64) -> Self {
        Self {
            hp: self.hp + growth.hp * levels,
            atk: self.atk + growth.atk * levels,
            def: self.def + growth.def * levels,
            cri: self.cri + growth.cri * levels,
            hit: self.hit + growth.hit * levels,
            spd: self.spd + growth.spd * levels,
        }
    }
}
