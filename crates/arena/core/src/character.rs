//! Live in-battle combatant state.
//!
//! An [`ArenaCharacter`] is built once per battle from an immutable
//! [`ArenaPlayerDigest`] plus the lookup sheets: character stats are scaled
//! to the digest level, equipment set effects and caller-supplied modifiers
//! are applied once, and HP is initialized to `base HP × hp_modifier`.
//! After spawn it is mutated only by skill resolution and turn ticking, and
//! it is dropped when the simulation returns.

use arrayvec::ArrayVec;

use crate::config::SimulatorConfig;
use crate::error::SheetError;
use crate::sheets::{BuffRow, SimulatorSheets, SkillRow};
use crate::stats::{BuffSet, StatModifier, StatType, Stats, apply_modifiers};

/// Which side of the battle a combatant fights on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Challenger,
    Enemy,
}

impl Side {
    pub const fn opponent(self) -> Side {
        match self {
            Side::Challenger => Side::Enemy,
            Side::Enemy => Side::Challenger,
        }
    }

    pub const fn is_enemy(self) -> bool {
        matches!(self, Side::Enemy)
    }
}

/// Immutable snapshot of a combatant used to seed a battle.
///
/// Assembled by the avatar/equipment subsystem; the simulator never touches
/// persistent avatar state itself.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArenaPlayerDigest {
    pub character_id: u32,
    pub level: u32,
    /// Equipped skills, in slot order. The first entry is the default skill
    /// used whenever no other skill procs.
    pub skill_ids: Vec<u32>,
    /// Completed equipment set effects.
    pub set_effect_ids: Vec<u32>,
}

/// An equipped skill with its resolved payload and cooldown state.
///
/// Sheet rows are resolved once at spawn so every dangling reference
/// surfaces before the first turn, never mid-battle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillSlot {
    pub row: SkillRow,
    pub buffs: Vec<BuffRow>,
    pub remaining_cooldown: u32,
}

impl SkillSlot {
    pub fn is_ready(&self) -> bool {
        self.remaining_cooldown == 0
    }
}

/// Point-in-time view of a combatant, embedded in log events.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterSnapshot {
    pub side: Side,
    /// Effective stats at snapshot time (HP field is the unscaled base HP).
    pub stats: Stats,
    pub current_hp: i64,
    pub max_hp: i64,
}

impl CharacterSnapshot {
    pub const fn is_dead(&self) -> bool {
        self.current_hp == 0
    }
}

/// One side's live, mutable in-battle actor.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArenaCharacter {
    side: Side,
    /// Stats after spawn-time modifiers, before buffs. Never mutated.
    base: Stats,
    /// Stats with active buffs applied. Recomputed on buff changes.
    effective: Stats,
    buffs: BuffSet,
    max_hp: i64,
    current_hp: i64,
    skills: ArrayVec<SkillSlot, { SimulatorConfig::MAX_SKILL_SLOTS }>,
}

impl ArenaCharacter {
    /// Builds a combatant from its digest.
    ///
    /// Set-effect and caller modifiers go through one application pass so
    /// the outcome does not depend on how the caller interleaved them.
    /// Every referenced sheet row is resolved here; a missing row aborts
    /// the whole spawn.
    pub fn from_digest(
        side: Side,
        digest: &ArenaPlayerDigest,
        sheets: &SimulatorSheets,
        modifiers: &[StatModifier],
        hp_modifier: i64,
    ) -> Result<Self, SheetError> {
        let row = sheets.character(digest.character_id)?;
        let leveled = row.stats_at(digest.level);

        let mut all_modifiers: Vec<StatModifier> = Vec::new();
        for id in &digest.set_effect_ids {
            all_modifiers.extend_from_slice(&sheets.set_effect(*id)?.modifiers);
        }
        all_modifiers.extend_from_slice(modifiers);
        let base = apply_modifiers(&leveled, &all_modifiers);

        let mut skills = ArrayVec::new();
        for id in digest
            .skill_ids
            .iter()
            .take(SimulatorConfig::MAX_SKILL_SLOTS)
        {
            let skill_row = sheets.skill(*id)?.clone();
            let mut buffs = Vec::with_capacity(skill_row.buff_ids.len());
            for buff_id in &skill_row.buff_ids {
                buffs.push(sheets.buff(*buff_id)?.clone());
            }
            skills.push(SkillSlot {
                row: skill_row,
                buffs,
                remaining_cooldown: 0,
            });
        }
        if skills.is_empty() {
            return Err(SheetError::NoSkills {
                character_id: digest.character_id,
            });
        }

        let max_hp = base.hp * hp_modifier;
        Ok(Self {
            side,
            base,
            effective: base,
            buffs: BuffSet::empty(),
            max_hp,
            current_hp: max_hp,
            skills,
        })
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn base(&self) -> &Stats {
        &self.base
    }

    pub fn effective(&self) -> &Stats {
        &self.effective
    }

    pub fn stat(&self, stat: StatType) -> i64 {
        self.effective.get(stat)
    }

    pub fn current_hp(&self) -> i64 {
        self.current_hp
    }

    pub fn max_hp(&self) -> i64 {
        self.max_hp
    }

    pub fn is_dead(&self) -> bool {
        self.current_hp == 0
    }

    pub fn buffs(&self) -> &BuffSet {
        &self.buffs
    }

    pub fn skill_slots(&self) -> &[SkillSlot] {
        &self.skills
    }

    /// Removes HP, clamped at zero. Returns the amount actually removed,
    /// which is what log events report as the effect.
    pub fn apply_damage(&mut self, amount: i64) -> i64 {
        let dealt = amount.max(0).min(self.current_hp);
        self.current_hp -= dealt;
        dealt
    }

    /// Restores HP, clamped at the maximum. Returns the amount restored.
    pub fn apply_heal(&mut self, amount: i64) -> i64 {
        let healed = amount.max(0).min(self.max_hp - self.current_hp);
        self.current_hp += healed;
        healed
    }

    /// Attaches a buff and recomputes effective stats.
    pub fn add_buff(&mut self, row: &BuffRow) {
        self.buffs.add(row);
        self.recalculate();
    }

    /// Strongest active thorns reflection, if any.
    pub fn thorns_power(&self) -> Option<i64> {
        self.buffs.thorns_power()
    }

    pub(crate) fn trigger_cooldown(&mut self, slot_index: usize) {
        let slot = &mut self.skills[slot_index];
        slot.remaining_cooldown = slot.row.cooldown;
    }

    /// End-of-action housekeeping for this combatant's own turn cycle:
    /// buff durations and skill cooldowns each lose one turn, and effective
    /// stats are recomputed when anything expired.
    pub fn tick_turn(&mut self) {
        let expired = self.buffs.tick();
        if !expired.is_empty() {
            self.recalculate();
        }
        for slot in self.skills.iter_mut() {
            slot.remaining_cooldown = slot.remaining_cooldown.saturating_sub(1);
        }
    }

    fn recalculate(&mut self) {
        let modifiers: Vec<StatModifier> = self.buffs.stat_modifiers().collect();
        self.effective = apply_modifiers(&self.base, &modifiers);
    }

    pub fn snapshot(&self) -> CharacterSnapshot {
        CharacterSnapshot {
            side: self.side,
            stats: self.effective,
            current_hp: self.current_hp,
            max_hp: self.max_hp,
        }
    }
}
