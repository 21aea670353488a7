//! Simulator configuration constants and tunable balance parameters.

/// Battle-wide configuration injected at simulator construction.
///
/// These are static policy values, never derived from the random source,
/// and apply identically to both sides of a battle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulatorConfig {
    /// Multiplicative scaling applied to base HP at spawn.
    pub hp_modifier: i64,

    /// Ceiling on completed rounds before the battle is called off.
    pub max_turns: u32,

    /// Hit/damage balance parameters.
    pub combat: CombatParams,
}

impl SimulatorConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of active buffs per combatant.
    pub const MAX_ACTIVE_BUFFS: usize = 8;
    /// Maximum number of equipped skill slots per combatant.
    pub const MAX_SKILL_SLOTS: usize = 8;

    // ===== scheduling constants =====
    /// Per-turn priority increment numerator: an actor is rescheduled at
    /// `score + TURN_PRIORITY × PRIORITY_SCALE / SPD`.
    pub const TURN_PRIORITY: u64 = 100;
    /// Fixed-point scale for scheduler scores (replaces decimal priorities).
    pub const PRIORITY_SCALE: u64 = 10_000;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_HP_MODIFIER: i64 = 2;
    pub const DEFAULT_MAX_TURNS: u32 = 200;

    pub fn new() -> Self {
        Self {
            hp_modifier: Self::DEFAULT_HP_MODIFIER,
            max_turns: Self::DEFAULT_MAX_TURNS,
            combat: CombatParams::default(),
        }
    }

    pub fn with_hp_modifier(hp_modifier: i64) -> Self {
        Self {
            hp_modifier,
            ..Self::new()
        }
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Balance parameters consumed by skill resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatParams {
    pub hit: HitParams,
    pub damage: DamageParams,
}

impl Default for CombatParams {
    fn default() -> Self {
        Self {
            hit: HitParams {
                base: 85,
                min: 10,
                max: 95,
            },
            damage: DamageParams {
                def_divisor: 2,
                crit_multiplier: 2,
                minimum: 1,
            },
        }
    }
}

/// Hit-chance window: `clamp(base + HIT diff, min, max)` percent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitParams {
    pub base: i64,
    pub min: i64,
    pub max: i64,
}

/// Damage formula parameters.
///
/// ```text
/// raw     = power + ATK × power_pct / 100
/// reduced = raw − DEF / def_divisor
/// final   = max(reduced, minimum)            (× crit_multiplier on a crit)
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageParams {
    pub def_divisor: i64,
    pub crit_multiplier: i64,
    pub minimum: i64,
}
