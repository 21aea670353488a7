//! Append-only battle event log.
//!
//! The log is the externally observable record of a battle: the action layer
//! reads the result to settle on-chain rewards, presentation layers replay
//! the events visually, and auditors compare digests across nodes. Events are
//! appended in strict chronological order and never removed or reordered;
//! once the simulation returns, the log is immutable.

use crate::character::{CharacterSnapshot, Side};

/// Final outcome from the challenger's perspective.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleResult {
    /// The enemy died.
    Win,
    /// The challenger died.
    Lose,
    /// Both sides survived to the turn ceiling.
    TimeOver,
}

/// Kind of effect described by a [`SkillInfo`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillEffect {
    Damage,
    Heal,
    Buff { buff_id: u32 },
}

/// One resolved effect: who did what to whom, and for how much.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillInfo {
    pub caster: Side,
    pub target: Side,
    /// Amount dealt or healed; clamped so it never exceeds the HP actually
    /// removed or restored. Zero for a miss or a buff application.
    pub effect: i64,
    pub critical: bool,
    pub kind: SkillEffect,
}

/// A battle event. Closed set; log consumers match exhaustively.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleEvent {
    /// A combatant entered the battle. Snapshot taken after spawn-time
    /// modifier application and HP scaling.
    SpawnCharacter { character: CharacterSnapshot },

    /// A full round completed: every living combatant acted once.
    TurnEnd { turn: u32 },

    /// An attack-kind skill resolved. `character` is the caster after the
    /// action; one info per hit.
    Attack {
        character: CharacterSnapshot,
        infos: Vec<SkillInfo>,
    },

    /// A heal-kind skill resolved.
    Heal {
        character: CharacterSnapshot,
        infos: Vec<SkillInfo>,
    },

    /// Buff payloads landed. One info per applied buff.
    BuffApplied {
        character: CharacterSnapshot,
        infos: Vec<SkillInfo>,
    },

    /// Out-of-band damage (thorns reflection). `character` is the damaged
    /// side after application.
    TickDamage {
        character: CharacterSnapshot,
        infos: Vec<SkillInfo>,
    },

    /// A combatant's HP reached zero.
    Dead { character: CharacterSnapshot },
}

/// Ordered, replayable record of one simulation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleLog {
    events: Vec<BattleEvent>,
    result: BattleResult,
}

impl BattleLog {
    /// Creates an empty log. The result is meaningful only after the
    /// simulator has assigned the terminal outcome.
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            result: BattleResult::TimeOver,
        }
    }

    /// Appends an event. O(1) amortized, never fails.
    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub fn set_result(&mut self, result: BattleResult) {
        self.result = result;
    }

    pub fn result(&self) -> BattleResult {
        self.result
    }

    /// Read-only iteration in emission order; call again to restart.
    pub fn events(&self) -> impl Iterator<Item = &BattleEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// SHA-256 digest of the bincode-encoded log.
    ///
    /// Two nodes replaying the same battle must produce identical digests;
    /// this is the cheap cross-node comparison artifact. Order matters: the
    /// hash runs sequentially over events, then the result.
    #[cfg(feature = "serde")]
    pub fn digest(&self) -> [u8; 32] {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();
        for event in &self.events {
            // bincode serialization is deterministic and consistent
            if let Ok(bytes) = bincode::serialize(event) {
                hasher.update(&bytes);
            }
        }
        if let Ok(bytes) = bincode::serialize(&self.result) {
            hasher.update(&bytes);
        }
        hasher.finalize().into()
    }
}

impl Default for BattleLog {
    fn default() -> Self {
        Self::new()
    }
}
