//! Error taxonomy for the battle engine.
//!
//! Two kinds of failure are distinguished so callers can tell bad data from
//! bad computation:
//!
//! - [`SheetError`]: the caller referenced a row that does not exist in the
//!   supplied lookup tables. Fatal, never retried; the simulator refuses to
//!   silently skip unresolvable references because the resulting log would be
//!   out of consensus with nodes holding complete tables.
//! - [`InvariantError`]: the simulation reached a state the engine cannot
//!   resolve (e.g. a combatant whose speed collapsed to zero, which could
//!   never be scheduled again). These indicate inconsistent balance data or
//!   an engine bug rather than a missing row.
//!
//! No partial log ever escapes alongside an error: a failed simulation
//! returns `Err` only, so a partially-built log is never mistaken for a
//! consensus artifact.

/// Configuration error: input referenced a missing or unusable sheet row.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SheetError {
    #[error("character sheet has no row with id {id}")]
    CharacterNotFound { id: u32 },

    #[error("skill sheet has no row with id {id}")]
    SkillNotFound { id: u32 },

    #[error("buff sheet has no row with id {id}")]
    BuffNotFound { id: u32 },

    #[error("set effect sheet has no row with id {id}")]
    SetEffectNotFound { id: u32 },

    #[error("material item sheet has no row with id {id}")]
    ItemNotFound { id: u32 },

    #[error("digest for character {character_id} equips no skills")]
    NoSkills { character_id: u32 },
}

/// Computation error: the battle reached a state the engine cannot resolve.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InvariantError {
    #[error("combatant speed is {spd}; a non-positive speed can never be scheduled")]
    NonPositiveSpeed { spd: i64 },

    #[error("scheduler ran dry before a terminal condition was reached")]
    EmptySchedule,
}

/// Top-level simulation error.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SimulateError {
    #[error(transparent)]
    Sheet(#[from] SheetError),

    #[error(transparent)]
    Invariant(#[from] InvariantError),
}

impl SimulateError {
    /// Returns true when the failure indicates inconsistent caller data
    /// rather than a broken computation.
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Sheet(_))
    }
}
