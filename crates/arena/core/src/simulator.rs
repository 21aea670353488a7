//! Battle orchestrator.
//!
//! [`ArenaSimulator`] wires the pieces together: it builds both combatants
//! from their digests, seeds the turn scheduler, drives the action loop to a
//! terminal condition, and returns the finished [`BattleLog`]. One simulator
//! instance owns one random source; running two battles bit-identically
//! means two simulators with equal seeds, never a shared one.

use crate::character::{ArenaCharacter, ArenaPlayerDigest, Side};
use crate::config::SimulatorConfig;
use crate::error::{InvariantError, SimulateError};
use crate::log::{BattleEvent, BattleLog, BattleResult};
use crate::rng::BattleRng;
use crate::scheduler::TurnScheduler;
use crate::sheets::SimulatorSheets;
use crate::skill;
use crate::stats::{StatModifier, StatType};

/// Deterministic arena battle simulator.
pub struct ArenaSimulator {
    rng: BattleRng,
    config: SimulatorConfig,
    turn: u32,
}

impl ArenaSimulator {
    /// Creates a simulator with default configuration (HP modifier 2,
    /// 200-round ceiling).
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, SimulatorConfig::new())
    }

    /// Creates a simulator with a custom HP-scaling modifier.
    pub fn with_hp_modifier(seed: u64, hp_modifier: i64) -> Self {
        Self::with_config(seed, SimulatorConfig::with_hp_modifier(hp_modifier))
    }

    pub fn with_config(seed: u64, config: SimulatorConfig) -> Self {
        Self {
            rng: BattleRng::with_seed(seed),
            config,
            turn: 0,
        }
    }

    pub fn hp_modifier(&self) -> i64 {
        self.config.hp_modifier
    }

    /// Completed rounds in the last simulation; equals the number of
    /// `TurnEnd` events in the returned log.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// The simulator's random source, for follow-up draws that must stay on
    /// the battle's seed sequence (e.g. reward selection by the action
    /// layer).
    pub fn rng_mut(&mut self) -> &mut BattleRng {
        &mut self.rng
    }

    /// Runs one battle to completion.
    ///
    /// Modifiers are applied once at spawn; `hp_modifier` scales both
    /// sides' base HP identically. On any error the partial log is
    /// discarded — an aborted simulation yields no consensus artifact.
    pub fn simulate(
        &mut self,
        challenger: &ArenaPlayerDigest,
        enemy: &ArenaPlayerDigest,
        sheets: &SimulatorSheets,
        challenger_modifiers: &[StatModifier],
        enemy_modifiers: &[StatModifier],
        include_counter_effects: bool,
    ) -> Result<BattleLog, SimulateError> {
        self.turn = 0;
        let mut log = BattleLog::new();

        let mut characters = [
            ArenaCharacter::from_digest(
                Side::Challenger,
                challenger,
                sheets,
                challenger_modifiers,
                self.config.hp_modifier,
            )?,
            ArenaCharacter::from_digest(
                Side::Enemy,
                enemy,
                sheets,
                enemy_modifiers,
                self.config.hp_modifier,
            )?,
        ];

        for character in &characters {
            log.push(BattleEvent::SpawnCharacter {
                character: character.snapshot(),
            });
        }

        // challenger enqueued first: at equal priority it acts first
        let mut scheduler = TurnScheduler::with_capacity(characters.len());
        for (index, character) in characters.iter().enumerate() {
            scheduler.push(index, Self::priority_step(character)?);
        }

        let mut acted = [false; 2];
        // hard bound on total actions keeps the log finite even under
        // extreme speed ratios: max_turns × combatant count
        let max_actions = self.config.max_turns as u64 * characters.len() as u64;
        let mut actions: u64 = 0;

        let result = loop {
            let Some((index, score)) = scheduler.pop() else {
                return Err(InvariantError::EmptySchedule.into());
            };
            let opponent_index = 1 - index;

            let (actor, opponent) = Self::pair_mut(&mut characters, index);
            let slot = skill::choose_skill(actor, &mut self.rng);
            let events = skill::resolve_skill(
                slot,
                actor,
                opponent,
                &mut self.rng,
                &self.config.combat,
                include_counter_effects,
            );
            for event in events {
                log.push(event);
            }

            // the attacked side is checked first so death events follow
            // causality (thorns can kill the actor second)
            if characters[opponent_index].is_dead() {
                log.push(BattleEvent::Dead {
                    character: characters[opponent_index].snapshot(),
                });
            }
            if characters[index].is_dead() {
                log.push(BattleEvent::Dead {
                    character: characters[index].snapshot(),
                });
            }
            if characters.iter().any(|c| c.is_dead()) {
                break if characters[1].is_dead() {
                    BattleResult::Win
                } else {
                    BattleResult::Lose
                };
            }

            // owner turn-cycle: buff durations, cooldowns, re-scheduling
            let actor = &mut characters[index];
            actor.tick_turn();
            scheduler.push(index, score + Self::priority_step(actor)?);

            acted[index] = true;
            if acted.iter().enumerate().all(|(i, done)| *done || characters[i].is_dead()) {
                self.turn += 1;
                log.push(BattleEvent::TurnEnd { turn: self.turn });
                acted = [false; 2];
                if self.turn >= self.config.max_turns {
                    break BattleResult::TimeOver;
                }
            }

            actions += 1;
            if actions >= max_actions {
                break BattleResult::TimeOver;
            }
        };

        log.set_result(result);
        Ok(log)
    }

    /// Scheduling increment for a combatant: `TURN_PRIORITY / SPD` in fixed
    /// point. A non-positive speed could never be scheduled and is rejected
    /// as an invariant violation rather than silently skipped.
    fn priority_step(character: &ArenaCharacter) -> Result<u64, InvariantError> {
        let spd = character.stat(StatType::Spd);
        if spd <= 0 {
            return Err(InvariantError::NonPositiveSpeed { spd });
        }
        let step =
            SimulatorConfig::TURN_PRIORITY * SimulatorConfig::PRIORITY_SCALE / spd as u64;
        Ok(step.max(1))
    }

    fn pair_mut(
        characters: &mut [ArenaCharacter; 2],
        index: usize,
    ) -> (&mut ArenaCharacter, &mut ArenaCharacter) {
        let (left, right) = characters.split_at_mut(1);
        if index == 0 {
            (&mut left[0], &mut right[0])
        } else {
            (&mut right[0], &mut left[0])
        }
    }
}
