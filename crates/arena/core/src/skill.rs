//! Skill selection and resolution.
//!
//! All combat math lives here as pure helpers plus one mutating entry point,
//! [`resolve_skill`], called by the simulator for the acting combatant.
//!
//! # Random call order
//!
//! Replay identity depends on every node drawing from the shared random
//! source in the same sequence. Per action the order is:
//!
//! 1. one cast roll per ready non-default slot, in slot order
//!    ([`choose_skill`]);
//! 2. for each hit of an attack skill: a hit roll, then — only when the hit
//!    lands — a critical roll;
//! 3. one application roll per buff payload entry, in payload order.
//!
//! Thorns reflection consumes no randomness. Reordering any of these rolls
//! is a consensus break even if the distribution looks unchanged.

use crate::character::ArenaCharacter;
use crate::config::CombatParams;
use crate::log::{BattleEvent, SkillEffect, SkillInfo};
use crate::rng::BattleRng;

/// Skill taxonomy from the skill sheet. Closed set with exhaustive handling
/// at resolution sites.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillKind {
    /// Plain single-hit attack.
    NormalAttack,
    /// Heavy single-hit attack (sheet rows carry a larger ATK percentage).
    BlowAttack,
    /// Two-hit attack; each hit rolls accuracy and crit independently.
    DoubleAttack,
    /// Self-heal scaled like an attack.
    Heal,
    /// Applies its buff payload to the caster.
    Buff,
    /// Applies its buff payload to the opponent.
    Debuff,
}

impl SkillKind {
    pub const fn is_attack(self) -> bool {
        matches!(
            self,
            SkillKind::NormalAttack | SkillKind::BlowAttack | SkillKind::DoubleAttack
        )
    }

    pub const fn hit_count(self) -> u32 {
        match self {
            SkillKind::DoubleAttack => 2,
            _ => 1,
        }
    }
}

/// Hit chance (percent) for an attack: `base + caster HIT − target HIT`,
/// clamped to the configured window.
pub fn calculate_hit_chance(caster_hit: i64, target_hit: i64, params: &CombatParams) -> i64 {
    (params.hit.base + caster_hit - target_hit).clamp(params.hit.min, params.hit.max)
}

/// Damage for one landed hit.
///
/// `raw` is `power + ATK × power_pct / 100`; defense removes
/// `DEF / def_divisor`; the floor keeps a landed hit from being a no-op;
/// a critical multiplies the final value.
pub fn calculate_damage(raw: i64, target_def: i64, critical: bool, params: &CombatParams) -> i64 {
    let reduced = raw - target_def / params.damage.def_divisor;
    let damage = reduced.max(params.damage.minimum);
    if critical {
        damage * params.damage.crit_multiplier
    } else {
        damage
    }
}

/// Picks the slot to cast this turn.
///
/// Ready non-default slots are offered a cast roll in slot order; the first
/// success wins. Slot 0 is the fallback and always fires, so a combatant
/// never skips its action.
pub fn choose_skill(caster: &ArenaCharacter, rng: &mut BattleRng) -> usize {
    for (index, slot) in caster.skill_slots().iter().enumerate().skip(1) {
        if slot.is_ready() && rng.roll_d100() <= slot.row.chance {
            return index;
        }
    }
    0
}

/// Resolves one cast of the skill in `slot_index`.
///
/// Mutates both participants (HP, buffs, the caster's cooldown) and returns
/// the events to append: the primary skill event, then — when counter
/// effects are enabled and the damaged side holds a thorns buff — a tick
/// event for the reflection. A reflection goes through the same damage
/// application path as any other hit but cannot re-trigger thorns.
pub fn resolve_skill(
    slot_index: usize,
    caster: &mut ArenaCharacter,
    target: &mut ArenaCharacter,
    rng: &mut BattleRng,
    params: &CombatParams,
    include_counter_effects: bool,
) -> Vec<BattleEvent> {
    let slot = caster.skill_slots()[slot_index].clone();
    caster.trigger_cooldown(slot_index);

    let kind = slot.row.kind;
    let mut infos: Vec<SkillInfo> = Vec::new();
    let mut total_dealt: i64 = 0;

    if kind.is_attack() {
        for _ in 0..kind.hit_count() {
            let hit_chance = calculate_hit_chance(
                caster.effective().hit,
                target.effective().hit,
                params,
            );
            if i64::from(rng.roll_d100()) > hit_chance {
                // miss: recorded with zero effect so replays show the whiff
                infos.push(SkillInfo {
                    caster: caster.side(),
                    target: target.side(),
                    effect: 0,
                    critical: false,
                    kind: SkillEffect::Damage,
                });
                continue;
            }

            let crit_chance = caster.effective().cri.clamp(0, 100);
            let critical = i64::from(rng.roll_d100()) <= crit_chance;

            let raw = slot.row.power + caster.effective().atk * slot.row.power_pct / 100;
            let damage = calculate_damage(raw, target.effective().def, critical, params);
            let dealt = target.apply_damage(damage);
            total_dealt += dealt;

            infos.push(SkillInfo {
                caster: caster.side(),
                target: target.side(),
                effect: dealt,
                critical,
                kind: SkillEffect::Damage,
            });
        }
    } else if kind == SkillKind::Heal {
        let amount = slot.row.power + caster.effective().atk * slot.row.power_pct / 100;
        let healed = caster.apply_heal(amount);
        infos.push(SkillInfo {
            caster: caster.side(),
            target: caster.side(),
            effect: healed,
            critical: false,
            kind: SkillEffect::Heal,
        });
    }

    for buff_row in &slot.buffs {
        if rng.roll_d100() > buff_row.chance {
            continue;
        }
        let recipient_side = match kind {
            SkillKind::Debuff => {
                target.add_buff(buff_row);
                target.side()
            }
            _ => {
                caster.add_buff(buff_row);
                caster.side()
            }
        };
        infos.push(SkillInfo {
            caster: caster.side(),
            target: recipient_side,
            effect: 0,
            critical: false,
            kind: SkillEffect::Buff {
                buff_id: buff_row.id,
            },
        });
    }

    let primary = match kind {
        SkillKind::NormalAttack | SkillKind::BlowAttack | SkillKind::DoubleAttack => {
            BattleEvent::Attack {
                character: caster.snapshot(),
                infos,
            }
        }
        SkillKind::Heal => BattleEvent::Heal {
            character: caster.snapshot(),
            infos,
        },
        SkillKind::Buff | SkillKind::Debuff => BattleEvent::BuffApplied {
            character: caster.snapshot(),
            infos,
        },
    };
    let mut events = vec![primary];

    if include_counter_effects && total_dealt > 0 {
        if let Some(power_pct) = target.thorns_power() {
            let reflected = (total_dealt * power_pct / 100).max(params.damage.minimum);
            let applied = caster.apply_damage(reflected);
            events.push(BattleEvent::TickDamage {
                character: caster.snapshot(),
                infos: vec![SkillInfo {
                    caster: target.side(),
                    target: caster.side(),
                    effect: applied,
                    critical: false,
                    kind: SkillEffect::Damage,
                }],
            });
        }
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{ArenaPlayerDigest, Side};
    use crate::sheets::{BuffEffect, BuffRow, CharacterRow, SimulatorSheets, SkillRow};
    use crate::stats::{ModifierOperation, StatType, Stats};
    use std::collections::BTreeMap;

    fn params() -> CombatParams {
        CombatParams::default()
    }

    /// Hit window pinned at 100% so seeded rolls cannot whiff; CRI 0 on the
    /// test character keeps crits out of the formula assertions.
    fn sure_hit() -> CombatParams {
        let mut p = CombatParams::default();
        p.hit = crate::config::HitParams {
            base: 100,
            min: 100,
            max: 100,
        };
        p
    }

    fn sheets() -> SimulatorSheets {
        let mut characters = BTreeMap::new();
        characters.insert(
            100,
            CharacterRow {
                id: 100,
                stats: Stats::new(500, 40, 10, 0, 90, 100),
                growth: Stats::default(),
            },
        );
        let mut skills = BTreeMap::new();
        skills.insert(
            1,
            SkillRow {
                id: 1,
                kind: SkillKind::NormalAttack,
                power: 0,
                power_pct: 100,
                chance: 100,
                cooldown: 0,
                buff_ids: vec![],
            },
        );
        skills.insert(
            2,
            SkillRow {
                id: 2,
                kind: SkillKind::DoubleAttack,
                power: 0,
                power_pct: 60,
                chance: 100,
                cooldown: 2,
                buff_ids: vec![],
            },
        );
        skills.insert(
            3,
            SkillRow {
                id: 3,
                kind: SkillKind::Heal,
                power: 50,
                power_pct: 0,
                chance: 100,
                cooldown: 1,
                buff_ids: vec![],
            },
        );
        skills.insert(
            4,
            SkillRow {
                id: 4,
                kind: SkillKind::Buff,
                power: 0,
                power_pct: 0,
                chance: 100,
                cooldown: 5,
                buff_ids: vec![70],
            },
        );
        skills.insert(
            5,
            SkillRow {
                id: 5,
                kind: SkillKind::Debuff,
                power: 0,
                power_pct: 0,
                chance: 100,
                cooldown: 5,
                buff_ids: vec![71],
            },
        );
        let mut buffs = BTreeMap::new();
        buffs.insert(
            70,
            BuffRow {
                id: 70,
                group_id: 70,
                chance: 100,
                duration: 3,
                effect: BuffEffect::Thorns { power_pct: 50 },
            },
        );
        buffs.insert(
            71,
            BuffRow {
                id: 71,
                group_id: 71,
                chance: 100,
                duration: 3,
                effect: BuffEffect::Stat {
                    stat_type: StatType::Def,
                    operation: ModifierOperation::Add,
                    value: -5,
                },
            },
        );
        SimulatorSheets {
            characters,
            skills,
            buffs,
            ..Default::default()
        }
    }

    fn spawn(side: Side, skill_ids: Vec<u32>) -> ArenaCharacter {
        let digest = ArenaPlayerDigest {
            character_id: 100,
            level: 1,
            skill_ids,
            set_effect_ids: vec![],
        };
        ArenaCharacter::from_digest(side, &digest, &sheets(), &[], 2).unwrap()
    }

    #[test]
    fn hit_chance_clamps_to_window() {
        let p = params();
        assert_eq!(calculate_hit_chance(0, 999, &p), p.hit.min);
        assert_eq!(calculate_hit_chance(999, 0, &p), p.hit.max);
        assert_eq!(calculate_hit_chance(10, 10, &p), p.hit.base);
    }

    #[test]
    fn damage_floors_at_minimum_and_doubles_on_crit() {
        let p = params();
        assert_eq!(calculate_damage(40, 10, false, &p), 35);
        assert_eq!(calculate_damage(40, 10, true, &p), 70);
        assert_eq!(calculate_damage(1, 9999, false, &p), p.damage.minimum);
    }

    #[test]
    fn choose_skill_falls_back_to_default_slot() {
        let caster = spawn(Side::Challenger, vec![1]);
        let mut rng = BattleRng::with_seed(1);
        assert_eq!(choose_skill(&caster, &mut rng), 0);
    }

    #[test]
    fn choose_skill_prefers_ready_proc() {
        // slot 1 has chance 100, so the first cast roll always succeeds
        let caster = spawn(Side::Challenger, vec![1, 4]);
        let mut rng = BattleRng::with_seed(1);
        assert_eq!(choose_skill(&caster, &mut rng), 1);
    }

    #[test]
    fn choose_skill_skips_cooling_slots() {
        let mut caster = spawn(Side::Challenger, vec![1, 4]);
        caster.trigger_cooldown(1);
        let mut rng = BattleRng::with_seed(1);
        assert_eq!(choose_skill(&caster, &mut rng), 0);
    }

    #[test]
    fn attack_deals_clamped_damage_and_reports_it() {
        let mut caster = spawn(Side::Challenger, vec![1]);
        let mut target = spawn(Side::Enemy, vec![1]);
        let mut rng = BattleRng::with_seed(3);

        let events = resolve_skill(0, &mut caster, &mut target, &mut rng, &sure_hit(), false);
        assert_eq!(events.len(), 1);
        let BattleEvent::Attack { infos, .. } = &events[0] else {
            panic!("expected attack event");
        };
        assert_eq!(infos.len(), 1);
        // ATK 40 vs DEF 10: 40 − 5 = 35 (CRI 0 rules out crits)
        assert_eq!(infos[0].effect, 35);
        assert_eq!(target.current_hp(), target.max_hp() - 35);
    }

    #[test]
    fn double_attack_produces_two_infos() {
        let mut caster = spawn(Side::Challenger, vec![2]);
        let mut target = spawn(Side::Enemy, vec![1]);
        let mut rng = BattleRng::with_seed(3);

        let events = resolve_skill(0, &mut caster, &mut target, &mut rng, &sure_hit(), false);
        let BattleEvent::Attack { infos, .. } = &events[0] else {
            panic!("expected attack event");
        };
        assert_eq!(infos.len(), 2);
        assert_eq!(caster.skill_slots()[0].remaining_cooldown, 2);
    }

    #[test]
    fn overkill_effect_is_clamped_to_remaining_hp() {
        let mut caster = spawn(Side::Challenger, vec![1]);
        let mut target = spawn(Side::Enemy, vec![1]);
        target.apply_damage(target.max_hp() - 10);
        let mut rng = BattleRng::with_seed(3);

        let events = resolve_skill(0, &mut caster, &mut target, &mut rng, &sure_hit(), false);
        let BattleEvent::Attack { infos, .. } = &events[0] else {
            panic!("expected attack event");
        };
        assert_eq!(infos[0].effect, 10);
        assert!(target.is_dead());
    }

    #[test]
    fn heal_restores_up_to_max() {
        let mut caster = spawn(Side::Challenger, vec![3]);
        let mut target = spawn(Side::Enemy, vec![1]);
        caster.apply_damage(30);
        let mut rng = BattleRng::with_seed(3);

        let events = resolve_skill(0, &mut caster, &mut target, &mut rng, &sure_hit(), false);
        let BattleEvent::Heal { infos, .. } = &events[0] else {
            panic!("expected heal event");
        };
        // power 50 against 30 missing HP
        assert_eq!(infos[0].effect, 30);
        assert_eq!(caster.current_hp(), caster.max_hp());
    }

    #[test]
    fn debuff_lands_on_opponent() {
        let mut caster = spawn(Side::Challenger, vec![5]);
        let mut target = spawn(Side::Enemy, vec![1]);
        let mut rng = BattleRng::with_seed(3);

        let events = resolve_skill(0, &mut caster, &mut target, &mut rng, &sure_hit(), false);
        let BattleEvent::BuffApplied { infos, .. } = &events[0] else {
            panic!("expected buff event");
        };
        assert_eq!(infos[0].target, Side::Enemy);
        assert_eq!(target.stat(StatType::Def), 5);
        assert!(caster.buffs().is_empty());
    }

    #[test]
    fn thorns_reflects_when_counters_enabled() {
        let mut caster = spawn(Side::Challenger, vec![1]);
        let mut target = spawn(Side::Enemy, vec![1]);
        target.add_buff(sheets().buff(70).unwrap());
        let mut rng = BattleRng::with_seed(3);

        let events = resolve_skill(0, &mut caster, &mut target, &mut rng, &sure_hit(), true);
        assert_eq!(events.len(), 2);
        let BattleEvent::TickDamage { character, infos } = &events[1] else {
            panic!("expected tick damage event");
        };
        // 35 dealt, 50% reflected
        assert_eq!(infos[0].effect, 17);
        assert_eq!(infos[0].caster, Side::Enemy);
        assert_eq!(character.side, Side::Challenger);
        assert_eq!(caster.current_hp(), caster.max_hp() - 17);
    }

    #[test]
    fn thorns_is_inert_without_counter_effects() {
        let mut caster = spawn(Side::Challenger, vec![1]);
        let mut target = spawn(Side::Enemy, vec![1]);
        target.add_buff(sheets().buff(70).unwrap());
        let mut rng = BattleRng::with_seed(3);

        let events = resolve_skill(0, &mut caster, &mut target, &mut rng, &sure_hit(), false);
        assert_eq!(events.len(), 1);
        assert_eq!(caster.current_hp(), caster.max_hp());
    }
}
