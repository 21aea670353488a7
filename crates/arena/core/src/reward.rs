//! Weighted reward sampling.
//!
//! Shares the battle's determinism requirement: reward draws consume the
//! same seeded random source as combat, in a fixed order (one draw roll per
//! selected row, then one count roll), so the loot a node derives is part of
//! the consensus artifact.

use crate::error::SheetError;
use crate::rng::BattleRng;
use crate::sheets::SimulatorSheets;

/// One row of a stage's reward table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RewardRow {
    pub item_id: u32,
    pub weight: u32,
    /// Inclusive bounds on the item count granted per draw.
    pub min: u32,
    pub max: u32,
}

/// A single granted item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RewardItem {
    pub id: u32,
    pub grade: u32,
}

/// Weighted sampler drawing without replacement.
///
/// Each draw walks the cumulative weights of the remaining entries and
/// removes the selected one. Zero-weight entries are never drawn; an
/// exhausted (or all-zero) selector returns `None`, which terminates the
/// selection loop early — not an error.
#[derive(Clone, Debug, Default)]
pub struct WeightedSelector<T> {
    entries: Vec<(u32, T)>,
}

impl<T> WeightedSelector<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, weight: u32, value: T) {
        self.entries.push((weight, value));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Draws one entry proportionally to weight, removing it.
    pub fn select_one(&mut self, rng: &mut BattleRng) -> Option<T> {
        let total: u64 = self.entries.iter().map(|(w, _)| u64::from(*w)).sum();
        if total == 0 {
            return None;
        }
        let roll = u64::from(rng.next_u32()) % total;
        let mut cumulative: u64 = 0;
        for index in 0..self.entries.len() {
            cumulative += u64::from(self.entries[index].0);
            if roll < cumulative {
                return Some(self.entries.remove(index).1);
            }
        }
        None
    }
}

/// Draws rewards from a weighted table until `max_count` items are granted
/// or the table is exhausted.
///
/// Each drawn row is resolved against the material item sheet (a dangling
/// item id is a fatal configuration error) and converted into a count drawn
/// from `[min, max]`. The final list is sorted by item id so presentation
/// order is independent of draw order.
pub fn select_rewards(
    table: &[RewardRow],
    max_count: usize,
    rng: &mut BattleRng,
    sheets: &SimulatorSheets,
) -> Result<Vec<RewardItem>, SheetError> {
    let mut selector = WeightedSelector::new();
    for row in table {
        selector.push(row.weight, *row);
    }

    let mut reward: Vec<RewardItem> = Vec::new();
    while reward.len() < max_count {
        let Some(row) = selector.select_one(rng) else {
            break;
        };
        let material = sheets.material(row.item_id)?;
        let count = rng.range(row.min, row.max);
        for _ in 0..count {
            if reward.len() >= max_count {
                break;
            }
            reward.push(RewardItem {
                id: material.id,
                grade: material.grade,
            });
        }
    }

    reward.sort_by_key(|item| item.id);
    Ok(reward)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheets::MaterialRow;
    use std::collections::BTreeMap;

    fn sheets_with(ids: &[u32]) -> SimulatorSheets {
        let mut materials = BTreeMap::new();
        for id in ids {
            materials.insert(*id, MaterialRow { id: *id, grade: 1 });
        }
        SimulatorSheets {
            materials,
            ..Default::default()
        }
    }

    fn table() -> Vec<RewardRow> {
        vec![
            RewardRow {
                item_id: 303,
                weight: 10,
                min: 1,
                max: 2,
            },
            RewardRow {
                item_id: 101,
                weight: 30,
                min: 1,
                max: 3,
            },
            RewardRow {
                item_id: 202,
                weight: 60,
                min: 2,
                max: 2,
            },
        ]
    }

    #[test]
    fn fixed_seed_reproduces_the_list() {
        let sheets = sheets_with(&[101, 202, 303]);
        let mut rng_a = BattleRng::with_seed(99);
        let mut rng_b = BattleRng::with_seed(99);
        let a = select_rewards(&table(), 10, &mut rng_a, &sheets).unwrap();
        let b = select_rewards(&table(), 10, &mut rng_b, &sheets).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn result_is_sorted_by_item_id() {
        let sheets = sheets_with(&[101, 202, 303]);
        let mut rng = BattleRng::with_seed(5);
        let reward = select_rewards(&table(), 10, &mut rng, &sheets).unwrap();
        assert!(!reward.is_empty());
        assert!(reward.windows(2).all(|w| w[0].id <= w[1].id));
    }

    #[test]
    fn empty_table_yields_empty_list() {
        let sheets = sheets_with(&[]);
        let mut rng = BattleRng::with_seed(5);
        let reward = select_rewards(&[], 10, &mut rng, &sheets).unwrap();
        assert!(reward.is_empty());
    }

    #[test]
    fn max_count_caps_the_list() {
        let sheets = sheets_with(&[101, 202, 303]);
        let mut rng = BattleRng::with_seed(5);
        let reward = select_rewards(&table(), 3, &mut rng, &sheets).unwrap();
        assert!(reward.len() <= 3);
    }

    #[test]
    fn exhausted_table_terminates_early() {
        let sheets = sheets_with(&[101, 202, 303]);
        let mut rng = BattleRng::with_seed(5);
        // max counts sum to 7, far below the requested 50
        let reward = select_rewards(&table(), 50, &mut rng, &sheets).unwrap();
        assert!(reward.len() <= 7);
        assert!(!reward.is_empty());
    }

    #[test]
    fn dangling_item_id_is_fatal() {
        let sheets = sheets_with(&[101, 202]);
        let rows = vec![RewardRow {
            item_id: 999,
            weight: 1,
            min: 1,
            max: 1,
        }];
        let mut rng = BattleRng::with_seed(5);
        let err = select_rewards(&rows, 5, &mut rng, &sheets).unwrap_err();
        assert_eq!(err, SheetError::ItemNotFound { id: 999 });
    }

    #[test]
    fn zero_weight_entries_are_never_drawn() {
        let sheets = sheets_with(&[101, 202]);
        let rows = vec![
            RewardRow {
                item_id: 101,
                weight: 0,
                min: 1,
                max: 1,
            },
            RewardRow {
                item_id: 202,
                weight: 5,
                min: 1,
                max: 1,
            },
        ];
        let mut rng = BattleRng::with_seed(5);
        let reward = select_rewards(&rows, 10, &mut rng, &sheets).unwrap();
        assert!(reward.iter().all(|item| item.id == 202));
    }

    #[test]
    fn selector_removes_drawn_entries() {
        let mut selector = WeightedSelector::new();
        selector.push(1, "a");
        selector.push(1, "b");
        let mut rng = BattleRng::with_seed(5);
        let mut drawn = vec![
            selector.select_one(&mut rng).unwrap(),
            selector.select_one(&mut rng).unwrap(),
        ];
        assert!(selector.select_one(&mut rng).is_none());
        drawn.sort();
        assert_eq!(drawn, vec!["a", "b"]);
    }
}
