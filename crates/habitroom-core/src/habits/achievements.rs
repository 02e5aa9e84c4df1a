//! Cumulative completion counters per habit.
//!
//! A habit's count is the number of days on which it is currently marked
//! completed. The counters are kept incrementally on every toggle so the
//! achievement check never has to scan history. When the index record is
//! missing or unreadable it is rebuilt from the stored ledgers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Ledger;
use crate::calendar::{parse_date_key, LEDGER_PREFIX};
use crate::error::StoreError;
use crate::storage::{keys, save_json, KvStore};

/// Counts at which a badge is awarded. Matched exactly, once per habit.
pub const ACHIEVEMENT_THRESHOLDS: [u32; 2] = [7, 30];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitTotals {
    #[serde(default)]
    counts: BTreeMap<u32, u32>,
    #[serde(default)]
    awarded: BTreeMap<u32, Vec<u32>>,
}

impl HabitTotals {
    pub fn load<S: KvStore + ?Sized>(store: &S) -> Result<Self, StoreError> {
        let Some(raw) = store.get(keys::HABIT_TOTALS)? else {
            return Self::rebuild(store);
        };
        match serde_json::from_str(&raw) {
            Ok(totals) => Ok(totals),
            Err(e) => {
                tracing::warn!(error = %e, "malformed habit totals, rebuilding");
                Self::rebuild(store)
            }
        }
    }

    /// Recount from every stored ledger. Thresholds already passed are
    /// treated as awarded.
    pub fn rebuild<S: KvStore + ?Sized>(store: &S) -> Result<Self, StoreError> {
        let mut totals = Self::default();
        for key in store.keys_with_prefix(LEDGER_PREFIX)? {
            let Some(date) = parse_date_key(&key) else {
                continue;
            };
            for (habit_id, entry) in Ledger::load_day(store, date)? {
                if entry.completed {
                    *totals.counts.entry(habit_id).or_default() += 1;
                }
            }
        }
        for (&habit_id, &count) in &totals.counts {
            let passed: Vec<u32> = ACHIEVEMENT_THRESHOLDS
                .iter()
                .copied()
                .filter(|t| *t <= count)
                .collect();
            if !passed.is_empty() {
                totals.awarded.insert(habit_id, passed);
            }
        }
        tracing::debug!(habits = totals.counts.len(), "rebuilt habit totals");
        Ok(totals)
    }

    pub fn save<S: KvStore + ?Sized>(&self, store: &mut S) -> Result<(), StoreError> {
        save_json(store, keys::HABIT_TOTALS, self)
    }

    pub fn count(&self, habit_id: u32) -> u32 {
        self.counts.get(&habit_id).copied().unwrap_or(0)
    }

    /// Count a new completion. Returns the threshold hit, if this completion
    /// lands exactly on one that has not been awarded for this habit yet.
    pub fn record_completion(&mut self, habit_id: u32) -> Option<u32> {
        let count = self.counts.entry(habit_id).or_default();
        *count += 1;
        let count = *count;

        let threshold = ACHIEVEMENT_THRESHOLDS.iter().copied().find(|t| *t == count)?;
        let awarded = self.awarded.entry(habit_id).or_default();
        if awarded.contains(&threshold) {
            return None;
        }
        awarded.push(threshold);
        tracing::info!(habit_id, threshold, "achievement unlocked");
        Some(threshold)
    }

    pub fn record_uncompletion(&mut self, habit_id: u32) {
        if let Some(count) = self.counts.get_mut(&habit_id) {
            *count = count.saturating_sub(1);
        }
    }
}
