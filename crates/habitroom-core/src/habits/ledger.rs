use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Habit;
use crate::calendar::date_key;
use crate::error::StoreError;
use crate::storage::{load_json, save_json, KvStore};

/// Completion state and note for one habit on one day. The default value is
/// what an absent entry means.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub notes: String,
}

/// One day's record, habit id to entry. Entries for unknown ids are kept.
pub type DayLedger = BTreeMap<u32, LedgerEntry>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HabitDay {
    pub habit: Habit,
    pub completed: bool,
    pub notes: String,
}

/// A day laid out in registry order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayView {
    pub date: NaiveDate,
    pub habits: Vec<HabitDay>,
}

impl DayView {
    pub fn completed_count(&self) -> usize {
        self.habits.iter().filter(|h| h.completed).count()
    }
}

/// Date-keyed reads and writes of [`DayLedger`] records.
pub struct Ledger;

impl Ledger {
    pub fn load_day<S: KvStore + ?Sized>(store: &S, date: NaiveDate) -> Result<DayLedger, StoreError> {
        load_json(store, &date_key(date))
    }

    fn save_day<S: KvStore + ?Sized>(
        store: &mut S,
        date: NaiveDate,
        day: &DayLedger,
    ) -> Result<(), StoreError> {
        save_json(store, &date_key(date), day)
    }

    pub fn entry<S: KvStore + ?Sized>(
        store: &S,
        date: NaiveDate,
        habit_id: u32,
    ) -> Result<LedgerEntry, StoreError> {
        Ok(Self::load_day(store, date)?
            .remove(&habit_id)
            .unwrap_or_default())
    }

    pub fn is_completed<S: KvStore + ?Sized>(
        store: &S,
        date: NaiveDate,
        habit_id: u32,
    ) -> Result<bool, StoreError> {
        Ok(Self::entry(store, date, habit_id)?.completed)
    }

    pub fn notes<S: KvStore + ?Sized>(
        store: &S,
        date: NaiveDate,
        habit_id: u32,
    ) -> Result<String, StoreError> {
        Ok(Self::entry(store, date, habit_id)?.notes)
    }

    /// Flip completion, creating the entry if needed. Returns the new state.
    pub fn toggle<S: KvStore + ?Sized>(
        store: &mut S,
        date: NaiveDate,
        habit_id: u32,
    ) -> Result<bool, StoreError> {
        let mut day = Self::load_day(store, date)?;
        let entry = day.entry(habit_id).or_default();
        entry.completed = !entry.completed;
        let completed = entry.completed;
        Self::save_day(store, date, &day)?;
        tracing::debug!(%date, habit_id, completed, "habit toggled");
        Ok(completed)
    }

    /// Overwrite the note, creating the entry if needed.
    pub fn set_notes<S: KvStore + ?Sized>(
        store: &mut S,
        date: NaiveDate,
        habit_id: u32,
        notes: &str,
    ) -> Result<(), StoreError> {
        let mut day = Self::load_day(store, date)?;
        day.entry(habit_id).or_default().notes = notes.to_string();
        Self::save_day(store, date, &day)
    }

    pub fn day_view<S: KvStore + ?Sized>(
        store: &S,
        date: NaiveDate,
        habits: &[Habit],
    ) -> Result<DayView, StoreError> {
        let mut day = Self::load_day(store, date)?;
        let habits = habits
            .iter()
            .map(|habit| {
                let entry = day.remove(&habit.id).unwrap_or_default();
                HabitDay {
                    habit: habit.clone(),
                    completed: entry.completed,
                    notes: entry.notes,
                }
            })
            .collect();
        Ok(DayView { date, habits })
    }
}
