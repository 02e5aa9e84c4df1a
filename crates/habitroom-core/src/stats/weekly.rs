use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::week_dates;
use crate::error::StoreError;
use crate::habits::{Habit, Ledger};
use crate::storage::KvStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyOverview {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    /// Completed (date, habit) pairs.
    pub done: u32,
    /// Every (date, habit) pair in the week.
    pub total: u32,
    /// Days with at least one completed habit.
    pub active_days: u32,
    /// `round(done / total * 100)`, or 0 for an empty registry.
    pub completion_rate_pct: u32,
}

/// Aggregate the seven days beginning at `week_start` over `habits`.
///
/// Only registry habits count; ledger entries for unknown ids are ignored.
pub fn weekly_overview<S: KvStore + ?Sized>(
    store: &S,
    habits: &[Habit],
    week_start: NaiveDate,
) -> Result<WeeklyOverview, StoreError> {
    let dates = week_dates(week_start);
    let mut done = 0u32;
    let mut total = 0u32;
    let mut active_days = 0u32;

    for date in dates {
        let day = Ledger::load_day(store, date)?;
        let mut day_done = 0u32;
        for habit in habits {
            total += 1;
            if day.get(&habit.id).is_some_and(|e| e.completed) {
                done += 1;
                day_done += 1;
            }
        }
        if day_done > 0 {
            active_days += 1;
        }
    }

    let completion_rate_pct = if total > 0 {
        (f64::from(done) / f64::from(total) * 100.0).round() as u32
    } else {
        0
    };

    Ok(WeeklyOverview {
        week_start,
        week_end: dates[6],
        done,
        total,
        active_days,
        completion_rate_pct,
    })
}
