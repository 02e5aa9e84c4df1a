use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::habits::Ledger;
use crate::storage::KvStore;

/// The report always covers this many days, whatever the month length.
pub const REPORT_DAYS: u32 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    pub label: String,
    pub date: NaiveDate,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyReport {
    pub year: i32,
    pub month: u32,
    pub days: Vec<DailyCount>,
}

impl MonthlyReport {
    pub fn total(&self) -> u32 {
        self.days.iter().map(|d| d.count).sum()
    }
}

/// Completed entries per day for days 1..=30 of the month containing `today`.
///
/// Day `n` is the first of the month plus `n - 1` days, so in months shorter
/// than 30 days the tail runs into the following month. Every completed entry
/// in a day's record counts, including ones for habits no longer registered.
pub fn monthly_report<S: KvStore + ?Sized>(
    store: &S,
    today: NaiveDate,
) -> Result<MonthlyReport, StoreError> {
    let first = today.with_day(1).unwrap_or(today);
    let mut days = Vec::with_capacity(REPORT_DAYS as usize);
    for n in 1..=REPORT_DAYS {
        let date = first + Duration::days(i64::from(n - 1));
        let count = Ledger::load_day(store, date)?
            .values()
            .filter(|e| e.completed)
            .count() as u32;
        days.push(DailyCount {
            label: format!("Day {n}"),
            date,
            count,
        });
    }
    Ok(MonthlyReport {
        year: first.year(),
        month: first.month(),
        days,
    })
}
