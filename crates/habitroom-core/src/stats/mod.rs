//! Progress aggregation over the habit ledger.
//!
//! Folds per-day ledgers into the weekly overview and the monthly
//! completions-per-day series used by the chart.

mod monthly;
mod weekly;

pub use monthly::{monthly_report, DailyCount, MonthlyReport, REPORT_DAYS};
pub use weekly::{weekly_overview, WeeklyOverview};
