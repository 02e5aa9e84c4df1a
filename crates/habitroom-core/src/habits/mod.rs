//! Habit registry, per-day completion ledger and cumulative achievements.

mod achievements;
mod ledger;
mod registry;

pub use achievements::{HabitTotals, ACHIEVEMENT_THRESHOLDS};
pub use ledger::{DayLedger, DayView, HabitDay, Ledger, LedgerEntry};
pub use registry::{builtin_habits, Habit, HabitRegistry};
