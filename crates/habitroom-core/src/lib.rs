//! # Habitroom Core Library
//!
//! Business logic for Habitroom, a personal productivity tracker: a
//! work/break focus timer bound to task sessions, a daily habit checklist,
//! weekly and monthly progress reports, and long-term goals.
//!
//! Front ends (the `habitroom` CLI, or any GUI shell) are thin layers that
//! relay user intents to [`Tracker`] and render what it returns.
//!
//! ## Architecture
//!
//! - **Storage**: a synchronous string key-value store ([`KvStore`]), backed
//!   by SQLite on disk, plus TOML configuration
//! - **Calendar**: date-derived ledger keys and week arithmetic
//! - **Timer Engine**: a tick-driven work/break state machine
//! - **Habits**: registry, per-day ledger and achievement counters
//! - **Stats**: weekly overview and monthly per-day series
//! - **Goals**: named numeric targets
//!
//! ## Key Components
//!
//! - [`Tracker`]: application state and every user-facing operation
//! - [`TimerEngine`]: core timer state machine
//! - [`Database`]: persistent key-value store
//! - [`Config`]: application configuration management

pub mod calendar;
pub mod clock;
pub mod error;
pub mod events;
pub mod goals;
pub mod habits;
pub mod notify;
pub mod stats;
pub mod storage;
pub mod task;
pub mod timer;
pub mod tracker;

pub use calendar::{date_key, parse_date_key, week_start};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ConfigError, CoreError, StoreError, ValidationError};
pub use events::Event;
pub use goals::{Goal, GoalTracker};
pub use habits::{DayView, Habit, HabitRegistry, Ledger, LedgerEntry};
pub use notify::{Notification, Notifier};
pub use stats::{MonthlyReport, WeeklyOverview};
pub use storage::{Config, Database, KvStore, MemoryStore};
pub use task::{Priority, TaskList, TaskSession};
pub use timer::{Durations, Phase, Ticker, TimerEngine, TimerSnapshot, TimerState};
pub use tracker::{Tab, Tracker, View};
