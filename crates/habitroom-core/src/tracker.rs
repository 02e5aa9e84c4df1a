//! Application state and the operations a front end calls.
//!
//! [`Tracker`] owns everything that used to be ambient: the store, the clock,
//! the timer, the bound session, the date being viewed and the single visible
//! notification. Each operation reads what it needs from the store, mutates,
//! writes back and returns the events it produced.

use chrono::{Duration, NaiveDate};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::calendar::week_start;
use crate::clock::Clock;
use crate::error::Result;
use crate::events::Event;
use crate::goals::{Goal, GoalTracker};
use crate::habits::{DayView, Habit, HabitRegistry, HabitTotals, Ledger};
use crate::notify::{Notification, Notifier};
use crate::stats::{monthly_report, weekly_overview, MonthlyReport, WeeklyOverview};
use crate::storage::{keys, load_minutes, Config, KvStore};
use crate::task::{clock_time, Priority, TaskList, TaskSession};
use crate::timer::{Durations, TimerEngine, TimerSnapshot};

pub const ENCOURAGEMENTS: [&str; 5] = [
    "Amazing! Keep it going 🔥",
    "💪 You're making progress",
    "👏 Great persistence",
    "🌟 Achievement +1",
    "🚀 One small step forward",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    Timer,
    Daily,
    Weekly,
    Monthly,
    Goals,
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskRow {
    #[serde(flatten)]
    pub session: TaskSession,
    pub priority_label: &'static str,
    /// Bound to the timer.
    pub current: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimerView {
    pub timer: TimerSnapshot,
    pub tasks: Vec<TaskRow>,
}

/// Data a tab needs to render.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "tab", content = "data", rename_all = "lowercase")]
pub enum View {
    Timer(TimerView),
    Daily(DayView),
    Weekly(WeeklyOverview),
    Monthly(MonthlyReport),
    Goals(Vec<Goal>),
}

pub struct Tracker<S, C> {
    store: S,
    clock: C,
    notifier: Notifier,
    fallback: Durations,
    engine: TimerEngine,
    tasks: TaskList,
    habits: HabitRegistry,
    totals: HabitTotals,
    goals: GoalTracker,
    current_date: NaiveDate,
    week_start: NaiveDate,
    tab: Tab,
    dark_mode: bool,
}

impl<S: KvStore, C: Clock> Tracker<S, C> {
    pub fn new(store: S, clock: C, config: &Config) -> Result<Self> {
        let fallback = config.default_durations();
        let durations = read_durations(&store, fallback)?;
        let dismiss_after = Duration::from_std(config.dismiss_after())
            .unwrap_or_else(|_| Duration::seconds(Notifier::DEFAULT_DISMISS_SECS));
        let today = clock.today();
        Ok(Self {
            notifier: Notifier::new(dismiss_after, config.notifications.enabled),
            engine: TimerEngine::new(durations),
            tasks: TaskList::load(&store)?,
            habits: HabitRegistry::load(&store)?,
            totals: HabitTotals::load(&store)?,
            goals: GoalTracker::load(&store)?,
            current_date: today,
            week_start: week_start(today),
            tab: Tab::Timer,
            dark_mode: config.ui.dark_mode,
            fallback,
            store,
            clock,
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// The visible notification, if it has not timed out.
    pub fn notification(&self) -> Option<&Notification> {
        self.notifier.current(self.clock.now())
    }

    fn emit(&mut self, events: Vec<Event>) -> Vec<Event> {
        let now = self.clock.now();
        for event in &events {
            if let Some(message) = event.message() {
                self.notifier.show(message, now);
            }
        }
        events
    }

    // ── Timer ────────────────────────────────────────────────────────

    /// Stored durations, falling back to the configured defaults.
    pub fn durations(&self) -> Result<Durations> {
        read_durations(&self.store, self.fallback)
    }

    /// Persist new durations and reset the timer. Zero means default.
    pub fn configure_timer(&mut self, work_minutes: u32, break_minutes: u32) -> Result<Vec<Event>> {
        let durations = Durations::new(work_minutes, break_minutes);
        self.store
            .set(keys::WORK_MINUTES, &durations.work_minutes.to_string())?;
        self.store
            .set(keys::BREAK_MINUTES, &durations.break_minutes.to_string())?;
        tracing::info!(
            work_minutes = durations.work_minutes,
            break_minutes = durations.break_minutes,
            "timer durations configured"
        );
        let mut events = self.reset_timer()?;
        events.push(Event::DurationsConfigured {
            work_minutes: durations.work_minutes,
            break_minutes: durations.break_minutes,
        });
        Ok(self.emit(events))
    }

    /// Make `session_id` the current session. Fails for unknown ids or while
    /// a countdown is in progress.
    pub fn bind_session(&mut self, session_id: i64) -> bool {
        self.tasks.get(session_id).is_some() && self.engine.bind(session_id)
    }

    pub fn bound_session(&self) -> Option<&TaskSession> {
        self.engine.bound_session().and_then(|id| self.tasks.get(id))
    }

    pub fn engine(&self) -> &TimerEngine {
        &self.engine
    }

    /// Start or continue the countdown. No-op without a bound session.
    pub fn start_timer(&mut self) -> Result<Vec<Event>> {
        let events: Vec<Event> = self.engine.start(self.clock.now()).into_iter().collect();
        self.apply_session_effects(&events)?;
        Ok(self.emit(events))
    }

    pub fn pause_timer(&mut self) -> Vec<Event> {
        let events = self.engine.pause(self.clock.now()).into_iter().collect();
        self.emit(events)
    }

    pub fn reset_timer(&mut self) -> Result<Vec<Event>> {
        let durations = self.durations()?;
        let event = self.engine.reset(&durations, self.clock.now());
        Ok(self.emit(vec![event]))
    }

    /// One elapsed second.
    pub fn tick(&mut self) -> Result<Vec<Event>> {
        if !self.engine.is_running() {
            return Ok(Vec::new());
        }
        let durations = self.durations()?;
        let events = self.engine.tick(&durations, self.clock.now());
        self.apply_session_effects(&events)?;
        Ok(self.emit(events))
    }

    pub fn timer_view(&self) -> TimerView {
        let bound = self.engine.bound_session();
        TimerView {
            timer: self.engine.snapshot(),
            tasks: self
                .tasks
                .iter()
                .map(|s| TaskRow {
                    priority_label: s.priority.label(),
                    current: bound == Some(s.id),
                    session: s.clone(),
                })
                .collect(),
        }
    }

    fn apply_session_effects(&mut self, events: &[Event]) -> Result<()> {
        let mut dirty = false;
        for event in events {
            match event {
                Event::TimerStarted { session_id, .. } => {
                    if let Some(session) = self.tasks.get_mut(*session_id) {
                        if session.start_time.is_empty() {
                            session.start_time = clock_time(&self.clock);
                            dirty = true;
                        }
                    }
                }
                Event::WorkCompleted { session_id, .. } => {
                    if let Some(session) = self.tasks.get_mut(*session_id) {
                        session.end_time = clock_time(&self.clock);
                        session.completed = true;
                        dirty = true;
                    }
                }
                _ => {}
            }
        }
        if dirty {
            self.tasks.save(&mut self.store)?;
        }
        Ok(())
    }

    // ── Tasks ────────────────────────────────────────────────────────

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    /// Append a session; priority is clamped into 1..=5.
    pub fn add_task(&mut self, text: &str, tag: &str, priority: i64) -> Result<TaskSession> {
        let session = self
            .tasks
            .add(text, tag, Priority::clamped(priority), &self.clock)?
            .clone();
        self.tasks.save(&mut self.store)?;
        Ok(session)
    }

    /// Remove a session. Deleting the bound session also resets the timer.
    pub fn delete_task(&mut self, id: i64) -> Result<bool> {
        if !self.tasks.delete(id) {
            return Ok(false);
        }
        let durations = self.durations()?;
        self.engine.unbind_if(id, &durations, self.clock.now());
        self.tasks.save(&mut self.store)?;
        Ok(true)
    }

    // ── Habits ───────────────────────────────────────────────────────

    pub fn habits(&self) -> Vec<Habit> {
        self.habits.all()
    }

    pub fn add_habit(&mut self, name: &str, icon: &str) -> Result<Habit> {
        self.habits.add_custom(&mut self.store, name, icon)
    }

    /// Toggle a habit on the date being viewed.
    pub fn toggle_habit(&mut self, habit_id: u32) -> Result<Vec<Event>> {
        self.toggle_habit_on(self.current_date, habit_id)
    }

    /// The ledger and the achievement index change together: if the index
    /// cannot be written, the ledger toggle is undone and the error returned.
    pub fn toggle_habit_on(&mut self, date: NaiveDate, habit_id: u32) -> Result<Vec<Event>> {
        let completed = Ledger::toggle(&mut self.store, date, habit_id)?;
        let previous = self.totals.clone();
        let mut events = Vec::new();
        if completed {
            let encouragement = ENCOURAGEMENTS
                .choose(&mut rand::thread_rng())
                .copied()
                .unwrap_or(ENCOURAGEMENTS[0]);
            events.push(Event::HabitCompleted {
                date,
                habit_id,
                habit_name: self.habits.display_name(habit_id),
                encouragement: encouragement.to_string(),
            });
            if let Some(threshold) = self.totals.record_completion(habit_id) {
                events.push(Event::AchievementUnlocked {
                    habit_id,
                    threshold,
                });
            }
        } else {
            self.totals.record_uncompletion(habit_id);
        }
        if let Err(e) = self.totals.save(&mut self.store) {
            tracing::warn!(%date, habit_id, error = %e, "index write failed, undoing toggle");
            self.totals = previous;
            Ledger::toggle(&mut self.store, date, habit_id)?;
            return Err(e.into());
        }
        Ok(self.emit(events))
    }

    pub fn set_notes(&mut self, habit_id: u32, notes: &str) -> Result<()> {
        self.set_notes_on(self.current_date, habit_id, notes)
    }

    pub fn set_notes_on(&mut self, date: NaiveDate, habit_id: u32, notes: &str) -> Result<()> {
        Ok(Ledger::set_notes(&mut self.store, date, habit_id, notes)?)
    }

    pub fn day_view(&self) -> Result<DayView> {
        self.day_view_on(self.current_date)
    }

    pub fn day_view_on(&self, date: NaiveDate) -> Result<DayView> {
        Ok(Ledger::day_view(&self.store, date, &self.habits.all())?)
    }

    pub fn habit_total(&self, habit_id: u32) -> u32 {
        self.totals.count(habit_id)
    }

    /// Every change is already persisted; this only acknowledges the save.
    pub fn save_day(&mut self) -> Vec<Event> {
        let date = self.current_date;
        self.emit(vec![Event::DaySaved { date }])
    }

    // ── Progress ─────────────────────────────────────────────────────

    pub fn weekly_overview(&self) -> Result<WeeklyOverview> {
        Ok(weekly_overview(&self.store, &self.habits.all(), self.week_start)?)
    }

    /// Report for the current calendar month.
    pub fn monthly_report(&self) -> Result<MonthlyReport> {
        Ok(monthly_report(&self.store, self.clock.today())?)
    }

    // ── Goals ────────────────────────────────────────────────────────

    pub fn goals(&self) -> &[Goal] {
        self.goals.goals()
    }

    pub fn add_goal(&mut self, name: &str, target: Option<u32>) -> Result<Goal> {
        self.goals.add(&mut self.store, &self.clock, name, target)
    }

    pub fn increment_goal(&mut self, id: i64) -> Result<Vec<Event>> {
        let events = self.goals.increment(&mut self.store, id)?.into_iter().collect();
        Ok(self.emit(events))
    }

    // ── Navigation ───────────────────────────────────────────────────

    pub fn current_date(&self) -> NaiveDate {
        self.current_date
    }

    /// Move the viewed date. Offsets past the calendar range leave it unchanged.
    pub fn change_date(&mut self, days: i64) -> NaiveDate {
        if let Some(date) = Duration::try_days(days)
            .and_then(|offset| self.current_date.checked_add_signed(offset))
        {
            self.current_date = date;
        }
        self.current_date
    }

    pub fn jump_to_date(&mut self, date: NaiveDate) {
        self.current_date = date;
    }

    pub fn week_start(&self) -> NaiveDate {
        self.week_start
    }

    pub fn shift_week(&mut self, weeks: i64) -> NaiveDate {
        if let Some(date) = Duration::try_weeks(weeks)
            .and_then(|offset| self.week_start.checked_add_signed(offset))
        {
            self.week_start = date;
        }
        self.week_start
    }

    /// Show the week containing `date`.
    pub fn jump_to_week(&mut self, date: NaiveDate) {
        self.week_start = week_start(date);
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    /// Switch tabs and reload the data that tab shows.
    pub fn switch_tab(&mut self, tab: Tab) -> Result<View> {
        self.tab = tab;
        Ok(match tab {
            Tab::Timer => View::Timer(self.timer_view()),
            Tab::Daily => View::Daily(self.day_view()?),
            Tab::Weekly => View::Weekly(self.weekly_overview()?),
            Tab::Monthly => View::Monthly(self.monthly_report()?),
            Tab::Goals => View::Goals(self.goals().to_vec()),
        })
    }

    /// Theme flag. Not persisted.
    pub fn toggle_dark_mode(&mut self) -> bool {
        self.dark_mode = !self.dark_mode;
        self.dark_mode
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }
}

fn read_durations<S: KvStore + ?Sized>(store: &S, fallback: Durations) -> Result<Durations> {
    Ok(Durations::new(
        load_minutes(store, keys::WORK_MINUTES)?.unwrap_or(fallback.work_minutes),
        load_minutes(store, keys::BREAK_MINUTES)?.unwrap_or(fallback.break_minutes),
    ))
}
