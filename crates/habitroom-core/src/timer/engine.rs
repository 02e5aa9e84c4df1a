//! Work/break countdown state machine.
//!
//! The engine does not own a clock or a thread. The caller feeds it one
//! `tick()` per elapsed second and applies the returned events to the task
//! list.
//!
//! ## State Transitions
//!
//! ```text
//! Idle --start--> WorkRunning <--pause/start--> WorkPaused
//! WorkRunning --0s--> BreakRunning --0s--> Idle
//! any --reset--> Idle
//! ```
//!
//! Break cannot be paused; it chains straight off the end of work.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Work,
    Break,
}

/// Configured interval lengths in minutes. Both are at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Durations {
    pub work_minutes: u32,
    pub break_minutes: u32,
}

impl Durations {
    pub const DEFAULT_WORK_MINUTES: u32 = 25;
    pub const DEFAULT_BREAK_MINUTES: u32 = 5;

    /// Zero means "not set" and falls back to 25/5.
    pub fn new(work_minutes: u32, break_minutes: u32) -> Self {
        Self {
            work_minutes: if work_minutes == 0 {
                Self::DEFAULT_WORK_MINUTES
            } else {
                work_minutes
            },
            break_minutes: if break_minutes == 0 {
                Self::DEFAULT_BREAK_MINUTES
            } else {
                break_minutes
            },
        }
    }

    pub fn work_secs(&self) -> u64 {
        u64::from(self.work_minutes).saturating_mul(60)
    }

    pub fn break_secs(&self) -> u64 {
        u64::from(self.break_minutes).saturating_mul(60)
    }
}

impl Default for Durations {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WORK_MINUTES, Self::DEFAULT_BREAK_MINUTES)
    }
}

/// Read-only view of the engine for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub state: TimerState,
    pub phase: Phase,
    pub remaining_secs: u64,
    /// `MM:SS`
    pub display: String,
    pub bound_session: Option<i64>,
}

/// Core timer engine.
#[derive(Debug, Clone)]
pub struct TimerEngine {
    state: TimerState,
    phase: Phase,
    remaining_secs: u64,
    bound_session: Option<i64>,
}

impl TimerEngine {
    /// Idle, in the work phase, loaded with the work duration.
    pub fn new(durations: Durations) -> Self {
        Self {
            state: TimerState::Idle,
            phase: Phase::Work,
            remaining_secs: durations.work_secs(),
            bound_session: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn bound_session(&self) -> Option<i64> {
        self.bound_session
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            state: self.state,
            phase: self.phase,
            remaining_secs: self.remaining_secs,
            display: format_clock(self.remaining_secs),
            bound_session: self.bound_session,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Associate a session with the timer. Only allowed while idle.
    pub fn bind(&mut self, session_id: i64) -> bool {
        if self.state != TimerState::Idle || self.phase != Phase::Work {
            return false;
        }
        self.bound_session = Some(session_id);
        true
    }

    /// Drop the binding if it points at `session_id`, resetting the countdown.
    pub fn unbind_if(&mut self, session_id: i64, durations: &Durations, at: NaiveDateTime) -> Option<Event> {
        if self.bound_session == Some(session_id) {
            Some(self.reset(durations, at))
        } else {
            None
        }
    }

    /// No-op without a bound session or when already running.
    pub fn start(&mut self, at: NaiveDateTime) -> Option<Event> {
        let session_id = self.bound_session?;
        match self.state {
            TimerState::Idle | TimerState::Paused => {
                self.state = TimerState::Running;
                tracing::info!(phase = ?self.phase, remaining = self.remaining_secs, "timer started");
                Some(Event::TimerStarted {
                    session_id,
                    phase: self.phase,
                    remaining_secs: self.remaining_secs,
                    at,
                })
            }
            TimerState::Running => None,
        }
    }

    /// Work phase only.
    pub fn pause(&mut self, at: NaiveDateTime) -> Option<Event> {
        if self.state != TimerState::Running || self.phase != Phase::Work {
            return None;
        }
        self.state = TimerState::Paused;
        tracing::info!(remaining = self.remaining_secs, "timer paused");
        Some(Event::TimerPaused {
            remaining_secs: self.remaining_secs,
            at,
        })
    }

    pub fn reset(&mut self, durations: &Durations, at: NaiveDateTime) -> Event {
        self.state = TimerState::Idle;
        self.phase = Phase::Work;
        self.bound_session = None;
        self.remaining_secs = durations.work_secs();
        tracing::info!(remaining = self.remaining_secs, "timer reset");
        Event::TimerReset {
            remaining_secs: self.remaining_secs,
            at,
        }
    }

    /// Advance one second. Reaching zero completes the current phase.
    pub fn tick(&mut self, durations: &Durations, at: NaiveDateTime) -> Vec<Event> {
        if self.state != TimerState::Running {
            return Vec::new();
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.complete(durations, at)
        } else {
            Vec::new()
        }
    }

    /// Finish the current phase immediately.
    ///
    /// Work completion loads the break and starts it. Break completion resets.
    pub fn complete(&mut self, durations: &Durations, at: NaiveDateTime) -> Vec<Event> {
        let mut events = Vec::new();
        match self.phase {
            Phase::Work => {
                let Some(session_id) = self.bound_session else {
                    return events;
                };
                tracing::info!(session_id, "work interval complete");
                events.push(Event::WorkCompleted { session_id, at });
                self.state = TimerState::Idle;
                self.phase = Phase::Break;
                self.remaining_secs = durations.break_secs();
                events.extend(self.start(at));
            }
            Phase::Break => {
                tracing::info!("break complete");
                events.push(Event::BreakCompleted { at });
                events.push(self.reset(durations, at));
            }
        }
        events
    }
}

/// Zero-padded `MM:SS`. Minutes are not wrapped at 60.
pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 4)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn one_minute() -> Durations {
        Durations::new(1, 1)
    }

    #[test]
    fn start_without_session_is_noop() {
        let mut engine = TimerEngine::new(Durations::default());
        assert!(engine.start(at()).is_none());
        assert_eq!(engine.state(), TimerState::Idle);
        assert_eq!(engine.remaining_secs(), 25 * 60);
    }

    #[test]
    fn start_pause_start() {
        let mut engine = TimerEngine::new(Durations::default());
        assert!(engine.bind(7));
        assert!(engine.start(at()).is_some());
        assert_eq!(engine.state(), TimerState::Running);
        assert!(engine.start(at()).is_none());

        engine.tick(&Durations::default(), at());
        assert!(engine.pause(at()).is_some());
        assert_eq!(engine.state(), TimerState::Paused);
        assert_eq!(engine.remaining_secs(), 25 * 60 - 1);

        // Paused engines ignore ticks.
        assert!(engine.tick(&Durations::default(), at()).is_empty());
        assert_eq!(engine.remaining_secs(), 25 * 60 - 1);

        assert!(engine.start(at()).is_some());
        assert_eq!(engine.state(), TimerState::Running);
    }

    #[test]
    fn work_completion_chains_into_running_break() {
        let durations = Durations::new(1, 2);
        let mut engine = TimerEngine::new(durations);
        engine.bind(1);
        engine.start(at());
        let mut events = Vec::new();
        for _ in 0..60 {
            events.extend(engine.tick(&durations, at()));
        }
        assert!(matches!(events[0], Event::WorkCompleted { session_id: 1, .. }));
        assert!(matches!(
            events[1],
            Event::TimerStarted { phase: Phase::Break, remaining_secs: 120, .. }
        ));
        assert_eq!(engine.phase(), Phase::Break);
        assert_eq!(engine.state(), TimerState::Running);
        assert_eq!(engine.remaining_secs(), 120);
    }

    #[test]
    fn break_cannot_be_paused_or_rebound() {
        let mut engine = TimerEngine::new(one_minute());
        engine.bind(1);
        engine.start(at());
        engine.complete(&one_minute(), at());
        assert!(engine.pause(at()).is_none());
        assert!(!engine.bind(2));
        assert_eq!(engine.state(), TimerState::Running);
    }

    #[test]
    fn break_completion_resets_to_work_duration() {
        let mut engine = TimerEngine::new(one_minute());
        engine.bind(1);
        engine.start(at());
        engine.complete(&one_minute(), at());
        let refreshed = Durations::new(3, 1);
        let events = engine.complete(&refreshed, at());
        assert!(matches!(events[0], Event::BreakCompleted { .. }));
        assert!(matches!(events[1], Event::TimerReset { remaining_secs: 180, .. }));
        assert_eq!(engine.state(), TimerState::Idle);
        assert_eq!(engine.phase(), Phase::Work);
        assert_eq!(engine.bound_session(), None);
    }

    #[test]
    fn reset_clears_binding() {
        let mut engine = TimerEngine::new(one_minute());
        engine.bind(9);
        engine.start(at());
        engine.reset(&one_minute(), at());
        assert_eq!(engine.bound_session(), None);
        assert!(engine.start(at()).is_none());
    }

    #[test]
    fn format_clock_pads() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(65), "01:05");
        assert_eq!(format_clock(25 * 60), "25:00");
        assert_eq!(format_clock(120 * 60), "120:00");
    }

    #[test]
    fn zero_durations_fall_back() {
        let d = Durations::new(0, 0);
        assert_eq!(d, Durations::default());
        assert_eq!(d.work_secs(), 1500);
        assert_eq!(d.break_secs(), 300);
    }
}
