use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::timer::Phase;

/// Every state change worth telling the front end about produces an Event.
/// Events with a [`message`](Event::message) are also shown as notifications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        session_id: i64,
        phase: Phase,
        remaining_secs: u64,
        at: NaiveDateTime,
    },
    TimerPaused {
        remaining_secs: u64,
        at: NaiveDateTime,
    },
    TimerReset {
        remaining_secs: u64,
        at: NaiveDateTime,
    },
    WorkCompleted {
        session_id: i64,
        at: NaiveDateTime,
    },
    BreakCompleted {
        at: NaiveDateTime,
    },
    DurationsConfigured {
        work_minutes: u32,
        break_minutes: u32,
    },
    HabitCompleted {
        date: NaiveDate,
        habit_id: u32,
        habit_name: String,
        encouragement: String,
    },
    /// Cumulative completions of one habit hit a badge threshold.
    AchievementUnlocked {
        habit_id: u32,
        threshold: u32,
    },
    GoalReached {
        goal_id: i64,
        name: String,
    },
    DaySaved {
        date: NaiveDate,
    },
}

impl Event {
    /// User-facing notification text, if this event warrants one.
    pub fn message(&self) -> Option<String> {
        match self {
            Event::WorkCompleted { .. } => Some("🎉 Work interval complete! Time for a break".into()),
            Event::BreakCompleted { .. } => {
                Some("⏰ Break is over! Ready for the next focus session".into())
            }
            Event::DurationsConfigured {
                work_minutes,
                break_minutes,
            } => Some(format!(
                "✅ Timer set to {work_minutes} min work / {break_minutes} min break"
            )),
            Event::HabitCompleted {
                habit_name,
                encouragement,
                ..
            } => Some(format!("🎉 Habit done: {habit_name} | {encouragement}")),
            Event::AchievementUnlocked { threshold: 7, .. } => {
                Some("🏅 Badge earned: 7 days completed!".into())
            }
            Event::AchievementUnlocked { threshold, .. } => {
                Some(format!("🎖️ Badge earned: {threshold} completions!"))
            }
            Event::GoalReached { name, .. } => Some(format!("🎯 Long-term goal reached: {name}")),
            Event::DaySaved { .. } => Some("💾 Today's record saved!".into()),
            Event::TimerStarted { .. } | Event::TimerPaused { .. } | Event::TimerReset { .. } => {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag() {
        let event = Event::GoalReached {
            goal_id: 3,
            name: "Run 100km".into(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "GoalReached");
        assert_eq!(json["goal_id"], 3);
    }

    #[test]
    fn timer_bookkeeping_is_silent() {
        let at = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert!(Event::TimerReset { remaining_secs: 60, at }.message().is_none());
        assert!(Event::BreakCompleted { at }.message().is_some());
        assert_eq!(
            Event::AchievementUnlocked { habit_id: 1, threshold: 30 }.message().unwrap(),
            "🎖️ Badge earned: 30 completions!"
        );
    }
}
