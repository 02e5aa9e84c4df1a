//! Integration tests for the habit ledger, achievements, reports and goals.

use chrono::{Duration, NaiveDate};
use habitroom_core::{
    Config, Database, Event, FixedClock, KvStore, Ledger, MemoryStore, Tab, Tracker, View,
};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 7, d).unwrap()
}

fn tracker() -> Tracker<MemoryStore, FixedClock> {
    Tracker::new(MemoryStore::new(), FixedClock::on(day(20)), &Config::default()).unwrap()
}

fn achievements(events: &[Event]) -> Vec<u32> {
    events
        .iter()
        .filter_map(|e| match e {
            Event::AchievementUnlocked { threshold, .. } => Some(*threshold),
            _ => None,
        })
        .collect()
}

#[test]
fn test_seven_day_badge_fires_on_seventh_toggle_only() {
    let mut t = tracker();
    for d in 1..=6 {
        let events = t.toggle_habit_on(day(d), 3).unwrap();
        assert!(achievements(&events).is_empty(), "fired early on day {d}");
    }
    let events = t.toggle_habit_on(day(7), 3).unwrap();
    assert_eq!(achievements(&events), [7]);
    assert!(t.notification().unwrap().message.contains("7 days"));

    let events = t.toggle_habit_on(day(8), 3).unwrap();
    assert!(achievements(&events).is_empty());
    assert_eq!(t.habit_total(3), 8);
}

#[test]
fn test_untoggle_then_retoggle_does_not_refire() {
    let mut t = tracker();
    for d in 1..=7 {
        t.toggle_habit_on(day(d), 1).unwrap();
    }
    t.toggle_habit_on(day(7), 1).unwrap();
    assert_eq!(t.habit_total(1), 6);
    let events = t.toggle_habit_on(day(7), 1).unwrap();
    assert!(achievements(&events).is_empty());
}

#[test]
fn test_thirty_completion_badge() {
    let mut t = tracker();
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let mut fired = Vec::new();
    for i in 0..30 {
        let events = t.toggle_habit_on(start + Duration::days(i), 5).unwrap();
        fired.extend(achievements(&events));
    }
    assert_eq!(fired, [7, 30]);
}

#[test]
fn test_untouched_day_and_week_read_as_empty() {
    let t = tracker();
    let view = t.day_view_on(day(1)).unwrap();
    assert!(view.habits.iter().all(|h| !h.completed && h.notes.is_empty()));

    let overview = t.weekly_overview().unwrap();
    assert_eq!(overview.done, 0);
    assert_eq!(overview.active_days, 0);
    assert_eq!(overview.completion_rate_pct, 0);
}

#[test]
fn test_weekly_overview_follows_week_navigation() {
    let mut t = tracker();
    // 2024-07-20 is a Saturday; its week starts Monday the 15th.
    assert_eq!(t.week_start(), day(15));
    t.toggle_habit_on(day(15), 1).unwrap();
    t.toggle_habit_on(day(21), 2).unwrap();
    t.toggle_habit_on(day(22), 2).unwrap();

    let overview = t.weekly_overview().unwrap();
    assert_eq!(overview.done, 2);
    assert_eq!(overview.active_days, 2);

    t.shift_week(1);
    let overview = t.weekly_overview().unwrap();
    assert_eq!(overview.week_start, day(22));
    assert_eq!(overview.done, 1);
}

#[test]
fn test_monthly_report_counts_current_month() {
    let mut t = tracker();
    t.toggle_habit_on(day(1), 1).unwrap();
    t.toggle_habit_on(day(1), 2).unwrap();
    t.toggle_habit_on(day(30), 6).unwrap();
    t.toggle_habit_on(day(31), 6).unwrap();

    let report = t.monthly_report().unwrap();
    assert_eq!(report.month, 7);
    assert_eq!(report.days.len(), 30);
    assert_eq!(report.days[0].count, 2);
    assert_eq!(report.days[29].count, 1);
    assert_eq!(report.total(), 3);
}

#[test]
fn test_goal_reached_on_fifth_increment() {
    let mut t = tracker();
    let goal = t.add_goal("Finish 5 courses", Some(5)).unwrap();
    for _ in 0..4 {
        assert!(t.increment_goal(goal.id).unwrap().is_empty());
    }
    let events = t.increment_goal(goal.id).unwrap();
    assert!(matches!(&events[..], [Event::GoalReached { .. }]));
    assert!(t.goals()[0].is_reached());
    assert!(t.increment_goal(goal.id).unwrap().is_empty());

    match t.switch_tab(Tab::Goals).unwrap() {
        View::Goals(goals) => assert_eq!(goals[0].progress, 6),
        _ => panic!("expected goals view"),
    }
}

#[test]
fn test_custom_habit_joins_registry_and_reports() {
    let mut t = tracker();
    let habit = t.add_habit("Journal", "📝").unwrap();
    assert_eq!(habit.id, 7);
    t.toggle_habit(habit.id).unwrap();
    assert_eq!(t.habits().len(), 7);
    assert!(t.day_view().unwrap().habits[6].completed);
    assert_eq!(t.weekly_overview().unwrap().total, 49);
}

#[test]
fn test_state_survives_reopening_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("habitroom.db");

    {
        let db = Database::open_at(&path).unwrap();
        let mut t = Tracker::new(db, FixedClock::on(day(20)), &Config::default()).unwrap();
        for d in 1..=6 {
            t.toggle_habit_on(day(d), 4).unwrap();
        }
        t.set_notes_on(day(6), 4, "finished chapter").unwrap();
        t.add_goal("Marathon", Some(3)).unwrap();
        t.configure_timer(45, 15).unwrap();
    }

    let db = Database::open_at(&path).unwrap();
    assert_eq!(Ledger::notes(&db, day(6), 4).unwrap(), "finished chapter");
    let mut t = Tracker::new(db, FixedClock::on(day(21)), &Config::default()).unwrap();
    assert_eq!(t.goals()[0].name, "Marathon");
    assert_eq!(t.engine().remaining_secs(), 45 * 60);
    assert_eq!(t.habit_total(4), 6);

    let events = t.toggle_habit_on(day(7), 4).unwrap();
    assert_eq!(achievements(&events), [7]);
}

#[test]
fn test_lost_index_is_rebuilt() {
    let mut store = MemoryStore::new();
    for d in 1..=6 {
        Ledger::toggle(&mut store, day(d), 2).unwrap();
    }
    assert!(store.get("habit_totals").unwrap().is_none());

    let mut t = Tracker::new(store, FixedClock::on(day(20)), &Config::default()).unwrap();
    assert_eq!(t.habit_total(2), 6);
    let events = t.toggle_habit_on(day(7), 2).unwrap();
    assert_eq!(achievements(&events), [7]);
}

#[test]
fn test_malformed_index_is_rebuilt() {
    let mut store = MemoryStore::new();
    for d in 1..=6 {
        Ledger::toggle(&mut store, day(d), 2).unwrap();
    }
    store.set("habit_totals", "{garbage").unwrap();

    let mut t = Tracker::new(store, FixedClock::on(day(20)), &Config::default()).unwrap();
    assert_eq!(t.habit_total(2), 6);
    let events = t.toggle_habit_on(day(7), 2).unwrap();
    assert_eq!(achievements(&events), [7]);
    assert_eq!(t.habit_total(2), 7);
}
