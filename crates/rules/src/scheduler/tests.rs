//! Tests for the scheduler module.

use helping_core::{ClockSource, ManualClock, WallClockTime};

use super::*;
use crate::rule_set::ReminderRuleSet;
use crate::schema::{OccurrenceKey, ReminderRule, TaskId};

fn at(day: u64, hour: u8, minute: u8) -> WallClockTime {
    WallClockTime::from_day_and_time(day, hour, minute, 0).unwrap()
}

fn at_sec(day: u64, hour: u8, minute: u8, second: u8) -> WallClockTime {
    WallClockTime::from_day_and_time(day, hour, minute, second).unwrap()
}

fn scheduler(rules: Vec<ReminderRule>) -> Scheduler {
    Scheduler::new(ReminderRuleSet::new(rules).unwrap())
}

fn tasks(events: &[crate::schema::FireEvent]) -> Vec<TaskId> {
    events.iter().map(|e| e.task).collect()
}

#[test]
fn periodic_fires_on_interval_minutes_only() {
    let mut s = scheduler(vec![ReminderRule::periodic(TaskId::Restroom, 5)]);
    let mut fired_at = Vec::new();
    for minute in 0..=10 {
        let events = s.tick_at(at(1, 9, minute));
        if !events.is_empty() {
            fired_at.push(minute);
        }
    }
    assert_eq!(fired_at, vec![0, 5, 10]);
}

#[test]
fn time_of_day_fires_once_crossing_its_minute() {
    let mut s = scheduler(vec![ReminderRule::time_of_day(TaskId::Breakfast, 8, 30)]);
    assert!(s.tick_at(at(1, 8, 29)).is_empty());
    let events = s.tick_at(at(1, 8, 30));
    assert!(s.tick_at(at(1, 8, 31)).is_empty());

    assert_eq!(tasks(&events), vec![TaskId::Breakfast]);
    assert_eq!(events[0].at, at(1, 8, 30));
}

#[tokio::test]
async fn unsynchronized_ticks_are_skipped_without_touching_tracker() {
    let mut s = scheduler(vec![ReminderRule::periodic(TaskId::Restroom, 1)]);
    let mut clock = ManualClock::new(at(1, 9, 0));

    for _ in 0..3 {
        assert!(s.tick(&clock).is_empty());
        assert_eq!(s.state(), SchedulerState::Unsynchronized);
        assert!(s.tracker().is_empty());
        clock.advance_minutes(1);
    }
    assert_eq!(s.skipped_ticks(), 3);

    assert!(clock.synchronize().await);
    let events = s.tick(&clock);
    assert_eq!(tasks(&events), vec![TaskId::Restroom]);
    assert_eq!(s.state(), SchedulerState::Idle);
    assert_eq!(s.tracker().len(), 1);
}

#[test]
fn simultaneous_matches_fire_in_declaration_order() {
    let mut s = scheduler(vec![
        ReminderRule::periodic(TaskId::MoveAround, 60),
        ReminderRule::time_of_day(TaskId::Dishes, 9, 0),
    ]);
    let events = s.tick_at(at(1, 9, 0));
    assert_eq!(tasks(&events), vec![TaskId::MoveAround, TaskId::Dishes]);
}

#[test]
fn declaration_order_holds_when_time_of_day_is_listed_first() {
    let mut s = scheduler(vec![
        ReminderRule::time_of_day(TaskId::Lunch, 13, 0),
        ReminderRule::periodic(TaskId::Restroom, 5),
        ReminderRule::periodic(TaskId::FeetUp, 1),
    ]);
    let events = s.tick_at(at(1, 13, 0));
    assert_eq!(
        tasks(&events),
        vec![TaskId::Lunch, TaskId::Restroom, TaskId::FeetUp]
    );
}

#[test]
fn repeated_tick_with_same_time_fires_nothing_new() {
    let mut s = scheduler(vec![
        ReminderRule::periodic(TaskId::Restroom, 5),
        ReminderRule::time_of_day(TaskId::Breakfast, 8, 30),
    ]);
    let now = at(1, 8, 30);
    assert_eq!(s.tick_at(now).len(), 2);
    assert!(s.tick_at(now).is_empty());
    assert!(s.tick_at(now).is_empty());
}

#[test]
fn clock_stepping_back_does_not_refire_minute() {
    let mut s = scheduler(vec![ReminderRule::periodic(TaskId::Restroom, 1)]);
    assert_eq!(s.tick_at(at_sec(1, 9, 0, 50)).len(), 1);
    assert_eq!(s.tick_at(at_sec(1, 9, 1, 10)).len(), 1);
    assert!(s.tick_at(at_sec(1, 9, 0, 40)).is_empty());
    assert!(s.tick_at(at_sec(1, 9, 1, 30)).is_empty());
    assert_eq!(s.tick_at(at_sec(1, 9, 2, 0)).len(), 1);
}

#[test]
fn clock_stepping_back_a_day_does_not_repeat_daily_rule() {
    let mut s = scheduler(vec![ReminderRule::time_of_day(TaskId::Lunch, 13, 0)]);
    assert_eq!(s.tick_at(at(2, 13, 0)).len(), 1);
    assert!(s.tick_at(at(1, 13, 0)).is_empty());
    assert!(s.tick_at(at(2, 13, 0)).is_empty());
    assert_eq!(s.tick_at(at(3, 13, 0)).len(), 1);
}

#[test]
fn polling_every_second_fires_once_per_minute() {
    let mut s = scheduler(vec![ReminderRule::periodic(TaskId::Restroom, 5)]);
    let mut total = 0;
    for second in 0..60 {
        total += s.tick_at(at_sec(1, 10, 5, second)).len();
    }
    assert_eq!(total, 1);
}

#[test]
fn time_of_day_rearms_on_next_day() {
    let mut s = scheduler(vec![ReminderRule::time_of_day(TaskId::WindDown, 18, 0)]);
    assert_eq!(s.tick_at(at(1, 18, 0)).len(), 1);
    assert!(s.tick_at(at_sec(1, 18, 0, 30)).is_empty());
    assert_eq!(s.tick_at(at(2, 18, 0)).len(), 1);
    assert_eq!(
        s.tracker().last_fired(TaskId::WindDown),
        Some(OccurrenceKey::Day(2))
    );
}

#[test]
fn periodic_fires_again_in_next_hour() {
    let mut s = scheduler(vec![ReminderRule::periodic(TaskId::FeetUp, 30)]);
    assert_eq!(s.tick_at(at(1, 9, 30)).len(), 1);
    assert_eq!(s.tick_at(at(1, 10, 0)).len(), 1);
    assert_eq!(s.tick_at(at(1, 10, 30)).len(), 1);
}

#[test]
fn missed_minute_is_not_recovered() {
    let mut s = scheduler(vec![ReminderRule::time_of_day(TaskId::Lunch, 13, 0)]);
    assert!(s.tick_at(at(1, 12, 59)).is_empty());
    // 13:00 was never observed.
    assert!(s.tick_at(at(1, 13, 1)).is_empty());
    assert!(s.tracker().is_empty());
}

#[test]
fn same_time_sequence_gives_same_events() {
    let run = || {
        let mut s = Scheduler::new(ReminderRuleSet::defaults());
        let mut out = Vec::new();
        let mut now = at(3, 7, 55);
        for _ in 0..(12 * 60) {
            out.extend(tasks(&s.tick_at(now)));
            now = now.plus_millis(60_000);
        }
        out
    };
    let first = run();
    assert_eq!(first, run());
    assert!(first.contains(&TaskId::Breakfast));
    assert!(first.contains(&TaskId::WindDown));
}

#[test]
fn defaults_over_one_hour() {
    let mut s = Scheduler::new(ReminderRuleSet::defaults());
    let mut counts = std::collections::HashMap::new();
    for minute in 0..60 {
        for task in tasks(&s.tick_at(at(1, 14, minute))) {
            *counts.entry(task).or_insert(0) += 1;
        }
    }
    // Minutes 0,5,..,55 / 0,11,22,33,44,55 / 0,14,28,42,56
    assert_eq!(counts[&TaskId::Restroom], 12);
    assert_eq!(counts[&TaskId::FeetUp], 6);
    assert_eq!(counts[&TaskId::MoveAround], 5);
    assert!(!counts.contains_key(&TaskId::Lunch));
}

#[test]
fn state_returns_to_idle_after_tick_at() {
    let mut s = scheduler(vec![ReminderRule::periodic(TaskId::Restroom, 5)]);
    assert_eq!(s.state(), SchedulerState::Unsynchronized);
    s.tick_at(at(1, 9, 0));
    assert_eq!(s.state(), SchedulerState::Idle);
    assert_eq!(s.rules().len(), 1);
}

#[test]
fn works_through_boxed_clock() {
    let mut s = scheduler(vec![ReminderRule::periodic(TaskId::Restroom, 5)]);
    let clock: Box<dyn ClockSource> = Box::new(ManualClock::synchronized_at(at(1, 9, 5)));
    assert_eq!(tasks(&s.tick(clock.as_ref())), vec![TaskId::Restroom]);
}
