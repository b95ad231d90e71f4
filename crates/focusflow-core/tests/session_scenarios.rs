//! Integration tests for the session state machine.
//!
//! Walks a session through whole work/break cycles the way the shell drives
//! it: one tick per second, intents in between.

use focusflow_core::{Event, Phase, Session, TaskId, ValidationError};

fn run_ticks(session: &mut Session, n: u32) -> Vec<Event> {
    (0..n).flat_map(|_| session.tick()).collect()
}

fn add(session: &mut Session, title: &str, estimate: u32) -> TaskId {
    let events = session.add_task(title, estimate).unwrap();
    match events[0] {
        Event::TaskAdded { task_id, .. } => task_id,
        ref other => panic!("Expected TaskAdded, got {other:?}"),
    }
}

#[test]
fn work_phase_credits_active_task() {
    let mut session = Session::new(25, 5);
    let t1 = add(&mut session, "Write report", 1);
    session.start().unwrap();

    let events = run_ticks(&mut session, 1500);

    let task = session.tasks().get(t1).unwrap();
    assert_eq!(task.completed_pomodoros(), 1);
    assert!(task.is_completed());
    assert_eq!(session.timer().phase(), Phase::Break);
    assert_eq!(session.timer().time_left_secs(), 300);
    assert_eq!(events.iter().filter(|e| e.is_completion_signal()).count(), 1);
}

#[test]
fn break_end_clears_active_task_when_all_done() {
    let mut session = Session::new(25, 5);
    add(&mut session, "Write report", 1);
    session.start().unwrap();
    run_ticks(&mut session, 1500);

    let events = run_ticks(&mut session, 300);

    assert_eq!(session.timer().phase(), Phase::Work);
    assert_eq!(session.timer().cycles(), 1);
    assert_eq!(session.active_task_id(), None);
    assert_eq!(session.timer().time_left_secs(), 1500);
    // Keeps running with nothing to credit.
    assert!(session.is_active());
    assert_eq!(events.iter().filter(|e| e.is_completion_signal()).count(), 1);
}

#[test]
fn start_with_empty_registry_is_refused() {
    let mut session = Session::new(25, 5);

    let err = session.start().unwrap_err();

    assert_eq!(err, ValidationError::NoTasks);
    assert_eq!(err.to_string(), "Add at least one task before starting the timer");
    assert!(!session.is_active());
}

#[test]
fn pause_while_idle_costs_focus() {
    let mut session = Session::new(25, 5);
    let t1 = add(&mut session, "Read paper", 2);
    session.set_active_task(t1).unwrap();

    session.pause();

    assert_eq!(session.focus().score(), 95);
    assert_eq!(session.focus().distractions(), 1);
    assert!(!session.is_active());
}

#[test]
fn edit_estimate_is_clamped_to_progress() {
    let mut session = Session::new(25, 5);
    let t1 = add(&mut session, "Refactor", 3);
    session.start().unwrap();
    run_ticks(&mut session, 1500);
    assert_eq!(session.tasks().get(t1).unwrap().completed_pomodoros(), 1);

    session.edit_task(t1, "Refactor", 0).unwrap();

    let task = session.tasks().get(t1).unwrap();
    assert_eq!(task.estimated_pomodoros(), 1);
    assert!(task.is_completed());
    assert_eq!(session.active_task_id(), None);
}

#[test]
fn multi_task_day() {
    let mut session = Session::new(2, 1);
    let a = add(&mut session, "Emails", 1);
    let b = add(&mut session, "Design doc", 2);
    session.start().unwrap();

    // Emails done after the first work phase; design doc takes over.
    run_ticks(&mut session, 120);
    assert!(session.tasks().get(a).unwrap().is_completed());
    assert_eq!(session.active_task_id(), Some(b));

    // Cut the break short and work through the design doc.
    session.skip_break();
    run_ticks(&mut session, 120 + 60 + 120);
    let doc = session.tasks().get(b).unwrap();
    assert_eq!(doc.completed_pomodoros(), 2);
    assert!(doc.is_completed());
    assert_eq!(session.active_task_id(), None);
    assert_eq!(session.timer().cycles(), 2);

    // Nothing left: skipping the break stops the clock.
    assert_eq!(session.timer().phase(), Phase::Break);
    session.skip_break();
    assert!(!session.is_active());
    assert_eq!(session.start().unwrap_err(), ValidationError::AllTasksCompleted);
}

#[test]
fn stale_tick_after_pause_is_ignored() {
    let mut session = Session::new(25, 5);
    add(&mut session, "Write report", 1);
    session.start().unwrap();
    run_ticks(&mut session, 10);
    session.pause();

    assert!(session.tick().is_empty());
    assert_eq!(session.timer().time_left_secs(), 1490);
}

#[test]
fn paused_duration_edit_resets_current_phase_only() {
    let mut session = Session::new(25, 5);
    add(&mut session, "Write report", 2);
    session.start().unwrap();
    run_ticks(&mut session, 1500);
    session.toggle().unwrap();
    assert_eq!(session.timer().phase(), Phase::Break);

    session.set_work_duration(50);
    assert_eq!(session.timer().time_left_secs(), 300);

    session.set_break_duration(10);
    assert_eq!(session.timer().time_left_secs(), 600);

    session.start().unwrap();
    session.set_break_duration(15);
    assert_eq!(session.timer().time_left_secs(), 600);
}

#[test]
fn reset_keeps_tasks_and_cycles() {
    let mut session = Session::new(1, 1);
    let t1 = add(&mut session, "Write report", 3);
    session.start().unwrap();
    run_ticks(&mut session, 150);

    session.reset();

    assert!(!session.is_active());
    assert_eq!(session.timer().phase(), Phase::Work);
    assert_eq!(session.timer().time_left_secs(), 60);
    assert_eq!(session.timer().cycles(), 1);
    assert_eq!(session.active_task_id(), Some(t1));
    assert_eq!(session.tasks().get(t1).unwrap().completed_pomodoros(), 1);
}

#[test]
fn snapshot_serializes_for_hosts() {
    let mut session = Session::new(25, 5);
    add(&mut session, "Write report", 4);
    let json = serde_json::to_value(session.snapshot()).unwrap();

    assert_eq!(json["type"], "StateSnapshot");
    assert_eq!(json["phase"], "work");
    assert_eq!(json["time_left_secs"], 1500);
    assert_eq!(json["focus_level"], "good");
    assert_eq!(json["tasks"][0]["title"], "Write report");
    assert_eq!(json["tasks"][0]["progress_pct"], 0.0);
}
