//! Text rendering of session events and views.

use focusflow_core::{format_clock, Event, Phase, Session, TaskId, ValidationError};

const BELL: char = '\x07';

pub struct Renderer {
    sound: bool,
    show_focus_details: bool,
}

impl Renderer {
    pub fn new(sound: bool, show_focus_details: bool) -> Self {
        Self {
            sound,
            show_focus_details,
        }
    }

    /// One line per event, or `None` for events that have no shell output.
    pub fn event(&self, session: &Session, event: &Event) -> Option<String> {
        let line = match event {
            Event::TimerStarted {
                phase,
                time_left_secs,
                task_id,
                ..
            } => {
                let mut line = format!("Started {phase} ({} left)", format_clock(*time_left_secs));
                if *phase == Phase::Work {
                    if let Some(task) = task_label(session, *task_id) {
                        line.push_str(&format!(" on {task}"));
                    }
                }
                line
            }
            Event::TimerPaused {
                phase,
                time_left_secs,
                ..
            } => format!("Paused {phase} at {}", format_clock(*time_left_secs)),
            Event::TimerReset { time_left_secs, .. } => {
                format!("Timer reset ({})", format_clock(*time_left_secs))
            }
            Event::TimerStopped { .. } => "Timer stopped".to_string(),
            Event::PhaseCompleted {
                completed,
                next,
                time_left_secs,
                ..
            } => {
                let bell = if self.sound { BELL.to_string() } else { String::new() };
                format!(
                    "{bell}{completed} complete -> {next} ({})",
                    format_clock(*time_left_secs)
                )
            }
            Event::BreakSkipped {
                cycles,
                time_left_secs,
                ..
            } => format!(
                "Break skipped -> {} ({}), cycles: {cycles}",
                Phase::Work,
                format_clock(*time_left_secs)
            ),
            Event::DurationChanged {
                phase,
                minutes,
                time_left_secs,
                ..
            } => {
                let name = match phase {
                    Phase::Work => "Work",
                    Phase::Break => "Break",
                };
                match time_left_secs {
                    Some(secs) => format!(
                        "{name} duration set to {minutes} min (clock {})",
                        format_clock(*secs)
                    ),
                    None => format!("{name} duration set to {minutes} min"),
                }
            }
            Event::DistractionRecorded {
                score,
                distractions,
                ..
            } => format!("Distraction recorded: focus {score}% ({distractions} total)"),
            Event::TaskAdded {
                task_id,
                title,
                estimated_pomodoros,
                ..
            } => format!("Added #{task_id} {title} (estimate {estimated_pomodoros})"),
            Event::TaskUpdated {
                task_id,
                title,
                estimated_pomodoros,
                completed,
                ..
            } => {
                let done = if *completed { ", done" } else { "" };
                format!("Updated #{task_id} {title} (estimate {estimated_pomodoros}{done})")
            }
            Event::TaskDeleted { task_id, .. } => format!("Deleted #{task_id}"),
            Event::TaskProgressed {
                task_id,
                completed_pomodoros,
                estimated_pomodoros,
                completed,
                ..
            } => {
                let mut line =
                    format!("#{task_id} progress {completed_pomodoros}/{estimated_pomodoros}");
                if *completed {
                    line.push_str(" - completed!");
                }
                line
            }
            Event::ActiveTaskChanged { to, .. } => match task_label(session, *to) {
                Some(task) => format!("Current task: {task}"),
                None => "No task selected".to_string(),
            },
            Event::Notice { message, .. } => format!("! {message}"),
            Event::StateSnapshot { .. } => return None,
        };
        Some(line)
    }

    pub fn rejection(reason: &ValidationError) -> String {
        format!("! {reason}")
    }

    pub fn status(&self, session: &Session) -> String {
        let timer = session.timer();
        let state = if timer.is_active() { "running" } else { "paused" };
        let mut lines = vec![format!(
            "[{}] {} {state}",
            timer.phase(),
            format_clock(timer.time_left_secs())
        )];

        match session.active_task() {
            Some(task) => lines.push(format!(
                "Current task: #{} {} ({}/{}, {:.0}%)",
                task.id(),
                task.title(),
                task.completed_pomodoros(),
                task.estimated_pomodoros(),
                task.progress_pct()
            )),
            None => lines.push("Current task: none".to_string()),
        }

        let focus = session.focus();
        lines.push(format!(
            "Cycles: {}   Focus: {}% ({})",
            timer.cycles(),
            focus.score(),
            focus.level()
        ));
        if self.show_focus_details {
            lines.push(format!("Detected distractions: {}", focus.distractions()));
            lines.push(format!("Completed sessions: {}", timer.cycles()));
        }
        lines.join("\n")
    }

    pub fn tasks(&self, session: &Session) -> String {
        if session.tasks().is_empty() {
            return "No tasks yet. Add one with: add <estimate> <title>".to_string();
        }
        let active = session.active_task_id();
        session
            .tasks()
            .iter()
            .map(|task| {
                let marker = if Some(task.id()) == active { '*' } else { ' ' };
                let check = if task.is_completed() { 'x' } else { ' ' };
                format!(
                    "{marker} #{} [{check}] {}  {}/{} ({:.0}%)",
                    task.id(),
                    task.title(),
                    task.completed_pomodoros(),
                    task.estimated_pomodoros(),
                    task.progress_pct()
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn task_label(session: &Session, id: Option<TaskId>) -> Option<String> {
    let task = session.tasks().get(id?)?;
    Some(format!("#{} {}", task.id(), task.title()))
}
