//! Parsing of shell input lines into user intents.

use focusflow_core::TaskId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Start,
    Pause,
    Toggle,
    Reset,
    Skip,
    Add { estimate: u32, title: String },
    Edit { id: TaskId, estimate: u32, title: String },
    Delete(TaskId),
    Select(TaskId),
    Work(u32),
    Break(u32),
    /// Hold further input until this many ticks have been processed.
    Wait(u32),
    Status,
    Tasks,
    Json,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  start | pause | toggle      control the timer
  reset                       back to a paused, full work session
  skip                        end the current break
  add [estimate] <title>      add a task (estimate defaults to 1)
  edit <id> <estimate> <title>
  delete <id>                 remove a task
  select <id>                 make a task the current one
  work <minutes>              set the work duration
  break <minutes>             set the break duration
  wait <ticks>                let the clock run before reading more input
  status | tasks | json       show the session
  help | quit";

/// Parse one input line. Blank lines and `#` comments yield `None`.
pub fn parse(line: &str) -> Result<Option<Intent>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    let intent = match command.to_ascii_lowercase().as_str() {
        "start" => Intent::Start,
        "pause" => Intent::Pause,
        "toggle" | "t" => Intent::Toggle,
        "reset" => Intent::Reset,
        "skip" | "skip-break" => Intent::Skip,
        "add" => {
            let (estimate, title) = match split_word(rest) {
                (first, title) if first.parse::<u32>().is_ok() => (number(first, "estimate")?, title),
                _ => (1, rest),
            };
            Intent::Add {
                estimate,
                title: title.to_string(),
            }
        }
        "edit" => {
            let (id, rest) = split_word(rest);
            let (estimate, title) = split_word(rest);
            Intent::Edit {
                id: task_id(id)?,
                estimate: number(estimate, "estimate")?,
                title: title.to_string(),
            }
        }
        "delete" | "rm" => Intent::Delete(task_id(rest)?),
        "select" => Intent::Select(task_id(rest)?),
        "work" => Intent::Work(number(rest, "minutes")?),
        "break" => Intent::Break(number(rest, "minutes")?),
        "wait" => Intent::Wait(number(rest, "ticks")?),
        "status" => Intent::Status,
        "tasks" | "ls" => Intent::Tasks,
        "json" => Intent::Json,
        "help" | "?" => Intent::Help,
        "quit" | "exit" | "q" => Intent::Quit,
        other => return Err(format!("unknown command: {other} (try `help`)")),
    };
    Ok(Some(intent))
}

fn split_word(s: &str) -> (&str, &str) {
    match s.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (s, ""),
    }
}

fn number(s: &str, what: &str) -> Result<u32, String> {
    s.parse()
        .map_err(|_| format!("expected {what} as a whole number, got '{s}'"))
}

fn task_id(s: &str) -> Result<TaskId, String> {
    s.parse().map_err(|_| format!("expected a task id, got '{s}'"))
}
