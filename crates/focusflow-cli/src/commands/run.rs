use std::time::Duration;

use clap::Args;
use focusflow_core::{ClockDriver, ClockTick, Config, Event, Outcome, Session};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::intent::{self, Intent, HELP};
use crate::render::Renderer;

#[derive(Args)]
pub struct RunArgs {
    /// Work duration in minutes (overrides config)
    #[arg(long)]
    work: Option<u32>,
    /// Break duration in minutes (overrides config)
    #[arg(long = "break")]
    break_minutes: Option<u32>,
    /// Clock period in milliseconds (overrides config)
    #[arg(long)]
    tick_ms: Option<u64>,
    /// Do not ring the terminal bell when a phase completes
    #[arg(long)]
    quiet: bool,
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load()?;
    if let Some(minutes) = args.work {
        config.timer.work_minutes = minutes;
    }
    if let Some(minutes) = args.break_minutes {
        config.timer.break_minutes = minutes;
    }
    if let Some(ms) = args.tick_ms {
        config.timer.tick_interval_ms = ms;
    }

    let session = Session::from_config(&config);
    let renderer = Renderer::new(
        config.notifications.sound && !args.quiet,
        config.ui.show_focus_details,
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(shell(session, renderer, config.timer.tick_period()));
    // A pending stdin read would otherwise keep the runtime alive until Enter.
    runtime.shutdown_background();
    result
}

/// Interleave stdin commands and clock ticks on one task. The session is
/// only ever touched from here.
async fn shell(
    mut session: Session,
    renderer: Renderer,
    period: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    let (tick_tx, mut tick_rx) = mpsc::channel::<ClockTick>(1);
    let mut clock = ClockDriver::new(period);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut waiting: u32 = 0;

    info!(
        work_minutes = session.timer().work_minutes(),
        break_minutes = session.timer().break_minutes(),
        ?period,
        "shell started"
    );
    println!("FocusFlow - type `help` for commands");

    loop {
        tokio::select! {
            Some(tick) = tick_rx.recv() => {
                if clock.is_current(&tick) {
                    for event in session.tick() {
                        emit(&renderer, &session, &event);
                    }
                    waiting = waiting.saturating_sub(1);
                } else {
                    debug!("stale tick dropped");
                }
                drop(tick);
            }
            line = lines.next_line(), if waiting == 0 => {
                let Some(line) = line? else { break };
                match intent::parse(&line) {
                    Ok(None) => {}
                    Ok(Some(Intent::Quit)) => break,
                    Ok(Some(Intent::Wait(ticks))) => waiting = ticks,
                    Ok(Some(intent)) => dispatch(&mut session, &renderer, intent),
                    Err(message) => println!("? {message}"),
                }
            }
            else => break,
        }

        // A stopped clock would never release the input branch.
        if !session.is_active() {
            waiting = 0;
        }
        clock.follow(session.is_active(), &tick_tx);
    }

    clock.disarm();
    debug!("shell finished");
    Ok(())
}

fn dispatch(session: &mut Session, renderer: &Renderer, intent: Intent) {
    let outcome: Outcome = match intent {
        Intent::Start => session.start(),
        Intent::Pause => Ok(session.pause()),
        Intent::Toggle => session.toggle(),
        Intent::Reset => Ok(session.reset()),
        Intent::Skip => Ok(session.skip_break()),
        Intent::Add { estimate, title } => session.add_task(&title, estimate),
        Intent::Edit {
            id,
            estimate,
            title,
        } => session.edit_task(id, &title, estimate),
        Intent::Delete(id) => session.delete_task(id),
        Intent::Select(id) => session.set_active_task(id),
        Intent::Work(minutes) => Ok(session.set_work_duration(minutes)),
        Intent::Break(minutes) => Ok(session.set_break_duration(minutes)),
        Intent::Status => {
            println!("{}", renderer.status(session));
            return;
        }
        Intent::Tasks => {
            println!("{}", renderer.tasks(session));
            return;
        }
        Intent::Json => {
            match serde_json::to_string_pretty(&session.snapshot()) {
                Ok(json) => println!("{json}"),
                Err(e) => eprintln!("error: {e}"),
            }
            return;
        }
        Intent::Help => {
            println!("{HELP}");
            return;
        }
        Intent::Wait(_) | Intent::Quit => return,
    };

    match outcome {
        Ok(events) => {
            for event in &events {
                emit(renderer, session, event);
            }
        }
        Err(reason) => {
            debug!(%reason, "command rejected");
            println!("{}", Renderer::rejection(&reason));
        }
    }
}

fn emit(renderer: &Renderer, session: &Session, event: &Event) {
    if let Some(line) = renderer.event(session, event) {
        println!("{line}");
    }
}
