use std::io::Write;

use clap::Subcommand;
use habitroom_core::timer::format_clock;
use habitroom_core::{Ticker, TimerState};

use super::{open_tracker, print_events, print_json, CliResult};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Bind a task and run its work interval and break in the foreground.
    /// Ctrl-C resets the timer and exits.
    Run {
        /// Task session id
        session_id: i64,
        /// Work minutes to configure before starting
        #[arg(long)]
        work: Option<u32>,
        /// Break minutes to configure before starting
        #[arg(long = "break", value_name = "MINUTES")]
        break_minutes: Option<u32>,
    },
    /// Set work and break lengths in minutes (0 means default)
    Config {
        work: u32,
        #[arg(value_name = "BREAK")]
        break_minutes: u32,
    },
    /// Print the timer and task list
    Show,
}

pub fn run(action: TimerAction) -> CliResult {
    match action {
        TimerAction::Run {
            session_id,
            work,
            break_minutes,
        } => run_countdown(session_id, work, break_minutes),
        TimerAction::Config {
            work,
            break_minutes,
        } => {
            let mut tracker = open_tracker()?;
            print_events(&tracker.configure_timer(work, break_minutes)?)
        }
        TimerAction::Show => {
            let tracker = open_tracker()?;
            print_json(&tracker.timer_view())
        }
    }
}

fn run_countdown(session_id: i64, work: Option<u32>, break_minutes: Option<u32>) -> CliResult {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async move {
        let mut tracker = open_tracker()?;
        if work.is_some() || break_minutes.is_some() {
            let current = tracker.durations()?;
            print_events(&tracker.configure_timer(
                work.unwrap_or(current.work_minutes),
                break_minutes.unwrap_or(current.break_minutes),
            )?)?;
        }
        if !tracker.bind_session(session_id) {
            return Err(format!("Task not found: {session_id}").into());
        }
        print_events(&tracker.start_timer()?)?;
        tracing::debug!(session_id, "countdown running");

        let mut ticker = Ticker::every_second();
        let mut ticks = ticker.arm();
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        loop {
            tokio::select! {
                tick = ticks.recv() => {
                    if tick.is_none() {
                        break;
                    }
                    print_events(&tracker.tick()?)?;
                    if tracker.engine().state() == TimerState::Idle {
                        break;
                    }
                    let engine = tracker.engine();
                    eprint!("\r{:?} {}   ", engine.phase(), format_clock(engine.remaining_secs()));
                    std::io::stderr().flush()?;
                }
                _ = &mut ctrl_c => {
                    eprintln!();
                    print_events(&tracker.reset_timer()?)?;
                    break;
                }
            }
        }

        ticker.disarm();
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}
