use std::time::Duration;

use clap::Subcommand;
use focusdial_core::{Config, Notification, SessionOrchestrator, SessionRunner};
use tokio::sync::mpsc;

use super::{open_session, print_json, CliResult};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Count down in the foreground; Ctrl-C resets and records partial progress
    Run {
        /// Switch to this work mode first
        #[arg(long)]
        mode: Option<String>,
        /// Use this many minutes (snapped to the mode's step)
        #[arg(long)]
        minutes: Option<u32>,
        /// Jump to this block of the current streak first (0-based)
        #[arg(long)]
        jump: Option<u32>,
    },
    /// Print the current session state as JSON
    Status,
    /// Set and remember the selected minutes
    Minutes {
        minutes: u32,
    },
}

pub fn run(action: TimerAction, config: &Config) -> CliResult {
    match action {
        TimerAction::Run {
            mode,
            minutes,
            jump,
        } => {
            let mut orchestrator = open_session(config)?;
            if let Some(id) = mode {
                orchestrator.select_mode_by_id(&id)?;
            }
            if let Some(minutes) = minutes {
                orchestrator.set_minutes(minutes)?;
            }
            if let Some(index) = jump {
                orchestrator.set_session_index(index)?;
            }
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            runtime.block_on(run_foreground(orchestrator, config.tick_interval()))
        }
        TimerAction::Status => print_json(&open_session(config)?.snapshot()),
        TimerAction::Minutes { minutes } => {
            let mut orchestrator = open_session(config)?;
            orchestrator.set_minutes(minutes)?;
            print_json(&orchestrator.snapshot())
        }
    }
}

async fn run_foreground(mut orchestrator: SessionOrchestrator, tick: Duration) -> CliResult {
    let (tx, mut notifications) = mpsc::unbounded_channel::<Notification>();
    orchestrator.subscribe(tx);

    let mut runner = SessionRunner::new(orchestrator, tick);
    match runner.start().await {
        Some(event) => print_json(&event)?,
        None => return Err("nothing to count down".into()),
    }

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut display = tokio::time::interval(Duration::from_secs(1));

    loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                eprintln!();
                if let Some(event) = runner.reset().await {
                    print_json(&event)?;
                }
                break;
            }
            Some(notification) = notifications.recv() => {
                eprintln!();
                print_json(&notification)?;
                runner.lock().await.acknowledge_finish();
                break;
            }
            _ = display.tick() => {
                let orchestrator = runner.lock().await;
                let left = orchestrator.engine().time_left_secs();
                eprint!(
                    "\r{} [{}] {:02}:{:02} ",
                    orchestrator.mode().label,
                    orchestrator.status().label(),
                    left / 60,
                    left % 60
                );
            }
        }
    }
    Ok(())
}
