use clap::Subcommand;
use focusdial_core::{Config, WorkMode};

use super::{open_session, print_json, CliResult};

#[derive(Subcommand)]
pub enum ModeAction {
    /// List the available work modes
    List,
    /// Show the selected work mode
    Show,
    /// Select a work mode by id
    Set {
        /// One of: simple, pomodoro, deep, mindfulness
        id: String,
    },
}

pub fn run(action: ModeAction, config: &Config) -> CliResult {
    match action {
        ModeAction::List => print_json(&WorkMode::ALL),
        ModeAction::Show => print_json(open_session(config)?.mode()),
        ModeAction::Set { id } => {
            let mut orchestrator = open_session(config)?;
            orchestrator.select_mode_by_id(&id)?;
            print_json(&orchestrator.snapshot())
        }
    }
}
