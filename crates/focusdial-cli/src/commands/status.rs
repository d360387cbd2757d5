use clap::Subcommand;
use focusdial_core::Config;

use super::{open_session, print_json, CliResult};

#[derive(Subcommand)]
pub enum StatusAction {
    /// Show whether you are working or on a break
    Show,
    /// Take a break; loads the remembered break minutes
    Break,
    /// Back to work; loads the remembered work minutes
    Work,
}

pub fn run(action: StatusAction, config: &Config) -> CliResult {
    let mut orchestrator = open_session(config)?;
    match action {
        StatusAction::Show => return print_json(&orchestrator.status()),
        StatusAction::Break => orchestrator.take_break()?,
        StatusAction::Work => orchestrator.next_session()?,
    }
    print_json(&orchestrator.snapshot())
}
