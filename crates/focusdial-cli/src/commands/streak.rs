use clap::Subcommand;
use focusdial_core::storage::analytics::multiple_key;
use focusdial_core::Config;
use serde_json::json;

use super::{open_session, print_json, CliResult};

#[derive(Subcommand)]
pub enum StreakAction {
    /// Plan a streak of N sessions (1-10); restarts today's streak
    Count {
        count: u32,
    },
    /// Jump to block I of today's streak (0-based)
    Jump {
        index: u32,
    },
    /// Show streak progress
    Show,
}

pub fn run(action: StreakAction, config: &Config) -> CliResult {
    let mut orchestrator = open_session(config)?;
    match action {
        StreakAction::Count { count } => orchestrator.set_session_count(count)?,
        StreakAction::Jump { index } => orchestrator.set_session_index(index)?,
        StreakAction::Show => {}
    }

    let today = orchestrator.today_key();
    let streak = orchestrator.storage().record(&multiple_key(&today));
    print_json(&json!({
        "mode": orchestrator.mode().id,
        "multipleSession": orchestrator.mode().multiple_session,
        "sessionIndex": orchestrator.session_index(),
        "sessionCount": orchestrator.session_count(),
        "minutesToday": streak.time(),
    }))
}
