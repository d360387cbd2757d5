pub mod choices;
pub mod completions;
pub mod config;
pub mod mode;
pub mod stats;
pub mod status;
pub mod streak;
pub mod timer;

use focusdial_core::{Config, CoreError, SessionOrchestrator, Storage};
use serde::Serialize;

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

pub fn open_storage(config: &Config) -> Result<Storage, CoreError> {
    Storage::open(config)
}

pub fn open_session(config: &Config) -> Result<SessionOrchestrator, CoreError> {
    SessionOrchestrator::open(config)
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
