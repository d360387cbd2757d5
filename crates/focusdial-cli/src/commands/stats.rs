use clap::Subcommand;
use focusdial_core::storage::analytics::parse_day_key;
use focusdial_core::{Clock, Config, DailySummary, SystemClock, ValidationError, WeekSummary};

use super::{open_storage, print_json, CliResult};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Today's focus time
    Today,
    /// Focus time on a given day
    Day {
        /// Date as YYYY-MM-DD
        date: String,
    },
    /// The last seven days, ending today
    Week,
}

pub fn run(action: StatsAction, config: &Config) -> CliResult {
    let storage = open_storage(config)?;
    let goal = config.defaults.daily_goal_minutes;

    match action {
        StatsAction::Today => {
            let key = SystemClock.today_key();
            print_json(&DailySummary::new(&key, &storage.record(&key), goal))?;
        }
        StatsAction::Day { date } => {
            if parse_day_key(&date).is_none() {
                return Err(ValidationError::InvalidDate(date).into());
            }
            print_json(&DailySummary::new(&date, &storage.record(&date), goal))?;
        }
        StatsAction::Week => {
            let records = storage.daily_records();
            let week = WeekSummary::new(
                SystemClock.today(),
                records.iter().map(|(date, record)| (*date, record)),
                goal,
            );
            print_json(&week)?;
        }
    }
    Ok(())
}
