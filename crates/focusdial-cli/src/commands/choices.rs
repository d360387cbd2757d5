use clap::{Subcommand, ValueEnum};
use focusdial_core::{Choices, Config, Theme};

use super::{open_storage, print_json, CliResult};

#[derive(Clone, Copy, ValueEnum)]
pub enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for Theme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Light => Theme::Light,
            ThemeArg::Dark => Theme::Dark,
        }
    }
}

#[derive(Subcommand)]
pub enum ChoicesAction {
    /// Show remembered work/break minutes, session count and theme
    Show,
    /// Remember the display theme
    Theme {
        #[arg(value_enum)]
        theme: ThemeArg,
    },
}

pub fn run(action: ChoicesAction, config: &Config) -> CliResult {
    let storage = open_storage(config)?;
    match action {
        ChoicesAction::Show => print_json(&storage.choices()),
        ChoicesAction::Theme { theme } => {
            print_json(&storage.update_choices(Choices::theme(theme.into())))
        }
    }
}
