use clap::{CommandFactory, Parser, Subcommand};
use focusdial_core::Config;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "focusdial", version, about = "Focusdial focus timer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Timer control
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Work mode selection
    Mode {
        #[command(subcommand)]
        action: commands::mode::ModeAction,
    },
    /// Multi-session streak planning
    Streak {
        #[command(subcommand)]
        action: commands::streak::StreakAction,
    },
    /// Work / break status
    Status {
        #[command(subcommand)]
        action: commands::status::StatusAction,
    },
    /// Remembered picker values
    Choices {
        #[command(subcommand)]
        action: commands::choices::ChoicesAction,
    },
    /// Focus statistics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

/// `FOCUSDIAL_LOG` wins over the configured filter. Logs go to stderr so
/// JSON on stdout stays parseable.
fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_env("FOCUSDIAL_LOG")
        .or_else(|_| EnvFilter::try_new(&config.logging.filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };
    init_tracing(&config);

    let result = match cli.command {
        Commands::Timer { action } => commands::timer::run(action, &config),
        Commands::Mode { action } => commands::mode::run(action, &config),
        Commands::Streak { action } => commands::streak::run(action, &config),
        Commands::Status { action } => commands::status::run(action, &config),
        Commands::Choices { action } => commands::choices::run(action, &config),
        Commands::Stats { action } => commands::stats::run(action, &config),
        Commands::Config { action } => commands::config::run(action, config),
        Commands::Completions { shell } => commands::completions::run(shell, Cli::command()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
