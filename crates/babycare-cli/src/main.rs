use babycare_core::storage::LogFormat;
use babycare_core::Config;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "babycare", version, about = "Babycare CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Baby profiles
    Baby {
        #[command(subcommand)]
        action: commands::baby::BabyAction,
    },
    /// Log a care activity
    Log(commands::log::LogArgs),
    /// Recent activities grouped by day
    Timeline(commands::timeline::TimelineArgs),
    /// Daily care statistics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Smart reminder suggestions
    Suggest(commands::suggest::SuggestArgs),
    /// Age-appropriate parenting tips
    Tips(commands::tips::TipsArgs),
    /// Reminder management
    Reminder {
        #[command(subcommand)]
        action: commands::reminder::ReminderAction,
    },
    /// Cry analysis records
    Cry {
        #[command(subcommand)]
        action: commands::cry::CryAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    match config.logging.format {
        LogFormat::Compact => builder.compact().init(),
        LogFormat::Pretty => builder.pretty().init(),
    }
}

fn main() {
    let cli = Cli::parse();
    // A broken config file still gets reported by the config commands.
    init_logging(&Config::load_or_default());

    let result = match cli.command {
        Commands::Baby { action } => commands::baby::run(action),
        Commands::Log(args) => commands::log::run(args),
        Commands::Timeline(args) => commands::timeline::run(args),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Suggest(args) => commands::suggest::run(args),
        Commands::Tips(args) => commands::tips::run(args),
        Commands::Reminder { action } => commands::reminder::run(action),
        Commands::Cry { action } => commands::cry::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
