use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "guildscout", version, about = "Guildscout CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute the full selection-and-dispatch pipeline
    Run {
        /// Compute winners and slots without persisting or sending
        #[arg(long)]
        dry_run: bool,
    },
    /// Stored level snapshot
    Snapshot {
        #[command(subcommand)]
        action: commands::snapshot::SnapshotAction,
    },
    /// Winner blacklist management
    Blacklist {
        #[command(subcommand)]
        action: commands::blacklist::BlacklistAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Send a single invitation immediately
    Send {
        /// Recipient player name
        name: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Run { dry_run } => commands::run::run(dry_run),
        Commands::Snapshot { action } => commands::snapshot::run(action),
        Commands::Blacklist { action } => commands::blacklist::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Send { name } => commands::send::run(&name),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
