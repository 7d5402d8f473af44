use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "circuitlog-cli", version, about = "Circuitlog CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Guided workout session control
    Session {
        #[command(subcommand)]
        action: commands::session::SessionAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Per-set notes
    Note {
        #[command(subcommand)]
        action: commands::note::NoteAction,
    },
    /// Rest stopwatch
    Stopwatch {
        #[command(subcommand)]
        action: commands::stopwatch::StopwatchAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Session { action } => commands::session::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Note { action } => commands::note::run(action),
        Commands::Stopwatch { action } => commands::stopwatch::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
