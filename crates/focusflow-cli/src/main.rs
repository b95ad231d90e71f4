use std::io::IsTerminal;

use clap::{Parser, Subcommand};

mod commands;
mod intent;
mod render;

#[derive(Parser)]
#[command(name = "focusflow-cli", version, about = "FocusFlow Pomodoro timer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive timer shell
    Run(commands::run::RunArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

/// Logs go to stderr so the shell output on stdout stays clean.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_env("FOCUSFLOW_LOG")
        .unwrap_or_else(|_| "warn".into());

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Run(args) => commands::run::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
