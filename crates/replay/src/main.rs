//! Headless record/playback runner for the overworld engine.
//!
//! Loads world content, engine configuration and a seeded input recording,
//! then steps the engine without a display and reports the state digest at
//! every checkpoint frame.
//!
//! ```bash
//! # Play the bundled demo twice and compare digests
//! cargo run -p overworld-replay -- verify
//!
//! # Digests of a custom recording against custom worlds, as JSON
//! OVERWORLD_WORLDS=./worlds cargo run -p overworld-replay -- digest run.ron --json
//! ```

mod commands;
mod content;
mod report;

use anyhow::Result;
use clap::Parser;
use commands::{Digest, InspectProfile, Verify};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Headless determinism runner
#[derive(Parser)]
#[command(name = "overworld-replay")]
#[command(about = "Record/playback runner for the overworld engine", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Play a recording twice and fail if any checkpoint digest differs
    Verify(Verify),

    /// Play a recording once and print its checkpoint digests
    Digest(Digest),

    /// Decode a saved profile and print a summary
    InspectProfile(InspectProfile),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for OVERWORLD_WORLDS and OVERWORLD_CONFIG)
    let _ = dotenvy::dotenv();

    setup_logging();

    let cli = Cli::parse();

    match cli.command {
        Command::Verify(cmd) => cmd.execute(),
        Command::Digest(cmd) => cmd.execute(),
        Command::InspectProfile(cmd) => cmd.execute(),
    }
}

/// Log to stderr so stdout stays clean for reports.
fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .init();
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn verify_accepts_a_recording_and_json() {
        let cli = Cli::try_parse_from(["overworld-replay", "verify", "run.ron", "--json"]).unwrap();
        assert!(matches!(cli.command, Command::Verify(_)));
    }
}
