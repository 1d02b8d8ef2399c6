use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use overworld_core::verify_determinism;

use crate::content::ContentArgs;
use crate::report::Report;

/// Play a recording twice against the same content and compare digests
#[derive(Parser)]
pub struct Verify {
    /// Recording file (RON); defaults to the bundled demo
    #[arg(value_name = "RECORDING")]
    recording: Option<PathBuf>,

    #[command(flatten)]
    content: ContentArgs,

    /// Print checkpoints as JSON
    #[arg(long)]
    json: bool,
}

impl Verify {
    pub fn execute(self) -> Result<()> {
        let content = self.content.load(self.recording.as_ref())?;

        let checkpoints =
            verify_determinism(&content.recording, &content.worlds, &content.config)
                .context("Determinism check failed")?;

        tracing::info!(checkpoints = checkpoints.len(), "Playbacks agree");
        Report::new(content.recording.seed, true, &checkpoints).print(self.json)
    }
}
