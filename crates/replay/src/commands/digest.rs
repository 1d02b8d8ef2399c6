use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use overworld_core::run_recording;

use crate::content::ContentArgs;
use crate::report::Report;

/// Play a recording once and print the digest at each checkpoint
#[derive(Parser)]
pub struct Digest {
    /// Recording file (RON); defaults to the bundled demo
    #[arg(value_name = "RECORDING")]
    recording: Option<PathBuf>,

    #[command(flatten)]
    content: ContentArgs,

    /// Print checkpoints as JSON
    #[arg(long)]
    json: bool,
}

impl Digest {
    pub fn execute(self) -> Result<()> {
        let content = self.content.load(self.recording.as_ref())?;

        let checkpoints = run_recording(&content.recording, &content.worlds, &content.config)
            .context("Playback failed")?;

        Report::new(content.recording.seed, false, &checkpoints).print(self.json)
    }
}
