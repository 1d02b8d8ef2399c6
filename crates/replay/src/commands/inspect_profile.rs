//! Decode a profile written by a host's save hook.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use overworld_core::Profile;
use overworld_core::state::Statistics;
use serde::Serialize;

/// Decode a bincode profile and print a summary
#[derive(Parser)]
pub struct InspectProfile {
    /// Profile file produced by `Profile::encode`
    #[arg(value_name = "FILE")]
    path: PathBuf,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct ProfileSummary<'a> {
    name: &'a str,
    quest: u8,
    hearts: u8,
    hp: u16,
    rupees: u16,
    bombs: u8,
    keys: u8,
    triforce: u8,
    rooms_recorded: usize,
    stats: &'a Statistics,
}

impl<'a> ProfileSummary<'a> {
    fn new(profile: &'a Profile) -> Self {
        Self {
            name: &profile.name,
            quest: profile.quest,
            hearts: profile.hearts,
            hp: profile.hp,
            rupees: profile.inventory.rupees,
            bombs: profile.inventory.bombs,
            keys: profile.inventory.keys,
            triforce: profile.inventory.triforce,
            rooms_recorded: profile.rooms().count(),
            stats: &profile.stats,
        }
    }
}

impl InspectProfile {
    pub fn execute(self) -> Result<()> {
        let bytes = fs::read(&self.path)
            .with_context(|| format!("Failed to read profile: {}", self.path.display()))?;
        let profile = Profile::decode(&bytes)
            .with_context(|| format!("Failed to decode profile: {}", self.path.display()))?;
        let summary = ProfileSummary::new(&profile);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        } else {
            println!("{} (quest {})", summary.name, summary.quest + 1);
            println!("  hearts   {} ({} hp)", summary.hearts, summary.hp);
            println!(
                "  items    {} rupees, {} bombs, {} keys",
                summary.rupees, summary.bombs, summary.keys
            );
            println!("  triforce {:08b}", summary.triforce);
            println!("  rooms    {}", summary.rooms_recorded);
            println!(
                "  stats    {} deaths, {} kills, {} rooms visited",
                summary.stats.deaths, summary.stats.kills, summary.stats.rooms_visited
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_reflects_the_decoded_profile() {
        let mut profile = Profile::new("LINK", 3);
        profile.inventory.rupees = 42;
        profile.stats.deaths = 2;
        let decoded = Profile::decode(&profile.encode().unwrap()).unwrap();

        let summary = ProfileSummary::new(&decoded);

        assert_eq!(summary.name, "LINK");
        assert_eq!(summary.rupees, 42);
        assert_eq!(summary.stats.deaths, 2);
        assert_eq!(summary.rooms_recorded, 0);
    }

    #[test]
    fn garbage_bytes_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.bin");
        fs::write(&path, [0xFF, 0x01]).unwrap();

        let cmd = InspectProfile { path, json: false };
        assert!(cmd.execute().is_err());
    }
}
