//! Checkpoint output: a plain table or JSON on stdout.

use overworld_core::Checkpoint;
use serde::Serialize;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct CheckpointRow {
    pub frame: u64,
    /// SHA-256 of the state snapshot, hex encoded.
    pub digest: String,
}

impl From<&Checkpoint> for CheckpointRow {
    fn from(checkpoint: &Checkpoint) -> Self {
        Self {
            frame: checkpoint.frame,
            digest: hex::encode(checkpoint.digest),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub seed: u64,
    pub verified: bool,
    pub checkpoints: Vec<CheckpointRow>,
}

impl Report {
    pub fn new(seed: u64, verified: bool, checkpoints: &[Checkpoint]) -> Self {
        Self {
            seed,
            verified,
            checkpoints: checkpoints.iter().map(CheckpointRow::from).collect(),
        }
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_table(&self) -> String {
        let mut out = format!("seed {:#x}\n", self.seed);
        for row in &self.checkpoints {
            out.push_str(&format!("{:>8}  {}\n", row.frame, row.digest));
        }
        if self.verified {
            out.push_str("two playbacks agree\n");
        }
        out
    }

    pub fn print(&self, json: bool) -> anyhow::Result<()> {
        if json {
            println!("{}", self.to_json()?);
        } else {
            print!("{}", self.to_table());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Report {
        let checkpoints = [
            Checkpoint {
                frame: 0,
                digest: [0; 32],
            },
            Checkpoint {
                frame: 60,
                digest: [0xAB; 32],
            },
        ];
        Report::new(0x5EED, true, &checkpoints)
    }

    #[test]
    fn json_carries_hex_digests() {
        let value: serde_json::Value = serde_json::from_str(&sample().to_json().unwrap()).unwrap();
        assert_eq!(value["seed"], 0x5EED);
        assert_eq!(value["verified"], true);
        assert_eq!(value["checkpoints"][1]["frame"], 60);
        assert_eq!(value["checkpoints"][1]["digest"], "ab".repeat(32));
    }

    #[test]
    fn table_lists_one_line_per_checkpoint() {
        let table = sample().to_table();
        assert!(table.starts_with("seed 0x5eed\n"));
        assert!(table.contains(&format!("{:>8}  {}", 60, "ab".repeat(32))));
        assert!(table.ends_with("two playbacks agree\n"));
    }
}
