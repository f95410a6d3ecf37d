//! Ballot state file.
//!
//! The ledger is stored as pretty-printed JSON. Writes go through a sibling
//! temporary file and a rename so an interrupted write never leaves a
//! truncated state behind.

use anyhow::Context;
use ballot_ledger::VotingLedger;
use std::fs;
use std::path::{Path, PathBuf};

/// Ledger state persisted between invocations.
#[derive(Debug, Clone)]
pub struct StateFile {
    path: PathBuf,
}

impl StateFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the ledger and verify its delegation chains.
    pub fn load(&self) -> anyhow::Result<VotingLedger> {
        if !self.exists() {
            anyhow::bail!(
                "No ballot at '{}' (run `ballot init` first)",
                self.path.display()
            );
        }

        let json = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read state file '{}'", self.path.display()))?;
        let ledger: VotingLedger = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse state file '{}'", self.path.display()))?;
        ledger.check_integrity()?;

        tracing::debug!(
            "Loaded ballot from {:?}: {} proposals, {} voters",
            self.path,
            ledger.proposal_count(),
            ledger.voters().count()
        );
        Ok(ledger)
    }

    /// Persist the ledger, replacing any previous state.
    pub fn save(&self, ledger: &VotingLedger) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(ledger)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)
            .with_context(|| format!("Failed to write state file '{}'", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("Failed to replace state file '{}'", self.path.display()))?;

        tracing::debug!("State persisted to {:?}", self.path);
        Ok(())
    }
}
