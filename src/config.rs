use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Construction parameters for a [`TransferEngine`](crate::application::engine::TransferEngine).
///
/// The defaults are the classic bank simulation: 20 accounts of 1000 each, fed
/// through a queue of 1000 requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of accounts, with ids `0..accounts`.
    pub accounts: usize,
    /// Starting balance of every account.
    pub initial_balance: i64,
    /// Number of worker tasks draining the queue.
    pub workers: usize,
    /// Maximum number of requests waiting in the queue.
    pub queue_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            accounts: 20,
            initial_balance: 1000,
            workers: 4,
            queue_capacity: 1000,
        }
    }
}

impl EngineConfig {
    /// Loads a config from a JSON file. Missing fields take their default.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.accounts == 0 {
            return Err(EngineError::InvalidConfig(
                "at least one account is required".to_string(),
            ));
        }
        if self.workers == 0 {
            return Err(EngineError::InvalidConfig(
                "at least one worker is required".to_string(),
            ));
        }
        if self.queue_capacity == 0 {
            return Err(EngineError::InvalidConfig(
                "queue capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
