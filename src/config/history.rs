//! Payment history configuration

use serde::Deserialize;
use std::path::PathBuf;

/// Where the payment log is kept
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryConfig {
    /// JSON file for the payment log; in-memory when absent
    #[serde(default)]
    pub file_path: Option<PathBuf>,
}

impl HistoryConfig {
    pub fn is_persistent(&self) -> bool {
        self.file_path.is_some()
    }
}
