use serde::{Deserialize, Serialize};

/// Metadata for one CSV file the backend has written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedFile {
    pub symbol: String,
    pub timeframe: String,
    /// Size in bytes.
    pub size: u64,
    /// Last modification time, already formatted by the backend.
    pub modified: String,
}
