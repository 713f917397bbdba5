use super::domain::{ScanHistoryRecord, ScanLogEntry};

/// Storage abstraction for scan logs so the service can be exercised in isolation.
pub trait ScanLogRepository: Send + Sync {
    fn append(&self, entry: ScanLogEntry) -> Result<(), ScanLogError>;
    fn list(&self) -> Result<Vec<ScanHistoryRecord>, ScanLogError>;
}

/// Error enumeration for scan log failures.
#[derive(Debug, thiserror::Error)]
pub enum ScanLogError {
    #[error("scan log io failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("scan log unavailable: {0}")]
    Unavailable(String),
}
