use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::warn;

use super::domain::{ScanHistoryRecord, ScanLogEntry};
use super::repository::{ScanLogError, ScanLogRepository};

/// Append-only scan log kept in a plain text file, one entry per line.
#[derive(Debug)]
pub struct FileScanLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileScanLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScanLogRepository for FileScanLog {
    fn append(&self, entry: ScanLogEntry) -> Result<(), ScanLogError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| ScanLogError::Unavailable("scan log lock poisoned".to_string()))?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(entry.to_log_line().as_bytes())?;
        Ok(())
    }

    fn list(&self) -> Result<Vec<ScanHistoryRecord>, ScanLogError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut records = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match ScanHistoryRecord::parse_line(&line) {
                Some(record) => records.push(record),
                None => warn!(
                    path = %self.path.display(),
                    line = index + 1,
                    "skipping malformed scan log line"
                ),
            }
        }

        Ok(records)
    }
}
