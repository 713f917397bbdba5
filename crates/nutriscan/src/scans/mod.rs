//! Collaborators around the evaluator: OCR text extraction, scan logging, scan history,
//! and the HTTP surface that ties them together.

pub mod domain;
pub mod extraction;
pub mod log_file;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{ScanHistoryRecord, ScanLogEntry, SCAN_TEXT_NOT_SAVED};
pub use extraction::{ExtractionError, ExtractionRequest, TextExtractor, DEFAULT_OCR_LANG};
pub use log_file::FileScanLog;
pub use repository::{ScanLogError, ScanLogRepository};
pub use router::{scan_router, EvaluateRequest};
pub use service::{ScanOutcome, ScanService, ScanServiceError};
