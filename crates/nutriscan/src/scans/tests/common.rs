use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::profile::HealthProfile;
use crate::scans::domain::{ScanHistoryRecord, ScanLogEntry};
use crate::scans::extraction::{ExtractionError, ExtractionRequest, TextExtractor};
use crate::scans::repository::{ScanLogError, ScanLogRepository};
use crate::scans::{scan_router, ScanService};

pub(super) const SCENARIO_TEXT: &str = "Ingredients: sugar, palm oil, E150";

pub(super) fn named_profile() -> HealthProfile {
    HealthProfile::new("Ana Pereira", "ana@example.com")
}

pub(super) fn anonymous_profile() -> HealthProfile {
    HealthProfile::default()
}

#[derive(Default, Clone)]
pub(super) struct MemoryScanLog {
    pub(super) entries: Arc<Mutex<Vec<ScanLogEntry>>>,
}

impl MemoryScanLog {
    pub(super) fn entries(&self) -> Vec<ScanLogEntry> {
        self.entries.lock().expect("scan log mutex poisoned").clone()
    }
}

impl ScanLogRepository for MemoryScanLog {
    fn append(&self, entry: ScanLogEntry) -> Result<(), ScanLogError> {
        self.entries
            .lock()
            .expect("scan log mutex poisoned")
            .push(entry);
        Ok(())
    }

    fn list(&self) -> Result<Vec<ScanHistoryRecord>, ScanLogError> {
        Ok(self
            .entries()
            .into_iter()
            .map(ScanHistoryRecord::from)
            .collect())
    }
}

pub(super) struct UnavailableScanLog;

impl ScanLogRepository for UnavailableScanLog {
    fn append(&self, _entry: ScanLogEntry) -> Result<(), ScanLogError> {
        Err(ScanLogError::Unavailable("disk offline".to_string()))
    }

    fn list(&self) -> Result<Vec<ScanHistoryRecord>, ScanLogError> {
        Err(ScanLogError::Unavailable("disk offline".to_string()))
    }
}

/// Treats the image bytes as the text printed on the label.
#[derive(Default)]
pub(super) struct EchoExtractor {
    pub(super) languages: Mutex<Vec<String>>,
}

impl TextExtractor for EchoExtractor {
    fn extract(&self, request: &ExtractionRequest) -> Result<String, ExtractionError> {
        self.languages
            .lock()
            .expect("extractor mutex poisoned")
            .push(request.lang.clone());
        String::from_utf8(request.image.clone()).map_err(|_| ExtractionError::Unreadable)
    }
}

pub(super) struct FailingExtractor;

impl TextExtractor for FailingExtractor {
    fn extract(&self, _request: &ExtractionRequest) -> Result<String, ExtractionError> {
        Err(ExtractionError::Failed("tesseract exited with status 1".to_string()))
    }
}

pub(super) fn build_service() -> (
    ScanService<MemoryScanLog, EchoExtractor>,
    Arc<MemoryScanLog>,
    Arc<EchoExtractor>,
) {
    let log = Arc::new(MemoryScanLog::default());
    let extractor = Arc::new(EchoExtractor::default());
    let service = ScanService::new(log.clone(), extractor.clone());
    (service, log, extractor)
}

pub(super) fn scan_router_with_service<R, X>(service: ScanService<R, X>) -> axum::Router
where
    R: ScanLogRepository + 'static,
    X: TextExtractor + 'static,
{
    scan_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
