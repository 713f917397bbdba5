use metrics_exporter_prometheus::PrometheusHandle;
use nutriscan::config::ScanConfig;
use nutriscan::scans::{
    ExtractionError, ExtractionRequest, FileScanLog, ScanHistoryRecord, ScanLogEntry,
    ScanLogError, ScanLogRepository, ScanService, TextExtractor, DEFAULT_OCR_LANG,
};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::debug;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryScanLog {
    entries: Arc<Mutex<Vec<ScanLogEntry>>>,
}

impl ScanLogRepository for InMemoryScanLog {
    fn append(&self, entry: ScanLogEntry) -> Result<(), ScanLogError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|_| ScanLogError::Unavailable("scan log mutex poisoned".to_string()))?;
        guard.push(entry);
        Ok(())
    }

    fn list(&self) -> Result<Vec<ScanHistoryRecord>, ScanLogError> {
        let guard = self
            .entries
            .lock()
            .map_err(|_| ScanLogError::Unavailable("scan log mutex poisoned".to_string()))?;
        Ok(guard.iter().cloned().map(ScanHistoryRecord::from).collect())
    }
}

/// Text extractor for labels uploaded as plain text.
///
/// Accepts the configured OCR language and the default `eng`; any other language
/// fails the way a missing language pack would.
#[derive(Debug, Clone)]
pub(crate) struct Utf8TextExtractor {
    languages: Vec<String>,
}

impl Utf8TextExtractor {
    pub(crate) fn new(configured_lang: &str) -> Self {
        let mut languages = vec![DEFAULT_OCR_LANG.to_string()];
        let configured = configured_lang.trim();
        if !configured.is_empty() && configured != DEFAULT_OCR_LANG {
            languages.push(configured.to_string());
        }
        Self { languages }
    }
}

impl TextExtractor for Utf8TextExtractor {
    fn extract(&self, request: &ExtractionRequest) -> Result<String, ExtractionError> {
        if !self.languages.iter().any(|lang| *lang == request.lang) {
            return Err(ExtractionError::Failed(format!(
                "language '{}' is not installed",
                request.lang
            )));
        }

        debug!(lang = %request.lang, bytes = request.image.len(), "extracting label text");
        String::from_utf8(request.image.clone()).map_err(|_| ExtractionError::Unreadable)
    }
}

pub(crate) type FileScanService = ScanService<FileScanLog, Utf8TextExtractor>;

pub(crate) fn file_scan_service(config: &ScanConfig) -> FileScanService {
    ScanService::new(
        Arc::new(FileScanLog::new(config.log_path.clone())),
        Arc::new(Utf8TextExtractor::new(&config.ocr_lang)),
    )
}

pub(crate) fn in_memory_scan_service(
    configured_lang: &str,
) -> ScanService<InMemoryScanLog, Utf8TextExtractor> {
    ScanService::new(
        Arc::new(InMemoryScanLog::default()),
        Arc::new(Utf8TextExtractor::new(configured_lang)),
    )
}
