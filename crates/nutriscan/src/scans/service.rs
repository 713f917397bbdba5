use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use super::domain::{ScanHistoryRecord, ScanLogEntry};
use super::extraction::{ExtractionError, ExtractionRequest, TextExtractor};
use super::repository::{ScanLogError, ScanLogRepository};
use crate::evaluation::{LabelEvaluator, ScanResult, ScoreBand, MAX_SCORE};
use crate::profile::HealthProfile;

/// Service composing the label evaluator, the scan log, and the OCR collaborator.
pub struct ScanService<R, X> {
    evaluator: LabelEvaluator,
    repository: Arc<R>,
    extractor: Arc<X>,
}

/// Evaluation result plus whether it reached the scan log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanOutcome {
    #[serde(flatten)]
    pub result: ScanResult,
    pub band: ScoreBand,
    pub logged: bool,
}

impl<R, X> ScanService<R, X>
where
    R: ScanLogRepository + 'static,
    X: TextExtractor + 'static,
{
    pub fn new(repository: Arc<R>, extractor: Arc<X>) -> Self {
        Self {
            evaluator: LabelEvaluator::new(),
            repository,
            extractor,
        }
    }

    /// Evaluate label text and log the scan when the profile identifies its owner.
    ///
    /// A failed log write is reported through [`ScanOutcome::logged`]; the evaluation
    /// itself always succeeds.
    pub fn analyze_text(&self, raw_text: &str, profile: &HealthProfile) -> ScanOutcome {
        let result = self.evaluator.evaluate(raw_text, profile);

        let logged = profile.can_log()
            && match self
                .repository
                .append(ScanLogEntry::from_scan(profile, raw_text, &result))
            {
                Ok(()) => true,
                Err(err) => {
                    warn!(error = %err, "scan evaluated but could not be logged");
                    false
                }
            };

        info!(
            score = result.score,
            warnings = result.warnings.len(),
            logged,
            "label scan analyzed"
        );

        ScanOutcome {
            band: result.band(),
            result,
            logged,
        }
    }

    /// Run OCR on an image; whitespace-only output is returned as empty text.
    pub fn extract_text(&self, request: &ExtractionRequest) -> Result<String, ScanServiceError> {
        let text = self.extractor.extract(request)?;
        let text = text.trim();
        if text.is_empty() {
            info!(lang = %request.lang, "no text found in the image");
        }
        Ok(text.to_string())
    }

    /// Extract text from an image and evaluate it. The evaluator is not run when
    /// extraction fails.
    pub fn analyze_image(
        &self,
        request: &ExtractionRequest,
        profile: &HealthProfile,
    ) -> Result<ScanOutcome, ScanServiceError> {
        let text = self.extract_text(request)?;
        Ok(self.analyze_text(&text, profile))
    }

    /// Persist an externally produced scan log entry. Scores above the evaluator's range are
    /// rejected before anything is written.
    pub fn record(&self, entry: ScanLogEntry) -> Result<(), ScanServiceError> {
        if entry.health_score > MAX_SCORE {
            return Err(ScanServiceError::InvalidScore(entry.health_score));
        }
        self.repository.append(entry)?;
        Ok(())
    }

    pub fn history(&self) -> Result<Vec<ScanHistoryRecord>, ScanServiceError> {
        Ok(self.repository.list()?)
    }
}

/// Error raised by the scan service.
#[derive(Debug, thiserror::Error)]
pub enum ScanServiceError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error(transparent)]
    Log(#[from] ScanLogError),
    #[error("health score {0} is outside 0..=100")]
    InvalidScore(u8),
}
