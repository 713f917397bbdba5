use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::ScanLogEntry;
use super::extraction::{ExtractionRequest, TextExtractor};
use super::repository::ScanLogRepository;
use super::service::{ScanService, ScanServiceError};
use crate::profile::HealthProfile;

/// Body of an evaluation request: extracted label text plus the caller's profile.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EvaluateRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub profile: HealthProfile,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExtractQuery {
    #[serde(default)]
    pub lang: Option<String>,
}

/// Router builder exposing scan evaluation, extraction, logging, and history endpoints.
pub fn scan_router<R, X>(service: Arc<ScanService<R, X>>) -> Router
where
    R: ScanLogRepository + 'static,
    X: TextExtractor + 'static,
{
    Router::new()
        .route("/api/v1/scans", get(history_handler::<R, X>))
        .route("/api/v1/scans/evaluate", post(evaluate_handler::<R, X>))
        .route("/api/v1/scans/extract", post(extract_handler::<R, X>))
        .route("/api/v1/scans/log", post(log_handler::<R, X>))
        .with_state(service)
}

pub(crate) async fn evaluate_handler<R, X>(
    State(service): State<Arc<ScanService<R, X>>>,
    axum::Json(request): axum::Json<EvaluateRequest>,
) -> Response
where
    R: ScanLogRepository + 'static,
    X: TextExtractor + 'static,
{
    let outcome = service.analyze_text(&request.text, &request.profile);
    (StatusCode::OK, axum::Json(outcome)).into_response()
}

pub(crate) async fn extract_handler<R, X>(
    State(service): State<Arc<ScanService<R, X>>>,
    Query(query): Query<ExtractQuery>,
    image: Bytes,
) -> Response
where
    R: ScanLogRepository + 'static,
    X: TextExtractor + 'static,
{
    let mut request = ExtractionRequest::new(image.to_vec());
    if let Some(lang) = query.lang {
        request = request.with_lang(lang);
    }

    match service.extract_text(&request) {
        Ok(text) if text.is_empty() => {
            let payload = json!({
                "text": "",
                "message": "no text found in the image",
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Ok(text) => (StatusCode::OK, axum::Json(json!({ "text": text }))).into_response(),
        Err(ScanServiceError::Extraction(error)) => {
            let payload = json!({
                "error": "OCR processing failed",
                "details": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn log_handler<R, X>(
    State(service): State<Arc<ScanService<R, X>>>,
    axum::Json(entry): axum::Json<ScanLogEntry>,
) -> Response
where
    R: ScanLogRepository + 'static,
    X: TextExtractor + 'static,
{
    match service.record(entry) {
        Ok(()) => {
            let payload = json!({ "message": "scan logged" });
            (StatusCode::CREATED, axum::Json(payload)).into_response()
        }
        Err(error @ ScanServiceError::InvalidScore(_)) => {
            let payload = json!({
                "error": "invalid scan log entry",
                "details": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(error) => {
            let payload = json!({
                "error": "log writing failed",
                "details": error.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn history_handler<R, X>(
    State(service): State<Arc<ScanService<R, X>>>,
) -> Response
where
    R: ScanLogRepository + 'static,
    X: TextExtractor + 'static,
{
    match service.history() {
        Ok(logs) => (StatusCode::OK, axum::Json(json!({ "logs": logs }))).into_response(),
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
