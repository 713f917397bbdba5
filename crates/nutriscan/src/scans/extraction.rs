/// Tesseract language code used when a request does not name one.
pub const DEFAULT_OCR_LANG: &str = "eng";

/// Image submitted for text extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRequest {
    pub image: Vec<u8>,
    pub lang: String,
}

impl ExtractionRequest {
    pub fn new(image: Vec<u8>) -> Self {
        Self {
            image,
            lang: DEFAULT_OCR_LANG.to_string(),
        }
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        let lang = lang.into();
        if !lang.trim().is_empty() {
            self.lang = lang.trim().to_string();
        }
        self
    }
}

/// OCR boundary: turns a label image into text, or reports why it could not.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, request: &ExtractionRequest) -> Result<String, ExtractionError>;
}

/// Extraction failure reported by the OCR collaborator.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("image could not be read")]
    Unreadable,
    #[error("OCR processing failed: {0}")]
    Failed(String),
}
