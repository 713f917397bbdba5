//! Food label safety evaluation.
//!
//! The [`evaluation`] module holds the rule engine that turns OCR label text and a
//! [`profile::HealthProfile`] into a [`evaluation::ScanResult`]. Everything under [`scans`]
//! is collaborator plumbing: text extraction, scan logging, history, and the HTTP router.

pub mod config;
pub mod error;
pub mod evaluation;
pub mod profile;
pub mod scans;
pub mod telemetry;

pub use evaluation::{evaluate_label, LabelEvaluator, ScanResult, ScoreBand};
pub use profile::{AllergyInput, HealthProfile};
