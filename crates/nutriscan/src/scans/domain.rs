use serde::{Deserialize, Serialize};

use crate::evaluation::ScanResult;
use crate::profile::HealthProfile;

/// Placeholder reported for history entries; log lines never keep the label text.
pub const SCAN_TEXT_NOT_SAVED: &str = "Full scan text not saved";

/// Payload of a scan log call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanLogEntry {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub scan_text: String,
    pub health_score: u8,
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl ScanLogEntry {
    pub fn from_scan(profile: &HealthProfile, scan_text: &str, result: &ScanResult) -> Self {
        Self {
            name: profile.name.clone(),
            email: profile.email.clone(),
            scan_text: scan_text.to_string(),
            health_score: result.score,
            warnings: result.warnings.clone(),
        }
    }

    /// Renders `name | email | Score: n | Warnings: a, b` with a trailing newline.
    ///
    /// Field separators and line breaks inside values are replaced with spaces so one entry
    /// always occupies exactly one line. Commas inside a warning become semicolons so the
    /// warning list splits back into the same entries.
    pub fn to_log_line(&self) -> String {
        let warnings = self
            .warnings
            .iter()
            .map(|warning| sanitize(&warning.replace(',', ";")))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "{} | {} | Score: {} | Warnings: {}\n",
            sanitize(&self.name),
            sanitize(&self.email),
            self.health_score,
            warnings
        )
    }
}

fn sanitize(value: &str) -> String {
    value.replace(['|', '\n', '\r'], " ").trim().to_string()
}

/// Scan history entry as listed back to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanHistoryRecord {
    pub name: String,
    pub email: String,
    pub health_score: u8,
    pub warnings: Vec<String>,
    pub scan_text: String,
}

impl ScanHistoryRecord {
    /// Parses one log line. Lines with fewer than three fields or an unreadable score yield
    /// `None`; a missing warnings field means no warnings.
    pub fn parse_line(line: &str) -> Option<Self> {
        let parts: Vec<&str> = line.trim().split('|').collect();
        if parts.len() < 3 {
            return None;
        }

        let name = parts[0].trim().to_string();
        let email = parts[1].trim().to_string();
        let health_score = parts[2]
            .trim()
            .trim_start_matches("Score:")
            .trim()
            .parse::<u8>()
            .ok()?;

        let warnings = parts
            .get(3)
            .map(|part| part.trim().trim_start_matches("Warnings:").trim())
            .filter(|text| !text.is_empty())
            .map(|text| {
                text.split(',')
                    .map(str::trim)
                    .filter(|warning| !warning.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Some(Self {
            name,
            email,
            health_score,
            warnings,
            scan_text: SCAN_TEXT_NOT_SAVED.to_string(),
        })
    }
}

impl From<ScanLogEntry> for ScanHistoryRecord {
    fn from(entry: ScanLogEntry) -> Self {
        Self {
            name: entry.name,
            email: entry.email,
            health_score: entry.health_score,
            warnings: entry.warnings,
            scan_text: SCAN_TEXT_NOT_SAVED.to_string(),
        }
    }
}
