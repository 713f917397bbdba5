//! Health profile captured at sign-in and the allergy normalization done at its boundary.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::evaluation::normalize;

/// Allergy options offered by the profile capture form.
pub const KNOWN_ALLERGY_OPTIONS: &[&str] =
    &["Dairy", "Gluten", "Nuts", "Soy", "Skin-related", "Shellfish"];

/// Health details the evaluator consults. Passed explicitly into every evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub diabetes: bool,
    /// Normalized allergy entries in the order they were given; no empties or duplicates.
    #[serde(default, deserialize_with = "deserialize_allergies")]
    pub allergies: Vec<String>,
    /// Informational only.
    #[serde(default)]
    pub gender: String,
}

impl HealthProfile {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            ..Self::default()
        }
    }

    pub fn with_diabetes(mut self, diabetes: bool) -> Self {
        self.diabetes = diabetes;
        self
    }

    pub fn with_allergies<I, S>(mut self, allergies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.allergies = AllergyInput::List(
            allergies
                .into_iter()
                .map(|entry| entry.as_ref().to_string())
                .collect(),
        )
        .into_allergies();
        self
    }

    /// Scans are only logged for profiles that identify their owner.
    pub fn can_log(&self) -> bool {
        !self.name.trim().is_empty() && !self.email.trim().is_empty()
    }
}

/// Allergy data in any of the shapes clients send it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AllergyInput {
    /// A single comma-joined string such as `"Dairy, nuts"`.
    Joined(String),
    List(Vec<String>),
    #[default]
    Missing,
}

impl AllergyInput {
    /// Interprets an arbitrary JSON value. Shapes that are neither a string nor an array
    /// are treated as no allergies rather than rejected.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::String(joined) => AllergyInput::Joined(joined),
            Value::Array(items) => AllergyInput::List(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::String(entry) => Some(entry),
                        _ => None,
                    })
                    .collect(),
            ),
            Value::Null => AllergyInput::Missing,
            other => {
                debug!(shape = %other, "ignoring unrecognised allergy payload");
                AllergyInput::Missing
            }
        }
    }

    /// Canonical entries: each one normalized like label text, empties and repeats dropped,
    /// first-seen order kept.
    pub fn into_allergies(self) -> Vec<String> {
        let entries: Vec<String> = match self {
            AllergyInput::Joined(joined) => joined.split(',').map(str::to_string).collect(),
            AllergyInput::List(items) => items,
            AllergyInput::Missing => Vec::new(),
        };

        let mut allergies: Vec<String> = Vec::with_capacity(entries.len());
        for entry in entries.iter().map(|entry| normalize(entry)) {
            if !entry.is_empty() && !allergies.contains(&entry) {
                allergies.push(entry);
            }
        }
        allergies
    }
}

impl From<&str> for AllergyInput {
    fn from(value: &str) -> Self {
        AllergyInput::Joined(value.to_string())
    }
}

impl From<Vec<String>> for AllergyInput {
    fn from(value: Vec<String>) -> Self {
        AllergyInput::List(value)
    }
}

fn deserialize_allergies<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .map(AllergyInput::from_value)
        .unwrap_or_default()
        .into_allergies())
}
