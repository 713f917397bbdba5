use std::fmt;

/// Label text after lowercasing and whitespace collapsing.
///
/// Every rule matches against this one representation, so it is built exactly once per
/// evaluation and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NormalizedText(String);

impl NormalizedText {
    pub fn from_raw(raw_text: &str) -> Self {
        Self(normalize(raw_text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.0.contains(needle)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lowercases `raw_text`, collapses whitespace runs to a single space and trims the ends.
///
/// Zero-width characters that OCR engines leave between glyphs are dropped first so they
/// cannot split an ingredient word in two.
pub fn normalize(raw_text: &str) -> String {
    let cleaned = raw_text.replace(['\u{feff}', '\u{200b}'], "");
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.to_lowercase()
}
