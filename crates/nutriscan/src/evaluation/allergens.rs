//! Allergen synonym expansion and matching.
//!
//! A user's allergy entry is resolved to a canonical category when one is known and the
//! category's synonym terms are searched for in the label text. Matching is plain
//! substring containment, so `soy` also hits `soybean`; recall is preferred over precision
//! for allergy warnings.

use std::collections::HashMap;
use std::sync::OnceLock;

use tracing::debug;

use super::normalizer::{normalize, NormalizedText};

const CATEGORY_TERMS: &[(&str, &[&str])] = &[
    ("dairy", &["milk", "cheese", "butter", "yogurt", "cream"]),
    ("nuts", &["almond", "cashew", "peanut", "walnut", "hazelnut"]),
    ("gluten", &["wheat", "barley", "rye", "malt"]),
    ("soy", &["soy", "soya", "soybean"]),
    ("egg", &["egg", "albumen"]),
    ("shellfish", &["shrimp", "prawn", "crab", "lobster"]),
    ("fish", &["salmon", "tuna", "cod", "trout"]),
];

static SYNONYM_TABLE: OnceLock<AllergenSynonymTable> = OnceLock::new();

/// Read-only mapping from canonical allergen category to its matchable terms.
///
/// Each category's own name is part of its term list, so a label that spells out
/// "contains nuts" still matches a `nuts` allergy.
#[derive(Debug)]
pub struct AllergenSynonymTable {
    categories: HashMap<&'static str, Vec<&'static str>>,
}

impl AllergenSynonymTable {
    /// Process-wide table, built on first use.
    pub fn global() -> &'static Self {
        SYNONYM_TABLE.get_or_init(Self::build)
    }

    fn build() -> Self {
        let categories = CATEGORY_TERMS
            .iter()
            .map(|(category, terms)| {
                let mut expanded: Vec<&'static str> = terms.to_vec();
                if !expanded.contains(category) {
                    expanded.push(*category);
                }
                (*category, expanded)
            })
            .collect();

        Self { categories }
    }

    /// Canonical category names in their documented order.
    pub fn categories(&self) -> impl Iterator<Item = &'static str> {
        CATEGORY_TERMS.iter().map(|(category, _)| *category)
    }

    pub fn is_known(&self, category: &str) -> bool {
        self.categories.contains_key(normalize(category).as_str())
    }

    /// Terms to search for on behalf of `category`.
    ///
    /// The category is normalized the same way label text is. An unknown category yields
    /// itself as the only term so free-form allergy words still take part in matching.
    pub fn synonyms_for(&self, category: &str) -> Vec<String> {
        let key = normalize(category);
        match self.categories.get(key.as_str()) {
            Some(terms) => terms.iter().map(|term| (*term).to_string()).collect(),
            None if key.is_empty() => Vec::new(),
            None => vec![key],
        }
    }
}

/// Resolves allergy entries through the synonym table and reports the terms found in text.
#[derive(Debug, Clone, Copy)]
pub struct AllergenMatcher {
    table: &'static AllergenSynonymTable,
}

impl Default for AllergenMatcher {
    fn default() -> Self {
        Self::new(AllergenSynonymTable::global())
    }
}

impl AllergenMatcher {
    pub fn new(table: &'static AllergenSynonymTable) -> Self {
        Self { table }
    }

    /// Every distinct synonym term, reachable from `allergies`, contained in `text`.
    ///
    /// Terms come back in allergy-entry order and then synonym order; a term reachable from
    /// more than one entry is reported once.
    pub fn find_matches(&self, text: &NormalizedText, allergies: &[String]) -> Vec<String> {
        let mut matched: Vec<String> = Vec::new();

        for allergy in allergies {
            for term in self.table.synonyms_for(allergy) {
                if matched.contains(&term) {
                    continue;
                }
                if text.contains(&term) {
                    debug!(allergy = %allergy, term = %term, "allergen term found in label text");
                    matched.push(term);
                }
            }
        }

        matched
    }
}
