use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::allergens::AllergenMatcher;
use super::normalizer::NormalizedText;
use crate::profile::HealthProfile;

pub const HIGH_SUGAR_WARNING: &str = "High sugar content";
pub const HIGH_SUGAR_RECOMMENDATION: &str =
    "This product contains sugar. Try sugar-free or low-GI options.";
pub const PALM_OIL_WARNING: &str = "Contains palm oil";
pub const PALM_OIL_RECOMMENDATION: &str = "Try sunflower or olive oil instead of palm oil.";
pub const ADDITIVES_WARNING: &str = "Additives present (E-numbers)";
pub const ADDITIVES_RECOMMENDATION: &str =
    "Avoid processed additives (E-numbers). Choose natural alternatives.";
pub const ALLERGEN_RECOMMENDATION: &str =
    "Contains ingredients that may trigger your listed allergies.";
pub const DIABETIC_WARNING: &str = "Not suitable for diabetics";

const SUGAR_TERM: &str = "sugar";
// "paimai" is a common OCR misread of "palm oil".
const PALM_OIL_TERMS: &[&str] = &["palm", "paimai"];

const HIGH_SUGAR_DELTA: i16 = -30;
const PALM_OIL_DELTA: i16 = -20;
const ADDITIVES_DELTA: i16 = -10;
const ALLERGEN_DELTA: i16 = -30;

static ADDITIVE_CODE_PATTERN: OnceLock<Regex> = OnceLock::new();

fn additive_code_pattern() -> &'static Regex {
    ADDITIVE_CODE_PATTERN
        .get_or_init(|| Regex::new(r"e[0-9]+").expect("additive code pattern compiles"))
}

/// Stable identifiers for the label rules, declared in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    HighSugar,
    PalmOil,
    AdditiveCodes,
    AllergenHit,
    DiabeticSugar,
}

impl RuleId {
    pub const ALL: [RuleId; 5] = [
        RuleId::HighSugar,
        RuleId::PalmOil,
        RuleId::AdditiveCodes,
        RuleId::AllergenHit,
        RuleId::DiabeticSugar,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RuleId::HighSugar => "High sugar",
            RuleId::PalmOil => "Palm oil",
            RuleId::AdditiveCodes => "Additive codes",
            RuleId::AllergenHit => "Allergen hit",
            RuleId::DiabeticSugar => "Diabetic sugar interaction",
        }
    }
}

/// One rule firing, kept so every score change can be audited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggeredRule {
    pub rule: RuleId,
    pub score_delta: i16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
}

/// Result of a single evaluation pass, shared by scoring and recommendation generation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleOutcome {
    triggered: Vec<TriggeredRule>,
}

impl RuleOutcome {
    pub fn triggered(&self) -> &[TriggeredRule] {
        &self.triggered
    }

    pub fn is_empty(&self) -> bool {
        self.triggered.is_empty()
    }

    pub fn fired(&self, rule: RuleId) -> bool {
        self.triggered.iter().any(|entry| entry.rule == rule)
    }

    pub fn total_delta(&self) -> i32 {
        self.triggered
            .iter()
            .map(|entry| i32::from(entry.score_delta))
            .sum()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.triggered
            .iter()
            .filter_map(|entry| entry.warning.clone())
            .collect()
    }

    fn push(
        &mut self,
        rule: RuleId,
        score_delta: i16,
        warning: impl Into<String>,
        recommendation: Option<&str>,
    ) {
        self.triggered.push(TriggeredRule {
            rule,
            score_delta,
            warning: Some(warning.into()),
            recommendation: recommendation.map(str::to_string),
        });
    }
}

/// Runs every label rule once over `text`, in [`RuleId`] order.
pub fn evaluate_rules(
    text: &NormalizedText,
    profile: &HealthProfile,
    matcher: &AllergenMatcher,
) -> RuleOutcome {
    let mut outcome = RuleOutcome::default();

    let high_sugar = text.contains(SUGAR_TERM);
    if high_sugar {
        outcome.push(
            RuleId::HighSugar,
            HIGH_SUGAR_DELTA,
            HIGH_SUGAR_WARNING,
            Some(HIGH_SUGAR_RECOMMENDATION),
        );
    }

    if PALM_OIL_TERMS.iter().any(|term| text.contains(term)) {
        outcome.push(
            RuleId::PalmOil,
            PALM_OIL_DELTA,
            PALM_OIL_WARNING,
            Some(PALM_OIL_RECOMMENDATION),
        );
    }

    if additive_code_pattern().is_match(text.as_str()) {
        outcome.push(
            RuleId::AdditiveCodes,
            ADDITIVES_DELTA,
            ADDITIVES_WARNING,
            Some(ADDITIVES_RECOMMENDATION),
        );
    }

    for term in matcher.find_matches(text, &profile.allergies) {
        outcome.push(
            RuleId::AllergenHit,
            ALLERGEN_DELTA,
            format!("Contains allergen: {term}"),
            Some(ALLERGEN_RECOMMENDATION),
        );
    }

    if profile.diabetes && high_sugar {
        outcome.push(RuleId::DiabeticSugar, 0, DIABETIC_WARNING, None);
    }

    outcome
}
