mod allergens;
mod normalizer;
mod recommendations;
mod rules;
mod score;

pub use allergens::{AllergenMatcher, AllergenSynonymTable};
pub use normalizer::{normalize, NormalizedText};
pub use recommendations::{recommend, SAFE_RECOMMENDATION};
pub use rules::{
    evaluate_rules, RuleId, RuleOutcome, TriggeredRule, ADDITIVES_RECOMMENDATION,
    ADDITIVES_WARNING, ALLERGEN_RECOMMENDATION, DIABETIC_WARNING, HIGH_SUGAR_RECOMMENDATION,
    HIGH_SUGAR_WARNING, PALM_OIL_RECOMMENDATION, PALM_OIL_WARNING,
};
pub use score::{health_score, MAX_SCORE, MIN_SCORE};

use crate::profile::HealthProfile;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Stateless evaluator applying the label rules to OCR text for one health profile.
#[derive(Debug, Clone, Copy, Default)]
pub struct LabelEvaluator {
    matcher: AllergenMatcher,
}

impl LabelEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn evaluate(&self, raw_text: &str, profile: &HealthProfile) -> ScanResult {
        self.assess(raw_text, profile).result
    }

    /// Evaluates the label and keeps the rule trail alongside the result.
    pub fn assess(&self, raw_text: &str, profile: &HealthProfile) -> LabelAssessment {
        let text = NormalizedText::from_raw(raw_text);
        let outcome = evaluate_rules(&text, profile, &self.matcher);

        let result = ScanResult {
            score: health_score(&outcome),
            warnings: outcome.warnings(),
            recommendations: recommend(&outcome),
        };

        debug!(
            score = result.score,
            triggered = outcome.triggered().len(),
            "label evaluated"
        );

        LabelAssessment { result, outcome }
    }
}

/// Evaluates `raw_text` against `profile` with the default evaluator.
pub fn evaluate_label(raw_text: &str, profile: &HealthProfile) -> ScanResult {
    LabelEvaluator::new().evaluate(raw_text, profile)
}

/// Evaluation output handed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    pub score: u8,
    pub warnings: Vec<String>,
    pub recommendations: Vec<String>,
}

impl ScanResult {
    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_score(self.score)
    }
}

/// A [`ScanResult`] together with the rules that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelAssessment {
    pub result: ScanResult,
    pub outcome: RuleOutcome,
}

/// Coarse rating used when presenting a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Good,
    Moderate,
    Poor,
}

impl ScoreBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            71.. => ScoreBand::Good,
            41..=70 => ScoreBand::Moderate,
            _ => ScoreBand::Poor,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::Good => "Good",
            ScoreBand::Moderate => "Moderate",
            ScoreBand::Poor => "Poor",
        }
    }
}
