use super::rules::RuleOutcome;

pub const BASE_SCORE: i32 = 100;
pub const MIN_SCORE: u8 = 0;
pub const MAX_SCORE: u8 = 100;

/// Folds the triggered score deltas into a health score clamped to `0..=100`.
pub fn health_score(outcome: &RuleOutcome) -> u8 {
    let raw = BASE_SCORE + outcome.total_delta();
    raw.clamp(i32::from(MIN_SCORE), i32::from(MAX_SCORE)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::allergens::AllergenMatcher;
    use crate::evaluation::normalizer::NormalizedText;
    use crate::evaluation::rules::evaluate_rules;
    use crate::profile::HealthProfile;

    fn outcome_for(raw: &str, profile: &HealthProfile) -> RuleOutcome {
        evaluate_rules(
            &NormalizedText::from_raw(raw),
            profile,
            &AllergenMatcher::default(),
        )
    }

    #[test]
    fn empty_outcome_scores_full_marks() {
        assert_eq!(health_score(&RuleOutcome::default()), MAX_SCORE);
    }

    #[test]
    fn deltas_are_summed_from_base() {
        let outcome = outcome_for("sugar, palm oil", &HealthProfile::default());
        assert_eq!(health_score(&outcome), 50);
    }

    #[test]
    fn heavy_penalties_clamp_at_zero() {
        let profile = HealthProfile::default().with_allergies(["dairy", "nuts"]);
        let outcome = outcome_for("sugar, palm, e322, milk, cheese, butter, peanut", &profile);

        assert!(outcome.total_delta() < -100);
        assert_eq!(health_score(&outcome), MIN_SCORE);
    }

    #[test]
    fn scoring_is_repeatable() {
        let outcome = outcome_for("sugar e150", &HealthProfile::default());
        assert_eq!(health_score(&outcome), health_score(&outcome));
    }
}
