use super::rules::RuleOutcome;

pub const SAFE_RECOMMENDATION: &str = "This item looks safe for you.";

/// Collects the recommendations of every triggered rule in rule order.
///
/// Allergen hits all carry the same recommendation, so repeats collapse into one entry.
/// The result is never empty: with nothing triggered it holds only [`SAFE_RECOMMENDATION`].
pub fn recommend(outcome: &RuleOutcome) -> Vec<String> {
    let mut recommendations: Vec<String> = Vec::new();

    for entry in outcome.triggered() {
        if let Some(recommendation) = &entry.recommendation {
            if !recommendations.contains(recommendation) {
                recommendations.push(recommendation.clone());
            }
        }
    }

    if recommendations.is_empty() {
        recommendations.push(SAFE_RECOMMENDATION.to_string());
    }

    recommendations
}
