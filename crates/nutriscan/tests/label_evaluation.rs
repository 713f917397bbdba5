//! End-to-end behavior of the label evaluator through its public facade.

use nutriscan::evaluation::{
    LabelEvaluator, RuleId, ADDITIVES_RECOMMENDATION, ADDITIVES_WARNING, ALLERGEN_RECOMMENDATION,
    DIABETIC_WARNING, HIGH_SUGAR_RECOMMENDATION, HIGH_SUGAR_WARNING, PALM_OIL_RECOMMENDATION,
    PALM_OIL_WARNING, SAFE_RECOMMENDATION,
};
use nutriscan::{evaluate_label, HealthProfile, ScoreBand};

const SAMPLE_LABELS: &[&str] = &[
    "",
    "water, salt",
    "Ingredients: sugar, palm oil, E150",
    "SUGAR, SUGAR, sugar",
    "contains milk and cheese",
    "wheat flour, barley malt, rye, soybean oil, egg albumen, shrimp, tuna",
    "Zutaten: Zucker, Palmöl, Emulgator E322",
    "\n\n\t  \r\n",
    "peanut butter cream cheese walnut e100 e200 paimai",
];

fn profiles() -> Vec<HealthProfile> {
    vec![
        HealthProfile::default(),
        HealthProfile::default().with_diabetes(true),
        HealthProfile::default().with_allergies(["dairy"]),
        HealthProfile::default()
            .with_diabetes(true)
            .with_allergies(["dairy", "nuts", "gluten", "soy", "egg", "shellfish", "fish"]),
        HealthProfile::default().with_allergies(["Sesame", "  ", "COCOA"]),
    ]
}

#[test]
fn scenario_sugar_palm_additives_for_diabetic() {
    let profile = HealthProfile::default().with_diabetes(true);

    let result = evaluate_label("Ingredients: sugar, palm oil, E150", &profile);

    assert_eq!(result.score, 40);
    assert_eq!(
        result.warnings,
        vec![
            HIGH_SUGAR_WARNING,
            PALM_OIL_WARNING,
            ADDITIVES_WARNING,
            DIABETIC_WARNING
        ]
    );
    assert_eq!(
        result.recommendations,
        vec![
            HIGH_SUGAR_RECOMMENDATION,
            PALM_OIL_RECOMMENDATION,
            ADDITIVES_RECOMMENDATION
        ]
    );
    assert!(!result
        .recommendations
        .iter()
        .any(|recommendation| recommendation == ALLERGEN_RECOMMENDATION));
}

#[test]
fn scenario_plain_label_is_safe() {
    let result = evaluate_label("water, salt", &HealthProfile::default());

    assert_eq!(result.score, 100);
    assert!(result.warnings.is_empty());
    assert_eq!(result.recommendations, vec![SAFE_RECOMMENDATION]);
    assert_eq!(result.band(), ScoreBand::Good);
}

#[test]
fn scenario_dairy_synonyms() {
    let profile = HealthProfile::default().with_allergies(["dairy"]);

    let result = evaluate_label("contains milk and cheese", &profile);

    assert_eq!(
        result.warnings,
        vec!["Contains allergen: milk", "Contains allergen: cheese"]
    );
    assert_eq!(result.score, 40);
    assert_eq!(result.recommendations, vec![ALLERGEN_RECOMMENDATION]);
}

#[test]
fn scenario_many_triggers_clamp_to_zero() {
    let profile = HealthProfile::default().with_allergies(["nuts", "dairy"]);

    let result = evaluate_label("sugar, palm oil, E471, peanut, milk powder", &profile);

    assert_eq!(result.score, 0);
    assert_eq!(result.warnings.len(), 5);
}

#[test]
fn scores_stay_within_bounds_and_recommendations_are_never_empty() {
    let evaluator = LabelEvaluator::new();
    for label in SAMPLE_LABELS {
        for profile in profiles() {
            let result = evaluator.evaluate(label, &profile);
            assert!(result.score <= 100, "score out of range for {label:?}");
            assert!(
                !result.recommendations.is_empty(),
                "no recommendation for {label:?}"
            );
        }
    }
}

#[test]
fn matching_ignores_case() {
    for profile in profiles() {
        let evaluator = LabelEvaluator::new();
        let upper = evaluator.assess("SUGAR content, MILK, E150", &profile);
        let lower = evaluator.assess("sugar content, milk, e150", &profile);
        assert_eq!(upper.outcome, lower.outcome);
        assert_eq!(upper.result, lower.result);
    }
}

#[test]
fn repeated_evaluation_is_identical() {
    for label in SAMPLE_LABELS {
        for profile in profiles() {
            assert_eq!(
                evaluate_label(label, &profile),
                evaluate_label(label, &profile)
            );
        }
    }
}

#[test]
fn adding_triggers_never_raises_the_score() {
    let profile = HealthProfile::default()
        .with_diabetes(true)
        .with_allergies(["dairy", "nuts", "soy"]);
    let additions = [
        "sugar", "palm oil", "e330", "milk", "cheese", "almond", "soya", "cream",
    ];

    let mut label = String::from("water");
    let mut previous = evaluate_label(&label, &profile).score;
    for addition in additions {
        label.push_str(", ");
        label.push_str(addition);
        let score = evaluate_label(&label, &profile).score;
        assert!(score <= previous, "score rose after adding {addition}");
        previous = score;
    }
    assert_eq!(previous, 0);
}

#[test]
fn outputs_agree_on_what_matched() {
    let profile = HealthProfile::default()
        .with_diabetes(true)
        .with_allergies(["gluten", "egg"]);
    let assessment =
        LabelEvaluator::new().assess("Wheat flour, sugar, egg albumen, E202", &profile);

    let allergen_hits = assessment
        .outcome
        .triggered()
        .iter()
        .filter(|entry| entry.rule == RuleId::AllergenHit)
        .count();
    let allergen_warnings = assessment
        .result
        .warnings
        .iter()
        .filter(|warning| warning.starts_with("Contains allergen: "))
        .count();

    assert_eq!(allergen_hits, 3);
    assert_eq!(allergen_warnings, allergen_hits);
    assert_eq!(
        i32::from(assessment.result.score),
        (100 + assessment.outcome.total_delta()).clamp(0, 100)
    );
    assert!(assessment
        .result
        .recommendations
        .contains(&ALLERGEN_RECOMMENDATION.to_string()));
}

#[test]
fn free_form_allergies_match_literally() {
    let profile = HealthProfile::default().with_allergies(["Sesame"]);

    let result = evaluate_label("Toasted SESAME seeds", &profile);

    assert_eq!(result.warnings, vec!["Contains allergen: sesame"]);
    assert_eq!(result.score, 70);
}

#[test]
fn profile_json_with_joined_allergies_evaluates_like_a_list() {
    let joined: HealthProfile =
        serde_json::from_str(r#"{"name":"Ana","diabetes":true,"allergies":"Dairy, Nuts"}"#)
            .expect("joined profile parses");
    let listed: HealthProfile =
        serde_json::from_str(r#"{"name":"Ana","diabetes":true,"allergies":["dairy","nuts"]}"#)
            .expect("listed profile parses");

    let label = "milk chocolate with hazelnut and sugar";
    assert_eq!(evaluate_label(label, &joined), evaluate_label(label, &listed));
}

#[test]
fn allergen_warnings_follow_the_order_allergies_were_entered() {
    let profile: HealthProfile =
        serde_json::from_str(r#"{"allergies":"Nuts, Dairy"}"#).expect("profile parses");

    let result = evaluate_label("peanut, milk", &profile);

    assert_eq!(
        result.warnings,
        vec!["Contains allergen: peanut", "Contains allergen: milk"]
    );
}

#[test]
fn free_form_allergies_with_irregular_spacing_still_match() {
    let profile = HealthProfile::default().with_allergies(["tree  nut"]);

    let result = evaluate_label("contains tree nut oil", &profile);

    assert_eq!(result.warnings, vec!["Contains allergen: tree nut"]);
    assert_eq!(result.score, 70);
}
