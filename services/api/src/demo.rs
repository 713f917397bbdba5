use crate::infra::{file_scan_service, in_memory_scan_service};
use clap::Args;
use nutriscan::config::AppConfig;
use nutriscan::error::AppError;
use nutriscan::scans::{ExtractionRequest, ScanHistoryRecord, ScanOutcome, DEFAULT_OCR_LANG};
use nutriscan::{AllergyInput, HealthProfile};
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
#[command(group(
    clap::ArgGroup::new("source")
        .required(true)
        .args(["text", "file", "image"])
))]
pub(crate) struct EvaluateArgs {
    /// Label text to evaluate
    #[arg(long)]
    pub(crate) text: Option<String>,
    /// Read label text from a file
    #[arg(long)]
    pub(crate) file: Option<PathBuf>,
    /// Run a label image through text extraction before evaluating it
    #[arg(long)]
    pub(crate) image: Option<PathBuf>,
    /// Extraction language (defaults to OCR_LANG)
    #[arg(long)]
    pub(crate) lang: Option<String>,
    /// Profile name; the scan is logged when both name and email are set
    #[arg(long, default_value = "")]
    pub(crate) name: String,
    /// Profile email
    #[arg(long, default_value = "")]
    pub(crate) email: String,
    /// Apply the diabetic sugar warning
    #[arg(long)]
    pub(crate) diabetes: bool,
    /// Comma separated allergies, e.g. "Dairy, Nuts"
    #[arg(long)]
    pub(crate) allergies: Option<String>,
    /// Print the outcome as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct HistoryArgs {
    /// Print the history as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Evaluate the sample labels for a diabetic profile
    #[arg(long)]
    pub(crate) diabetes: bool,
    /// Comma separated allergies for the demo profile (defaults to "Dairy")
    #[arg(long)]
    pub(crate) allergies: Option<String>,
}

const DEMO_LABELS: &[(&str, &str)] = &[
    ("Chocolate spread", "Ingredients: sugar, palm oil, E150"),
    ("Rolled oats", "Ingredients: whole oats"),
    ("Milk chocolate", "Milk chocolate (contains lactose)"),
    ("Glazed cookies", "Sugar, Sugar, E100, E200"),
];

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = file_scan_service(&config.scans);
    let profile = build_profile(
        args.name,
        args.email,
        args.diabetes,
        args.allergies.as_deref(),
    );

    let text = if let Some(text) = args.text {
        text
    } else if let Some(path) = args.file {
        std::fs::read_to_string(path)?
    } else if let Some(path) = args.image {
        let image = std::fs::read(path)?;
        let lang = args.lang.unwrap_or(config.scans.ocr_lang);
        let request = ExtractionRequest::new(image).with_lang(lang);
        let text = service.extract_text(&request)?;
        if text.is_empty() {
            println!("No text found in the image.");
            return Ok(());
        }
        text
    } else {
        String::new()
    };

    let outcome = service.analyze_text(&text, &profile);
    if args.json {
        print_json(&outcome);
    } else {
        render_outcome(&outcome);
    }
    Ok(())
}

pub(crate) fn run_history(args: HistoryArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = file_scan_service(&config.scans);
    let records = service.history()?;

    if args.json {
        print_json(&records);
    } else {
        render_history(&records);
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let service = in_memory_scan_service(DEFAULT_OCR_LANG);
    let profile = build_profile(
        "Demo Shopper".to_string(),
        "shopper@example.com".to_string(),
        args.diabetes,
        Some(args.allergies.as_deref().unwrap_or("Dairy")),
    );

    println!("Label scan demo");
    println!(
        "Profile: diabetes={} allergies=[{}]",
        profile.diabetes,
        profile
            .allergies
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    );

    for (product, label) in DEMO_LABELS {
        println!("\n{product}: \"{label}\"");
        let outcome = service.analyze_text(label, &profile);
        render_outcome(&outcome);
    }

    println!();
    render_history(&service.history()?);
    Ok(())
}

fn build_profile(
    name: String,
    email: String,
    diabetes: bool,
    allergies: Option<&str>,
) -> HealthProfile {
    let mut profile = HealthProfile::new(name, email).with_diabetes(diabetes);
    if let Some(joined) = allergies {
        profile.allergies = AllergyInput::from(joined).into_allergies();
    }
    profile
}

fn render_outcome(outcome: &ScanOutcome) {
    let result = &outcome.result;
    println!("  Health score: {}/100 ({})", result.score, outcome.band.label());

    if result.warnings.is_empty() {
        println!("  Warnings: none");
    } else {
        println!("  Warnings:");
        for warning in &result.warnings {
            println!("    - {warning}");
        }
    }

    println!("  Recommendations:");
    for recommendation in &result.recommendations {
        println!("    - {recommendation}");
    }

    if outcome.logged {
        println!("  Scan logged");
    }
}

fn render_history(records: &[ScanHistoryRecord]) {
    if records.is_empty() {
        println!("Scan history: empty");
        return;
    }

    println!("Scan history");
    for record in records {
        let warnings = if record.warnings.is_empty() {
            "none".to_string()
        } else {
            record.warnings.join(", ")
        };
        println!(
            "  {} <{}> score {} | warnings: {}",
            record.name, record.email, record.health_score, warnings
        );
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(err) => println!("JSON output unavailable: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_profile_splits_joined_allergies() {
        let profile = build_profile(
            "Ana".to_string(),
            "ana@example.com".to_string(),
            true,
            Some("Dairy, , Nuts"),
        );

        assert!(profile.diabetes);
        assert!(profile.can_log());
        assert_eq!(
            profile.allergies.iter().cloned().collect::<Vec<_>>(),
            vec!["dairy".to_string(), "nuts".to_string()]
        );
    }

    #[test]
    fn demo_labels_are_logged_for_named_profile() {
        let service = in_memory_scan_service(DEFAULT_OCR_LANG);
        let profile = build_profile(
            "Demo Shopper".to_string(),
            "shopper@example.com".to_string(),
            false,
            Some("Dairy"),
        );

        for (_, label) in DEMO_LABELS {
            assert!(service.analyze_text(label, &profile).logged);
        }

        let history = service.history().expect("history readable");
        assert_eq!(history.len(), DEMO_LABELS.len());
        assert_eq!(history[1].health_score, 100);
        assert!(history[1].warnings.is_empty());
    }
}
