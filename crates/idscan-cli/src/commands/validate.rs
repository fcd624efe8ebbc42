//! Validate command - check a record the way the capture form does on save.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;

use idscan_core::{normalize_date, CaptureForm, ExtractionError, ExtractionResult, Field};

use super::load_config;

/// Arguments for the validate command.
#[derive(Args)]
pub struct ValidateArgs {
    /// Extraction result JSON to start from
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Holder name
    #[arg(long)]
    name: Option<String>,

    /// Document number
    #[arg(long)]
    id_number: Option<String>,

    /// Date of birth (MM/DD/YYYY)
    #[arg(long)]
    dob: Option<String>,

    /// Normalize the date of birth before validating
    #[arg(long)]
    normalize: bool,

    /// Print the saved record or the errors as JSON
    #[arg(long)]
    json: bool,
}

pub async fn run(args: ValidateArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let base = match &args.input {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            serde_json::from_str(&content)
                .map_err(|e| anyhow::anyhow!("Invalid result file {}: {}", path.display(), e))?
        }
        None => ExtractionResult::new("", "", "", Default::default()),
    };

    let mut form = CaptureForm::new(base).with_thresholds(config.confidence);

    let edits = [
        (Field::Name, args.name),
        (Field::IdNumber, args.id_number),
        (Field::DateOfBirth, args.dob),
    ];
    for (field, value) in edits {
        if let Some(value) = value {
            form.update_field(field, value);
        }
    }

    if args.input.is_some() && !args.json {
        for line in confidence_report(&form) {
            eprintln!("{} {}", style("ℹ").blue(), line);
        }
    }

    if args.normalize {
        let normalized = normalize_date(&form.edited().date_of_birth);
        form.update_field(Field::DateOfBirth, normalized);
    }

    match form.save() {
        Ok(saved) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&saved)?);
            } else {
                println!("{} Record is valid", style("✓").green());
            }
            Ok(())
        }
        Err(ExtractionError::Invalid(errors)) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&errors)?);
            } else {
                for (field, message) in errors.iter() {
                    println!("{} {}: {}", style("✗").red(), field.label(), message);
                }
            }
            anyhow::bail!("{} field(s) failed validation", errors.len())
        }
        Err(e) => Err(e.into()),
    }
}

/// Extraction confidence per field, classified with the configured thresholds.
fn confidence_report(form: &CaptureForm) -> Vec<String> {
    Field::ALL
        .iter()
        .map(|field| {
            format!(
                "{} extracted with {} confidence ({}%)",
                field.label(),
                form.confidence_level(*field),
                form.extracted().confidence.get(*field)
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use idscan_core::models::config::ConfidenceThresholds;
    use idscan_core::FieldConfidence;

    #[test]
    fn test_confidence_report_uses_thresholds() {
        let extracted = ExtractionResult::new(
            "John Smith",
            "AB12345",
            "05/20/1990",
            FieldConfidence { name: 92, id_number: 80, date_of_birth: 60 },
        );
        let form = CaptureForm::new(extracted)
            .with_thresholds(ConfidenceThresholds { high: 80, medium: 60 });

        assert_eq!(
            confidence_report(&form),
            vec![
                "Name extracted with High confidence (92%)",
                "ID Number extracted with High confidence (80%)",
                "Date of Birth extracted with Medium confidence (60%)",
            ]
        );
    }
}
