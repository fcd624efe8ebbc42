//! Process command - extract fields from a single ID card file.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use idscan_core::models::config::ConfidenceThresholds;
use idscan_core::{validate, ConfidenceLevel, ExtractionResult, Field};

use super::load_config;
use super::pipeline::Pipeline;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (image, .txt recognized text, or .json recognition)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Model directory
    #[arg(short, long)]
    model_dir: Option<PathBuf>,

    /// Show extraction confidence scores
    #[arg(long)]
    show_confidence: bool,

    /// Validate extracted data
    #[arg(long)]
    validate: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;

    // Check input file exists
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message("Extracting fields...");

    let mut pipeline = Pipeline::new(&config, args.model_dir.as_deref());
    let result = pipeline.extract_file(&args.input);

    pb.finish_and_clear();
    let result = result?;

    if result.is_failed() {
        eprintln!(
            "{} Text recognition failed; returning an empty result",
            style("⚠").yellow()
        );
    }

    // Validate if requested
    if args.validate {
        let errors = validate(&result);
        if !errors.is_empty() {
            eprintln!("{}", style("Validation issues:").yellow());
            for (field, message) in errors.iter() {
                eprintln!("  - {}: {}", field.label(), message);
            }
        }
    }

    // Format output
    let output = format_result(&result, args.format)?;

    // Write output
    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_confidence {
        eprintln!();
        for line in confidence_lines(&result, &config.confidence) {
            eprintln!("{} {}", style("ℹ").blue(), line);
        }
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

pub fn format_result(result: &ExtractionResult, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Csv => format_csv(result),
        OutputFormat::Text => Ok(format_text(result)),
    }
}

fn format_csv(result: &ExtractionResult) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "name",
        "id_number",
        "date_of_birth",
        "name_confidence",
        "id_number_confidence",
        "date_of_birth_confidence",
    ])?;

    wtr.write_record([
        result.name.as_str(),
        result.id_number.as_str(),
        result.date_of_birth.as_str(),
        &result.confidence.name.to_string(),
        &result.confidence.id_number.to_string(),
        &result.confidence.date_of_birth.to_string(),
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(result: &ExtractionResult) -> String {
    let mut output = String::new();

    for field in Field::ALL {
        let value = result.get(field);
        output.push_str(&format!(
            "{:<15}{}\n",
            format!("{}:", field.label()),
            if value.is_empty() { "-" } else { value }
        ));
    }

    output
}

fn confidence_lines(result: &ExtractionResult, thresholds: &ConfidenceThresholds) -> Vec<String> {
    Field::ALL
        .iter()
        .map(|field| {
            let score = result.confidence.get(*field);
            format!(
                "{} confidence: {}% ({})",
                field.label(),
                score,
                ConfidenceLevel::classify(score, thresholds)
            )
        })
        .collect()
}
