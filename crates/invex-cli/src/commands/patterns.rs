//! Patterns command - report repeating line layouts in a document.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use console::style;

/// Arguments for the patterns command.
#[derive(Args)]
pub struct PatternsArgs {
    /// Input text file (UTF-8)
    #[arg(required = true)]
    input: PathBuf,

    /// Minimum lines sharing a layout before it is reported
    #[arg(short, long)]
    min_frequency: Option<usize>,

    /// Emit JSON instead of a text summary
    #[arg(long)]
    json: bool,

    /// How many patterns to show
    #[arg(short, long, default_value = "5")]
    top: usize,
}

pub fn run(args: PatternsArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let text = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;

    let mut extractor = super::build_extractor(config_path)?;
    if let Some(min) = args.min_frequency {
        let mut config = extractor.config().clone();
        config.min_frequency = min;
        extractor = invex_core::Extractor::with_config(config)?;
    }

    let patterns = extractor.detect_patterns(&text);

    if args.json {
        let shown: Vec<_> = patterns.iter().take(args.top).collect();
        println!("{}", serde_json::to_string_pretty(&shown)?);
        return Ok(());
    }

    println!(
        "{} layout patterns detected",
        style(patterns.len()).bold()
    );

    for (i, pattern) in patterns.iter().take(args.top).enumerate() {
        println!("\nPattern {}:", i + 1);
        println!("  Signature:  {}", pattern.simplified_signature);
        println!("  Frequency:  {} lines", pattern.frequency);
        println!("  Confidence: {:.2}", pattern.confidence);
        if let Some(sample) = pattern.sample_lines.first() {
            let preview: String = sample.raw_text.chars().take(80).collect();
            println!("  Sample:     {}", style(preview).dim());
        }
        if !pattern.field_mapping.is_empty() {
            let fields: Vec<String> = pattern
                .field_mapping
                .iter()
                .map(|(pos, name)| format!("{pos}:{name}"))
                .collect();
            println!("  Fields:     {}", fields.join(" "));
        }
    }

    Ok(())
}
