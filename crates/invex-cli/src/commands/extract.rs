//! Extract command - pull header fields and line items from a text file.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use console::style;
use invex_core::{ExtractionResult, KnownIdentifierSet};
use tracing::info;

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input text file (UTF-8, as produced by OCR/PDF text extraction)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// File with known part identifiers, one per line
    #[arg(short, long)]
    known: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text summary
    Text,
}

pub fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let text = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;

    let mut extractor = super::build_extractor(config_path)?;

    if let Some(known_path) = &args.known {
        let content = fs::read_to_string(known_path)
            .with_context(|| format!("failed to read {}", known_path.display()))?;
        let known: KnownIdentifierSet = content.lines().collect();
        info!("Loaded {} known identifiers", known.len());
        extractor = extractor.with_known_set(known);
    }

    let result = extractor.extract_from_text(&text);

    let rendered = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&result)?,
        OutputFormat::Text => render_text(&result),
    };

    match &args.output {
        Some(path) => fs::write(path, rendered)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => println!("{rendered}"),
    }

    Ok(())
}

fn render_text(result: &ExtractionResult) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Supplier:  {}\n",
        result.supplier_name.as_deref().unwrap_or("Unknown")
    ));
    out.push_str(&format!(
        "Invoice #: {}\n",
        result.invoice_number.as_deref().unwrap_or("Not found")
    ));
    out.push_str(&format!(
        "PO Numbers: {}\n",
        if result.po_numbers.is_empty() {
            "None found".to_string()
        } else {
            result.po_numbers.iter().cloned().collect::<Vec<_>>().join(", ")
        }
    ));
    if result.known_matches > 0 {
        out.push_str(&format!(
            "Catalog matches: {} of {} items verified\n",
            result.known_matches,
            result.line_items.len()
        ));
    }

    out.push_str(&format!(
        "\n{} line items:\n",
        style(result.line_items.len()).bold()
    ));
    for (i, item) in result.line_items.iter().enumerate() {
        out.push_str(&format!(
            "{:3}. {:<15} qty {:<8} total {:<12} conf {:.0}%\n",
            i + 1,
            item.part_number,
            item.quantity,
            item.total_price,
            item.confidence * 100.0
        ));
        if !item.description.is_empty() {
            out.push_str(&format!("     {}\n", style(&item.description).dim()));
        }
    }

    out
}
