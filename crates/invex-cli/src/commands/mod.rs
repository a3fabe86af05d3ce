//! CLI subcommands.

pub mod extract;
pub mod patterns;

use std::path::Path;

use invex_core::{Extractor, ExtractorConfig};

/// Build an extractor from an optional config file path.
pub fn build_extractor(config_path: Option<&str>) -> anyhow::Result<Extractor> {
    let config = match config_path {
        Some(path) => ExtractorConfig::from_file(Path::new(path))?,
        None => ExtractorConfig::default(),
    };
    Ok(Extractor::with_config(config)?)
}
