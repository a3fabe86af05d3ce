//! Data models for extraction results and configuration.

pub mod config;
pub mod item;

pub use config::ExtractorConfig;
pub use item::{ExtractionResult, LineItem};
