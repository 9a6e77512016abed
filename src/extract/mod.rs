//! Code block extraction strategies

pub mod fenced;
pub mod structural;

use crate::config::{ExtractConfig, ExtractionStrategy};
use crate::error::{ExtractError, Result};
use std::path::Path;

pub use fenced::FenceScanner;
pub use structural::StructuralExtractor;

pub trait BlockExtractor: Send + Sync {
    /// Extract block texts from an in-memory document, in document order.
    fn extract_str(&self, text: &str, safe: bool) -> Vec<String>;

    /// Read a UTF-8 markdown file and extract its blocks.
    fn extract_file(&self, path: &Path, safe: bool) -> Result<Vec<String>> {
        let text = std::fs::read_to_string(path).map_err(|source| ExtractError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(self.extract_str(&text, safe))
    }
}

pub fn create_extractor(config: &ExtractConfig) -> Result<Box<dyn BlockExtractor>> {
    Ok(match config.strategy {
        ExtractionStrategy::Fenced => Box::new(FenceScanner::new(&config.languages)?),
        ExtractionStrategy::Structural => Box::new(StructuralExtractor::new()),
    })
}
