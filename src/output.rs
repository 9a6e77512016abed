//! Output path templates
//!
//! A template such as `output/{name}.py` is expanded once to
//! `output/{name}_{index}.py`, then resolved per block with the file key
//! and the block's position in its document.

use crate::error::{ExtractError, Result};
use std::path::{Path, PathBuf};

const NAME: &str = "{name}";
const INDEX: &str = "{index}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTemplate {
    pattern: String,
}

impl OutputTemplate {
    pub fn parse(template: &str) -> Result<Self> {
        if !template.contains(NAME) {
            return Err(ExtractError::InvalidTemplate(template.to_string()));
        }
        Ok(Self {
            pattern: template.replace(NAME, "{name}_{index}"),
        })
    }

    /// Output path for block `index` of the file identified by `file_key`.
    pub fn resolve(&self, file_key: &Path, index: usize) -> PathBuf {
        let name = file_key.to_string_lossy();
        let resolved = self
            .pattern
            .replace(INDEX, &index.to_string())
            .replace(NAME, &name);
        PathBuf::from(resolved)
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }
}
