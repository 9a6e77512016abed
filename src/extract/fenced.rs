//! Line-oriented scanner for ``` fenced code blocks
//!
//! A fence is any line starting with three or more backticks. The
//! opening fence decides whether the block is kept: it must be nothing but
//! backticks followed by one of the target language tags, or (when not in
//! safe mode) no tag at all. Any fence line closes an open block.
//! A block still open at end of input is dropped.

use super::BlockExtractor;
use crate::error::{ExtractError, Result};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Start or end of a fenced region
    static ref FENCE_DELIMITER: Regex = Regex::new(r"^```").unwrap();
}

#[derive(Debug)]
enum FenceState {
    Outside,
    InsideTarget(String),
    InsideOther,
}

#[derive(Debug)]
pub struct FenceScanner {
    /// Opening fence with a mandatory target tag
    tagged: Regex,
    /// Opening fence with an optional target tag
    untagged: Regex,
}

impl FenceScanner {
    pub fn new(languages: &[String]) -> Result<Self> {
        // An empty alternation would let a bare fence pass as tagged
        if languages.is_empty() || languages.iter().any(|lang| lang.is_empty()) {
            return Err(ExtractError::EmptyLanguage(languages.to_vec()));
        }
        let tags = languages
            .iter()
            .map(|lang| regex::escape(lang))
            .collect::<Vec<_>>()
            .join("|");
        Ok(Self {
            tagged: Regex::new(&format!(r"^````*(?:{})$", tags))?,
            untagged: Regex::new(&format!(r"^````*(?:{})?$", tags))?,
        })
    }

    fn opener(&self, safe: bool) -> &Regex {
        if safe { &self.tagged } else { &self.untagged }
    }
}

impl BlockExtractor for FenceScanner {
    fn extract_str(&self, text: &str, safe: bool) -> Vec<String> {
        let opener = self.opener(safe);
        let mut blocks = Vec::new();
        let mut state = FenceState::Outside;

        for line in text.split_inclusive('\n') {
            let bare = line.strip_suffix('\n').unwrap_or(line);
            let bare = bare.strip_suffix('\r').unwrap_or(bare);
            let is_fence = FENCE_DELIMITER.is_match(bare);

            state = match (state, is_fence) {
                (FenceState::Outside, true) if opener.is_match(bare) => {
                    FenceState::InsideTarget(String::new())
                }
                (FenceState::Outside, true) => FenceState::InsideOther,
                (FenceState::Outside, false) => FenceState::Outside,
                (FenceState::InsideTarget(block), true) => {
                    blocks.push(block);
                    FenceState::Outside
                }
                (FenceState::InsideTarget(mut block), false) => {
                    block.push_str(line);
                    FenceState::InsideTarget(block)
                }
                (FenceState::InsideOther, true) => FenceState::Outside,
                (FenceState::InsideOther, false) => FenceState::InsideOther,
            };
        }

        if !matches!(state, FenceState::Outside) {
            tracing::debug!("Dropping unterminated fenced block at end of document");
        }

        blocks
    }
}
