//! Markdown-parser based extraction
//!
//! Collects the text of every top-level code block the parser recognises
//! (fenced or indented), ignoring language annotations entirely. Code
//! blocks nested in lists, block quotes or footnotes are skipped.

use super::BlockExtractor;
use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Default)]
pub struct StructuralExtractor {
    warned_safe: AtomicBool,
}

impl StructuralExtractor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlockExtractor for StructuralExtractor {
    fn extract_str(&self, text: &str, safe: bool) -> Vec<String> {
        if safe && !self.warned_safe.swap(true, Ordering::Relaxed) {
            tracing::warn!("'safe' option has no effect in structural mode; extracting every code block");
        }

        let mut blocks = Vec::new();
        let mut current: Option<String> = None;
        let mut nesting = 0usize;

        for event in Parser::new(text) {
            match event {
                Event::Start(
                    Tag::List(_) | Tag::Item | Tag::BlockQuote(_) | Tag::FootnoteDefinition(_),
                ) => {
                    nesting += 1;
                }
                Event::End(
                    TagEnd::List(_)
                    | TagEnd::Item
                    | TagEnd::BlockQuote(_)
                    | TagEnd::FootnoteDefinition,
                ) => {
                    nesting = nesting.saturating_sub(1);
                }
                Event::Start(Tag::CodeBlock(_)) if nesting == 0 => {
                    current = Some(String::new());
                }
                Event::Text(chunk) => {
                    if let Some(block) = current.as_mut() {
                        block.push_str(&chunk);
                    }
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some(block) = current.take() {
                        blocks.push(block);
                    }
                }
                _ => {}
            }
        }

        blocks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    const SAFE_WARNING: &str = "'safe' option has no effect";

    /// Shared buffer the fmt subscriber writes into
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).to_string()
        }
    }

    fn capture_logs(f: impl FnOnce()) -> String {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        buffer.contents()
    }

    #[test]
    fn test_collects_all_code_blocks() {
        let doc = "Intro\n\n```python\nprint(1)\n```\n\n```rust\nfn main() {}\n```\n\n    indented = True\n";
        let blocks = StructuralExtractor::new().extract_str(doc, false);
        assert_eq!(
            blocks,
            vec!["print(1)\n", "fn main() {}\n", "indented = True\n"]
        );
    }

    #[test]
    fn test_nested_code_blocks_skipped() {
        let doc = "- item\n\n      nested()\n\n> ```\n> quoted()\n> ```\n\nParagraph.\n\n    top()\n";
        assert_eq!(
            StructuralExtractor::new().extract_str(doc, false),
            vec!["top()\n"]
        );
    }

    #[test]
    fn test_safe_is_ignored() {
        let doc = "```\nuntagged\n```\n";
        let extractor = StructuralExtractor::new();
        assert_eq!(extractor.extract_str(doc, true), vec!["untagged\n"]);
        assert_eq!(extractor.extract_str(doc, false), vec!["untagged\n"]);
    }

    #[test]
    fn test_safe_warns_once_per_extractor() {
        let doc = "```\nx\n```\n";
        let extractor = StructuralExtractor::new();
        let logs = capture_logs(|| {
            extractor.extract_str(doc, true);
            extractor.extract_str(doc, true);
        });
        assert_eq!(logs.matches(SAFE_WARNING).count(), 1);
        assert!(logs.contains("WARN"));
    }

    #[test]
    fn test_no_warning_without_safe() {
        let doc = "```\nx\n```\n";
        let extractor = StructuralExtractor::new();
        let logs = capture_logs(|| {
            extractor.extract_str(doc, false);
        });
        assert!(!logs.contains(SAFE_WARNING));
    }

    #[test]
    fn test_inline_code_is_not_a_block() {
        let doc = "Use `print(1)` inline.\n";
        assert!(StructuralExtractor::new().extract_str(doc, false).is_empty());
    }

    #[test]
    fn test_text_is_not_html_escaped() {
        let doc = "```\nif a < b and c > d:\n    pass\n```\n";
        assert_eq!(
            StructuralExtractor::new().extract_str(doc, false),
            vec!["if a < b and c > d:\n    pass\n"]
        );
    }
}
