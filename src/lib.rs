pub mod config;
pub mod core;
pub mod error;
pub mod extract;
pub mod fs;
pub mod output;
pub mod runner;

// Re-export key items for convenience
pub use config::{ExtractConfig, ExtractionStrategy};
pub use core::{DiscoveredFile, RunSummary, ScanEvent};
pub use error::ExtractError;
pub use extract::{BlockExtractor, create_extractor};
pub use runner::{run, run_scan};
