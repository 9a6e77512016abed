//! Core types shared across mdcodes modules

use std::path::{Path, PathBuf};

/// A markdown file found under one of the inputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    pub path: PathBuf,
    /// Directory levels between the input root and the file
    pub depth: usize,
}

impl DiscoveredFile {
    pub fn new(path: impl Into<PathBuf>, depth: usize) -> Self {
        Self {
            path: path.into(),
            depth,
        }
    }

    /// The last `depth + 1` path segments, i.e. the path relative to the
    /// input root it was discovered under.
    pub fn file_key(&self) -> PathBuf {
        let segments: Vec<_> = self.path.components().collect();
        let start = segments.len().saturating_sub(self.depth + 1);
        segments[start..].iter().collect()
    }
}

/// Events emitted during a run
#[derive(Debug, Clone)]
pub enum ScanEvent {
    /// Scanning has started
    StartScanning,
    /// A file has been scanned, with the number of blocks it yielded
    FileProcessed(PathBuf, usize),
    /// An output file has been written
    BlockWritten(PathBuf),
    /// Run complete with message
    Complete(String),
    /// Error occurred
    Error(String),
}

/// A file whose blocks could not all be written
#[derive(Debug, Clone)]
pub struct FileFailure {
    pub path: PathBuf,
    pub message: String,
}

/// Totals collected over a run
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub files_scanned: usize,
    pub files_with_blocks: usize,
    pub blocks_written: usize,
    pub dirs_created: usize,
    pub failures: Vec<FileFailure>,
}

impl RunSummary {
    pub fn record_failure(&mut self, path: &Path, message: impl Into<String>) {
        self.failures.push(FileFailure {
            path: path.to_path_buf(),
            message: message.into(),
        });
    }

    pub fn merge(mut self, other: RunSummary) -> Self {
        self.files_scanned += other.files_scanned;
        self.files_with_blocks += other.files_with_blocks;
        self.blocks_written += other.blocks_written;
        self.dirs_created += other.dirs_created;
        self.failures.extend(other.failures);
        self
    }

    pub fn describe(&self) -> String {
        format!(
            "Scanned {} files, {} with code blocks: wrote {} blocks, created {} directories, {} failures.",
            self.files_scanned,
            self.files_with_blocks,
            self.blocks_written,
            self.dirs_created,
            self.failures.len()
        )
    }
}
