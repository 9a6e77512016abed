use crate::config::ExtractConfig;
use crate::core::{DiscoveredFile, RunSummary, ScanEvent, discover_files};
use crate::extract::{BlockExtractor, create_extractor};
use crate::fs::{ensure_dir, write_block};
use crate::output::OutputTemplate;
use anyhow::{Context, Result, anyhow};
use crossbeam_channel::Sender;
use rayon::prelude::*;
use std::path::Path;

/// Main entry point for mdcodes in CLI mode.
///
/// The extraction runs on a background thread while this thread consumes
/// its events, printing progress when `verbose` is enabled. Fails after
/// printing the summary if any file could not be written out.
pub fn run(config: ExtractConfig) -> Result<RunSummary> {
    config.validate()?;

    let (tx, rx) = crossbeam_channel::unbounded();

    let config_clone = config.clone();
    // A fatal error comes back through the join handle and is reported by the caller
    let handle = std::thread::spawn(move || run_scan(config_clone, Some(tx)));

    for event in rx {
        match event {
            ScanEvent::StartScanning => {
                if config.verbose {
                    println!("Scanning started...")
                }
            }
            ScanEvent::FileProcessed(p, n) => {
                if config.verbose {
                    println!("Processed: {:?} ({} blocks)", p, n)
                }
            }
            ScanEvent::BlockWritten(p) => {
                if config.verbose {
                    println!("Wrote: {:?}", p)
                }
            }
            ScanEvent::Complete(msg) => {
                if config.verbose {
                    println!("{}", msg)
                }
            }
            ScanEvent::Error(e) => eprintln!("Error: {}", e),
        }
    }

    let summary = handle
        .join()
        .map_err(|_| anyhow!("Extraction thread panicked"))??;

    if !summary.failures.is_empty() {
        eprintln!("{}", summary.describe());
        for failure in &summary.failures {
            eprintln!("  - {:?}: {}", failure.path, failure.message);
        }
        anyhow::bail!("{} file(s) could not be extracted", summary.failures.len());
    }

    Ok(summary)
}

/// Discover, extract and write every block for the configured inputs.
pub fn run_scan(config: ExtractConfig, tx: Option<Sender<ScanEvent>>) -> Result<RunSummary> {
    let pipeline = Pipeline::new(&config, tx)?;
    pipeline.notify(ScanEvent::StartScanning);

    let files = discover_files(&config.inputs).context("Failed to discover input files")?;

    let summary = if config.parallel {
        let files: Vec<DiscoveredFile> = files.collect();
        files
            .par_iter()
            .map(|file| pipeline.process_file(file))
            .reduce(RunSummary::default, RunSummary::merge)
    } else {
        files.fold(RunSummary::default(), |acc, file| {
            acc.merge(pipeline.process_file(&file))
        })
    };

    pipeline.notify(ScanEvent::Complete(summary.describe()));
    Ok(summary)
}

struct Pipeline<'a> {
    config: &'a ExtractConfig,
    template: OutputTemplate,
    extractor: Box<dyn BlockExtractor>,
    tx: Option<Sender<ScanEvent>>,
}

impl<'a> Pipeline<'a> {
    fn new(config: &'a ExtractConfig, tx: Option<Sender<ScanEvent>>) -> Result<Self> {
        let template = OutputTemplate::parse(&config.output)?;
        let extractor = create_extractor(config)?;
        Ok(Self {
            config,
            template,
            extractor,
            tx,
        })
    }

    fn notify(&self, event: ScanEvent) {
        if let Some(ref tx) = self.tx {
            let _ = tx.send(event);
        }
    }

    /// Extract one file and write its blocks. A failure stops this file's
    /// remaining blocks and is recorded in the returned summary.
    fn process_file(&self, file: &DiscoveredFile) -> RunSummary {
        let mut summary = RunSummary {
            files_scanned: 1,
            ..Default::default()
        };

        let blocks = match self.extractor.extract_file(&file.path, self.config.safe) {
            Ok(blocks) => blocks,
            Err(e) => {
                self.notify(ScanEvent::Error(e.to_string()));
                summary.record_failure(&file.path, e.to_string());
                return summary;
            }
        };
        self.notify(ScanEvent::FileProcessed(file.path.clone(), blocks.len()));

        if blocks.is_empty() {
            return summary;
        }
        summary.files_with_blocks = 1;

        let key = file.file_key();
        for (index, text) in blocks.iter().enumerate() {
            let target = self.template.resolve(&key, index);
            match self.write_output(&target, text) {
                Ok(created) => {
                    summary.dirs_created += created;
                    summary.blocks_written += 1;
                    self.notify(ScanEvent::BlockWritten(target));
                }
                Err(e) => {
                    tracing::debug!("Skipping remaining blocks of {:?}", file.path);
                    self.notify(ScanEvent::Error(e.to_string()));
                    summary.record_failure(&file.path, e.to_string());
                    break;
                }
            }
        }

        summary
    }

    fn write_output(&self, target: &Path, text: &str) -> crate::error::Result<usize> {
        let created = match target.parent() {
            Some(dir) => ensure_dir(dir, self.config.package_marker.as_deref())?,
            None => Vec::new(),
        };
        write_block(target, text)?;
        Ok(created.len())
    }
}
