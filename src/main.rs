use anyhow::Result;
use clap::builder::BoolishValueParser;
use clap::{Parser, ValueEnum};
use mdcodes::config::CONFIG_FILE;
use mdcodes::{ExtractConfig, ExtractionStrategy, run};
use std::path::PathBuf;
use tracing::Level;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliStrategy {
    Fenced,
    Structural,
}

impl From<CliStrategy> for ExtractionStrategy {
    fn from(s: CliStrategy) -> Self {
        match s {
            CliStrategy::Fenced => ExtractionStrategy::Fenced,
            CliStrategy::Structural => ExtractionStrategy::Structural,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Extract code blocks from markdown files", long_about = None)]
struct Args {
    /// Markdown files or directories to scan
    input: Vec<PathBuf>,

    /// Output path template; {name} is the file's relative path, an _{index} suffix is added per block
    #[arg(short, long)]
    output: Option<String>,

    /// Scan ``` fences line by line (true) or parse the markdown (false)
    #[arg(long, value_parser = BoolishValueParser::new(), conflicts_with = "strategy")]
    github: Option<bool>,

    /// Extraction strategy
    #[arg(long, value_enum)]
    strategy: Option<CliStrategy>,

    /// Only extract fences tagged with a target language
    #[arg(long, value_parser = BoolishValueParser::new())]
    safe: Option<bool>,

    /// Target language tag (repeatable, replaces the default py/python)
    #[arg(long = "lang")]
    languages: Vec<String>,

    /// Marker file dropped into created directories
    #[arg(long, conflicts_with = "no_marker")]
    marker: Option<String>,

    /// Do not drop marker files into created directories
    #[arg(long)]
    no_marker: bool,

    /// Process files in parallel
    #[arg(long)]
    parallel: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // 1. Load from file or default; logging is set up first so a broken
    // config file can be reported
    let loaded = ExtractConfig::load_from_file();
    let file_verbose = matches!(&loaded, Ok(Some(c)) if c.verbose);
    let level = if args.verbose || file_verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let mut config = match loaded {
        Ok(Some(config)) => config,
        Ok(None) => ExtractConfig::default(),
        Err(e) => {
            tracing::warn!("Ignoring {}: {:#}", CONFIG_FILE, e);
            ExtractConfig::default()
        }
    };

    // 2. Override with CLI args
    if !args.input.is_empty() {
        config.inputs = args.input;
    }
    if let Some(o) = args.output {
        config.output = o;
    }
    if let Some(github) = args.github {
        config.strategy = if github {
            ExtractionStrategy::Fenced
        } else {
            ExtractionStrategy::Structural
        };
    }
    if let Some(s) = args.strategy {
        config.strategy = s.into();
    }
    if let Some(safe) = args.safe {
        config.safe = safe;
    }
    if !args.languages.is_empty() {
        config.languages = args.languages;
    }
    if let Some(m) = args.marker {
        config.package_marker = Some(m);
    }
    if args.no_marker {
        config.package_marker = None;
    }
    if args.parallel {
        config.parallel = true;
    }
    if args.verbose {
        config.verbose = true;
    }

    run(config)?;

    Ok(())
}
