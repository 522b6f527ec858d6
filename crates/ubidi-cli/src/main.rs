// this_file: crates/ubidi-cli/src/main.rs

//! ubidi CLI: bidi analysis of single texts and JSONL batches.
//!
//! `analyze` prints a JSON report for one text. `batch` reads a JSON job
//! specification or JSONL jobs from stdin and writes one JSONL result per job,
//! in input order.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use rayon::prelude::*;
use std::io::{self, Read, Write};
use ubidi::{constants, AnalysisCache, BidiConfig, Paragraph, ParagraphOptions, UnitReport, WriteOptions};

mod input;
mod jobs;
mod limits;

/// ubidi: Unicode bidirectional paragraph analysis
#[derive(Parser)]
#[command(name = "ubidi")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one text and print a JSON report
    Analyze {
        /// Text to analyze (reads --input or stdin if omitted)
        text: Option<String>,

        /// Read the text from this file
        #[arg(short, long, conflicts_with = "text")]
        input: Option<Utf8PathBuf>,

        #[command(flatten)]
        options: AnalyzeOptions,

        /// Report only the line [START, LIMIT) of the text
        #[arg(long, num_args = 2, value_names = ["START", "LIMIT"])]
        line: Option<Vec<usize>>,

        /// Pretty-print the JSON report
        #[arg(long)]
        pretty: bool,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },

    /// Process a batch of analysis jobs from stdin (JSON spec or JSONL)
    Batch {
        /// Analysis cache size (number of paragraphs)
        #[arg(long, default_value = "512")]
        cache_size: usize,

        /// Number of parallel worker threads (0 = auto)
        #[arg(long = "jobs", default_value = "0", alias = "workers")]
        jobs: usize,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print the exported constants as JSON
    Constants,

    /// Print version information
    Version,
}

/// Analysis flags, mapped onto the same record JSON jobs use.
#[derive(Args, Debug)]
struct AnalyzeOptions {
    /// Raw paragraph level: 0-125, 254 (default LTR) or 255 (default RTL)
    #[arg(long, allow_negative_numbers = true)]
    para_level: Option<i64>,

    /// Raw reordering mode (0-6)
    #[arg(long, allow_negative_numbers = true)]
    reordering_mode: Option<i64>,

    /// Raw reordering option bits (1 insert marks, 2 remove controls, 4 streaming)
    #[arg(long, allow_negative_numbers = true)]
    reordering_options: Option<i64>,

    /// Treat the text as visual order
    #[arg(long)]
    inverse: bool,

    /// Resolve paragraph separators to level 0
    #[arg(long)]
    reorder_paragraphs_ltr: bool,

    /// Context text preceding the input
    #[arg(long)]
    prologue: Option<String>,

    /// Context text following the input
    #[arg(long)]
    epilogue: Option<String>,

    /// Raw write option bits for the reordered text
    #[arg(long, default_value = "0")]
    write_options: u16,
}

impl AnalyzeOptions {
    fn paragraph_options(&self) -> ParagraphOptions {
        ParagraphOptions {
            para_level: self.para_level,
            reordering_mode: self.reordering_mode,
            reordering_options: self.reordering_options,
            inverse: self.inverse,
            reorder_paragraphs_ltr: self.reorder_paragraphs_ltr,
            prologue: self.prologue.clone(),
            epilogue: self.epilogue.clone(),
            ..Default::default()
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            text,
            input,
            options,
            line,
            pretty,
            verbose,
        } => {
            init_logging(verbose);
            let text = read_text(text, input)?;
            run_analyze(&text, &options, line.as_deref(), pretty)?;
        }
        Commands::Batch {
            cache_size,
            jobs,
            verbose,
        } => {
            init_logging(verbose);
            run_batch_mode(cache_size, jobs)?;
        }
        Commands::Constants => {
            let table: serde_json::Map<String, serde_json::Value> = constants::table()
                .into_iter()
                .map(|(name, value)| (name.to_owned(), value.into()))
                .collect();
            println!("{}", serde_json::to_string_pretty(&table)?);
        }
        Commands::Version => {
            println!("ubidi {}", env!("CARGO_PKG_VERSION"));
            println!("Unicode bidirectional analysis with ICU4X character data");
        }
    }

    Ok(())
}

/// Initialize logging based on verbosity.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_millis()
        .init();
}

/// Text from the argument, the input file or stdin, in that order.
fn read_text(text: Option<String>, input: Option<Utf8PathBuf>) -> anyhow::Result<String> {
    let text = match (text, input) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(path.as_std_path())
            .with_context(|| format!("Failed to read {path}"))?,
        (None, None) => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    limits::validate_text(&text)?;
    Ok(text)
}

fn run_analyze(
    text: &str,
    options: &AnalyzeOptions,
    line: Option<&[usize]>,
    pretty: bool,
) -> anyhow::Result<()> {
    let config = BidiConfig::from_options(&options.paragraph_options());
    let write_options = WriteOptions::from_raw(options.write_options);
    let paragraph = Paragraph::new(text, config)?;

    let report = match line {
        Some(&[start, limit]) => UnitReport::for_line(&paragraph.line(start, limit)?, write_options),
        Some(other) => anyhow::bail!("--line takes START and LIMIT, got {} values", other.len()),
        None => UnitReport::for_paragraph(&paragraph, write_options),
    };

    let json = if pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{json}");
    Ok(())
}

/// Run in batch mode: read all jobs from stdin, process in parallel, output JSONL.
fn run_batch_mode(cache_size: usize, workers: usize) -> anyhow::Result<()> {
    log::info!(
        "Starting batch mode (cache_size={}, jobs={})",
        cache_size,
        workers
    );

    let mut payload = String::new();
    io::stdin().lock().read_to_string(&mut payload)?;
    limits::validate_json_size(&payload, limits::MAX_JSON_SIZE)?;

    let batch = input::parse_jobs_payload(&payload)?;
    log::info!("Loaded {} jobs from stdin", batch.len());

    if workers > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build_global()
            .ok();
    }

    let cache = AnalysisCache::new(cache_size);
    let results: Vec<jobs::JobResult> = batch
        .par_iter()
        .map(|job| jobs::process_job(job, &cache))
        .collect();

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    for result in &results {
        writeln!(handle, "{}", serde_json::to_string(result)?)?;
    }
    handle.flush()?;

    let failed = results.iter().filter(|r| r.status != "success").count();
    log::info!(
        "Batch processing complete ({} jobs, {} failed)",
        results.len(),
        failed
    );
    Ok(())
}
