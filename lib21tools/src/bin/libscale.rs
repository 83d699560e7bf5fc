//! # libscale
//!
//! Rescales the `values` and `index_*` tables of output pins and buses in Liberty files
//!

use clap::Parser;
use std::error::Error;
use std::path::PathBuf;

use lib21::Lib21Config;
use lib21tools::{batch, init_logging, ops, resolve_jobs, BatchSummary};

// => The doc-comment on `ProgramOptions` here is displayed by the `clap`-generated help docs =>

/// Liberty Output-Pin Table Rescaler
/// Divides every number in output pin and bus `values` and `index_*` tables, by 1000 unless configured otherwise.
#[derive(Parser)]
struct ProgramOptions {
    /// Liberty Input File(s)
    #[clap(required = true)]
    inputs: Vec<PathBuf>,
    /// Output File. Requires a single input. Inputs are overwritten if omitted.
    #[clap(short = 'o', long)]
    output: Option<PathBuf>,
    /// Configuration File (JSON, YAML, or TOML)
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,
    /// Verbose Output Mode
    #[clap(short, long)]
    verbose: bool,
}

/// The main entry point.
/// All logic is offloaded to `_main` for sake of testing.
fn main() -> Result<(), Box<dyn Error>> {
    let options = ProgramOptions::parse();
    let summary = _main(&options)?;
    if !summary.ok() {
        std::process::exit(summary.exit_code());
    }
    Ok(())
}

/// All the real logic, with `ProgramOptions` argument for sake of testing
fn _main(options: &ProgramOptions) -> Result<BatchSummary, Box<dyn Error>> {
    init_logging(options.verbose);
    let cfg = Lib21Config::open_or_default(options.config.as_ref())?;
    let jobs = resolve_jobs(&options.inputs, options.output.as_deref())?;
    if options.output.is_none() {
        eprintln!("Warning: no output file specified, input file(s) will be overwritten");
    }
    let summary = batch::run(&jobs, |job| ops::scale_file(job, &cfg.scale));
    summary.print();
    Ok(summary)
}
