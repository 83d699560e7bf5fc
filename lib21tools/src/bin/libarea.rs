//! # libarea
//!
//! Updates Liberty `area` attributes from LEF macro sizes, and summarizes memory-macro density
//!

use clap::Parser;
use std::error::Error;
use std::path::PathBuf;

use lib21::Lib21Config;
use lib21tools::init_logging;
use lib21tools::ops::{self, AreaRun};

// => The doc-comment on `ProgramOptions` here is displayed by the `clap`-generated help docs =>

/// Liberty Area Updater
/// Sets the `area` of each `LIB/<macro>.lib` to the `SIZE` of `LEF/<macro>.lef`.
#[derive(Parser)]
struct ProgramOptions {
    /// Technology Directory, containing `LIB` and `LEF` sub-directories
    root: PathBuf,
    /// Configuration File (JSON, YAML, or TOML)
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,
    /// Verbose Output Mode
    #[clap(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let options = ProgramOptions::parse();
    let run = _main(&options)?;
    if !run.summary.ok() {
        std::process::exit(run.summary.exit_code());
    }
    Ok(())
}

fn _main(options: &ProgramOptions) -> Result<AreaRun, Box<dyn Error>> {
    init_logging(options.verbose);
    let cfg = Lib21Config::open_or_default(options.config.as_ref())?;
    println!("--- Starting Liberty Area Update ---");
    let run = ops::area_dir(&options.root, &cfg.area)?;
    run.summary.print();
    run.density.print();
    println!("\nUpdate complete.");
    Ok(run)
}
