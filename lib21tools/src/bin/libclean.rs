//! # libclean
//!
//! Removes `setup_falling` timing arcs related to `clk` from Liberty files
//!

use clap::Parser;
use std::error::Error;
use std::path::PathBuf;

use lib21::Lib21Config;
use lib21tools::{batch, init_logging, ops, resolve_jobs, BatchSummary};

// => The doc-comment on `ProgramOptions` here is displayed by the `clap`-generated help docs =>

/// Liberty Timing-Block Cleaner
/// Removes each `timing ()` block with both `related_pin : "clk"` and `timing_type : setup_falling`.
#[derive(Parser)]
struct ProgramOptions {
    /// Liberty File(s) to Process
    #[clap(required = true)]
    files: Vec<PathBuf>,
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

fn main() -> Result<(), Box<dyn Error>> {
    let options = ProgramOptions::parse();
    let summary = _main(&options)?;
    if !summary.ok() {
        std::process::exit(summary.exit_code());
    }
    Ok(())
}

fn _main(options: &ProgramOptions) -> Result<BatchSummary, Box<dyn Error>> {
    init_logging(options.verbose);
    let cfg = Lib21Config::open_or_default(options.config.as_ref())?;
    let jobs = resolve_jobs(&options.files, options.output.as_deref())?;
    if options.output.is_none() {
        eprintln!("Warning: no output file specified, input file(s) will be overwritten");
    }
    let mut first = true;
    let summary = batch::run(&jobs, |job| {
        if !first {
            println!("{}", "-".repeat(40));
        }
        first = false;
        ops::clean_file(job, &cfg.clean)
    });
    summary.print();
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleans_in_place() -> Result<(), Box<dyn Error>> {
        let tmp = tempfile::tempdir()?;
        let path = tmp.path().join("dff_timing.lib");
        std::fs::copy(resource("dff_timing.lib"), &path)?;
        let options = ProgramOptions {
            files: vec![path.clone()],
            output: None,
            config: None,
            verbose: false,
        };
        let summary = _main(&options)?;
        assert_eq!(summary.written, 1);
        let golden = std::fs::read_to_string(resource("dff_timing.cleaned.lib"))?;
        assert_eq!(std::fs::read_to_string(&path)?, golden);

        // Nothing left to remove the second time around
        let summary = _main(&options)?;
        assert_eq!((summary.written, summary.unchanged), (0, 1));
        Ok(())
    }
    #[test]
    fn honors_config_file() -> Result<(), Box<dyn Error>> {
        let tmp = tempfile::tempdir()?;
        let cfg = tmp.path().join("lib21.yaml");
        std::fs::write(&cfg, "clean:\n  timing_type: hold_rising\n")?;
        let input = tmp.path().join("in.lib");
        let src = "pin (q) {\n  timing () {\n    related_pin : \"clk\";\n    timing_type : hold_rising;\n  }\n}\n";
        std::fs::write(&input, src)?;
        let output = tmp.path().join("out.lib");
        let options = ProgramOptions {
            files: vec![input.clone()],
            output: Some(output.clone()),
            config: Some(cfg),
            verbose: false,
        };
        assert!(_main(&options)?.ok());
        assert_eq!(std::fs::read_to_string(&output)?, "pin (q) {\n}\n");
        assert_eq!(std::fs::read_to_string(&input)?, src);
        Ok(())
    }
    #[test]
    fn bad_config_fails() -> Result<(), Box<dyn Error>> {
        let tmp = tempfile::tempdir()?;
        let cfg = tmp.path().join("lib21.ini");
        std::fs::write(&cfg, "whatever")?;
        let options = ProgramOptions {
            files: vec![PathBuf::from("x.lib")],
            output: None,
            config: Some(cfg),
            verbose: false,
        };
        assert!(_main(&options).is_err());
        Ok(())
    }

    /// Grab the full path of resource-file `fname`, shared with the `lib21` crate
    fn resource(rname: &str) -> PathBuf {
        PathBuf::from(format!(
            "{}/../lib21/resources/{}",
            env!("CARGO_MANIFEST_DIR"),
            rname
        ))
    }
}
