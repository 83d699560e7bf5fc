//!
//! # Per-File Batch Driver
//!
//! Runs one operation per input file. A failure in one file is reported
//! and recorded, and the batch carries on with the next.
//!

// Std-Lib Imports
use std::path::{Path, PathBuf};

// Crates.io Imports
use env_logger::Env;
use lib21::{LibError, LibResult};
use log::debug;

/// # Batch Job
/// A single input, and the destination its rewritten content goes to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub input: PathBuf,
    pub output: PathBuf,
}
impl Job {
    /// Whether the job rewrites its input in place
    pub fn in_place(&self) -> bool {
        self.input == self.output
    }
}

/// Pair each of `inputs` with its output path.
/// Inputs are overwritten unless `output` is provided, which requires exactly one input.
pub fn resolve_jobs(inputs: &[PathBuf], output: Option<&Path>) -> LibResult<Vec<Job>> {
    if inputs.is_empty() {
        return LibError::fail("no input files provided");
    }
    match output {
        Some(out) if inputs.len() != 1 => LibError::fail(format!(
            "output path {:?} requires exactly one input, got {}",
            out,
            inputs.len()
        )),
        Some(out) => Ok(vec![Job {
            input: inputs[0].clone(),
            output: out.to_path_buf(),
        }]),
        None => Ok(inputs
            .iter()
            .map(|p| Job {
                input: p.clone(),
                output: p.clone(),
            })
            .collect()),
    }
}

/// Result of a successful job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// New content was written to the job's output
    Written,
    /// Nothing needed changing; no file was written
    Unchanged,
}

/// # Batch Summary
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub written: usize,
    pub unchanged: usize,
    /// Failed inputs, and why
    pub failed: Vec<(PathBuf, LibError)>,
}
impl BatchSummary {
    /// Record the result of job `job`
    pub fn record(&mut self, job: &Job, result: LibResult<Outcome>) {
        match result {
            Ok(Outcome::Written) => self.written += 1,
            Ok(Outcome::Unchanged) => self.unchanged += 1,
            Err(e) => {
                eprintln!("{}", failure_line(job, &e));
                self.failed.push((job.input.clone(), e));
            }
        }
    }
    /// Number of jobs which ran to completion
    pub fn succeeded(&self) -> usize {
        self.written + self.unchanged
    }
    pub fn ok(&self) -> bool {
        self.failed.is_empty()
    }
    /// Process exit status: zero if and only if every job succeeded
    pub fn exit_code(&self) -> i32 {
        match self.ok() {
            true => 0,
            false => 1,
        }
    }
    pub fn print(&self) {
        println!("\n--- Summary ---");
        println!(
            "Successfully processed: {} file(s) ({} updated, {} unchanged)",
            self.succeeded(),
            self.written,
            self.unchanged
        );
        println!("Failed or skipped:      {} file(s)", self.failed.len());
        for (path, _) in self.failed.iter() {
            println!("  {}", path.display());
        }
    }
}

/// Status line for the failure of `job`
fn failure_line(job: &Job, err: &LibError) -> String {
    format!("[ERROR] {}: {}", job.input.display(), err)
}

/// Run `op` on each of `jobs`, collecting every outcome
pub fn run<F>(jobs: &[Job], mut op: F) -> BatchSummary
where
    F: FnMut(&Job) -> LibResult<Outcome>,
{
    let mut summary = BatchSummary::default();
    for job in jobs.iter() {
        debug!("processing {:?} -> {:?}", job.input, job.output);
        let result = op(job);
        summary.record(job, result);
    }
    summary
}

/// Initialize logging to stderr. Level comes from `RUST_LOG`, defaulting to `debug` if `verbose`, else `warn`.
pub fn init_logging(verbose: bool) {
    let level = match verbose {
        true => "debug",
        false => "warn",
    };
    // Repeat-initialization, e.g. across tests, is harmless
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp(None)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_in_place_jobs() -> LibResult<()> {
        let inputs = vec![PathBuf::from("a.lib"), PathBuf::from("b.lib")];
        let jobs = resolve_jobs(&inputs, None)?;
        assert_eq!(jobs.len(), 2);
        assert!(jobs.iter().all(Job::in_place));
        Ok(())
    }
    #[test]
    fn resolves_output_job() -> LibResult<()> {
        let inputs = vec![PathBuf::from("a.lib")];
        let jobs = resolve_jobs(&inputs, Some(Path::new("out.lib")))?;
        assert_eq!(jobs[0].output, PathBuf::from("out.lib"));
        assert!(!jobs[0].in_place());

        let inputs = vec![PathBuf::from("a.lib"), PathBuf::from("b.lib")];
        assert!(resolve_jobs(&inputs, Some(Path::new("out.lib"))).is_err());
        assert!(resolve_jobs(&[], None).is_err());
        Ok(())
    }
    #[test]
    fn continues_past_failures() -> LibResult<()> {
        let inputs: Vec<PathBuf> = ["a", "bad", "c"].into_iter().map(PathBuf::from).collect();
        let jobs = resolve_jobs(&inputs, None)?;
        let mut seen = Vec::new();
        let summary = run(&jobs, |job| {
            seen.push(job.input.clone());
            match job.input.to_str() {
                Some("bad") => LibError::fail("broken"),
                Some("a") => Ok(Outcome::Written),
                _ => Ok(Outcome::Unchanged),
            }
        });
        assert_eq!(seen, inputs);
        assert_eq!((summary.written, summary.unchanged), (1, 1));
        assert_eq!(summary.failed.len(), 1);
        assert_eq!(summary.failed[0].0, PathBuf::from("bad"));
        assert_eq!(summary.exit_code(), 1);
        Ok(())
    }
    #[test]
    fn formats_failures() {
        let job = Job {
            input: PathBuf::from("LIB/x.lib"),
            output: PathBuf::from("LIB/x.lib"),
        };
        assert_eq!(
            failure_line(&job, &LibError::msg("no area")),
            "[ERROR] LIB/x.lib: no area"
        );
    }
}
