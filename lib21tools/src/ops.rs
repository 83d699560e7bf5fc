//!
//! # Per-File Tool Operations
//!
//! Each reads one file, applies a [lib21] fix, prints what it found,
//! and writes the result atomically.
//!

// Std-Lib Imports
use std::path::{Path, PathBuf};

// Crates.io Imports
use lib21::area::format_area;
use lib21::{file, fixes, AreaConfig, CleanConfig, LibError, LibResult, ScaleConfig};
use log::{debug, info};

// Local Imports
use crate::batch::{self, BatchSummary, Job, Outcome};
use crate::density::{self, DensitySummary};
use crate::lef;

/// Write `text` to the output of `job`, unless nothing `changed` and the job is in-place
fn finish(job: &Job, text: &str, changed: bool) -> LibResult<Outcome> {
    if !changed && job.in_place() {
        println!("  [*] No changes; {} left as-is", job.input.display());
        return Ok(Outcome::Unchanged);
    }
    file::write_atomic(&job.output, text)?;
    println!("  [*] Wrote {}", job.output.display());
    Ok(Outcome::Written)
}

/// Rescale the output-pin tables of one Liberty file
pub fn scale_file(job: &Job, cfg: &ScaleConfig) -> LibResult<Outcome> {
    println!("Processing: {}", job.input.display());
    let src = file::read_to_string(&job.input)?;
    let (text, report) = fixes::scale_output_pins(&src, cfg)?;
    if report.selected.is_empty() {
        println!("  [!] Warning: no output pin or bus blocks found to modify");
    } else {
        println!(
            "  [*] Found {} output pin/bus block(s) to process",
            report.selected.len()
        );
    }
    for span in report.selected.iter() {
        println!("  [*] Lines {}", span);
    }
    println!("  [*] Rescaled {} line(s)", report.changed_lines);
    finish(job, &text, report.changed_lines > 0)
}

/// Remove the `setup_falling` timing blocks of one Liberty file
pub fn clean_file(job: &Job, cfg: &CleanConfig) -> LibResult<Outcome> {
    println!("Processing: {}", job.input.display());
    let src = file::read_to_string(&job.input)?;
    let (text, report) = fixes::remove_setup_falling(&src, cfg)?;
    for removed in report.removed.iter() {
        println!(
            "  [REMOVED] '{}' block for '{}' in pin '{}' (Lines {})",
            cfg.timing_type,
            cfg.related_pin,
            removed.pin.as_deref().unwrap_or("UNKNOWN"),
            removed.span
        );
    }
    println!(
        "  [*] Removed {} of {} timing block(s), {} -> {} lines",
        report.removed.len(),
        report.blocks,
        report.lines_in,
        report.lines_out
    );
    finish(job, &text, !report.removed.is_empty())
}

/// # Area-Update Run Results
#[derive(Debug, Default)]
pub struct AreaRun {
    pub summary: BatchSummary,
    pub density: DensitySummary,
}

/// Sub-directory `name` of `root`, which must exist
fn subdir(root: &Path, name: &str) -> LibResult<PathBuf> {
    let dir = root.join(name);
    match dir.is_dir() {
        true => Ok(dir),
        false => LibError::fail(format!("'{}' sub-directory not found at {:?}", name, dir)),
    }
}

/// Sorted list of the files in `dir` with extension `ext`
pub fn list_files(dir: &Path, ext: &str) -> LibResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(|e| LibError::io(dir, e))? {
        let path = entry.map_err(|e| LibError::io(dir, e))?.path();
        if path.is_file() && path.extension().map_or(false, |x| x == ext) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

///
/// Update the area of every Liberty file under `root/<lib_dir>` from its LEF counterpart
/// `root/<lef_dir>/<stem>.<lef_extension>`, collecting macro densities along the way.
///
/// A missing `root`, `lib_dir`, or `lef_dir` fails the whole run.
/// Failures of individual files are recorded in the returned [AreaRun].
///
pub fn area_dir(root: &Path, cfg: &AreaConfig) -> LibResult<AreaRun> {
    if !root.is_dir() {
        return LibError::fail(format!("base directory not found: {:?}", root));
    }
    let lib_dir = subdir(root, &cfg.lib_dir)?;
    let lef_dir = subdir(root, &cfg.lef_dir)?;
    println!("Scanning for .{} files in: {}", cfg.lib_extension, lib_dir.display());
    println!("Looking for .{} files in: {}\n", cfg.lef_extension, lef_dir.display());

    let libs = list_files(&lib_dir, &cfg.lib_extension)?;
    let mut run = AreaRun::default();
    if libs.is_empty() {
        println!("No .{} files found in {}", cfg.lib_extension, lib_dir.display());
        return Ok(run);
    }
    info!("updating {} libraries", libs.len());
    let jobs = batch::resolve_jobs(&libs, None)?;
    let density = &mut run.density;
    run.summary = batch::run(&jobs, |job| {
        let result = area_file(job, &lef_dir, cfg, density);
        println!("{}", "-".repeat(20));
        result
    });
    Ok(run)
}

/// Update the area of a single Liberty file, and record its density
fn area_file(
    job: &Job,
    lef_dir: &Path,
    cfg: &AreaConfig,
    densities: &mut DensitySummary,
) -> LibResult<Outcome> {
    println!("Processing: {}", job.input.display());
    let macro_name = match job.input.file_stem().and_then(|s| s.to_str()) {
        Some(name) => name,
        None => return LibError::fail(format!("invalid file name {:?}", job.input)),
    };
    let lef_path = lef_dir.join(format!("{}.{}", macro_name, cfg.lef_extension));
    debug!("pairing {:?} with {:?}", job.input, lef_path);
    let area = lef::read_size(&lef_path)?.area();

    match density::bits_from_name(macro_name) {
        Some(bits) => match density::ge_per_bit(&area, &cfg.ge_area, bits) {
            Some(d) => {
                println!("  [*] Total Bits: {}", bits);
                println!("  [*] Area: {}", format_area(&area));
                println!("  [*] Density (GE/bit): {}", density::format_density(&d));
                densities.add(d);
            }
            None => println!("  [!] Warning: density of '{}' overflowed", macro_name),
        },
        None => println!(
            "  [!] Warning: could not parse bit info from '{}', skipping density",
            macro_name
        ),
    }

    let src = file::read_to_string(&job.input)?;
    let sub = fixes::update_area(&src, &area)?;
    if sub.changed {
        file::write_atomic(&job.output, &sub.text)?;
        println!(
            "  [*] Success: updated {} -> area: {}",
            job.output.display(),
            format_area(&area)
        );
        Ok(Outcome::Written)
    } else {
        println!("  [*] Unchanged: area already {}", sub.old);
        Ok(Outcome::Unchanged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lib21::Lib21Config;

    /// Grab the full path of resource-file `fname`
    fn resource(rname: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("resources").join(rname)
    }
    /// Copy the resource tech-directory into scratch directory `dest`
    fn copy_tech(dest: &Path) -> std::io::Result<()> {
        for sub in ["LIB", "LEF"] {
            std::fs::create_dir(dest.join(sub))?;
            for entry in std::fs::read_dir(resource("tech").join(sub))? {
                let path = entry?.path();
                std::fs::copy(&path, dest.join(sub).join(path.file_name().unwrap()))?;
            }
        }
        Ok(())
    }

    #[test]
    fn lists_sorted_files() -> LibResult<()> {
        let libs = list_files(&resource("tech").join("LIB"), "lib")?;
        let names: Vec<_> = libs
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(
            names,
            vec![
                "regfile_macro.lib",
                "srambank_128x4x16_6t122.lib",
                "srambank_64x4x72_6t122.lib"
            ]
        );
        Ok(())
    }
    #[test]
    fn updates_tech_directory() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = tempfile::tempdir()?;
        copy_tech(tmp.path())?;
        let cfg = Lib21Config::default().area;
        let run = area_dir(tmp.path(), &cfg)?;

        // One updated, one already correct, one without a LEF
        assert_eq!(run.summary.written, 1);
        assert_eq!(run.summary.unchanged, 1);
        assert_eq!(run.summary.failed.len(), 1);
        assert!(run.summary.failed[0].0.ends_with("srambank_128x4x16_6t122.lib"));
        assert!(matches!(run.summary.failed[0].1, LibError::Io { .. }));
        assert_eq!(run.summary.exit_code(), 1);

        let lib = file::read_to_string(tmp.path().join("LIB/srambank_64x4x72_6t122.lib"))?;
        assert!(lib.contains("\n    area : 335.9232 ;\n"));
        let untouched = file::read_to_string(tmp.path().join("LIB/srambank_128x4x16_6t122.lib"))?;
        assert!(untouched.contains("area : 0 ;"));

        // Only the name-encoded macro has a density
        assert_eq!(run.density.count(), 1);
        let avg = run.density.average().unwrap();
        assert_eq!(density::format_density(&avg), "0.208333");

        // And re-running changes nothing
        let again = area_dir(tmp.path(), &cfg)?;
        assert_eq!(again.summary.written, 0);
        assert_eq!(again.summary.unchanged, 2);
        Ok(())
    }
    #[test]
    fn ambiguous_area_leaves_file_unmodified() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = tempfile::tempdir()?;
        std::fs::create_dir(tmp.path().join("LIB"))?;
        std::fs::create_dir(tmp.path().join("LEF"))?;
        let lib = tmp.path().join("LIB/twin_2x2x2.lib");
        let src = "cell (a) {\n  area : 1 ;\n}\ncell (b) {\n  area : 2 ;\n}\n";
        std::fs::write(&lib, src)?;
        std::fs::write(tmp.path().join("LEF/twin_2x2x2.lef"), "SIZE 2 BY 3 ;\n")?;

        let run = area_dir(tmp.path(), &AreaConfig::default())?;
        assert_eq!(run.summary.failed.len(), 1);
        assert!(matches!(
            run.summary.failed[0].1,
            LibError::Pattern { count: 2, .. }
        ));
        assert_eq!(std::fs::read_to_string(&lib)?, src);
        // Density is still recorded from the LEF
        assert_eq!(run.density.count(), 1);
        Ok(())
    }
    #[test]
    fn missing_subdirectory_fails_run() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = tempfile::tempdir()?;
        std::fs::create_dir(tmp.path().join("LIB"))?;
        assert!(area_dir(tmp.path(), &AreaConfig::default()).is_err());
        assert!(area_dir(&tmp.path().join("nope"), &AreaConfig::default()).is_err());
        Ok(())
    }
    #[test]
    fn scales_to_distinct_output() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = tempfile::tempdir()?;
        let job = Job {
            input: resource("tech/LIB/srambank_64x4x72_6t122.lib"),
            output: tmp.path().join("scaled.lib"),
        };
        assert_eq!(scale_file(&job, &ScaleConfig::default())?, Outcome::Written);
        let out = file::read_to_string(&job.output)?;
        assert!(out.contains("values ( \"-0.042125\" );"));
        assert_eq!(out.lines().count(), file::read_to_string(&job.input)?.lines().count());
        Ok(())
    }
    #[test]
    fn clean_in_place_without_matches_is_unchanged() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = tempfile::tempdir()?;
        let path = tmp.path().join("x.lib");
        let src = "cell (x) {\n  area : 1.5 ;\n}\n";
        std::fs::write(&path, src)?;
        let job = Job {
            input: path.clone(),
            output: path.clone(),
        };
        assert_eq!(clean_file(&job, &CleanConfig::default())?, Outcome::Unchanged);
        assert_eq!(std::fs::read_to_string(&path)?, src);
        Ok(())
    }
}
