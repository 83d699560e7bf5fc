//!
//! # Library Fixes
//!
//! The end-to-end rewrites of a Liberty source-string, each composed of
//! scan, select, and rewrite passes over one immutable set of lines.
//!

// Crates.io Imports
use log::{info, warn};
use rust_decimal::Decimal;

// Local Imports
use crate::area::{self, AreaSubstitution};
use crate::config::{CleanConfig, ScaleConfig};
use crate::error::LibResult;
use crate::file::split_lines;
use crate::flags::FlagRule;
use crate::rescale::Rescale;
use crate::rewrite;
use crate::scan::{scan, KeywordOpener, Span, TimingOpener};
use crate::select::{select, AllOf, FlagIs};

/// # Output-Pin Rescaling Report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaleReport {
    /// Number of pin and bus blocks scanned
    pub blocks: usize,
    /// Spans of the output blocks which were processed
    pub selected: Vec<Span>,
    /// Number of lines rewritten
    pub changed_lines: usize,
    /// Line count, of both input and output
    pub lines: usize,
}

///
/// Divide every number in the `values` and `index_*` tables of output pins and buses
/// by `cfg.divisor`. Input pins, and all other content, are left untouched.
///
pub fn scale_output_pins(src: &str, cfg: &ScaleConfig) -> LibResult<(String, ScaleReport)> {
    let lines = split_lines(src);
    let opener = KeywordOpener::new(cfg.block_kinds.iter().cloned());
    let blocks = scan(&lines, &opener, &[FlagRule::direction_output()])?;
    let selection = select(&blocks, &FlagIs::output_direction());
    if selection.is_empty() {
        warn!("no output pin or bus blocks found");
    } else {
        info!(
            "found {} output block(s) among {} pin/bus blocks",
            selection.len(),
            blocks.len()
        );
    }
    let transform = Rescale::new(cfg.divisor, cfg.significant_digits);
    let out = rewrite::scale_in_spans(&lines, &selection, &cfg.index_prefixes, &transform);
    let report = ScaleReport {
        blocks: blocks.len(),
        selected: selection.spans().collect(),
        changed_lines: out.changed,
        lines: out.lines,
    };
    Ok((out.text, report))
}

/// A removed timing block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedBlock {
    pub span: Span,
    /// Enclosing pin name, if one was seen
    pub pin: Option<String>,
}

/// # Timing-Block Removal Report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanReport {
    /// Number of `timing ( )` blocks scanned
    pub blocks: usize,
    /// The removed blocks, in line order
    pub removed: Vec<RemovedBlock>,
    pub lines_in: usize,
    pub lines_out: usize,
}

///
/// Remove every `timing ( )` block which has both `related_pin : "<cfg.related_pin>" ;`
/// and `timing_type : <cfg.timing_type> ;`. Blocks with only one of the two are kept.
///
pub fn remove_setup_falling(src: &str, cfg: &CleanConfig) -> LibResult<(String, CleanReport)> {
    let lines = split_lines(src);
    let rules = [
        FlagRule::related_pin(&cfg.related_pin)?,
        FlagRule::timing_type(&cfg.timing_type)?,
    ];
    let blocks = scan(&lines, &TimingOpener, &rules)?;
    let selection = select(&blocks, &AllOf::removable_timing());
    let out = rewrite::delete_spans(&lines, &blocks, &selection);
    info!(
        "removing {} of {} timing block(s), {} lines",
        selection.len(),
        blocks.len(),
        out.dropped
    );
    let report = CleanReport {
        blocks: blocks.len(),
        removed: selection
            .blocks()
            .iter()
            .map(|b| RemovedBlock {
                span: b.span,
                pin: b.pin.clone(),
            })
            .collect(),
        lines_in: lines.len(),
        lines_out: out.lines,
    };
    Ok((out.text, report))
}

/// Set the single `area` attribute of `src` to `area`
pub fn update_area(src: &str, area: &Decimal) -> LibResult<AreaSubstitution> {
    let sub = area::substitute_area(src, area)?;
    match sub.changed {
        true => info!("area at line {}: {} -> {}", sub.span.start, sub.old, area),
        false => info!("area at line {} already {}", sub.span.start, sub.old),
    }
    Ok(sub)
}
