//!
//! # Block Scanner
//!
//! First of the engine's two passes. Walks a line sequence once, tracking brace depth,
//! and collects a [Block] for each block of interest along with its accumulated [Flags].
//!

// Crates.io Imports
use log::debug;

// Local Imports
use crate::error::{LibError, LibResult, StructureErrorType};
use crate::flags::{FlagRule, Flags};
use crate::line;

/// # Span
/// Inclusive range of 1-based line numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}
impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
    /// Boolean indication of whether 1-based line number `line` falls within us
    pub fn contains(&self, line: usize) -> bool {
        self.start <= line && line <= self.end
    }
    /// Number of lines covered
    pub fn len(&self) -> usize {
        self.end + 1 - self.start
    }
    /// Boolean indication of whether we share any line with `other`
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}
impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// # Scanned Block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Header through closing line
    pub span: Span,
    /// Header keyword, e.g. `pin`, `bus`, `timing`
    pub kind: String,
    /// Brace depth before the header line
    pub start_depth: isize,
    /// Flags accumulated over every line in `span`
    pub flags: Flags,
    /// Name of the most recent `pin (NAME)` header at or before our own header
    pub pin: Option<String>,
}

///
/// # Block-Opener Trait
///
/// Recognizes header lines of the blocks a scan is interested in,
/// returning the header's kind-name when `line` is one.
///
pub trait BlockOpener {
    fn opens(&self, line: &str) -> Option<String>;
}

/// Opens on `keyword (` headers, e.g. `pin (A) {` or `bus (D) {`
#[derive(Debug, Clone)]
pub struct KeywordOpener {
    pub keywords: Vec<String>,
}
impl KeywordOpener {
    pub fn new<S: Into<String>>(keywords: impl IntoIterator<Item = S>) -> Self {
        Self {
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }
}
impl BlockOpener for KeywordOpener {
    fn opens(&self, line: &str) -> Option<String> {
        self.keywords
            .iter()
            .find(|k| line::opens_keyword_block(line, k))
            .cloned()
    }
}

/// Opens on `timing ( ) {` headers
#[derive(Debug, Clone, Copy, Default)]
pub struct TimingOpener;
impl BlockOpener for TimingOpener {
    fn opens(&self, line: &str) -> Option<String> {
        match line::opens_timing_block(line) {
            true => Some("timing".into()),
            false => None,
        }
    }
}

/// In-progress state of the (single) open block
struct OpenBlock {
    start_line: usize,
    start_depth: isize,
    kind: String,
    flags: Flags,
    pin: Option<String>,
    /// Whether an opening brace has yet been seen
    entered: bool,
}

///
/// Scan `lines` for blocks opened by `opener`, accumulating `rules` into each block's [Flags].
///
/// Headers seen while a block is already open are not treated as new blocks,
/// although their braces are always counted.
/// A block closes on the line where brace depth returns to (or below) its `start_depth`,
/// once its own opening brace has been seen.
///
/// Fails with a [LibError::Structure] if depth ever goes negative,
/// if a block remains open at end of input, or if braces do not balance at end of input.
///
pub fn scan(
    lines: &[&str],
    opener: &impl BlockOpener,
    rules: &[FlagRule],
) -> LibResult<Vec<Block>> {
    let mut blocks = Vec::new();
    let mut depth: isize = 0;
    let mut open: Option<OpenBlock> = None;
    let mut last_pin: Option<String> = None;

    for (idx, txt) in lines.iter().enumerate() {
        let num = idx + 1;
        if let Some(name) = line::pin_name(txt) {
            last_pin = Some(name.to_string());
        }
        if open.is_none() {
            if let Some(kind) = opener.opens(txt) {
                open = Some(OpenBlock {
                    start_line: num,
                    start_depth: depth,
                    kind,
                    flags: Flags::new(rules.iter().map(|r| r.name.as_str())),
                    pin: last_pin.clone(),
                    entered: false,
                });
            }
        }

        depth += line::brace_delta(txt);
        if depth < 0 {
            return Err(LibError::structure(
                StructureErrorType::NegativeDepth,
                num,
                depth,
            ));
        }

        let closed = match open.as_mut() {
            None => false,
            Some(blk) => {
                for rule in rules {
                    rule.apply(txt, &mut blk.flags);
                }
                blk.entered |= txt.contains('{');
                blk.entered && depth <= blk.start_depth
            }
        };
        if closed {
            if let Some(blk) = open.take() {
                let block = Block {
                    span: Span::new(blk.start_line, num),
                    kind: blk.kind,
                    start_depth: blk.start_depth,
                    flags: blk.flags,
                    pin: blk.pin,
                };
                debug!("scanned {} block at lines {}", block.kind, block.span);
                blocks.push(block);
            }
        }
    }

    if let Some(blk) = open {
        return Err(LibError::structure(
            StructureErrorType::UnclosedBlock {
                start_line: blk.start_line,
            },
            lines.len(),
            depth,
        ));
    }
    if depth != 0 {
        return Err(LibError::structure(
            StructureErrorType::UnbalancedEof,
            lines.len(),
            depth,
        ));
    }
    Ok(blocks)
}
