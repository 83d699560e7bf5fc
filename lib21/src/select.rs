//!
//! # Block Selection
//!
//! Predicates over a [Block]'s [Flags], and the [Selection] of blocks which satisfy them.
//!

// Crates.io Imports
use log::debug;

// Local Imports
use crate::flags::{Flags, DIRECTION_OUTPUT, RELATED_PIN_CLK, TIMING_TYPE_SETUP_FALLING};
use crate::scan::{Block, Span};

/// # Block-Selection Predicate
pub trait Predicate {
    fn accepts(&self, flags: &Flags) -> bool;
}
/// Closures over [Flags] are [Predicate]s
impl<F: Fn(&Flags) -> bool> Predicate for F {
    fn accepts(&self, flags: &Flags) -> bool {
        self(flags)
    }
}

/// True iff a single named flag is set
#[derive(Debug, Clone)]
pub struct FlagIs(pub String);
impl FlagIs {
    /// Selects output pins and buses
    pub fn output_direction() -> Self {
        Self(DIRECTION_OUTPUT.into())
    }
}
impl Predicate for FlagIs {
    fn accepts(&self, flags: &Flags) -> bool {
        flags.get(&self.0)
    }
}

/// True iff every one of a list of named flags is set
#[derive(Debug, Clone)]
pub struct AllOf(pub Vec<String>);
impl AllOf {
    /// Selects timing blocks with both the target `related_pin` and `timing_type`
    pub fn removable_timing() -> Self {
        Self(vec![RELATED_PIN_CLK.into(), TIMING_TYPE_SETUP_FALLING.into()])
    }
}
impl Predicate for AllOf {
    fn accepts(&self, flags: &Flags) -> bool {
        self.0.iter().all(|name| flags.get(name))
    }
}

///
/// # Selection
///
/// The blocks of a scan which satisfied a [Predicate], in ascending line order.
/// Created once per scan by [select], and read-only thereafter.
///
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    blocks: Vec<Block>,
}
impl Selection {
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }
    /// Iterate over our blocks' [Span]s
    pub fn spans(&self) -> impl Iterator<Item = Span> + '_ {
        self.blocks.iter().map(|b| b.span)
    }
    /// Boolean indication of whether `span` is exactly one of our blocks' spans
    pub fn contains_span(&self, span: &Span) -> bool {
        self.blocks
            .binary_search_by(|b| b.span.start.cmp(&span.start))
            .map_or(false, |idx| self.blocks[idx].span == *span)
    }
    /// Get the selected block covering 1-based line number `line`, if any
    pub fn block_at(&self, line: usize) -> Option<&Block> {
        let idx = self.blocks.partition_point(|b| b.span.end < line);
        self.blocks.get(idx).filter(|b| b.span.contains(line))
    }
    pub fn len(&self) -> usize {
        self.blocks.len()
    }
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
    /// Total number of lines covered by our blocks
    pub fn line_count(&self) -> usize {
        self.blocks.iter().map(|b| b.span.len()).sum()
    }
}

/// Select the subset of `blocks` whose flags satisfy `predicate`.
/// `blocks` are expected in ascending, non-overlapping order, as produced by [crate::scan::scan].
pub fn select(blocks: &[Block], predicate: &impl Predicate) -> Selection {
    let blocks: Vec<Block> = blocks
        .iter()
        .filter(|b| predicate.accepts(&b.flags))
        .cloned()
        .collect();
    for b in blocks.iter() {
        debug!("selected {} block at lines {}", b.kind, b.span);
    }
    Selection { blocks }
}
