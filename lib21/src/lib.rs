//!
//! # Lib21 Liberty Block-Rewriting Engine
//!
//! Line-level rewriting of brace-structured Liberty (`.lib`) content,
//! gated by which blocks the rewritten lines fall within.
//!
//! Every rewrite runs in two passes over the same immutable lines:
//! * [scan] tracks brace depth and collects each block of interest, with [Flags] accumulated from its lines
//! * [select] keeps the blocks whose flags satisfy a [Predicate]
//! * A [rewrite] pass then transforms or drops lines of the selected blocks, and copies everything else verbatim
//!
//! The [fixes] module composes these into complete operations.
//!

pub mod area;
pub mod config;
pub mod error;
pub mod file;
pub mod fixes;
pub mod flags;
pub mod line;
pub mod rescale;
pub mod rewrite;
pub mod scan;
pub mod select;

pub use config::*;
pub use error::*;
pub use fixes::*;
pub use flags::{FlagRule, Flags, LineMatcher};
pub use rescale::Rescale;
pub use rewrite::{LineTransform, Rewritten};
pub use scan::{scan, Block, BlockOpener, KeywordOpener, Span, TimingOpener};
pub use select::{select, AllOf, FlagIs, Predicate, Selection};
