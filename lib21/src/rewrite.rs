//!
//! # Rewriters
//!
//! Second of the engine's two passes. Each rewriter walks the same immutable lines the scanner did,
//! and uses a [Selection] to decide which lines to transform or drop.
//! Lines outside selected blocks are always copied verbatim.
//!

// Local Imports
use crate::line;
use crate::scan::Block;
use crate::select::Selection;

/// # Line-Transform Trait
/// Maps one input line to one output line
pub trait LineTransform {
    fn transform(&self, line: &str) -> String;
}
impl<F: Fn(&str) -> String> LineTransform for F {
    fn transform(&self, line: &str) -> String {
        self(line)
    }
}

/// # Rewrite Results
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rewritten {
    /// Output text, newlines included
    pub text: String,
    /// Number of output lines
    pub lines: usize,
    /// Number of output lines which differ from their input
    pub changed: usize,
    /// Number of input lines dropped
    pub dropped: usize,
}
impl Rewritten {
    fn push(&mut self, line: &str) {
        self.text.push_str(line);
        self.lines += 1;
    }
}

///
/// Transform numeric tables inside selected blocks.
///
/// Within a selected block, only two kinds of lines are passed to `transform`:
/// * Lines of a `values ( ... )` attribute, from the line containing `values (` through the line containing `);`
/// * Lines beginning with one of `index_prefixes`
///
/// Every other line, selected block or not, is copied as-is. Output line count always equals input.
///
pub fn scale_in_spans(
    lines: &[&str],
    selection: &Selection,
    index_prefixes: &[String],
    transform: &impl LineTransform,
) -> Rewritten {
    let mut rv = Rewritten::default();
    let mut in_values = false;

    for (idx, txt) in lines.iter().enumerate() {
        let num = idx + 1;
        let block = match selection.block_at(num) {
            Some(b) => b,
            None => {
                rv.push(txt);
                continue;
            }
        };
        if block.span.start == num {
            in_values = false;
        }
        if line::opens_values(txt) {
            in_values = true;
        }
        if in_values || line::starts_with_any(txt, index_prefixes) {
            let new = transform.transform(txt);
            if new != *txt {
                rv.changed += 1;
            }
            rv.push(&new);
        } else {
            rv.push(txt);
        }
        if line::closes_values(txt) || block.span.end == num {
            in_values = false;
        }
    }
    rv
}

///
/// Delete selected blocks in full.
///
/// `blocks` are all blocks from the scan pass, `selection` the subset to be removed.
/// Each block's lines are held until its closing line, and then either all written or all dropped.
///
pub fn delete_spans(lines: &[&str], blocks: &[Block], selection: &Selection) -> Rewritten {
    let mut rv = Rewritten::default();
    let mut blocks = blocks.iter().peekable();
    let mut pending: Vec<&str> = Vec::new();

    for (idx, txt) in lines.iter().enumerate() {
        let num = idx + 1;
        let block = match blocks.peek() {
            Some(b) if b.span.contains(num) => *b,
            _ => {
                rv.push(txt);
                continue;
            }
        };
        pending.push(txt);
        if block.span.end == num {
            match selection.contains_span(&block.span) {
                true => rv.dropped += pending.len(),
                false => pending.iter().for_each(|l| rv.push(l)),
            }
            pending.clear();
            blocks.next();
        }
    }
    // Blocks from a successful scan always close, so nothing remains pending here
    pending.iter().for_each(|l| rv.push(l));
    rv
}
