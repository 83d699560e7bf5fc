//!
//! # LEF Macro-Size Extraction
//!
//! Only the first `SIZE <width> BY <height> ;` statement of a LEF file is read, and nothing else.
//!

// Std-Lib Imports
use std::path::Path;
use std::str::FromStr;

// Crates.io Imports
use lib21::{file, LibError, LibResult};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

/// `SIZE <w> BY <h> ;`, case-insensitive, at the start of any line
static LEF_SIZE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?mi)^[ \t]*SIZE[ \t]+([0-9.]+)[ \t]+BY[ \t]+([0-9.]+)[ \t]*;").unwrap()
});

/// Significant digits retained in computed areas
const AREA_DIGITS: u32 = 10;

/// # Macro Size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LefSize {
    pub width: Decimal,
    pub height: Decimal,
}
impl LefSize {
    /// Area, `width * height`, rounded to ten significant digits
    pub fn area(&self) -> Decimal {
        let area = self.width * self.height;
        area.round_sf(AREA_DIGITS).unwrap_or(area)
    }
}

/// Extract the first macro size from LEF content `src`
pub fn parse_size(src: &str) -> LibResult<LefSize> {
    let caps = match LEF_SIZE.captures(src) {
        Some(caps) => caps,
        None => {
            return Err(LibError::Pattern {
                msg: "could not find `SIZE ... BY ... ;`".into(),
                count: 0,
            })
        }
    };
    let width = Decimal::from_str(&caps[1])?;
    let height = Decimal::from_str(&caps[2])?;
    Ok(LefSize { width, height })
}

/// Read LEF file `path` and extract its macro size
pub fn read_size(path: impl AsRef<Path>) -> LibResult<LefSize> {
    let src = file::read_to_string(path)?;
    parse_size(&src)
}
