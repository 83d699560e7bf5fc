//!
//! # Area-Field Substitution
//!
//! Rewrites the single `area : <number> ;` attribute of a Liberty cell.
//! Not block-scanned: the matching line is treated as a one-line block,
//! which must occur exactly once.
//!

// Crates.io Imports
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

// Local Imports
use crate::error::{LibError, LibResult};
use crate::file;
use crate::scan::Span;

/// `area : <number> ;` at line-start, capturing the prefix, number, and suffix
static AREA_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^([ \t]*area[ \t]*:[ \t]*)([0-9.]+)([ \t]*;)").unwrap());

/// # Area Substitution Results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaSubstitution {
    /// Rewritten text
    pub text: String,
    /// The (single-line) span of the area attribute
    pub span: Span,
    /// Prior value-text of the area attribute
    pub old: String,
    /// Whether the value changed; false if it already equaled the new value
    pub changed: bool,
}

/// Format a decimal area for writing: no exponent, and no trailing fractional zeros
pub fn format_area(area: &Decimal) -> String {
    area.normalize().to_string()
}

///
/// Replace the value of the single `area : <number> ;` attribute in `text` with `area`.
///
/// Fails with [LibError::Pattern] if there are zero, or more than one, such attributes.
/// An existing value numerically equal to `area` is left intact and reported as unchanged.
///
pub fn substitute_area(text: &str, area: &Decimal) -> LibResult<AreaSubstitution> {
    let lines = file::split_lines(text);
    let hits: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, l)| AREA_LINE.is_match(l))
        .map(|(idx, _)| idx)
        .collect();
    let idx = match hits.as_slice() {
        [idx] => *idx,
        _ => {
            return Err(LibError::Pattern {
                msg: "expected exactly one `area : <number> ;` attribute".into(),
                count: hits.len(),
            })
        }
    };
    let target = lines[idx];
    let caps = match AREA_LINE.captures(target) {
        Some(caps) => caps,
        None => return LibError::fail("area attribute vanished between passes"),
    };
    let (whole, old) = match (caps.get(0), caps.get(2)) {
        (Some(whole), Some(old)) => (whole, old.as_str().to_string()),
        _ => return LibError::fail("area attribute missing its value"),
    };
    let span = Span::new(idx + 1, idx + 1);

    let unchanged = old
        .parse::<Decimal>()
        .map_or(false, |prior| prior == *area);
    if unchanged {
        debug!("area at line {} already {}", span.start, old);
        return Ok(AreaSubstitution {
            text: text.to_string(),
            span,
            old,
            changed: false,
        });
    }

    let new_line = format!(
        "{}{}{}{}",
        &caps[1],
        format_area(area),
        &caps[3],
        &target[whole.end()..]
    );
    let mut rv = String::with_capacity(text.len() + 16);
    for (n, l) in lines.iter().enumerate() {
        match n == idx {
            true => rv.push_str(&new_line),
            false => rv.push_str(l),
        }
    }
    Ok(AreaSubstitution {
        text: rv,
        span,
        old,
        changed: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn substitutes_single_area() -> LibResult<()> {
        let src = "cell (sram) {\n    area : 0 ;\n    pin (A) {\n    }\n}\n";
        let area = Decimal::from_str("12.5400")?;
        let sub = substitute_area(src, &area)?;
        assert!(sub.changed);
        assert_eq!(sub.old, "0");
        assert_eq!(sub.span, Span::new(2, 2));
        assert_eq!(
            sub.text,
            "cell (sram) {\n    area : 12.54 ;\n    pin (A) {\n    }\n}\n"
        );
        Ok(())
    }
    #[test]
    fn keyword_is_case_insensitive() -> LibResult<()> {
        let src = "\tAREA:1.0;// comment\n";
        let sub = substitute_area(src, &Decimal::from(3))?;
        assert_eq!(sub.text, "\tAREA:3;// comment\n");
        Ok(())
    }
    #[test]
    fn requires_exactly_one() {
        let none = "cell (x) {\n  pin_area : 0 ;\n}\n";
        match substitute_area(none, &Decimal::ONE) {
            Err(LibError::Pattern { count, .. }) => assert_eq!(count, 0),
            other => panic!("expected pattern error, got {:?}", other),
        }
        let two = "area : 0 ;\narea : 0 ;\n";
        match substitute_area(two, &Decimal::ONE) {
            Err(LibError::Pattern { count, .. }) => assert_eq!(count, 2),
            other => panic!("expected pattern error, got {:?}", other),
        }
    }
    #[test]
    fn rerun_is_unchanged() -> LibResult<()> {
        let area = Decimal::from_str("0.4374")?;
        let first = substitute_area("  area : 0 ;\n", &area)?;
        let second = substitute_area(&first.text, &area)?;
        assert!(!second.changed);
        assert_eq!(second.text, first.text);
        Ok(())
    }
    #[test]
    fn formats_areas() -> LibResult<()> {
        assert_eq!(format_area(&Decimal::from_str("100")?), "100");
        assert_eq!(format_area(&Decimal::from_str("2.500")?), "2.5");
        assert_eq!(format_area(&Decimal::from_str("3.0")?), "3");
        Ok(())
    }
}
