//!
//! # Tokenline Classification
//!
//! Single-line membership checks used by the scanner and rewriters.
//! None of these tokenize: they are substring and regex checks over one physical line,
//! and are not aware of comments or quoting.
//!

// Crates.io Imports
use once_cell::sync::Lazy;
use regex::Regex;

// Local Imports
use crate::error::LibResult;

/// `pin (NAME)` header, capturing the pin name
static PIN_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*pin\s*\(\s*([\w\.-]+)\s*\)").unwrap());

/// `timing ( ) {` header, with empty arguments
static TIMING_HEADER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*timing\s*\(\s*\)\s*\{").unwrap());

/// Net brace count of `line`: the number of `{` minus the number of `}`
pub fn brace_delta(line: &str) -> isize {
    line.chars().fold(0, |acc, c| match c {
        '{' => acc + 1,
        '}' => acc - 1,
        _ => acc,
    })
}

/// Boolean indication of whether `line`, stripped of leading white-space, begins with `keyword (`
/// (exactly one space), as do block headers such as `pin (A) {`.
pub fn opens_keyword_block(line: &str, keyword: &str) -> bool {
    line.trim_start()
        .strip_prefix(keyword)
        .map_or(false, |rest| rest.starts_with(" ("))
}

/// Boolean indication of whether `line` is a `timing ( ) {` header
pub fn opens_timing_block(line: &str) -> bool {
    TIMING_HEADER.is_match(line)
}

/// Extract the pin name from a `pin (NAME)` header line, if `line` is one
pub fn pin_name(line: &str) -> Option<&str> {
    PIN_NAME
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Boolean indication of whether `line` contains every one of `needles`, anywhere and in any order
pub fn contains_all(line: &str, needles: &[&str]) -> bool {
    needles.iter().all(|n| line.contains(n))
}

/// Create a [Regex] matching exactly `attr : value ;` with free white-space.
/// `value` is matched literally; any quoting must be included in it.
pub fn attribute_regex(attr: &str, value: &str) -> LibResult<Regex> {
    let pattern = format!(r"{}\s*:\s*{}\s*;", regex::escape(attr), regex::escape(value));
    Ok(Regex::new(&pattern)?)
}

/// Boolean indication of whether `line` starts a `values ( ... )` table
pub fn opens_values(line: &str) -> bool {
    line.contains("values (")
}

/// Boolean indication of whether `line` ends a parenthesized attribute such as `values ( ... );`
pub fn closes_values(line: &str) -> bool {
    line.contains(");")
}

/// Boolean indication of whether `line` (after leading white-space) starts with any of `prefixes`
pub fn starts_with_any(line: &str, prefixes: &[String]) -> bool {
    let stripped = line.trim_start();
    prefixes.iter().any(|p| stripped.starts_with(p.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn braces() {
        assert_eq!(brace_delta("pin (A) {"), 1);
        assert_eq!(brace_delta("  }"), -1);
        assert_eq!(brace_delta("timing () { } }"), -1);
        assert_eq!(brace_delta("values ( \"1, 2\" );"), 0);
        assert_eq!(brace_delta("{{{"), 3);
    }
    #[test]
    fn keyword_headers() {
        assert!(opens_keyword_block("    pin (A) {", "pin"));
        assert!(opens_keyword_block("bus (D) {\n", "bus"));
        assert!(!opens_keyword_block("pin(A) {", "pin"));
        assert!(!opens_keyword_block("pins (A) {", "pin"));
        assert!(!opens_keyword_block("  related_pin : \"A\";", "pin"));
    }
    #[test]
    fn timing_headers() {
        assert!(opens_timing_block("      timing () {\n"));
        assert!(opens_timing_block("timing(){"));
        assert!(opens_timing_block("timing ( )  {"));
        assert!(!opens_timing_block("timing (t1) {"));
        assert!(!opens_timing_block("timing ()"));
        assert!(!opens_timing_block("timing_type : setup_rising;"));
    }
    #[test]
    fn pin_names() {
        assert_eq!(pin_name("  pin (clk) {"), Some("clk"));
        assert_eq!(pin_name("pin ( a.b-c )"), Some("a.b-c"));
        assert_eq!(pin_name("pin (D[3]) {"), None);
        assert_eq!(pin_name("related_pin : clk;"), None);
    }
    #[test]
    fn attributes() -> LibResult<()> {
        let re = attribute_regex("related_pin", "\"clk\"")?;
        assert!(re.is_match("  related_pin : \"clk\";"));
        assert!(re.is_match("related_pin:\"clk\" ;"));
        assert!(!re.is_match("related_pin : \"clk_gated\";"));
        assert!(!re.is_match("related_pin : clk;"));
        let re = attribute_regex("timing_type", "setup_falling")?;
        assert!(re.is_match("timing_type : setup_falling ;"));
        assert!(!re.is_match("timing_type : setup_falling_edge;"));
        Ok(())
    }
    #[test]
    fn tables() {
        assert!(opens_values("  values ( \"1, 2\", \\"));
        assert!(!opens_values("  values(\"1\");"));
        assert!(closes_values("  \"3, 4\" );"));
        let prefixes = vec!["index_1".to_string(), "index_2".to_string()];
        assert!(starts_with_any("    index_1 (\"1, 2\");", &prefixes));
        assert!(!starts_with_any("    index_3 (\"1, 2\");", &prefixes));
        assert!(contains_all("direction : output;", &["direction", "output"]));
        assert!(!contains_all("direction : input;", &["direction", "output"]));
    }
}
