//!
//! # Block Flags
//!
//! Per-block boolean records, and the rules which set them.
//!

// Std-Lib Imports
use std::collections::BTreeMap;

// Crates.io Imports
use regex::Regex;

// Local Imports
use crate::error::LibResult;
use crate::line;

/// Flag set by lines containing both `direction` and `output`
pub const DIRECTION_OUTPUT: &str = "direction_output";
/// Flag set by `related_pin : "clk" ;`
pub const RELATED_PIN_CLK: &str = "related_pin_clk";
/// Flag set by `timing_type : setup_falling ;`
pub const TIMING_TYPE_SETUP_FALLING: &str = "timing_type_setup_falling";

///
/// # Flags
///
/// Named booleans accumulated over the lines of one block.
/// Each block gets its own [Flags] value; names are only ever OR'ed to `true`.
///
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Flags(BTreeMap<String, bool>);
impl Flags {
    /// Create a [Flags] with every one of `names` registered as `false`
    pub fn new<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        Self(names.into_iter().map(|n| (n.to_string(), false)).collect())
    }
    /// OR `value` into flag `name`
    pub fn or(&mut self, name: &str, value: bool) {
        let entry = self.0.entry(name.to_string()).or_insert(false);
        *entry |= value;
    }
    /// Get the value of flag `name`. Unregistered flags are `false`.
    pub fn get(&self, name: &str) -> bool {
        self.0.get(name).copied().unwrap_or(false)
    }
    /// Iterate over all (name, value) pairs, in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// Enumerated single-line checks
#[derive(Debug, Clone)]
pub enum LineMatcher {
    /// Line contains every one of these substrings
    ContainsAll(Vec<String>),
    /// Regular-expression search anywhere in the line
    Regex(Regex),
}
impl LineMatcher {
    pub fn matches(&self, line: &str) -> bool {
        match self {
            Self::ContainsAll(needles) => {
                let needles: Vec<&str> = needles.iter().map(String::as_str).collect();
                line::contains_all(line, &needles)
            }
            Self::Regex(re) => re.is_match(line),
        }
    }
}

/// # Flag Rule
/// Sets flag `name` on any block containing a line which `matcher` accepts.
#[derive(Debug, Clone)]
pub struct FlagRule {
    pub name: String,
    pub matcher: LineMatcher,
}
impl FlagRule {
    pub fn new(name: impl Into<String>, matcher: LineMatcher) -> Self {
        Self {
            name: name.into(),
            matcher,
        }
    }
    /// Rule for lines containing both `direction` and `output`
    pub fn direction_output() -> Self {
        Self::new(
            DIRECTION_OUTPUT,
            LineMatcher::ContainsAll(vec!["direction".into(), "output".into()]),
        )
    }
    /// Rule for the exact attribute `related_pin : "<pin>" ;`
    pub fn related_pin(pin: &str) -> LibResult<Self> {
        let re = line::attribute_regex("related_pin", &format!("\"{}\"", pin))?;
        Ok(Self::new(RELATED_PIN_CLK, LineMatcher::Regex(re)))
    }
    /// Rule for the exact attribute `timing_type : <tp> ;`
    pub fn timing_type(tp: &str) -> LibResult<Self> {
        let re = line::attribute_regex("timing_type", tp)?;
        Ok(Self::new(TIMING_TYPE_SETUP_FALLING, LineMatcher::Regex(re)))
    }
    /// Apply to `line`, updating `flags`
    pub fn apply(&self, line: &str, flags: &mut Flags) {
        flags.or(&self.name, self.matcher.matches(line));
    }
}
