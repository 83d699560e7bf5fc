//!
//! # Numeric Rescaling
//!
//! Finds free-standing numbers in a line and rewrites each as `value / divisor`.
//!
//! A numeric token is `-?\d+(\.\d*)?([eE]-?\d+)?` with no word character (letter, digit, or underscore)
//! immediately before or after it. Where the longest candidate is followed by a word character,
//! shorter candidates are tried in the same order a backtracking regex engine would try them:
//! so in `1.5x`, the `1` is a token but `1.5` is not.
//!
//! Digits are ASCII `0-9` only. Other Unicode decimal digits count as word characters,
//! so `٣5` is left as-is rather than read as `35`.
//!

// Local Imports
use crate::rewrite::LineTransform;

/// Word characters, which may not border a numeric token
fn is_word(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// # Rescale Line-Transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rescale {
    /// Every numeric token is divided by this
    pub divisor: f64,
    /// Significant digits in each rewritten number
    pub significant_digits: usize,
}
impl Default for Rescale {
    /// Milli-scaling, with eight significant digits
    fn default() -> Self {
        Self {
            divisor: 1000.0,
            significant_digits: 8,
        }
    }
}
impl Rescale {
    pub fn new(divisor: f64, significant_digits: usize) -> Self {
        Self {
            divisor,
            significant_digits,
        }
    }
    /// Rescale every numeric token in `line`, leaving all other text in place
    pub fn rescale_line(&self, line: &str) -> String {
        let mut rv = String::with_capacity(line.len());
        let mut last = 0;
        for (start, stop) in NumberLexer::new(line) {
            rv.push_str(&line[last..start]);
            let txt = &line[start..stop];
            match txt.parse::<f64>() {
                Ok(num) => rv.push_str(&format_general(
                    num / self.divisor,
                    self.significant_digits,
                )),
                Err(_) => rv.push_str(txt),
            }
            last = stop;
        }
        rv.push_str(&line[last..]);
        rv
    }
}
impl LineTransform for Rescale {
    fn transform(&self, line: &str) -> String {
        self.rescale_line(line)
    }
}

///
/// # Number Lexer
///
/// Iterates over the (start, stop) byte-ranges of the numeric tokens in a string.
///
pub struct NumberLexer<'src> {
    src: &'src str,
    /// Active byte index
    pos: usize,
}
impl<'src> NumberLexer<'src> {
    pub fn new(src: &'src str) -> Self {
        Self { src, pos: 0 }
    }
    /// Byte at index `idx`, if in bounds
    fn byte(&self, idx: usize) -> Option<u8> {
        self.src.as_bytes().get(idx).copied()
    }
    /// Index of the first non-digit at or after `idx`
    fn skip_digits(&self, mut idx: usize) -> usize {
        while self.byte(idx).map_or(false, |b| b.is_ascii_digit()) {
            idx += 1;
        }
        idx
    }
    /// Boolean indication of whether a token may end at `idx`, i.e. no word character follows
    fn may_end(&self, idx: usize) -> bool {
        self.src[idx..].chars().next().map_or(true, |c| !is_word(c))
    }
    /// Boolean indication of whether a token may start at `idx`, i.e. no word character precedes
    fn may_start(&self, idx: usize) -> bool {
        self.src[..idx].chars().next_back().map_or(true, |c| !is_word(c))
    }
    /// Lex an exponent `[eE]-?\d+` starting at `idx`, returning its end
    fn exponent(&self, idx: usize) -> Option<usize> {
        match self.byte(idx) {
            Some(b'e') | Some(b'E') => (),
            _ => return None,
        }
        let mut digits = idx + 1;
        if self.byte(digits) == Some(b'-') {
            digits += 1;
        }
        let end = self.skip_digits(digits);
        match end > digits {
            true => Some(end),
            false => None,
        }
    }
    /// Attempt to match a token starting at `start`, returning its end
    fn lex_at(&self, start: usize) -> Option<usize> {
        if !self.may_start(start) {
            return None;
        }
        let mut digits = start;
        if self.byte(digits) == Some(b'-') {
            digits += 1;
        }
        let int_end = self.skip_digits(digits);
        if int_end == digits {
            return None;
        }
        // With a fractional part, with and then without an exponent
        if self.byte(int_end) == Some(b'.') {
            let frac_end = self.skip_digits(int_end + 1);
            if let Some(exp_end) = self.exponent(frac_end) {
                if self.may_end(exp_end) {
                    return Some(exp_end);
                }
            }
            if self.may_end(frac_end) {
                return Some(frac_end);
            }
        }
        // Integer part only, with and then without an exponent
        if let Some(exp_end) = self.exponent(int_end) {
            if self.may_end(exp_end) {
                return Some(exp_end);
            }
        }
        match self.may_end(int_end) {
            true => Some(int_end),
            false => None,
        }
    }
}
impl<'src> Iterator for NumberLexer<'src> {
    type Item = (usize, usize);
    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.src.len() {
            let start = self.pos;
            if let Some(stop) = self.lex_at(start) {
                self.pos = stop;
                return Some((start, stop));
            }
            // Advance by one (possibly multi-byte) character
            let width = self.src[start..].chars().next().map_or(1, char::len_utf8);
            self.pos += width;
        }
        None
    }
}

///
/// Format `num` in "general" notation with `precision` significant digits,
/// in the manner of C's `%g`: trailing zeros are removed, and scientific notation is used
/// when the decimal exponent is less than -4 or at least `precision`.
///
pub fn format_general(num: f64, precision: usize) -> String {
    if num.is_nan() {
        return "nan".into();
    }
    if num.is_infinite() {
        return match num.is_sign_negative() {
            true => "-inf".into(),
            false => "inf".into(),
        };
    }
    let precision = precision.max(1);
    if num == 0.0 {
        return match num.is_sign_negative() {
            true => "-0".into(),
            false => "0".into(),
        };
    }
    // Round to `precision` digits in scientific form first, which settles the exponent
    let sci = format!("{:.*e}", precision - 1, num);
    let (mantissa, exp) = match sci.split_once('e') {
        Some(parts) => parts,
        None => return sci,
    };
    let exp: i32 = exp.parse().unwrap_or(0);

    if exp < -4 || exp >= precision as i32 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", strip_zeros(mantissa), sign, exp.abs())
    } else {
        let decimals = (precision as i32 - 1 - exp) as usize;
        strip_zeros(&format!("{:.*}", decimals, num)).to_string()
    }
}

/// Strip trailing fractional zeros, and then any trailing decimal point
fn strip_zeros(s: &str) -> &str {
    match s.contains('.') {
        true => s.trim_end_matches('0').trim_end_matches('.'),
        false => s,
    }
}
