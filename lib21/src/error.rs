//!
//! # Lib21 Result and Error Types
//!

use std::path::PathBuf;

/// # [LibError] Result Type
pub type LibResult<T> = Result<T, LibError>;

/// Enumerated flavors of brace-structure failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureErrorType {
    /// More closing than opening braces, at some point in the file
    NegativeDepth,
    /// A scanned block was still open at end of input
    UnclosedBlock { start_line: usize },
    /// Braces did not balance back to zero at end of input
    UnbalancedEof,
}

///
/// # Lib21 Error Enumeration
///
pub enum LibError {
    /// Unbalanced or otherwise malformed brace structure
    Structure {
        tp: StructureErrorType,
        /// (1-based) line number at which the failure was detected
        line: usize,
        /// Brace depth at detection
        depth: isize,
    },
    /// Expected-pattern failures, e.g. a single-match substitution finding zero or many matches
    Pattern { msg: String, count: usize },
    /// File-system errors, annotated with the offending path
    Io {
        path: PathBuf,
        err: std::io::Error,
    },
    /// Invalid configuration content
    Config(String),
    /// Boxed External Errors
    Boxed(Box<dyn std::error::Error + Send + Sync>),
    /// Uncategorized Error, with String Message
    Str(String),
}
impl LibError {
    /// Create a [LibError::Str] from anything String-convertible
    pub fn msg(s: impl Into<String>) -> Self {
        Self::Str(s.into())
    }
    /// Create an error-variant [Result] of our [LibError::Str] variant from anything String-convertible
    pub fn fail<T>(s: impl Into<String>) -> Result<T, Self> {
        Err(Self::msg(s))
    }
    /// Create a [LibError::Structure]
    pub fn structure(tp: StructureErrorType, line: usize, depth: isize) -> Self {
        Self::Structure { tp, line, depth }
    }
    /// Wrap an [std::io::Error] with the path it occurred on
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            err,
        }
    }
    /// Boolean indication of whether we are a brace-structure failure
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::Structure { .. })
    }
}
impl std::fmt::Debug for LibError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            LibError::Structure { tp, line, depth } => match tp {
                StructureErrorType::NegativeDepth => write!(
                    f,
                    "Structure Error: unmatched '}}' at line {} (depth {})",
                    line, depth
                ),
                StructureErrorType::UnclosedBlock { start_line } => write!(
                    f,
                    "Structure Error: block opened at line {} never closed (depth {} at line {})",
                    start_line, depth, line
                ),
                StructureErrorType::UnbalancedEof => write!(
                    f,
                    "Structure Error: unbalanced braces at end of input, line {} (depth {})",
                    line, depth
                ),
            },
            LibError::Pattern { msg, count } => {
                write!(f, "Pattern Error: {} ({} matches)", msg, count)
            }
            LibError::Io { path, err } => write!(f, "IO Error: {:?}: {}", path, err),
            LibError::Config(msg) => write!(f, "Config Error: {}", msg),
            LibError::Boxed(err) => err.fmt(f),
            LibError::Str(err) => err.fmt(f),
        }
    }
}
impl std::fmt::Display for LibError {
    /// Delegates to the [Debug] implementation
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}
impl std::error::Error for LibError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { err, .. } => Some(err),
            Self::Boxed(e) => Some(&**e),
            _ => None,
        }
    }
}
impl From<std::io::Error> for LibError {
    fn from(e: std::io::Error) -> Self {
        Self::Boxed(Box::new(e))
    }
}
impl From<rust_decimal::Error> for LibError {
    fn from(e: rust_decimal::Error) -> Self {
        Self::Boxed(Box::new(e))
    }
}
impl From<regex::Error> for LibError {
    fn from(e: regex::Error) -> Self {
        Self::Boxed(Box::new(e))
    }
}
impl From<String> for LibError {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}
impl From<&str> for LibError {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}
