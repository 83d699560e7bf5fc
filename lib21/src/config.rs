//!
//! # Tool Configuration
//!
//! Settings shared by the lib21 tools, loadable from JSON, YAML, or TOML files.
//! Every field carries a default, so partial (or absent) config files are fine.
//!

// Standard Lib Imports
use std::path::Path;

// Crates.io Imports
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use textwrap::dedent;

// Local Imports
use crate::error::{LibError, LibResult};
use crate::file;

/// # Enumerated Config-File Formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerializationFormat {
    Json,
    Yaml,
    Toml,
}
impl SerializationFormat {
    /// Infer a format from the extension of `fname`
    pub fn from_path(fname: impl AsRef<Path>) -> Option<Self> {
        let ext = fname.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
    /// Parse config content `s`, after removing any indentation common to all its lines
    pub fn parse<T: DeserializeOwned>(&self, s: &str) -> LibResult<T> {
        let s = dedent(s);
        let parsed = match *self {
            Self::Json => serde_json::from_str(&s).map_err(|e| e.to_string()),
            Self::Yaml => serde_yaml::from_str(&s).map_err(|e| e.to_string()),
            Self::Toml => toml::from_str(&s).map_err(|e| e.to_string()),
        };
        parsed.map_err(|msg| LibError::Config(format!("invalid {:?} content: {}", self, msg)))
    }
}

/// # Lib21 Configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lib21Config {
    /// Output-pin table rescaling
    pub scale: ScaleConfig,
    /// Timing-block removal
    pub clean: CleanConfig,
    /// Area updates from LEF
    pub area: AreaConfig,
}
impl Lib21Config {
    /// Load from file `fname`, inferring its format from the file extension
    pub fn open(fname: impl AsRef<Path>) -> LibResult<Self> {
        let fname = fname.as_ref();
        let fmt = match SerializationFormat::from_path(fname) {
            Some(fmt) => fmt,
            None => {
                return Err(LibError::Config(format!(
                    "unrecognized config format for {:?} (expected .json, .yaml, or .toml)",
                    fname
                )))
            }
        };
        let cfg: Self = fmt.parse(&file::read_to_string(fname)?)?;
        cfg.validate()?;
        Ok(cfg)
    }
    /// Load from `fname` if provided, or return defaults
    pub fn open_or_default(fname: Option<impl AsRef<Path>>) -> LibResult<Self> {
        match fname {
            Some(f) => Self::open(f),
            None => Ok(Self::default()),
        }
    }
    /// Check for settings which would produce nonsense output
    pub fn validate(&self) -> LibResult<()> {
        if !self.scale.divisor.is_finite() || self.scale.divisor == 0.0 {
            return Err(LibError::Config(format!(
                "scale.divisor must be finite and non-zero, got {}",
                self.scale.divisor
            )));
        }
        if self.scale.significant_digits == 0 {
            return Err(LibError::Config(
                "scale.significant_digits must be at least 1".into(),
            ));
        }
        if self.area.ge_area <= Decimal::ZERO {
            return Err(LibError::Config(format!(
                "area.ge_area must be positive, got {}",
                self.area.ge_area
            )));
        }
        Ok(())
    }
}

/// # Rescaling Settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleConfig {
    /// Every selected numeric token is divided by this
    pub divisor: f64,
    /// Significant digits written for each rescaled number
    pub significant_digits: usize,
    /// Block keywords whose `direction` is checked, e.g. `pin` and `bus`
    pub block_kinds: Vec<String>,
    /// Line prefixes (after leading white-space) of index-table lines
    pub index_prefixes: Vec<String>,
}
impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            divisor: 1000.0,
            significant_digits: 8,
            block_kinds: vec!["pin".into(), "bus".into()],
            index_prefixes: vec!["index_1".into(), "index_2".into()],
        }
    }
}

/// # Timing-Block Removal Settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanConfig {
    /// Exact (quoted) `related_pin` value of removable blocks
    pub related_pin: String,
    /// Exact `timing_type` value of removable blocks
    pub timing_type: String,
}
impl Default for CleanConfig {
    fn default() -> Self {
        Self {
            related_pin: "clk".into(),
            timing_type: "setup_falling".into(),
        }
    }
}

/// # Area-Update Settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AreaConfig {
    /// Area of one gate-equivalent (GE), in the LEF's units squared
    pub ge_area: Decimal,
    /// Sub-directory holding `.lib` files
    pub lib_dir: String,
    /// Sub-directory holding `.lef` files
    pub lef_dir: String,
    pub lib_extension: String,
    pub lef_extension: String,
}
impl Default for AreaConfig {
    fn default() -> Self {
        Self {
            ge_area: Decimal::new(8748, 5),
            lib_dir: "LIB".into(),
            lef_dir: "LEF".into(),
            lib_extension: "lib".into(),
            lef_extension: "lef".into(),
        }
    }
}
