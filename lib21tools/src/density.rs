//!
//! # Memory-Macro Density
//!
//! Gate-equivalents per bit, from a macro's area and the bit-dimensions in its name.
//!

// Crates.io Imports
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

/// `_<d1>x<d2>x<d3>` dimensions in a macro name, e.g. `srambank_64x4x72_6t122`
static BITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"_(\d+)x(\d+)x(\d+)").unwrap());

/// Total bit count from macro-name `name`, the product of its three dimensions.
/// Returns `None` if there are no such dimensions, or if they multiply to zero (or overflow).
pub fn bits_from_name(name: &str) -> Option<u64> {
    let caps = BITS.captures(name)?;
    let mut total: u64 = 1;
    for idx in 1..=3 {
        let dim: u64 = caps.get(idx)?.as_str().parse().ok()?;
        total = total.checked_mul(dim)?;
    }
    match total {
        0 => None,
        n => Some(n),
    }
}

/// Gate-equivalents per bit: `area / ge_area / bits`
pub fn ge_per_bit(area: &Decimal, ge_area: &Decimal, bits: u64) -> Option<Decimal> {
    let total_ge = area.checked_div(*ge_area)?;
    total_ge.checked_div(Decimal::from(bits))
}

/// Format a density for display, to six decimal places
pub fn format_density(d: &Decimal) -> String {
    format!("{:.6}", d.round_dp(6))
}

/// # Density Summary
/// Statistics over every macro with a computed density
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DensitySummary {
    densities: Vec<Decimal>,
}
impl DensitySummary {
    pub fn add(&mut self, d: Decimal) {
        self.densities.push(d);
    }
    pub fn count(&self) -> usize {
        self.densities.len()
    }
    pub fn average(&self) -> Option<Decimal> {
        if self.densities.is_empty() {
            return None;
        }
        let sum: Decimal = self.densities.iter().sum();
        sum.checked_div(Decimal::from(self.densities.len()))
    }
    pub fn min(&self) -> Option<Decimal> {
        self.densities.iter().min().copied()
    }
    pub fn max(&self) -> Option<Decimal> {
        self.densities.iter().max().copied()
    }
    /// Print the summary to stdout
    pub fn print(&self) {
        println!("\n--- Density Summary ---");
        match (self.average(), self.min(), self.max()) {
            (Some(avg), Some(min), Some(max)) => {
                println!("Processed {} macros for density.", self.count());
                println!("Average GE/bit: {}", format_density(&avg));
                println!("Min GE/bit:     {}", format_density(&min));
                println!("Max GE/bit:     {}", format_density(&max));
            }
            _ => println!("No density data was calculated."),
        }
    }
}
