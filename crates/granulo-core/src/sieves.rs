//! Standard sieve openings and the default test seed.

use crate::types::SieveEntry;

/// Opening of the #200 sieve, the fines boundary.
pub const NO_200_OPENING_MM: f64 = 0.075;

/// Opening of the #4 sieve, the gravel/sand boundary.
pub const NO_4_OPENING_MM: f64 = 4.75;

/// Two openings closer than this are the same sieve.
pub const OPENING_TOLERANCE_MM: f64 = 0.001;

/// Nominal sample mass of a fresh test, in grams.
pub const DEFAULT_TOTAL_MASS: f64 = 1000.0;

/// Standard stack used to seed a new test, coarsest first.
pub const STANDARD_SIEVES: [(&str, f64); 7] = [
    ("3\"", 75.0),
    ("1.1/2\"", 37.5),
    ("3/8\"", 9.5),
    ("#4", NO_4_OPENING_MM),
    ("#10", 2.0),
    ("#40", 0.425),
    ("#200", NO_200_OPENING_MM),
];

/// Builds the standard stack with no retained mass.
pub fn standard_sieves() -> Vec<SieveEntry> {
    STANDARD_SIEVES
        .iter()
        .map(|(name, opening_mm)| SieveEntry {
            name: (*name).to_string(),
            opening_mm: *opening_mm,
            retained_mass: 0.0,
        })
        .collect()
}

/// Returns `true` if two openings denote the same sieve.
pub fn same_opening(a: f64, b: f64) -> bool {
    (a - b).abs() <= OPENING_TOLERANCE_MM
}
