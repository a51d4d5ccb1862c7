//! Sieve entries, gradation tests and their derived results.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::sieves;

/// One sieve of a gradation test with the mass retained on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SieveEntry {
    /// Display label, e.g. `#200` or `3/8"`.
    pub name: String,
    /// Mesh opening in millimetres.
    pub opening_mm: f64,
    /// Dry mass retained on the sieve, in grams.
    ///
    /// Blank, null or non-numeric input reads as 0 g.
    #[serde(default, deserialize_with = "deserialize_retained_mass")]
    pub retained_mass: f64,
}

impl SieveEntry {
    /// Creates a validated sieve entry.
    ///
    /// The name must not be blank, the opening must be a positive finite
    /// number and the retained mass a non-negative finite number.
    pub fn new(name: impl Into<String>, opening_mm: f64, retained_mass: f64) -> Result<Self> {
        let entry = Self {
            name: name.into().trim().to_string(),
            opening_mm,
            retained_mass,
        };
        entry.validate()?;
        Ok(entry)
    }

    /// Creates an entry with no retained mass yet.
    pub fn empty(name: impl Into<String>, opening_mm: f64) -> Result<Self> {
        Self::new(name, opening_mm, 0.0)
    }

    /// Checks the entry invariants.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::invalid_input("name", "sieve name must not be empty"));
        }
        if !self.opening_mm.is_finite() || self.opening_mm <= 0.0 {
            return Err(Error::invalid_input(
                "opening_mm",
                format!("opening must be greater than zero, got {}", self.opening_mm),
            ));
        }
        if !self.retained_mass.is_finite() || self.retained_mass < 0.0 {
            return Err(Error::invalid_input(
                "retained_mass",
                format!("retained mass must not be negative, got {}", self.retained_mass),
            ));
        }
        Ok(())
    }

    /// Mass used by the computations: anything that is not a non-negative
    /// finite number counts as nothing retained.
    pub fn effective_retained_mass(&self) -> f64 {
        if self.retained_mass.is_finite() && self.retained_mass > 0.0 {
            self.retained_mass
        } else {
            0.0
        }
    }
}

/// Parses `name:opening_mm[:retained_mass]`, e.g. `#100:0.15:12.5`.
impl FromStr for SieveEntry {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(':').map(str::trim).collect();
        let (name, opening, mass) = match parts.as_slice() {
            [name, opening] => (*name, *opening, None),
            [name, opening, mass] => (*name, *opening, Some(*mass)),
            _ => {
                return Err(Error::invalid_input(
                    "sieve",
                    format!("expected name:opening_mm[:retained_mass], got '{s}'"),
                ));
            }
        };

        let opening_mm = opening.parse::<f64>().map_err(|_| {
            Error::invalid_input("opening_mm", format!("'{opening}' is not a number"))
        })?;
        let retained_mass = match mass {
            Some(m) => m.parse::<f64>().map_err(|_| {
                Error::invalid_input("retained_mass", format!("'{m}' is not a number"))
            })?,
            None => 0.0,
        };

        Self::new(name, opening_mm, retained_mass)
    }
}

/// A sieve-analysis test: the nominal sample mass and its sieve rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradationTest {
    /// Operator-supplied dry sample mass, in grams.
    pub total_mass: f64,
    /// Sieve rows in any order.
    #[serde(default, alias = "sieves")]
    pub entries: Vec<SieveEntry>,
}

impl GradationTest {
    /// Creates a test from a total mass and its entries.
    pub fn new(total_mass: f64, entries: Vec<SieveEntry>) -> Self {
        Self {
            total_mass,
            entries,
        }
    }

    /// The default seed: the standard sieve stack with nothing retained.
    pub fn standard() -> Self {
        Self::new(sieves::DEFAULT_TOTAL_MASS, sieves::standard_sieves())
    }

    /// Number of sieve rows.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the test has no sieve rows.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of the effective retained masses of all rows.
    pub fn sum_retained(&self) -> f64 {
        self.entries
            .iter()
            .map(SieveEntry::effective_retained_mass)
            .sum()
    }

    /// Checks the total mass and every entry, reporting the first failure
    /// with the row index in the field name.
    pub fn validate(&self) -> Result<()> {
        ensure_total_mass(self.total_mass)?;
        for (index, entry) in self.entries.iter().enumerate() {
            entry.validate().map_err(|err| match err {
                Error::InvalidInput { field, message } => Error::InvalidInput {
                    field: format!("sieves[{index}].{field}"),
                    message,
                },
                other => other,
            })?;
        }
        Ok(())
    }
}

impl Default for GradationTest {
    fn default() -> Self {
        Self::standard()
    }
}

/// Reads a retained mass from loosely typed input.
///
/// Numbers and numeric strings are taken as they are; anything else,
/// including blanks, `null` and non-finite values, counts as 0 g.
pub fn lenient_retained_mass(value: &Value) -> f64 {
    let mass = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    mass.filter(|m| m.is_finite()).unwrap_or(0.0)
}

fn deserialize_retained_mass<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|value| lenient_retained_mass(&value))
}

/// Fails with [`Error::InvalidTotalMass`] unless `total_mass` is a positive
/// finite number.
pub(crate) fn ensure_total_mass(total_mass: f64) -> Result<()> {
    if total_mass.is_finite() && total_mass > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidTotalMass { total_mass })
    }
}

/// A computed row of the gradation table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SieveResult {
    /// Sieve label.
    pub name: String,
    /// Mesh opening in millimetres.
    pub opening_mm: f64,
    /// Mass retained on this sieve, in grams.
    pub retained_mass: f64,
    /// Cumulative percentage of the sample finer than this opening, in [0, 100].
    pub percent_passing: f64,
}

/// Comparison of the summed retained masses against the nominal sample mass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MassBalanceCheck {
    /// Sum of all retained masses, in grams.
    pub sum_retained: f64,
    /// Nominal sample mass, in grams.
    pub total_mass: f64,
    /// Signed deviation: `(sum_retained - total_mass) / total_mass * 100`.
    pub error_percent: f64,
    /// `true` when `|error_percent|` does not exceed the lab tolerance.
    pub within_tolerance: bool,
}

/// Coarse/fine split by the percentage passing the #200 sieve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FinesClass {
    /// Half or more of the sample is retained on #200 (sand and gravel).
    CoarseGrained,
    /// More than half of the sample passes #200 (silt and clay).
    FineGrained,
}

impl FinesClass {
    /// Report label used on the laboratory sheet.
    pub fn label(&self) -> &'static str {
        match self {
            FinesClass::CoarseGrained => "SOLO GROSSO (Areia/Pedregulho)",
            FinesClass::FineGrained => "SOLO FINO (Silte/Argila)",
        }
    }
}

impl fmt::Display for FinesClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Gravel / sand / fines percentages of the sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrainSizeFractions {
    /// Retained on #4: `100 - P(#4)`.
    pub gravel_percent: f64,
    /// Between #4 and #200: `P(#4) - P(#200)`.
    pub sand_percent: f64,
    /// Passing #200.
    pub fines_percent: f64,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_lenient_retained_mass() {
        assert_eq!(lenient_retained_mass(&serde_json::json!(12.5)), 12.5);
        assert_eq!(lenient_retained_mass(&serde_json::json!(" 12 ")), 12.0);
        assert_eq!(lenient_retained_mass(&serde_json::json!("")), 0.0);
        assert_eq!(lenient_retained_mass(&serde_json::json!("abc")), 0.0);
        assert_eq!(lenient_retained_mass(&serde_json::json!("NaN")), 0.0);
        assert_eq!(lenient_retained_mass(&Value::Null), 0.0);
        assert_eq!(lenient_retained_mass(&serde_json::json!([1])), 0.0);
    }

    #[test]
    fn test_entry_deserializes_loose_masses() {
        let json = r##"[
            {"name": "#4", "opening_mm": 4.75, "retained_mass": ""},
            {"name": "#10", "opening_mm": 2.0, "retained_mass": "12"},
            {"name": "#40", "opening_mm": 0.425, "retained_mass": null},
            {"name": "#200", "opening_mm": 0.075}
        ]"##;
        let entries: Vec<SieveEntry> = serde_json::from_str(json).unwrap();
        let masses: Vec<f64> = entries.iter().map(|e| e.retained_mass).collect();
        assert_eq!(masses, vec![0.0, 12.0, 0.0, 0.0]);
    }

    #[test]
    fn test_new_entry_trims_name() {
        let entry = SieveEntry::new("  #100 ", 0.15, 12.5).unwrap();
        assert_eq!(entry.name, "#100");
        assert_eq!(entry.opening_mm, 0.15);
        assert_eq!(entry.retained_mass, 12.5);
    }

    #[test]
    fn test_new_entry_rejects_blank_name() {
        let err = SieveEntry::new("   ", 1.0, 0.0).unwrap_err();
        assert_eq!(err.field(), Some("name"));
    }

    #[test]
    fn test_new_entry_rejects_non_positive_opening() {
        assert_eq!(
            SieveEntry::new("#x", 0.0, 0.0).unwrap_err().field(),
            Some("opening_mm")
        );
        assert_eq!(
            SieveEntry::new("#x", f64::NAN, 0.0).unwrap_err().field(),
            Some("opening_mm")
        );
    }

    #[test]
    fn test_new_entry_rejects_negative_mass() {
        let err = SieveEntry::new("#4", 4.75, -1.0).unwrap_err();
        assert_eq!(err.field(), Some("retained_mass"));
    }

    #[test]
    fn test_effective_mass_ignores_garbage() {
        let mut entry = SieveEntry::empty("#4", 4.75).unwrap();
        entry.retained_mass = f64::NAN;
        assert_eq!(entry.effective_retained_mass(), 0.0);
        entry.retained_mass = -5.0;
        assert_eq!(entry.effective_retained_mass(), 0.0);
        entry.retained_mass = 5.0;
        assert_eq!(entry.effective_retained_mass(), 5.0);
    }

    #[test]
    fn test_parse_entry_with_mass() {
        let entry: SieveEntry = "#100:0.15:12.5".parse().unwrap();
        assert_eq!(entry, SieveEntry::new("#100", 0.15, 12.5).unwrap());
    }

    #[test]
    fn test_parse_entry_without_mass() {
        let entry: SieveEntry = "3/8\":9.5".parse().unwrap();
        assert_eq!(entry.name, "3/8\"");
        assert_eq!(entry.retained_mass, 0.0);
    }

    #[test]
    fn test_parse_entry_bad_shapes() {
        assert_eq!(
            "#100".parse::<SieveEntry>().unwrap_err().field(),
            Some("sieve")
        );
        assert_eq!(
            "#100:abc".parse::<SieveEntry>().unwrap_err().field(),
            Some("opening_mm")
        );
        assert_eq!(
            "#100:0.15:lots".parse::<SieveEntry>().unwrap_err().field(),
            Some("retained_mass")
        );
    }

    #[test]
    fn test_standard_test_seed() {
        let test = GradationTest::standard();
        assert_eq!(test.total_mass, 1000.0);
        assert_eq!(test.len(), 7);
        assert_eq!(test.sum_retained(), 0.0);
        assert!(test.validate().is_ok());
    }

    #[test]
    fn test_validate_reports_row_index() {
        let mut test = GradationTest::standard();
        test.entries[2].opening_mm = -1.0;
        let err = test.validate().unwrap_err();
        assert_eq!(err.field(), Some("sieves[2].opening_mm"));
    }

    #[test]
    fn test_validate_total_mass() {
        let test = GradationTest::new(0.0, Vec::new());
        assert!(matches!(
            test.validate(),
            Err(Error::InvalidTotalMass { .. })
        ));
    }

    #[test]
    fn test_deserialize_sieves_alias_and_default_mass() {
        let json = r##"{"total_mass": 500, "sieves": [{"name": "#4", "opening_mm": 4.75}]}"##;
        let test: GradationTest = serde_json::from_str(json).unwrap();
        assert_eq!(test.total_mass, 500.0);
        assert_eq!(test.entries[0].retained_mass, 0.0);
    }

    #[test]
    fn test_fines_class_labels() {
        assert_eq!(
            FinesClass::FineGrained.to_string(),
            "SOLO FINO (Silte/Argila)"
        );
        assert_eq!(
            serde_json::to_string(&FinesClass::CoarseGrained).unwrap(),
            "\"CoarseGrained\""
        );
    }
}
