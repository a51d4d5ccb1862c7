//! Gradation report: everything a lab sheet shows, as plain data.
//!
//! The report is what presentation layers consume read only. Two renderings
//! ship with the crate: a fixed-width text table and CSV.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::gradation::{
    classify_by_fines, compute_gradation, compute_mass_balance, grain_size_fractions,
};
use crate::types::{FinesClass, GradationTest, GrainSizeFractions, MassBalanceCheck, SieveResult};

/// Column headers of the CSV rendering.
pub const CSV_HEADERS: [&str; 4] = ["sieve", "opening_mm", "retained_mass_g", "percent_passing"];

/// Computed gradation with its checks and derived classifications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradationReport {
    /// Nominal sample mass, in grams.
    pub total_mass: f64,
    /// Table rows, coarsest first.
    pub results: Vec<SieveResult>,
    /// Mass-balance check.
    pub mass_balance: MassBalanceCheck,
    /// Coarse/fine split; `None` without a #200 sieve.
    pub fines_class: Option<FinesClass>,
    /// Gravel/sand/fines shares; `None` without sieves at or below #4 and #200.
    pub fractions: Option<GrainSizeFractions>,
}

impl GradationReport {
    /// Runs every computation for `test`.
    pub fn build(test: &GradationTest) -> Result<Self> {
        let results = compute_gradation(test)?;
        let mass_balance = compute_mass_balance(test)?;
        let fines_class = match classify_by_fines(&results) {
            Ok(class) => Some(class),
            Err(Error::MissingReferenceSieve { .. }) => None,
            Err(err) => return Err(err),
        };
        let fractions = grain_size_fractions(&results);

        Ok(Self {
            total_mass: test.total_mass,
            results,
            mass_balance,
            fines_class,
            fractions,
        })
    }

    /// Renders the report as a fixed-width text table with a summary.
    pub fn to_table(&self) -> String {
        self.to_string()
    }

    /// Renders the table rows as CSV, percentages at two decimals.
    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(CSV_HEADERS)?;
        for row in &self.results {
            writer.write_record([
                row.name.clone(),
                row.opening_mm.to_string(),
                format!("{:.2}", row.retained_mass),
                format!("{:.2}", row.percent_passing),
            ])?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| Error::Csv(e.into_error().into()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Renders the report as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for GradationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<10} {:>12} {:>14} {:>12}",
            "Sieve", "Opening (mm)", "Retained (g)", "Passing (%)"
        )?;
        writeln!(f, "{}", "-".repeat(51))?;
        for row in &self.results {
            writeln!(
                f,
                "{:<10} {:>12} {:>14.2} {:>12.2}",
                row.name, row.opening_mm, row.retained_mass, row.percent_passing
            )?;
        }
        writeln!(f)?;

        let balance = &self.mass_balance;
        writeln!(
            f,
            "Total mass: {:.2} g | Retained: {:.2} g | Mass error: {:.2}%{}",
            self.total_mass,
            balance.sum_retained,
            balance.error_percent,
            if balance.within_tolerance {
                ""
            } else {
                " (outside tolerance)"
            }
        )?;

        match self.fines_class {
            Some(class) => writeln!(f, "Classification: {class}")?,
            None => writeln!(f, "Classification: unavailable (no #200 sieve)")?,
        }

        if let Some(fr) = &self.fractions {
            writeln!(
                f,
                "Gravel: {:.2}% | Sand: {:.2}% | Fines: {:.2}%",
                fr.gravel_percent, fr.sand_percent, fr.fines_percent
            )?;
        }
        Ok(())
    }
}
