//! Sieve analysis: cumulative percent passing and mass balance.
//!
//! All functions here are pure. They borrow a [`GradationTest`] and return
//! freshly built values; the caller's rows are never reordered or modified.
//!
//! # Usage
//!
//! ```rust
//! use granulo_core::{GradationTest, SieveEntry, FinesClass};
//! use granulo_core::gradation::{classify_by_fines, compute_gradation};
//!
//! let test = GradationTest::new(
//!     1000.0,
//!     vec![
//!         SieveEntry::new("#200", 0.075, 450.0).unwrap(),
//!         SieveEntry::new("#4", 4.75, 50.0).unwrap(),
//!     ],
//! );
//! let results = compute_gradation(&test).unwrap();
//! assert_eq!(results[0].name, "#4");
//! assert_eq!(classify_by_fines(&results).unwrap(), FinesClass::CoarseGrained);
//! ```

use crate::error::{Error, Result};
use crate::sieves::{NO_4_OPENING_MM, NO_200_OPENING_MM, OPENING_TOLERANCE_MM, same_opening};
use crate::types::{
    FinesClass, GradationTest, GrainSizeFractions, MassBalanceCheck, SieveEntry, SieveResult,
};
use crate::types::sieve::ensure_total_mass;

/// Accepted absolute mass-balance deviation, in percent.
pub const MASS_BALANCE_TOLERANCE_PERCENT: f64 = 2.0;

/// Fines share above which a sample is fine-grained, in percent.
pub const FINES_THRESHOLD_PERCENT: f64 = 50.0;

/// Computes the gradation table, coarsest sieve first.
///
/// Rows are stably sorted by opening, descending, before accumulating the
/// retained masses. An empty test yields an empty table; a non-empty test
/// requires a positive total mass.
pub fn compute_gradation(test: &GradationTest) -> Result<Vec<SieveResult>> {
    if test.is_empty() {
        return Ok(Vec::new());
    }
    ensure_total_mass(test.total_mass)?;

    let mut ordered: Vec<&SieveEntry> = test.entries.iter().collect();
    ordered.sort_by(|a, b| b.opening_mm.total_cmp(&a.opening_mm));

    let mut cumulative = 0.0;
    let results = ordered
        .into_iter()
        .map(|entry| {
            let retained = entry.effective_retained_mass();
            cumulative += retained;
            let percent_retained = cumulative / test.total_mass * 100.0;
            SieveResult {
                name: entry.name.clone(),
                opening_mm: entry.opening_mm,
                retained_mass: retained,
                percent_passing: (100.0 - percent_retained).max(0.0),
            }
        })
        .collect();

    Ok(results)
}

/// Compares the summed retained masses with the nominal sample mass.
pub fn compute_mass_balance(test: &GradationTest) -> Result<MassBalanceCheck> {
    ensure_total_mass(test.total_mass)?;

    let sum_retained = test.sum_retained();
    let error_percent = (sum_retained - test.total_mass) / test.total_mass * 100.0;

    Ok(MassBalanceCheck {
        sum_retained,
        total_mass: test.total_mass,
        error_percent,
        within_tolerance: error_percent.abs() <= MASS_BALANCE_TOLERANCE_PERCENT,
    })
}

/// Splits the sample into coarse- or fine-grained by the #200 sieve.
///
/// The reference row is found by opening (the nearest one within
/// [`OPENING_TOLERANCE_MM`] of 0.075 mm), never by its label.
pub fn classify_by_fines(results: &[SieveResult]) -> Result<FinesClass> {
    let reference = results
        .iter()
        .filter(|r| same_opening(r.opening_mm, NO_200_OPENING_MM))
        .min_by(|a, b| {
            let da = (a.opening_mm - NO_200_OPENING_MM).abs();
            let db = (b.opening_mm - NO_200_OPENING_MM).abs();
            da.total_cmp(&db)
        })
        .ok_or(Error::MissingReferenceSieve {
            opening_mm: NO_200_OPENING_MM,
        })?;

    if reference.percent_passing > FINES_THRESHOLD_PERCENT {
        Ok(FinesClass::FineGrained)
    } else {
        Ok(FinesClass::CoarseGrained)
    }
}

/// Percent passing at `opening_mm`, read from a coarsest-first table.
///
/// Returns the value of the first row whose opening does not exceed the
/// requested one, or `None` when every sieve is coarser.
pub fn passing_at(results: &[SieveResult], opening_mm: f64) -> Option<f64> {
    results
        .iter()
        .find(|r| r.opening_mm <= opening_mm + OPENING_TOLERANCE_MM)
        .map(|r| r.percent_passing)
}

/// Gravel, sand and fines shares of the sample.
///
/// `None` when the table has nothing at or below the #4 or #200 openings.
pub fn grain_size_fractions(results: &[SieveResult]) -> Option<GrainSizeFractions> {
    let passing_4 = passing_at(results, NO_4_OPENING_MM)?;
    let passing_200 = passing_at(results, NO_200_OPENING_MM)?;

    Some(GrainSizeFractions {
        gravel_percent: 100.0 - passing_4,
        sand_percent: (passing_4 - passing_200).max(0.0),
        fines_percent: passing_200,
    })
}
