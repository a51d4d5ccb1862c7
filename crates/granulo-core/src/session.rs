//! Editable gradation test owned by a front end.
//!
//! A [`GradationSession`] keeps its rows sorted coarsest first, so a row index
//! addresses the same sieve in the entries and in the computed table. Every
//! successful mutation bumps [`GradationSession::version`]; computations are
//! rerun from the owned test on demand.

use crate::error::{Error, Result};
use crate::gradation::{compute_gradation, compute_mass_balance};
use crate::report::GradationReport;
use crate::types::sieve::ensure_total_mass;
use crate::types::{GradationTest, MassBalanceCheck, SieveEntry, SieveResult};

/// In-memory gradation test with a mutation counter.
#[derive(Debug, Clone, PartialEq)]
pub struct GradationSession {
    test: GradationTest,
    version: u64,
}

impl GradationSession {
    /// Starts a session from an existing test after validating it.
    pub fn new(mut test: GradationTest) -> Result<Self> {
        test.validate()?;
        test.entries.sort_by(|a, b| b.opening_mm.total_cmp(&a.opening_mm));
        Ok(Self { test, version: 0 })
    }

    /// Starts a session seeded with the standard sieve stack.
    pub fn standard() -> Self {
        Self {
            test: GradationTest::standard(),
            version: 0,
        }
    }

    /// The owned test, read only.
    pub fn test(&self) -> &GradationTest {
        &self.test
    }

    /// Number of successful mutations since the session started.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Adds a sieve at its position in the descending stack and returns
    /// the row index it landed on. Equal openings go after existing rows.
    pub fn add_sieve(&mut self, entry: SieveEntry) -> Result<usize> {
        entry.validate()?;
        let index = self
            .test
            .entries
            .iter()
            .position(|e| e.opening_mm < entry.opening_mm)
            .unwrap_or(self.test.entries.len());
        self.test.entries.insert(index, entry);
        self.bump();
        Ok(index)
    }

    /// Removes the row at `index` and returns it.
    pub fn remove_sieve(&mut self, index: usize) -> Result<SieveEntry> {
        if index >= self.test.entries.len() {
            return Err(Error::EntryNotFound { index });
        }
        let removed = self.test.entries.remove(index);
        self.bump();
        Ok(removed)
    }

    /// Replaces the retained mass of the row at `index`.
    pub fn set_retained_mass(&mut self, index: usize, retained_mass: f64) -> Result<()> {
        if !retained_mass.is_finite() || retained_mass < 0.0 {
            return Err(Error::invalid_input(
                format!("sieves[{index}].retained_mass"),
                format!("retained mass must not be negative, got {retained_mass}"),
            ));
        }
        let entry = self
            .test
            .entries
            .get_mut(index)
            .ok_or(Error::EntryNotFound { index })?;
        entry.retained_mass = retained_mass;
        self.bump();
        Ok(())
    }

    /// Replaces the nominal sample mass.
    pub fn set_total_mass(&mut self, total_mass: f64) -> Result<()> {
        ensure_total_mass(total_mass)?;
        self.test.total_mass = total_mass;
        self.bump();
        Ok(())
    }

    /// Computes the gradation table for the current rows.
    pub fn results(&self) -> Result<Vec<SieveResult>> {
        compute_gradation(&self.test)
    }

    /// Computes the mass balance for the current rows.
    pub fn mass_balance(&self) -> Result<MassBalanceCheck> {
        compute_mass_balance(&self.test)
    }

    /// Builds the full report for the current rows.
    pub fn report(&self) -> Result<GradationReport> {
        GradationReport::build(&self.test)
    }

    /// Releases the owned test.
    pub fn into_test(self) -> GradationTest {
        self.test
    }

    fn bump(&mut self) {
        self.version += 1;
    }
}

impl Default for GradationSession {
    fn default() -> Self {
        Self::standard()
    }
}
