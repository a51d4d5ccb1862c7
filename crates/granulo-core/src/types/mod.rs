//! Core types for sieve analysis and soil classification.

pub(crate) mod classification;
pub(crate) mod sieve;

pub use classification::{AashtoLabel, Classification, ClassificationInput, SucsLabel};
pub use sieve::{
    FinesClass, GradationTest, GrainSizeFractions, MassBalanceCheck, SieveEntry, SieveResult,
    lenient_retained_mass,
};
