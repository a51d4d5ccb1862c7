#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Granulo Core
//!
//! Domain types and pure computations for soil laboratory data:
//!
//! - [`gradation`]: cumulative percent passing, mass balance and the
//!   coarse/fine split on the #200 sieve
//! - [`classifier`]: threshold SUCS / AASHTO labelling from Atterberg limits
//! - [`session`]: an owned, versioned gradation test edited by a front end
//! - [`report`]: tabular renderings of a computed gradation
//!
//! Nothing in this crate performs I/O or logging; every computation borrows
//! its input and returns new values.

pub mod classifier;
pub mod error;
pub mod gradation;
pub mod report;
pub mod session;
pub mod sieves;
pub mod types;

mod proptests;

// Re-exports for convenience
pub use classifier::{classify, resolve_plasticity_index};
pub use error::{Error, Result};
pub use gradation::{
    classify_by_fines, compute_gradation, compute_mass_balance, grain_size_fractions, passing_at,
};
pub use report::GradationReport;
pub use session::GradationSession;
pub use types::{
    AashtoLabel, Classification, ClassificationInput, FinesClass, GradationTest,
    GrainSizeFractions, MassBalanceCheck, SieveEntry, SieveResult, SucsLabel,
};
