//! Threshold soil classifier.
//!
//! A stateless decision table over liquid limit, plasticity index and the
//! percentage passing #200. It yields coarse SUCS and AASHTO bands only; the
//! MCT method needs Mini-MCV data that is not modelled, so its field always
//! carries [`MCT_PLACEHOLDER`].

use crate::error::{Error, Result};
use crate::types::classification::non_negative;
use crate::types::{AashtoLabel, Classification, ClassificationInput, SucsLabel};

/// Slope of the Casagrande A-line, `IP = 0.73 (LL - 20)`.
pub const A_LINE_SLOPE: f64 = 0.73;

/// Liquid-limit intercept of the A-line.
pub const A_LINE_LL_OFFSET: f64 = 20.0;

/// Below this share passing #200 a soil is coarse for SUCS (strict `<`).
pub const SUCS_COARSE_LIMIT: f64 = 50.0;

/// Up to this share passing #200 a soil is granular for AASHTO (inclusive).
pub const AASHTO_GRANULAR_LIMIT: f64 = 35.0;

/// Fixed MCT result.
pub const MCT_PLACEHOLDER: &str = "Em desenvolvimento (Requer ensaio Mini-MCV)";

/// Largest accepted gap between a supplied IP and `LL - LP`.
pub const IP_TOLERANCE: f64 = 0.01;

/// Classifies a soil from its Atterberg limits and #200 fines.
///
/// Fails with [`Error::InvalidInput`] when a value is negative, not finite,
/// or (for `passing_200`) above 100.
pub fn classify(ll: f64, ip: f64, passing_200: f64) -> Result<Classification> {
    let input = ClassificationInput::new(ll, ip, passing_200)?;
    Ok(classify_input(&input))
}

/// Classifies an already validated input.
pub fn classify_input(input: &ClassificationInput) -> Classification {
    Classification {
        sucs: sucs_band(input),
        aashto: aashto_band(input),
        mct: MCT_PLACEHOLDER.to_string(),
    }
}

fn sucs_band(input: &ClassificationInput) -> SucsLabel {
    if input.passing_200 < SUCS_COARSE_LIMIT {
        SucsLabel::CoarseSoil
    } else if input.ip > A_LINE_SLOPE * (input.ll - A_LINE_LL_OFFSET) {
        SucsLabel::ChCl
    } else {
        SucsLabel::MhMl
    }
}

fn aashto_band(input: &ClassificationInput) -> AashtoLabel {
    if input.passing_200 <= AASHTO_GRANULAR_LIMIT {
        AashtoLabel::A1ToA3
    } else {
        AashtoLabel::A4ToA7
    }
}

/// Settles the plasticity index from what a caller supplied.
///
/// With a plastic limit, IP is derived as `LL - LP`; a supplied IP must then
/// agree within [`IP_TOLERANCE`]. Without one, the supplied IP is used as is.
pub fn resolve_plasticity_index(ll: f64, lp: Option<f64>, ip: Option<f64>) -> Result<f64> {
    non_negative("ll", ll)?;
    match (lp, ip) {
        (Some(lp), supplied) => {
            non_negative("lp", lp)?;
            if lp > ll {
                return Err(Error::invalid_input(
                    "lp",
                    format!("plastic limit {lp} exceeds liquid limit {ll}"),
                ));
            }
            let derived = ll - lp;
            match supplied {
                Some(ip) if (ip - derived).abs() > IP_TOLERANCE || !ip.is_finite() => {
                    Err(Error::invalid_input(
                        "ip",
                        format!("{ip} does not match ll - lp = {derived}"),
                    ))
                }
                _ => Ok(derived),
            }
        }
        (None, Some(ip)) => Ok(ip),
        (None, None) => Err(Error::invalid_input("ip", "either ip or lp must be provided")),
    }
}
