//! Threshold classification inputs and labels.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Atterberg limits and #200 fines for a single classification request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationInput {
    /// Liquid limit (LL), in percent.
    pub ll: f64,
    /// Plasticity index (IP = LL - LP), in percent.
    pub ip: f64,
    /// Percent passing the #200 sieve, 0–100.
    pub passing_200: f64,
}

impl ClassificationInput {
    /// Creates a validated input.
    pub fn new(ll: f64, ip: f64, passing_200: f64) -> Result<Self> {
        let input = Self {
            ll,
            ip,
            passing_200,
        };
        input.validate()?;
        Ok(input)
    }

    /// Checks that every value is finite and inside its physical range.
    pub fn validate(&self) -> Result<()> {
        non_negative("ll", self.ll)?;
        non_negative("ip", self.ip)?;
        if !self.passing_200.is_finite() || !(0.0..=100.0).contains(&self.passing_200) {
            return Err(Error::invalid_input(
                "passing_200",
                format!("must be between 0 and 100, got {}", self.passing_200),
            ));
        }
        Ok(())
    }
}

pub(crate) fn non_negative(field: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::invalid_input(
            field,
            format!("must be a non-negative number, got {value}"),
        ))
    }
}

/// Coarse SUCS band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SucsLabel {
    /// Less than half passes #200.
    CoarseSoil,
    /// Above the A-line: clays.
    #[serde(rename = "CH_CL")]
    ChCl,
    /// On or below the A-line: silts.
    #[serde(rename = "MH_ML")]
    MhMl,
}

impl SucsLabel {
    /// Label shown to the operator.
    pub fn label(&self) -> &'static str {
        match self {
            SucsLabel::CoarseSoil => "Solo Grosso",
            SucsLabel::ChCl => "CH/CL",
            SucsLabel::MhMl => "MH/ML",
        }
    }
}

impl fmt::Display for SucsLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Coarse AASHTO group band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AashtoLabel {
    /// Granular materials, 35 % or less passing #200.
    #[serde(rename = "A1_to_A3")]
    A1ToA3,
    /// Silt-clay materials.
    #[serde(rename = "A4_to_A7")]
    A4ToA7,
}

impl AashtoLabel {
    /// Label shown to the operator.
    pub fn label(&self) -> &'static str {
        match self {
            AashtoLabel::A1ToA3 => "A-1 a A-3",
            AashtoLabel::A4ToA7 => "A-4 a A-7",
        }
    }
}

impl fmt::Display for AashtoLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of the threshold classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// SUCS band.
    pub sucs: SucsLabel,
    /// AASHTO band.
    pub aashto: AashtoLabel,
    /// MCT result; always the not-implemented placeholder.
    pub mct: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_input_accepts_bounds() {
        assert!(ClassificationInput::new(0.0, 0.0, 0.0).is_ok());
        assert!(ClassificationInput::new(120.0, 80.0, 100.0).is_ok());
    }

    #[test]
    fn test_input_rejects_negative_limits() {
        let err = ClassificationInput::new(-1.0, 5.0, 40.0).unwrap_err();
        assert_eq!(err.field(), Some("ll"));
        let err = ClassificationInput::new(30.0, -0.5, 40.0).unwrap_err();
        assert_eq!(err.field(), Some("ip"));
    }

    #[test]
    fn test_input_rejects_out_of_range_passing() {
        let err = ClassificationInput::new(30.0, 5.0, 100.5).unwrap_err();
        assert_eq!(err.field(), Some("passing_200"));
        let err = ClassificationInput::new(30.0, 5.0, f64::NAN).unwrap_err();
        assert_eq!(err.field(), Some("passing_200"));
    }

    #[test]
    fn test_label_serialization() {
        assert_eq!(serde_json::to_string(&SucsLabel::ChCl).unwrap(), "\"CH_CL\"");
        assert_eq!(
            serde_json::to_string(&SucsLabel::CoarseSoil).unwrap(),
            "\"CoarseSoil\""
        );
        assert_eq!(
            serde_json::to_string(&AashtoLabel::A4ToA7).unwrap(),
            "\"A4_to_A7\""
        );
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(SucsLabel::MhMl.to_string(), "MH/ML");
        assert_eq!(AashtoLabel::A1ToA3.to_string(), "A-1 a A-3");
    }
}
