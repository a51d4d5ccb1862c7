//! Request and response bodies.
//!
//! Request bodies are read from raw JSON so that every failure can name the
//! field it comes from. Numeric fields take a JSON number or a numeric string,
//! since HTML forms post their inputs as text.

use granulo_core::types::lenient_retained_mass;
use granulo_core::{Classification, ClassificationInput, GradationTest, SieveEntry};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ApiError, Result};

// ============================================================================
// Field helpers
// ============================================================================

fn as_object<'a>(value: &'a Value, what: &str) -> Result<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| ApiError::invalid_request(format!("{what} must be a JSON object")))
}

/// Reads a number from a JSON number or a numeric string.
///
/// `Ok(None)` for absent, `null` or blank values.
fn coerce_number(value: Option<&Value>) -> std::result::Result<Option<f64>, ()> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n.as_f64().map(Some).ok_or(()),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s.trim().parse::<f64>().map(Some).map_err(|_| ()),
        Some(_) => Err(()),
    }
}

/// Reads an optional numeric field; present but non-numeric is an error.
pub fn optional_number(object: &Map<String, Value>, field: &str) -> Result<Option<f64>> {
    coerce_number(object.get(field))
        .map_err(|_| ApiError::invalid_field(field, format!("'{field}' must be a number")))
}

/// Reads a required numeric field.
pub fn required_number(object: &Map<String, Value>, field: &str) -> Result<f64> {
    optional_number(object, field)?
        .ok_or_else(|| ApiError::invalid_field(field, format!("missing field '{field}'")))
}

// ============================================================================
// POST /calcular
// ============================================================================

/// Body of `POST /calcular`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifyRequest {
    /// Liquid limit.
    pub ll: f64,
    /// Plastic limit, when the caller sends it.
    pub lp: Option<f64>,
    /// Plasticity index, when the caller sends it.
    pub ip: Option<f64>,
    /// Percent passing #200 (`passa_200` on the wire).
    pub passing_200: f64,
}

impl ClassifyRequest {
    /// Parses the raw JSON body.
    pub fn from_json(value: &Value) -> Result<Self> {
        let object = as_object(value, "request body")?;
        Ok(Self {
            ll: required_number(object, "ll")?,
            lp: optional_number(object, "lp")?,
            ip: optional_number(object, "ip")?,
            passing_200: required_number(object, "passa_200")?,
        })
    }

    /// Settles IP and validates the ranges.
    pub fn into_input(self) -> Result<ClassificationInput> {
        let ip = granulo_core::resolve_plasticity_index(self.ll, self.lp, self.ip)?;
        ClassificationInput::new(self.ll, ip, self.passing_200).map_err(|err| match err {
            granulo_core::Error::InvalidInput { field, message } if field == "passing_200" => {
                granulo_core::Error::invalid_input("passa_200", message).into()
            }
            other => other.into(),
        })
    }
}

/// Body of a successful `POST /calcular`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassifyResponse {
    /// SUCS band label.
    pub sucs: String,
    /// AASHTO band label.
    pub aashto: String,
    /// MCT placeholder.
    pub mct: String,
}

impl From<Classification> for ClassifyResponse {
    fn from(classification: Classification) -> Self {
        Self {
            sucs: classification.sucs.label().to_string(),
            aashto: classification.aashto.label().to_string(),
            mct: classification.mct,
        }
    }
}

// ============================================================================
// POST /gradation
// ============================================================================

/// Parses the body of `POST /gradation` into a validated test.
///
/// Sieve names default to their opening; retained masses that are missing or
/// non-numeric count as 0.
pub fn gradation_test_from_json(value: &Value) -> Result<GradationTest> {
    let object = as_object(value, "request body")?;
    let total_mass = required_number(object, "total_mass")?;

    let sieves = match object.get("sieves") {
        Some(Value::Array(items)) => items.as_slice(),
        Some(_) => return Err(ApiError::invalid_field("sieves", "'sieves' must be an array")),
        None => return Err(ApiError::invalid_field("sieves", "missing field 'sieves'")),
    };

    let mut entries = Vec::with_capacity(sieves.len());
    for (index, item) in sieves.iter().enumerate() {
        let sieve = item.as_object().ok_or_else(|| {
            ApiError::invalid_field(format!("sieves[{index}]"), "sieve must be a JSON object")
        })?;
        let opening_field = format!("sieves[{index}].opening_mm");
        let opening_mm = coerce_number(sieve.get("opening_mm"))
            .map_err(|_| ApiError::invalid_field(&opening_field, "opening must be a number"))?
            .ok_or_else(|| ApiError::invalid_field(&opening_field, "missing opening"))?;
        let name = match sieve.get("name") {
            Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
            _ => format!("{opening_mm} mm"),
        };

        entries.push(SieveEntry {
            name,
            opening_mm,
            retained_mass: sieve
                .get("retained_mass")
                .map_or(0.0, lenient_retained_mass),
        });
    }

    let test = GradationTest::new(total_mass, entries);
    test.validate()?;
    Ok(test)
}

/// A sieve set as served by `GET /sieves/standard`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SieveSetResponse {
    /// Nominal sample mass, in grams.
    pub total_mass: f64,
    /// Sieves, coarsest first.
    pub sieves: Vec<SieveEntry>,
}

impl From<GradationTest> for SieveSetResponse {
    fn from(test: GradationTest) -> Self {
        Self {
            total_mass: test.total_mass,
            sieves: test.entries,
        }
    }
}

// ============================================================================
// GET /health
// ============================================================================

/// Health check response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Server status ("healthy").
    pub status: String,
    /// Service name.
    pub service: String,
    /// Service version.
    pub version: String,
}
