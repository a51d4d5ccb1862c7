//! Gradation test files.
//!
//! A test file carries the sample mass and its sieves, in TOML:
//!
//! ```toml
//! total_mass = 1000.0
//!
//! [[sieves]]
//! name = "#4"
//! opening_mm = 4.75
//! retained_mass = 50.0
//! ```
//!
//! or the equivalent JSON object. `retained_mass` may be omitted.

use std::path::Path;

use granulo_core::GradationTest;

use crate::error::{Error, Result};

/// Loads and validates a gradation test, picking the parser by extension.
pub fn load_gradation_file(path: &Path) -> Result<GradationTest> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;

    let parse_error = |message: String| Error::Parse {
        path: path.to_path_buf(),
        message,
    };

    let test: GradationTest = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(&content).map_err(|e| parse_error(e.to_string()))?,
        Some("toml") | None => toml::from_str(&content).map_err(|e| parse_error(e.to_string()))?,
        Some(other) => {
            return Err(parse_error(format!(
                "unsupported extension '.{other}' (expected .toml or .json)"
            )));
        }
    };

    test.validate()?;
    tracing::debug!(path = %path.display(), sieves = test.len(), "Loaded gradation test");
    Ok(test)
}
