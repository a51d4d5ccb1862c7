//! Error types for the Granulo core library.

/// Errors that can occur while computing a gradation or classifying a soil.
///
/// The domain variants (`InvalidTotalMass`, `MissingReferenceSieve`,
/// `InvalidInput`, `EntryNotFound`) are local to a single computation and
/// are reported back to the caller for correction; none of them is retryable.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The nominal sample mass is zero, negative or not a finite number.
    #[error("Invalid total mass: {total_mass} (must be a finite value greater than zero)")]
    InvalidTotalMass {
        /// The rejected total mass
        total_mass: f64,
    },

    /// No sieve with the reference opening is present in the results.
    #[error("Missing reference sieve: no entry with an opening of {opening_mm} mm")]
    MissingReferenceSieve {
        /// Opening that was looked up
        opening_mm: f64,
    },

    /// An input value is outside its accepted range.
    #[error("Invalid input for '{field}': {message}")]
    InvalidInput {
        /// Name of the offending field
        field: String,
        /// What went wrong
        message: String,
    },

    /// A session edit referenced a row that does not exist.
    #[error("Sieve entry not found at index {index}")]
    EntryNotFound {
        /// Requested row index
        index: usize,
    },

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// CSV rendering error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Convenience `Result` type alias for Granulo core operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns whether this error describes bad domain input.
    ///
    /// Domain errors are always the caller's to fix; everything else is an
    /// encoding failure inside a renderer.
    pub fn is_domain(&self) -> bool {
        match self {
            Error::InvalidTotalMass { .. } => true,
            Error::MissingReferenceSieve { .. } => true,
            Error::InvalidInput { .. } => true,
            Error::EntryNotFound { .. } => true,
            Error::Serialization(_) => false,
            Error::Csv(_) => false,
        }
    }

    /// Returns the input field this error refers to, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Error::InvalidInput { field, .. } => Some(field),
            Error::InvalidTotalMass { .. } => Some("total_mass"),
            _ => None,
        }
    }

    /// Creates a new invalid-input error for a named field.
    pub fn invalid_input<F, M>(field: F, message: M) -> Self
    where
        F: Into<String>,
        M: Into<String>,
    {
        Error::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidTotalMass { total_mass: 0.0 };
        assert_eq!(
            err.to_string(),
            "Invalid total mass: 0 (must be a finite value greater than zero)"
        );
    }

    #[test]
    fn test_missing_reference_sieve_display() {
        let err = Error::MissingReferenceSieve { opening_mm: 0.075 };
        assert_eq!(
            err.to_string(),
            "Missing reference sieve: no entry with an opening of 0.075 mm"
        );
    }

    #[test]
    fn test_invalid_input_with_field() {
        let err = Error::invalid_input("passing_200", "must be between 0 and 100");
        let Error::InvalidInput { field, message } = &err else {
            unreachable!("Expected InvalidInput error variant");
        };
        assert_eq!(field, "passing_200");
        assert_eq!(message, "must be between 0 and 100");
        assert_eq!(err.field(), Some("passing_200"));
    }

    #[test]
    fn test_domain_classification() {
        assert!(Error::InvalidTotalMass { total_mass: -1.0 }.is_domain());
        assert!(Error::EntryNotFound { index: 3 }.is_domain());
        assert!(Error::invalid_input("ll", "negative").is_domain());

        let serde_err = serde_json::from_str::<serde_json::Value>("{nope}").unwrap_err();
        assert!(!Error::from(serde_err).is_domain());
    }

    #[test]
    fn test_total_mass_field() {
        let err = Error::InvalidTotalMass { total_mass: 0.0 };
        assert_eq!(err.field(), Some("total_mass"));
        assert_eq!(Error::EntryNotFound { index: 0 }.field(), None);
    }

    #[test]
    fn test_error_implements_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
