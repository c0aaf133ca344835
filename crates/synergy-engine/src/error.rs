//! Error types for the `synergy-engine` crate.
//!
//! Only input validation fails. Numerical edge cases (zero units, a zero
//! progress multiplier) fall back to zero throughput inside the row model,
//! and optimizer loops that hit their iteration cap report it through
//! [`Termination`](synergy_types::Termination) instead of failing.

use synergy_types::IndexError;

/// Errors returned at the engine's input boundary.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SynergyError {
    /// A page or row number was out of range.
    #[error("invalid index: {source}")]
    InvalidIndex {
        /// The underlying range error.
        #[from]
        source: IndexError,
    },

    /// A value was negative, non-finite, or otherwise unusable.
    #[error("invalid {field}: {reason}")]
    InvalidInput {
        /// The input that was rejected.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

impl SynergyError {
    /// Shorthand for an [`SynergyError::InvalidInput`].
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

/// Validate a non-negative integer count (level, pool size, perk level).
pub fn non_negative_count(field: &'static str, value: i64) -> Result<u64, SynergyError> {
    u64::try_from(value).map_err(|e| SynergyError::invalid(field, format!("{value} ({e})")))
}

/// Validate a finite, non-negative real (points, percentages).
pub fn non_negative_real(field: &'static str, value: f64) -> Result<f64, SynergyError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(SynergyError::invalid(
            field,
            format!("{value} is not a finite non-negative number"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_count_is_rejected() {
        assert!(non_negative_count("level", -1).is_err());
        assert_eq!(non_negative_count("level", 12), Ok(12));
    }

    #[test]
    fn non_finite_real_is_rejected() {
        assert!(non_negative_real("points", f64::NAN).is_err());
        assert!(non_negative_real("points", f64::INFINITY).is_err());
        assert!(non_negative_real("points", -0.5).is_err());
        assert!(non_negative_real("points", 0.0).is_ok());
    }

    #[test]
    fn index_errors_convert() {
        let err: SynergyError = IndexError::Row(9).into();
        assert_eq!(err.to_string(), "invalid index: row 9 is out of range (expected 1-7)");
    }
}
