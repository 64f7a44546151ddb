// src/error.rs
use std::fmt;

/// Custom error types for the error-bounds library
#[derive(Debug, Clone, PartialEq)]
pub enum BoundError {
    /// Invalid parameter values at construction
    InvalidParameter {
        parameter: String,
        value: f64,
        constraint: String,
    },

    /// Supplied array length does not match the configured horizon
    DimensionMismatch {
        array: String,
        expected: usize,
        actual: usize,
    },

    /// Computation requested before local-error data was loaded
    NotLoaded { operation: String },

    /// Partial-sum operator invoked with a negative upper index
    NegativeIndex { index: i64 },
}

impl fmt::Display for BoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundError::InvalidParameter {
                parameter,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid parameter '{}' = {}: {}",
                    parameter, value, constraint
                )
            }
            BoundError::DimensionMismatch {
                array,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Wrong dimension of '{}': expected length {}, got {}",
                    array, expected, actual
                )
            }
            BoundError::NotLoaded { operation } => {
                write!(
                    f,
                    "'{}' requires local-error data; call load_data first",
                    operation
                )
            }
            BoundError::NegativeIndex { index } => {
                write!(f, "Invalid sum upper index {}: must be non-negative", index)
            }
        }
    }
}

impl std::error::Error for BoundError {}

/// Result type alias for error-bounds operations
pub type BoundResult<T> = Result<T, BoundError>;

/// Validation utilities
pub mod validation {
    use super::{BoundError, BoundResult};

    /// Validate that a value is finite and not NaN
    pub fn validate_finite(name: &str, value: f64) -> BoundResult<()> {
        if !value.is_finite() {
            Err(BoundError::InvalidParameter {
                parameter: name.to_string(),
                value,
                constraint: "must be finite (not NaN or infinite)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate the contraction parameter alpha. alpha = 1 makes the
    /// derived factor 1/(1-alpha) a division by zero.
    pub fn validate_alpha(name: &str, alpha: f64) -> BoundResult<()> {
        validate_finite(name, alpha)?;
        if alpha == 1.0 {
            Err(BoundError::InvalidParameter {
                parameter: name.to_string(),
                value: alpha,
                constraint: "must differ from 1 (factor 1/(1-alpha) undefined)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate the integer lag m
    pub fn validate_lag(name: &str, m: usize) -> BoundResult<()> {
        if m < 1 {
            Err(BoundError::InvalidParameter {
                parameter: name.to_string(),
                value: m as f64,
                constraint: "must be a positive integer (>= 1)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate the discrete horizon n
    pub fn validate_horizon(name: &str, n: usize) -> BoundResult<()> {
        if n < 1 {
            Err(BoundError::InvalidParameter {
                parameter: name.to_string(),
                value: n as f64,
                constraint: "must be at least 1 step".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::validation::*;
    use super::*;

    #[test]
    fn test_validate_alpha() {
        assert!(validate_alpha("alpha", 0.75).is_ok());
        assert!(validate_alpha("alpha", 0.0).is_ok());
        assert!(validate_alpha("alpha", -0.5).is_ok());
        assert!(validate_alpha("alpha", 1.0).is_err());
        assert!(validate_alpha("alpha", f64::NAN).is_err());
    }

    #[test]
    fn test_validate_lag_and_horizon() {
        assert!(validate_lag("m", 1).is_ok());
        assert!(validate_lag("m", 6).is_ok());
        assert!(validate_lag("m", 0).is_err());
        assert!(validate_horizon("n", 1).is_ok());
        assert!(validate_horizon("n", 0).is_err());
    }

    #[test]
    fn test_validate_finite() {
        assert!(validate_finite("lambda_f", 1.0).is_ok());
        assert!(validate_finite("lambda_f", f64::NAN).is_err());
        assert!(validate_finite("delta_t", f64::INFINITY).is_err());
    }

    #[test]
    fn test_error_display() {
        let error = BoundError::DimensionMismatch {
            array: "epsilon".to_string(),
            expected: 10,
            actual: 11,
        };

        let display = format!("{}", error);
        assert!(display.contains("epsilon"));
        assert!(display.contains("10"));
        assert!(display.contains("11"));
    }

    #[test]
    fn test_negative_index_display() {
        let error = BoundError::NegativeIndex { index: -1 };
        let display = format!("{}", error);
        assert!(display.contains("-1"));
        assert!(display.contains("non-negative"));
    }
}
