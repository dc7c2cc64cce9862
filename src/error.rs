// src/error.rs
use std::fmt;

/// Error raised when contract parameters or simulation sizes are invalid.
///
/// Every failure in this crate is a validation failure: once inputs pass these
/// checks the pricing math has no runtime failure path.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Numeric parameter outside its allowed domain
    InvalidParameter {
        parameter: String,
        value: f64,
        constraint: String,
    },

    /// Simulation sizing or engine configuration rejected
    InvalidConfiguration { field: String, reason: String },

    /// Option type label that is neither call nor put
    UnknownOptionType { label: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidParameter {
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
            ValidationError::InvalidConfiguration { field, reason } => {
                write!(f, "Invalid configuration for '{}': {}", field, reason)
            }
            ValidationError::UnknownOptionType { label } => {
                write!(
                    f,
                    "Unknown option type '{}': must be 'call' or 'put'",
                    label
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Result type alias for european-mc operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validation utilities
pub mod validation {
    use super::{ValidationError, ValidationResult};

    /// Largest simulation count accepted by the engine
    pub const MAX_SIMULATIONS: usize = 1_000_000_000;

    /// Largest time-step count accepted by the engine
    pub const MAX_STEPS: usize = 100_000;

    /// Largest dense path matrix (in cells) the engine will allocate
    pub const MAX_PATH_CELLS: usize = 1 << 28;

    /// Validate that a parameter is finite and strictly positive
    pub fn validate_positive(name: &str, value: f64) -> ValidationResult<()> {
        validate_finite(name, value)?;
        if value <= 0.0 {
            Err(ValidationError::InvalidParameter {
                parameter: name.to_string(),
                value,
                constraint: "must be positive (> 0)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a value is finite and not NaN
    pub fn validate_finite(name: &str, value: f64) -> ValidationResult<()> {
        if !value.is_finite() {
            Err(ValidationError::InvalidParameter {
                parameter: name.to_string(),
                value,
                constraint: "must be finite (not NaN or infinite)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate simulation count
    pub fn validate_simulations(num_simulations: usize) -> ValidationResult<()> {
        if num_simulations == 0 {
            Err(ValidationError::InvalidConfiguration {
                field: "num_simulations".to_string(),
                reason: "must be greater than 0".to_string(),
            })
        } else if num_simulations > MAX_SIMULATIONS {
            Err(ValidationError::InvalidConfiguration {
                field: "num_simulations".to_string(),
                reason: "exceeds maximum allowed (1 billion)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate steps count
    pub fn validate_steps(steps: usize) -> ValidationResult<()> {
        if steps == 0 {
            Err(ValidationError::InvalidConfiguration {
                field: "num_steps".to_string(),
                reason: "must be greater than 0".to_string(),
            })
        } else if steps > MAX_STEPS {
            Err(ValidationError::InvalidConfiguration {
                field: "num_steps".to_string(),
                reason: "exceeds maximum allowed (100,000)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a dense `(num_simulations, num_steps + 1)` matrix is allocatable
    pub fn validate_path_matrix(num_simulations: usize, num_steps: usize) -> ValidationResult<()> {
        validate_simulations(num_simulations)?;
        validate_steps(num_steps)?;
        let cells = num_simulations.checked_mul(num_steps + 1);
        match cells {
            Some(c) if c <= MAX_PATH_CELLS => Ok(()),
            _ => Err(ValidationError::InvalidConfiguration {
                field: "num_simulations".to_string(),
                reason: format!(
                    "dense path matrix of {} x {} exceeds {} cells; use a path stream instead",
                    num_simulations,
                    num_steps + 1,
                    MAX_PATH_CELLS
                ),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::validation::*;
    use super::*;

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive("sigma", 0.2).is_ok());
        assert!(validate_positive("sigma", 0.0).is_err());
        assert!(validate_positive("sigma", -0.1).is_err());
        assert!(validate_positive("sigma", f64::NAN).is_err());
        assert!(validate_positive("sigma", f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_finite() {
        assert!(validate_finite("value", -1.0).is_ok());
        assert!(validate_finite("value", f64::NAN).is_err());
        assert!(validate_finite("value", f64::INFINITY).is_err());
        assert!(validate_finite("value", f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_validate_counts() {
        assert!(validate_simulations(1).is_ok());
        assert!(validate_simulations(0).is_err());
        assert!(validate_simulations(MAX_SIMULATIONS + 1).is_err());
        assert!(validate_steps(1).is_ok());
        assert!(validate_steps(0).is_err());
        assert!(validate_steps(MAX_STEPS + 1).is_err());
    }

    #[test]
    fn test_validate_path_matrix_cap() {
        assert!(validate_path_matrix(1_000, 100).is_ok());
        assert!(validate_path_matrix(10_000_000, 100).is_err());
    }

    #[test]
    fn test_error_display() {
        let error = ValidationError::InvalidParameter {
            parameter: "spot".to_string(),
            value: -1.0,
            constraint: "must be positive".to_string(),
        };

        let display = format!("{}", error);
        assert!(display.contains("spot"));
        assert!(display.contains("-1"));
        assert!(display.contains("positive"));

        let error = ValidationError::UnknownOptionType {
            label: "straddle".to_string(),
        };
        assert!(error.to_string().contains("straddle"));
    }
}
