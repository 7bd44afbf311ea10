use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AffordabilityError {
    #[error("invalid input: {field} {reason}")]
    InvalidInput {
        field: &'static str,
        reason: String,
    },

    #[error("{field} out of range: {value} not within {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: Decimal,
        min: Decimal,
        max: Decimal,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AffordabilityError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        AffordabilityError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// true for errors caused by the caller's numbers rather than setup or transport
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            AffordabilityError::InvalidInput { .. } | AffordabilityError::OutOfRange { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, AffordabilityError>;
