//! Error types for the template model

/// Errors raised while building or parsing template model values
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    /// An enum name did not match any known variant
    #[error("unknown {kind} '{value}'")]
    UnknownVariant {
        /// Enum being parsed
        kind: &'static str,
        /// Rejected input
        value: String,
    },

    /// An identifier string was not a valid ULID
    #[error("invalid {kind} id '{value}'")]
    InvalidId {
        /// Identifier kind
        kind: &'static str,
        /// Rejected input
        value: String,
    },

    /// A numeric amount was negative or not finite
    #[error("invalid amount for {field}: {value}")]
    InvalidAmount {
        /// Field being set
        field: &'static str,
        /// Rejected value
        value: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_error_display() {
        let err = ModelError::UnknownVariant {
            kind: "priority",
            value: "urgent".to_string(),
        };
        assert_eq!(err.to_string(), "unknown priority 'urgent'");

        let err = ModelError::InvalidAmount {
            field: "hourly rate",
            value: -1.0,
        };
        assert!(err.to_string().contains("hourly rate"));
    }
}
