use thiserror::Error;

/// Core error types for typeforge definitions
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid type name: {0}")]
    InvalidTypeName(String),

    #[error("Duplicate field {field} on type {type_name}")]
    DuplicateField { type_name: String, field: String },

    #[error("Unknown native type: {0}")]
    UnknownNativeType(String),
}

impl CoreError {
    /// Create a new InvalidTypeName error
    pub fn invalid_type_name(name: impl Into<String>) -> Self {
        Self::InvalidTypeName(name.into())
    }

    /// Create a new DuplicateField error
    pub fn duplicate_field(type_name: impl Into<String>, field: impl Into<String>) -> Self {
        Self::DuplicateField {
            type_name: type_name.into(),
            field: field.into(),
        }
    }

    /// Create a new UnknownNativeType error
    pub fn unknown_native_type(ty: impl Into<String>) -> Self {
        Self::UnknownNativeType(ty.into())
    }

    /// Get error category for logging/monitoring
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidTypeName(_) => ErrorCategory::Validation,
            Self::DuplicateField { .. } => ErrorCategory::Conflict,
            Self::UnknownNativeType(_) => ErrorCategory::NotFound,
        }
    }
}

/// Error categories for monitoring and classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Conflict,
    NotFound,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation => write!(f, "validation"),
            Self::Conflict => write!(f, "conflict"),
            Self::NotFound => write!(f, "not_found"),
        }
    }
}

/// Convenience result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = CoreError::invalid_type_name("bad-name");
        assert_eq!(err.to_string(), "Invalid type name: bad-name");
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn test_duplicate_field_error() {
        let err = CoreError::duplicate_field("Person", "name");
        assert_eq!(err.to_string(), "Duplicate field name on type Person");
        assert_eq!(err.category(), ErrorCategory::Conflict);
    }

    #[test]
    fn test_unknown_native_type_error() {
        let err = CoreError::unknown_native_type("Person");
        assert_eq!(err.to_string(), "Unknown native type: Person");
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }

    #[test]
    fn test_error_categories_display() {
        assert_eq!(ErrorCategory::Validation.to_string(), "validation");
        assert_eq!(ErrorCategory::Conflict.to_string(), "conflict");
        assert_eq!(ErrorCategory::NotFound.to_string(), "not_found");
    }
}
