//! Error types for the domain layer.

use thiserror::Error;

use super::UserId;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Storage failure raised by the profile store or the conversation log.
///
/// Any write that returns this error has been rolled back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    /// The backing store rejected or failed the operation.
    #[error("database error: {0}")]
    Database(String),

    /// A stored row could not be mapped back into a domain value.
    #[error("failed to decode stored row: {0}")]
    Decode(String),

    /// A user exists without its farm.
    #[error("profile for user {0} is incomplete")]
    IncompleteProfile(UserId),
}

impl PersistenceError {
    /// Creates a database error.
    pub fn database(message: impl Into<String>) -> Self {
        PersistenceError::Database(message.into())
    }

    /// Creates a decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        PersistenceError::Decode(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("phone_number");
        assert_eq!(format!("{}", err), "Field 'phone_number' cannot be empty");
    }

    #[test]
    fn validation_error_invalid_format_displays_correctly() {
        let err = ValidationError::invalid_format("phone_number", "too short");
        assert_eq!(
            format!("{}", err),
            "Field 'phone_number' has invalid format: too short"
        );
    }

    #[test]
    fn persistence_error_displays_message() {
        let err = PersistenceError::database("connection reset");
        assert_eq!(err.to_string(), "database error: connection reset");

        let err = PersistenceError::IncompleteProfile(UserId::from_i64(9));
        assert_eq!(err.to_string(), "profile for user 9 is incomplete");
    }
}
