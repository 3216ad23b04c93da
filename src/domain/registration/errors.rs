//! Registration parse failures.

use thiserror::Error;

/// Expected shape of a registration command, sent back to the user.
pub const REGISTRATION_FORMAT_HINT: &str = "Please use the format:\n\
register, <your name>, <farm location>, <crop>:<acres>;<crop>:<acres>\n\
Example: register, John Doe, Valley Farms, Corn:50;Wheat:30";

/// A registration command that does not match the grammar.
///
/// Every variant carries enough context to tell the user what went wrong;
/// [`MalformedRegistration::hint`] gives the expected format.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MalformedRegistration {
    #[error("expected 4 comma-separated fields, found {found}")]
    FieldCount { found: usize },

    #[error("command must start with 'register', found '{found}'")]
    MissingKeyword { found: String },

    #[error("{field} cannot be empty")]
    EmptyField { field: &'static str },

    #[error("crop entry '{entry}' must be <crop>:<acres>")]
    MalformedCropEntry { entry: String },

    #[error("crop '{crop}' has an invalid size '{value}', expected a positive number")]
    InvalidCropSize { crop: String, value: String },
}

impl MalformedRegistration {
    pub fn field_count(found: usize) -> Self {
        MalformedRegistration::FieldCount { found }
    }

    pub fn missing_keyword(found: impl Into<String>) -> Self {
        MalformedRegistration::MissingKeyword {
            found: found.into(),
        }
    }

    pub fn empty_field(field: &'static str) -> Self {
        MalformedRegistration::EmptyField { field }
    }

    pub fn malformed_crop_entry(entry: impl Into<String>) -> Self {
        MalformedRegistration::MalformedCropEntry {
            entry: entry.into(),
        }
    }

    pub fn invalid_crop_size(crop: impl Into<String>, value: impl Into<String>) -> Self {
        MalformedRegistration::InvalidCropSize {
            crop: crop.into(),
            value: value.into(),
        }
    }

    /// Human-readable description of the expected command format.
    pub fn hint(&self) -> &'static str {
        REGISTRATION_FORMAT_HINT
    }
}
