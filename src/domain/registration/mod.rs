//! Registration module - turns a free-text command into a validated profile.

mod errors;
mod parser;

pub use errors::{MalformedRegistration, REGISTRATION_FORMAT_HINT};
pub use parser::{is_registration_request, parse_registration, REGISTRATION_KEYWORD};
