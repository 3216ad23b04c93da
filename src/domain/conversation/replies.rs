//! Fixed replies sent to senders outside the AI flow.

use crate::domain::registration::MalformedRegistration;

/// Sent after a profile has been stored.
pub const REGISTRATION_SUCCESS: &str =
    "Registration successful! You can now ask me anything about your farm.";

/// Sent when the profile could not be stored.
pub const REGISTRATION_FAILED: &str =
    "Sorry, we could not complete your registration right now. Please try again later.";

/// Sent to unregistered senders that did not ask to register.
pub const NOT_REGISTERED: &str = "You are not registered yet. To register, send a message in this format:\n\
register, <your name>, <farm location>, <crop>:<acres>;<crop>:<acres>\n\
Example: register, John Doe, Valley Farms, Corn:50;Wheat:30";

/// Reply for a registration command that failed to parse.
pub fn malformed_registration(error: &MalformedRegistration) -> String {
    format!("Invalid registration: {}.\n{}", error, error.hint())
}
