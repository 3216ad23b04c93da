//! Messaging adapters.
//!
//! Implementations of the `MessageTransport` port:
//! - `TwilioTransport` - WhatsApp delivery through Twilio's Messages API
//! - `MockTransport` - Recording transport for tests

mod mock_transport;
mod twilio_transport;

pub use mock_transport::{MockTransport, SentMessage};
pub use twilio_transport::{TwilioConfig, TwilioTransport};
