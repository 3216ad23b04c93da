//! Per-message routing state.
//!
//! Nothing is kept between requests: the state is derived again for every
//! inbound message from whether the sender has a stored profile and what the
//! message says.

use crate::domain::profile::Profile;
use crate::domain::registration::is_registration_request;

/// Where an inbound message is routed.
#[derive(Debug, Clone, PartialEq)]
pub enum SenderState {
    /// No profile and no registration keyword: reply with instructions.
    UnknownSender,
    /// No profile and the message asks to register.
    Registering,
    /// The sender has a profile: answer with the AI backend.
    KnownSender(Box<Profile>),
}

impl SenderState {
    /// Derives the state from the profile lookup and the message body.
    pub fn derive(profile: Option<Profile>, body: &str) -> Self {
        match profile {
            Some(profile) => SenderState::KnownSender(Box::new(profile)),
            None if is_registration_request(body) => SenderState::Registering,
            None => SenderState::UnknownSender,
        }
    }

    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            SenderState::UnknownSender => "unknown_sender",
            SenderState::Registering => "registering",
            SenderState::KnownSender(_) => "known_sender",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{FarmId, PhoneNumber, UserId};
    use crate::domain::profile::{Farm, User};

    fn profile() -> Profile {
        Profile {
            user: User {
                id: UserId::from_i64(1),
                phone_number: PhoneNumber::parse("+15551234567").unwrap(),
                name: "John Doe".to_string(),
            },
            farm: Farm {
                id: FarmId::from_i64(1),
                owner_id: UserId::from_i64(1),
                location: "Valley Farms".to_string(),
            },
            crops: vec![],
        }
    }

    #[test]
    fn unknown_sender_without_keyword() {
        let state = SenderState::derive(None, "what should I plant?");
        assert_eq!(state, SenderState::UnknownSender);
        assert_eq!(state.name(), "unknown_sender");
    }

    #[test]
    fn unknown_sender_with_keyword_is_registering() {
        let state = SenderState::derive(None, "Register, John, Valley, Corn:5");
        assert_eq!(state, SenderState::Registering);
    }

    #[test]
    fn known_sender_wins_even_with_keyword() {
        let state = SenderState::derive(Some(profile()), "register, again, x, Corn:1");
        assert!(matches!(state, SenderState::KnownSender(p) if p.user.name == "John Doe"));
    }
}
