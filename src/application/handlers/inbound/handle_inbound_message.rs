//! HandleInboundMessage command handler.
//!
//! Runs one turn of the WhatsApp conversation: identifies the sender, routes
//! unregistered senders to the registration flow and registered ones to the
//! AI backend, logs the answered exchange and delivers the reply.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::conversation::{replies, NewConversation, SenderState};
use crate::domain::foundation::{ConversationId, PersistenceError, PhoneNumber, UserId};
use crate::domain::profile::{NewProfile, Profile};
use crate::domain::prompt::build_system_prompt;
use crate::domain::registration::{parse_registration, MalformedRegistration};
use crate::ports::{
    AIError, AIProvider, CompletionRequest, ConversationLog, MessageRole, MessageTransport,
    ProfileStore, TransportError,
};

/// Command carrying one inbound webhook message.
#[derive(Debug, Clone)]
pub struct InboundMessageCommand {
    /// Message text.
    pub body: String,
    /// Sender address as sent by the provider (`whatsapp:+15551234567`).
    pub from: String,
}

impl InboundMessageCommand {
    pub fn new(body: impl Into<String>, from: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            from: from.into(),
        }
    }
}

/// Why the AI backend produced no usable reply.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AIBackendFailure {
    #[error("AI provider error: {0}")]
    Provider(#[from] AIError),

    #[error("AI provider returned an empty response")]
    EmptyResponse,
}

/// What happened to one inbound message.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    /// The `From` field is not a phone number.
    InvalidSender,
    /// The profile store could not be read.
    LookupFailed(PersistenceError),
    /// Unregistered sender without a registration command.
    NotRegistered,
    /// A profile was created.
    Registered { user_id: UserId },
    /// The registration command did not follow the grammar.
    RegistrationRejected(MalformedRegistration),
    /// The registration command was valid but could not be stored.
    RegistrationFailed(PersistenceError),
    /// The AI backend failed; nothing was logged or sent.
    Dropped(AIBackendFailure),
    /// The AI reply was handed to the transport.
    Delivered {
        /// `None` when the conversation log write failed.
        conversation_id: Option<ConversationId>,
        message_sid: String,
    },
    /// The AI reply could not be delivered.
    DeliveryFailed {
        conversation_id: Option<ConversationId>,
        error: TransportError,
    },
}

impl TurnOutcome {
    /// Text returned in the webhook response.
    ///
    /// AI replies travel through the transport, so answered turns return an
    /// empty body.
    pub fn webhook_body(&self) -> String {
        match self {
            TurnOutcome::NotRegistered => replies::NOT_REGISTERED.to_string(),
            TurnOutcome::Registered { .. } => replies::REGISTRATION_SUCCESS.to_string(),
            TurnOutcome::RegistrationRejected(err) => replies::malformed_registration(err),
            TurnOutcome::RegistrationFailed(_) => replies::REGISTRATION_FAILED.to_string(),
            TurnOutcome::InvalidSender
            | TurnOutcome::LookupFailed(_)
            | TurnOutcome::Dropped(_)
            | TurnOutcome::Delivered { .. }
            | TurnOutcome::DeliveryFailed { .. } => String::new(),
        }
    }
}

/// Handler for inbound messages.
pub struct HandleInboundMessageHandler {
    profiles: Arc<dyn ProfileStore>,
    conversations: Arc<dyn ConversationLog>,
    ai_provider: Arc<dyn AIProvider>,
    transport: Arc<dyn MessageTransport>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl HandleInboundMessageHandler {
    pub fn new(
        profiles: Arc<dyn ProfileStore>,
        conversations: Arc<dyn ConversationLog>,
        ai_provider: Arc<dyn AIProvider>,
        transport: Arc<dyn MessageTransport>,
    ) -> Self {
        Self {
            profiles,
            conversations,
            ai_provider,
            transport,
            temperature: None,
            max_tokens: None,
        }
    }

    /// Sets the sampling temperature sent with every completion.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Caps the length of every completion.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Handles one inbound message. Never fails: every failure is folded into
    /// the returned outcome.
    pub async fn handle(&self, cmd: InboundMessageCommand) -> TurnOutcome {
        let phone = match PhoneNumber::parse(&cmd.from) {
            Ok(phone) => phone,
            Err(e) => {
                tracing::warn!(from = %cmd.from, error = %e, "Dropping message from invalid sender");
                return TurnOutcome::InvalidSender;
            }
        };

        let profile = match self.lookup(&phone).await {
            Ok(profile) => profile,
            Err(e) => {
                tracing::error!(phone = %phone, error = %e, "Profile lookup failed");
                return TurnOutcome::LookupFailed(e);
            }
        };

        let state = SenderState::derive(profile, &cmd.body);
        tracing::debug!(phone = %phone, state = state.name(), "Routing inbound message");

        match state {
            SenderState::UnknownSender => TurnOutcome::NotRegistered,
            SenderState::Registering => self.register(phone, &cmd.body).await,
            SenderState::KnownSender(profile) => self.answer(&profile, &cmd).await,
        }
    }

    async fn lookup(&self, phone: &PhoneNumber) -> Result<Option<Profile>, PersistenceError> {
        match self.profiles.find_user_by_phone(phone).await? {
            Some(user) => self.profiles.load_profile(&user).await.map(Some),
            None => Ok(None),
        }
    }

    async fn register(&self, phone: PhoneNumber, body: &str) -> TurnOutcome {
        let registration = match parse_registration(body) {
            Ok(registration) => registration,
            Err(e) => {
                tracing::info!(phone = %phone, error = %e, "Rejected malformed registration");
                return TurnOutcome::RegistrationRejected(e);
            }
        };

        let new_profile = NewProfile::from_registration(phone, registration);
        match self.profiles.create_profile(&new_profile).await {
            Ok(profile) => {
                tracing::info!(
                    user_id = %profile.user.id,
                    crops = profile.crops.len(),
                    "Registered new farmer"
                );
                TurnOutcome::Registered {
                    user_id: profile.user.id,
                }
            }
            Err(e) => {
                tracing::error!(phone = %new_profile.phone_number, error = %e, "Registration failed");
                TurnOutcome::RegistrationFailed(e)
            }
        }
    }

    async fn answer(&self, profile: &Profile, cmd: &InboundMessageCommand) -> TurnOutcome {
        let reply = match self.complete(profile, &cmd.body).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(user_id = %profile.user.id, error = %e, "AI backend failed");
                return TurnOutcome::Dropped(e);
            }
        };

        let entry = NewConversation::new(&cmd.from, &cmd.body, &reply);
        let conversation_id = match self.conversations.record(&entry).await {
            Ok(record) => Some(record.id),
            Err(e) => {
                tracing::error!(user_id = %profile.user.id, error = %e, "Failed to log conversation");
                None
            }
        };

        match self.transport.send(&cmd.from, &reply).await {
            Ok(message_sid) => {
                tracing::info!(
                    user_id = %profile.user.id,
                    message_sid = %message_sid,
                    "Reply delivered"
                );
                TurnOutcome::Delivered {
                    conversation_id,
                    message_sid,
                }
            }
            Err(error) => {
                tracing::error!(user_id = %profile.user.id, error = %error, "Reply delivery failed");
                TurnOutcome::DeliveryFailed {
                    conversation_id,
                    error,
                }
            }
        }
    }

    async fn complete(&self, profile: &Profile, body: &str) -> Result<String, AIBackendFailure> {
        let mut request = CompletionRequest::new()
            .with_system_prompt(build_system_prompt(profile))
            .with_message(MessageRole::User, body);
        if let Some(temperature) = self.temperature {
            request = request.with_temperature(temperature);
        }
        if let Some(max_tokens) = self.max_tokens {
            request = request.with_max_tokens(max_tokens);
        }

        let response = self.ai_provider.complete(request).await?;
        if response.content.trim().is_empty() {
            return Err(AIBackendFailure::EmptyResponse);
        }
        Ok(response.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;
    use crate::adapters::memory::{InMemoryConversationLog, InMemoryProfileStore};
    use crate::adapters::messaging::{MockTransport, SentMessage};
    use crate::domain::profile::CropEntry;

    const FROM: &str = "whatsapp:+15551234567";

    struct Fixture {
        profiles: Arc<InMemoryProfileStore>,
        conversations: Arc<InMemoryConversationLog>,
        ai: Arc<MockAIProvider>,
        transport: Arc<MockTransport>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                profiles: Arc::new(InMemoryProfileStore::new()),
                conversations: Arc::new(InMemoryConversationLog::new()),
                ai: Arc::new(MockAIProvider::new()),
                transport: Arc::new(MockTransport::new()),
            }
        }

        fn with_profiles(mut self, profiles: InMemoryProfileStore) -> Self {
            self.profiles = Arc::new(profiles);
            self
        }

        fn with_conversations(mut self, log: InMemoryConversationLog) -> Self {
            self.conversations = Arc::new(log);
            self
        }

        fn with_ai(mut self, ai: MockAIProvider) -> Self {
            self.ai = Arc::new(ai);
            self
        }

        fn with_transport(mut self, transport: MockTransport) -> Self {
            self.transport = Arc::new(transport);
            self
        }

        fn handler(&self) -> HandleInboundMessageHandler {
            HandleInboundMessageHandler::new(
                self.profiles.clone(),
                self.conversations.clone(),
                self.ai.clone(),
                self.transport.clone(),
            )
        }

        async fn register_john(&self) {
            let profile = NewProfile {
                phone_number: PhoneNumber::parse(FROM).unwrap(),
                name: "John Doe".to_string(),
                location: "Valley Farms".to_string(),
                crops: vec![CropEntry::new("Corn", 50.0), CropEntry::new("Wheat", 30.0)],
            };
            self.profiles.create_profile(&profile).await.unwrap();
        }
    }

    #[tokio::test]
    async fn unregistered_sender_gets_instructions() {
        let fx = Fixture::new();

        let outcome = fx
            .handler()
            .handle(InboundMessageCommand::new("hello", FROM))
            .await;

        assert_eq!(outcome, TurnOutcome::NotRegistered);
        assert_eq!(outcome.webhook_body(), replies::NOT_REGISTERED);
        assert_eq!(fx.ai.call_count(), 0);
        assert!(fx.conversations.is_empty());
        assert_eq!(fx.transport.send_count(), 0);
    }

    #[tokio::test]
    async fn valid_registration_creates_profile() {
        let fx = Fixture::new();

        let outcome = fx
            .handler()
            .handle(InboundMessageCommand::new(
                "register, John Doe, Valley Farms, Corn:50;Wheat:30",
                FROM,
            ))
            .await;

        assert!(matches!(outcome, TurnOutcome::Registered { .. }));
        assert_eq!(outcome.webhook_body(), replies::REGISTRATION_SUCCESS);
        assert_eq!(fx.profiles.user_count(), 1);
        assert_eq!(fx.profiles.crop_count(), 2);
        assert_eq!(fx.ai.call_count(), 0);
        assert!(fx.conversations.is_empty());
    }

    #[tokio::test]
    async fn malformed_registration_returns_hint_and_stores_nothing() {
        let fx = Fixture::new();

        let outcome = fx
            .handler()
            .handle(InboundMessageCommand::new("register, OnlyName", FROM))
            .await;

        assert!(matches!(outcome, TurnOutcome::RegistrationRejected(_)));
        assert!(outcome.webhook_body().starts_with("Invalid registration:"));
        assert!(outcome.webhook_body().contains("Example: register, John Doe"));
        assert_eq!(fx.profiles.user_count(), 0);
    }

    #[tokio::test]
    async fn storage_failure_during_registration_rolls_back() {
        let fx = Fixture::new().with_profiles(InMemoryProfileStore::new().fail_on_crop_insert(2));

        let outcome = fx
            .handler()
            .handle(InboundMessageCommand::new(
                "register, John Doe, Valley Farms, Corn:50;Wheat:30",
                FROM,
            ))
            .await;

        assert!(matches!(outcome, TurnOutcome::RegistrationFailed(_)));
        assert_eq!(outcome.webhook_body(), replies::REGISTRATION_FAILED);
        assert_eq!(fx.profiles.user_count(), 0);
        assert_eq!(fx.profiles.farm_count(), 0);
        assert_eq!(fx.profiles.crop_count(), 0);
    }

    #[tokio::test]
    async fn known_sender_is_answered_logged_and_delivered() {
        let fx = Fixture::new().with_ai(MockAIProvider::new().with_response("Water the corn daily."));
        fx.register_john().await;

        let outcome = fx
            .handler()
            .handle(InboundMessageCommand::new("When do I water?", FROM))
            .await;

        assert!(matches!(
            outcome,
            TurnOutcome::Delivered { conversation_id: Some(_), .. }
        ));
        assert_eq!(outcome.webhook_body(), "");

        let calls = fx.ai.get_calls();
        assert_eq!(calls.len(), 1);
        let system = calls[0].system_prompt.as_deref().unwrap();
        assert!(system.contains("John Doe"));
        assert!(system.contains("- Corn: 50 acres"));
        assert_eq!(calls[0].messages[0].content, "When do I water?");

        let records = fx.conversations.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].sender, FROM);
        assert_eq!(records[0].message, "When do I water?");
        assert_eq!(records[0].response, "Water the corn daily.");

        assert_eq!(
            fx.transport.sent(),
            vec![SentMessage {
                to: FROM.to_string(),
                body: "Water the corn daily.".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn known_sender_sending_register_is_still_answered() {
        let fx = Fixture::new();
        fx.register_john().await;

        let outcome = fx
            .handler()
            .handle(InboundMessageCommand::new("register, Jane, Hill, Rice:5", FROM))
            .await;

        assert!(matches!(outcome, TurnOutcome::Delivered { .. }));
        assert_eq!(fx.profiles.user_count(), 1);
        assert_eq!(fx.ai.call_count(), 1);
    }

    #[tokio::test]
    async fn empty_ai_response_drops_turn() {
        let fx = Fixture::new().with_ai(MockAIProvider::new().with_response("   \n"));
        fx.register_john().await;

        let outcome = fx
            .handler()
            .handle(InboundMessageCommand::new("hi", FROM))
            .await;

        assert_eq!(outcome, TurnOutcome::Dropped(AIBackendFailure::EmptyResponse));
        assert_eq!(outcome.webhook_body(), "");
        assert!(fx.conversations.is_empty());
        assert_eq!(fx.transport.send_count(), 0);
    }

    #[tokio::test]
    async fn ai_error_drops_turn() {
        let fx = Fixture::new().with_ai(MockAIProvider::new().with_error(AIError::RateLimited));
        fx.register_john().await;

        let outcome = fx
            .handler()
            .handle(InboundMessageCommand::new("hi", FROM))
            .await;

        assert_eq!(
            outcome,
            TurnOutcome::Dropped(AIBackendFailure::Provider(AIError::RateLimited))
        );
        assert_eq!(fx.ai.call_count(), 1);
        assert!(fx.conversations.is_empty());
        assert_eq!(fx.transport.send_count(), 0);
    }

    #[tokio::test]
    async fn log_failure_still_delivers() {
        let fx = Fixture::new().with_conversations(InMemoryConversationLog::failing());
        fx.register_john().await;

        let outcome = fx
            .handler()
            .handle(InboundMessageCommand::new("hi", FROM))
            .await;

        assert!(matches!(
            outcome,
            TurnOutcome::Delivered { conversation_id: None, .. }
        ));
        assert_eq!(fx.transport.send_count(), 1);
    }

    #[tokio::test]
    async fn delivery_failure_is_reported() {
        let fx = Fixture::new()
            .with_transport(MockTransport::failing(TransportError::network("down")));
        fx.register_john().await;

        let outcome = fx
            .handler()
            .handle(InboundMessageCommand::new("hi", FROM))
            .await;

        match &outcome {
            TurnOutcome::DeliveryFailed { conversation_id, error } => {
                assert!(conversation_id.is_some());
                assert_eq!(error, &TransportError::network("down"));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(outcome.webhook_body(), "");
        assert_eq!(fx.conversations.len(), 1);
    }

    #[tokio::test]
    async fn invalid_sender_is_dropped() {
        let fx = Fixture::new();

        let outcome = fx
            .handler()
            .handle(InboundMessageCommand::new("register, A, B, C:1", "whatsapp:nobody"))
            .await;

        assert_eq!(outcome, TurnOutcome::InvalidSender);
        assert_eq!(outcome.webhook_body(), "");
        assert_eq!(fx.profiles.user_count(), 0);
    }

    #[tokio::test]
    async fn lookup_failure_is_dropped() {
        let fx = Fixture::new().with_profiles(InMemoryProfileStore::new().fail_lookups());

        let outcome = fx
            .handler()
            .handle(InboundMessageCommand::new("hi", FROM))
            .await;

        assert!(matches!(outcome, TurnOutcome::LookupFailed(_)));
        assert_eq!(outcome.webhook_body(), "");
        assert_eq!(fx.ai.call_count(), 0);
    }

    #[tokio::test]
    async fn incomplete_profile_is_treated_as_lookup_failure() {
        let fx = Fixture::new();
        let user = fx
            .profiles
            .insert_user_without_farm(PhoneNumber::parse(FROM).unwrap(), "Jane");

        let outcome = fx
            .handler()
            .handle(InboundMessageCommand::new("hi", FROM))
            .await;

        assert_eq!(
            outcome,
            TurnOutcome::LookupFailed(PersistenceError::IncompleteProfile(user.id))
        );
    }

    #[tokio::test]
    async fn completion_settings_are_forwarded() {
        let fx = Fixture::new();
        fx.register_john().await;

        fx.handler()
            .with_temperature(0.2)
            .with_max_tokens(300)
            .handle(InboundMessageCommand::new("hi", FROM))
            .await;

        let calls = fx.ai.get_calls();
        assert_eq!(calls[0].temperature, Some(0.2));
        assert_eq!(calls[0].max_tokens, Some(300));
    }
}
