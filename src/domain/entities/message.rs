use super::{Channel, Guild, User};
use chrono::{DateTime, Utc};

/// Represents an incoming message event from the transport
#[derive(Debug, Clone)]
pub struct Message {
    pub id: String,
    pub content: String,
    pub sender: User,
    pub channel: Channel,
    pub guild: Option<Guild>,
    pub timestamp: DateTime<Utc>,
    pub raw: Option<serde_json::Value>,
}

impl Message {
    pub fn new(content: impl Into<String>, sender: User, channel: Channel) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            content: content.into(),
            sender,
            channel,
            guild: None,
            timestamp: Utc::now(),
            raw: None,
        }
    }

    pub fn with_guild(mut self, guild: Guild) -> Self {
        self.guild = Some(guild);
        self
    }

    pub fn with_raw(mut self, raw: serde_json::Value) -> Self {
        self.raw = Some(raw);
        self
    }
}

/// Per-message delivery options
///
/// The tts flag asks the receiving client to render the message via
/// speech synthesis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SendOptions {
    pub tts: bool,
}

impl SendOptions {
    pub fn tts() -> Self {
        Self { tts: true }
    }
}

/// An outbound message queued for delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub channel_id: String,
    pub content: String,
    pub tts: bool,
}

impl OutgoingMessage {
    pub fn new(channel_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            channel_id: channel_id.into(),
            content: content.into(),
            tts: false,
        }
    }

    pub fn with_options(mut self, options: SendOptions) -> Self {
        self.tts = options.tts;
        self
    }
}
