//! Execution context - per-invocation view of one command dispatch

use std::sync::Arc;

use crate::application::errors::GatewayError;
use crate::domain::entities::{
    Channel, CommandRegistry, Guild, Message, OutgoingMessage, SendOptions, User,
};

use super::outbox::Outbox;

/// Context passed to a command handler
///
/// Built fresh for each invocation and owned exclusively by it; nothing in
/// here is shared mutable state between dispatches.
#[derive(Clone)]
pub struct Context {
    pub sender: User,
    pub channel: Channel,
    pub guild: Option<Guild>,
    pub message: Message,
    registry: Arc<CommandRegistry>,
    outbox: Outbox,
}

impl Context {
    pub(crate) fn new(message: Message, registry: Arc<CommandRegistry>, outbox: Outbox) -> Self {
        Self {
            sender: message.sender.clone(),
            channel: message.channel.clone(),
            guild: message.guild.clone(),
            message,
            registry,
            outbox,
        }
    }

    /// The read-only command registry, for commands that list commands
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Submit a message to the channel the triggering message arrived on.
    ///
    /// Fire-and-forget: success means the message was queued, not that it
    /// was delivered.
    pub fn send(
        &self,
        content: impl Into<String>,
        options: SendOptions,
    ) -> Result<(), GatewayError> {
        self.outbox
            .submit(OutgoingMessage::new(&self.channel.id, content).with_options(options))
    }

    /// Submit a plain reply
    pub fn reply(&self, content: impl Into<String>) -> Result<(), GatewayError> {
        self.send(content, SendOptions::default())
    }
}
