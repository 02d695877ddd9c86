//! Message dispatcher - turns one raw message into at most one handler call

use std::sync::Arc;

use crate::domain::entities::{
    ChannelKind, CommandDescriptor, CommandRegistry, Message, OutgoingMessage, Scope, SendOptions,
};
use crate::domain::traits::PermissionResolver;

use super::context::Context;
use super::outbox::Outbox;
use super::parser::{MessageParser, ParseOutcome};

/// Why a message was turned away before its handler ran
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Prefix with no alias token after it; silent
    MissingAlias,
    /// Alias not in the registry; silent
    UnknownAlias,
    /// Channel kind does not match the command's scope; user-visible
    WrongScope,
    /// Sender lacks the command's required permission; user-visible
    MissingPermission,
}

/// Outcome of dispatching one message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Not a command, or sent by a bot; no effect at all
    Ignored,
    /// Stopped at a gate before the handler
    Rejected(Rejection),
    /// The handler ran (a handler fault is caught here and reported to the
    /// user, so it still completes the dispatch)
    Completed,
}

/// Routes incoming messages through tokenize, resolve, authorize, execute.
///
/// The dispatcher holds no per-message state; each call runs the pipeline
/// to completion independently, so concurrent dispatches never interfere.
pub struct Dispatcher {
    parser: MessageParser,
    registry: Arc<CommandRegistry>,
    permissions: Arc<dyn PermissionResolver>,
    outbox: Outbox,
    log_rejections: bool,
}

impl Dispatcher {
    pub fn new(
        prefix: impl Into<String>,
        registry: Arc<CommandRegistry>,
        permissions: Arc<dyn PermissionResolver>,
        outbox: Outbox,
    ) -> Self {
        Self {
            parser: MessageParser::new(prefix),
            registry,
            permissions,
            outbox,
            log_rejections: false,
        }
    }

    /// Log silent rejections at debug level (operator policy, default off)
    pub fn with_rejection_logging(mut self, enabled: bool) -> Self {
        self.log_rejections = enabled;
        self
    }

    pub fn prefix(&self) -> &str {
        self.parser.prefix()
    }

    /// Dispatch one incoming message.
    ///
    /// An authorized command is executed exactly once; everything else
    /// short-circuits at its gate. The handler is the last fallible step
    /// and its faults are converted to a generic error reply here, so this
    /// method never propagates a handler failure.
    pub async fn dispatch(&self, message: Message) -> Dispatch {
        if message.sender.is_bot {
            return Dispatch::Ignored;
        }

        let (alias, args) = match self.parser.parse(&message.content) {
            ParseOutcome::NotACommand => return Dispatch::Ignored,
            ParseOutcome::MissingAlias => {
                return self.reject_silently(Rejection::MissingAlias, &message);
            }
            ParseOutcome::Invocation { alias, args } => (alias, args),
        };

        let Some(descriptor) = self.registry.resolve(&alias) else {
            return self.reject_silently(Rejection::UnknownAlias, &message);
        };
        let descriptor = Arc::clone(descriptor);

        if !scope_allows(descriptor.scope, message.channel.kind) {
            self.reply_rejection(&message, scope_error(descriptor.scope));
            return Dispatch::Rejected(Rejection::WrongScope);
        }

        if let Some(permission) = descriptor.required_permission {
            // Fail closed: unknown permission data counts as denied.
            let granted = self
                .permissions
                .has_permission(&message.sender, &message.channel, permission)
                .unwrap_or(false);
            if !granted {
                self.reply_rejection(
                    &message,
                    format!(
                        "You need the `{}` permission to use this command.",
                        permission
                    ),
                );
                return Dispatch::Rejected(Rejection::MissingPermission);
            }
        }

        self.execute(&descriptor, message, &args).await
    }

    async fn execute(
        &self,
        descriptor: &CommandDescriptor,
        message: Message,
        args: &[String],
    ) -> Dispatch {
        let channel_id = message.channel.id.clone();
        let ctx = Context::new(message, Arc::clone(&self.registry), self.outbox.clone());

        if let Err(e) = descriptor.handler.execute(ctx, args).await {
            tracing::error!("Command '{}' failed: {}", descriptor.name(), e);
            self.submit_reply(
                &channel_id,
                "Something went wrong while running that command.",
            );
        }
        Dispatch::Completed
    }

    fn reject_silently(&self, rejection: Rejection, message: &Message) -> Dispatch {
        if self.log_rejections {
            tracing::debug!(
                "Rejected message {} from {}: {:?}",
                message.id,
                message.sender,
                rejection
            );
        }
        Dispatch::Rejected(rejection)
    }

    fn reply_rejection(&self, message: &Message, content: String) {
        if self.log_rejections {
            tracing::debug!("Rejected message {} from {}: {}", message.id, message.sender, content);
        }
        self.submit_reply(&message.channel.id, content);
    }

    fn submit_reply(&self, channel_id: &str, content: impl Into<String>) {
        let reply = OutgoingMessage::new(channel_id, content).with_options(SendOptions::default());
        if let Err(e) = self.outbox.submit(reply) {
            tracing::warn!("Failed to queue reply to channel {}: {}", channel_id, e);
        }
    }
}

fn scope_allows(scope: Scope, kind: ChannelKind) -> bool {
    match scope {
        Scope::Both => true,
        Scope::Text => kind == ChannelKind::Text,
        Scope::Voice => kind == ChannelKind::Voice,
    }
}

fn scope_error(scope: Scope) -> String {
    let kind = match scope {
        Scope::Text => "text",
        Scope::Voice => "voice",
        Scope::Both => "any",
    };
    format!("This command can only be used in {} channels.", kind)
}
