//! Unit tests for the dispatch pipeline

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::application::errors::CommandError;
use crate::domain::entities::{
    Category, Channel, ChannelKind, CommandDescriptor, CommandHandler, CommandRegistry, Message,
    OutgoingMessage, Permission, Scope, User,
};
use crate::domain::traits::PermissionResolver;

use super::{Context, Dispatch, Dispatcher, MessageParser, Outbox, ParseOutcome, Rejection};

/// Handler that records every invocation's arguments
struct RecordingHandler {
    calls: Arc<Mutex<Vec<Vec<String>>>>,
}

impl RecordingHandler {
    fn new() -> (Self, Arc<Mutex<Vec<Vec<String>>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                calls: Arc::clone(&calls),
            },
            calls,
        )
    }
}

#[async_trait]
impl CommandHandler for RecordingHandler {
    async fn execute(&self, _ctx: Context, args: &[String]) -> Result<(), CommandError> {
        self.calls.lock().unwrap().push(args.to_vec());
        Ok(())
    }
}

/// Handler that always faults
struct FaultyHandler;

#[async_trait]
impl CommandHandler for FaultyHandler {
    async fn execute(&self, _ctx: Context, _args: &[String]) -> Result<(), CommandError> {
        Err(CommandError::ExecutionFailed("boom".to_string()))
    }
}

/// Grants exactly the listed permissions to every user
struct Grants(HashSet<Permission>);

impl Grants {
    fn all() -> Self {
        Self(
            [
                Permission::SendTtsMessages,
                Permission::ManageMessages,
                Permission::KickMembers,
                Permission::BanMembers,
                Permission::Administrator,
            ]
            .into_iter()
            .collect(),
        )
    }

    fn none() -> Self {
        Self(HashSet::new())
    }
}

impl PermissionResolver for Grants {
    fn has_permission(
        &self,
        _user: &User,
        _channel: &Channel,
        permission: Permission,
    ) -> Option<bool> {
        Some(self.0.contains(&permission))
    }
}

/// Resolver with no permission data at all
struct NoData;

impl PermissionResolver for NoData {
    fn has_permission(
        &self,
        _user: &User,
        _channel: &Channel,
        _permission: Permission,
    ) -> Option<bool> {
        None
    }
}

fn tts_like_descriptor(handler: Arc<dyn CommandHandler>) -> CommandDescriptor {
    CommandDescriptor::new("tts", handler)
        .with_usage("(string)")
        .with_description("Text to speech fun.")
        .with_category(Category::Fun)
        .with_scope(Scope::Text)
        .with_permission(Permission::SendTtsMessages)
}

fn dispatcher_with(
    descriptor: CommandDescriptor,
    permissions: Arc<dyn PermissionResolver>,
) -> (Dispatcher, UnboundedReceiver<OutgoingMessage>) {
    let mut registry = CommandRegistry::new();
    registry.register(descriptor).unwrap();
    let (outbox, rx) = Outbox::channel();
    (
        Dispatcher::new("!", Arc::new(registry), permissions, outbox),
        rx,
    )
}

fn text_message(content: &str) -> Message {
    Message::new(
        content,
        User::new("u1").with_username("alice"),
        Channel::new("c1", ChannelKind::Text),
    )
}

fn voice_message(content: &str) -> Message {
    Message::new(
        content,
        User::new("u1").with_username("alice"),
        Channel::new("v1", ChannelKind::Voice),
    )
}

fn drain(rx: &mut UnboundedReceiver<OutgoingMessage>) -> Vec<OutgoingMessage> {
    let mut out = Vec::new();
    while let Ok(msg) = rx.try_recv() {
        out.push(msg);
    }
    out
}

#[test]
fn parser_ignores_unprefixed_text() {
    let parser = MessageParser::new("!");
    assert_eq!(parser.parse("hello there"), ParseOutcome::NotACommand);
}

#[test]
fn parser_rejects_bare_prefix() {
    let parser = MessageParser::new("!");
    assert_eq!(parser.parse("!"), ParseOutcome::MissingAlias);
    assert_eq!(parser.parse("!   "), ParseOutcome::MissingAlias);
}

#[test]
fn parser_tokenizes_alias_and_args() {
    let parser = MessageParser::new("!");
    let outcome = parser.parse("!tts hello  there");
    assert_eq!(
        outcome,
        ParseOutcome::Invocation {
            alias: "tts".to_string(),
            args: vec!["hello".to_string(), "there".to_string()],
        }
    );
    // Re-parsing the same text yields the same outcome
    assert_eq!(parser.parse("!tts hello  there"), outcome);
}

#[test]
fn registry_resolves_aliases_case_insensitively() {
    let mut registry = CommandRegistry::new();
    let (handler, _) = RecordingHandler::new();
    registry
        .register(CommandDescriptor::new("ping", Arc::new(handler)).with_alias("PONG"))
        .unwrap();

    assert!(registry.resolve("PING").is_some());
    assert!(registry.resolve("pong").is_some());
    assert!(registry.resolve("nope").is_none());
    assert_eq!(registry.len(), 1);
}

#[test]
fn registry_rejects_duplicate_alias_and_stays_unchanged() {
    let mut registry = CommandRegistry::new();
    let (first, _) = RecordingHandler::new();
    registry
        .register(CommandDescriptor::new("a", Arc::new(first)).with_alias("b"))
        .unwrap();

    let (second, _) = RecordingHandler::new();
    let err = registry
        .register(CommandDescriptor::new("c", Arc::new(second)).with_alias("B"))
        .unwrap_err();
    assert_eq!(
        err,
        crate::application::errors::RegistryError::DuplicateAlias("b".to_string())
    );

    // The failed registration left nothing behind
    assert!(registry.resolve("c").is_none());
    assert_eq!(registry.len(), 1);
}

#[test]
fn registry_rejects_empty_alias() {
    let mut registry = CommandRegistry::new();
    let (handler, _) = RecordingHandler::new();
    let err = registry
        .register(CommandDescriptor::new("", Arc::new(handler)))
        .unwrap_err();
    assert_eq!(err, crate::application::errors::RegistryError::EmptyAlias);
    assert!(registry.is_empty());
}

#[tokio::test]
async fn unprefixed_message_is_ignored_without_sends() {
    let (handler, calls) = RecordingHandler::new();
    let (dispatcher, mut rx) =
        dispatcher_with(tts_like_descriptor(Arc::new(handler)), Arc::new(Grants::all()));

    let outcome = dispatcher.dispatch(text_message("hello there")).await;

    assert_eq!(outcome, Dispatch::Ignored);
    assert!(drain(&mut rx).is_empty());
    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_alias_is_rejected_silently() {
    let (handler, calls) = RecordingHandler::new();
    let (dispatcher, mut rx) =
        dispatcher_with(tts_like_descriptor(Arc::new(handler)), Arc::new(Grants::all()));

    let outcome = dispatcher.dispatch(text_message("!nosuch arg")).await;

    assert_eq!(outcome, Dispatch::Rejected(Rejection::UnknownAlias));
    assert!(drain(&mut rx).is_empty());
    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn bare_prefix_is_rejected_silently() {
    let (handler, _) = RecordingHandler::new();
    let (dispatcher, mut rx) =
        dispatcher_with(tts_like_descriptor(Arc::new(handler)), Arc::new(Grants::all()));

    let outcome = dispatcher.dispatch(text_message("!")).await;

    assert_eq!(outcome, Dispatch::Rejected(Rejection::MissingAlias));
    assert!(drain(&mut rx).is_empty());
}

#[tokio::test]
async fn bot_messages_are_ignored() {
    let (handler, calls) = RecordingHandler::new();
    let (dispatcher, mut rx) =
        dispatcher_with(tts_like_descriptor(Arc::new(handler)), Arc::new(Grants::all()));

    let message = Message::new(
        "!tts hi",
        User::new("bot").as_bot(),
        Channel::new("c1", ChannelKind::Text),
    );
    let outcome = dispatcher.dispatch(message).await;

    assert_eq!(outcome, Dispatch::Ignored);
    assert!(drain(&mut rx).is_empty());
    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn text_scoped_command_rejected_in_voice_channel() {
    let (handler, calls) = RecordingHandler::new();
    let (dispatcher, mut rx) =
        dispatcher_with(tts_like_descriptor(Arc::new(handler)), Arc::new(Grants::all()));

    let outcome = dispatcher.dispatch(voice_message("!tts hello")).await;

    assert_eq!(outcome, Dispatch::Rejected(Rejection::WrongScope));
    let sent = drain(&mut rx);
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].content, "This command can only be used in text channels.");
    assert!(!sent[0].tts);
    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn missing_permission_rejected_with_reply() {
    let (handler, calls) = RecordingHandler::new();
    let (dispatcher, mut rx) =
        dispatcher_with(tts_like_descriptor(Arc::new(handler)), Arc::new(Grants::none()));

    let outcome = dispatcher.dispatch(text_message("!tts hello")).await;

    assert_eq!(outcome, Dispatch::Rejected(Rejection::MissingPermission));
    let sent = drain(&mut rx);
    assert_eq!(sent.len(), 1);
    assert!(sent[0].content.contains("Send TTS Messages"));
    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_permission_data_is_denied() {
    let (handler, calls) = RecordingHandler::new();
    let (dispatcher, mut rx) =
        dispatcher_with(tts_like_descriptor(Arc::new(handler)), Arc::new(NoData));

    let outcome = dispatcher.dispatch(text_message("!tts hello")).await;

    assert_eq!(outcome, Dispatch::Rejected(Rejection::MissingPermission));
    assert_eq!(drain(&mut rx).len(), 1);
    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn authorized_command_runs_exactly_once_with_args() {
    let (handler, calls) = RecordingHandler::new();
    let (dispatcher, mut rx) =
        dispatcher_with(tts_like_descriptor(Arc::new(handler)), Arc::new(Grants::all()));

    let outcome = dispatcher.dispatch(text_message("!tts hello there")).await;

    assert_eq!(outcome, Dispatch::Completed);
    assert!(drain(&mut rx).is_empty());
    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0], vec!["hello".to_string(), "there".to_string()]);
}

#[tokio::test]
async fn alias_resolution_is_case_insensitive_at_dispatch() {
    let (handler, calls) = RecordingHandler::new();
    let (dispatcher, _rx) =
        dispatcher_with(tts_like_descriptor(Arc::new(handler)), Arc::new(Grants::all()));

    let outcome = dispatcher.dispatch(text_message("!TTS hi")).await;

    assert_eq!(outcome, Dispatch::Completed);
    assert_eq!(calls.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn handler_fault_becomes_generic_error_reply() {
    let descriptor = CommandDescriptor::new("boom", Arc::new(FaultyHandler));
    let (dispatcher, mut rx) = dispatcher_with(descriptor, Arc::new(Grants::all()));

    let outcome = dispatcher.dispatch(text_message("!boom")).await;

    // A caught fault still completes the dispatch
    assert_eq!(outcome, Dispatch::Completed);
    let sent = drain(&mut rx);
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].content, "Something went wrong while running that command.");
}

#[tokio::test]
async fn independent_dispatches_of_same_text_are_idempotent() {
    let (handler, calls) = RecordingHandler::new();
    let (dispatcher, mut rx) =
        dispatcher_with(tts_like_descriptor(Arc::new(handler)), Arc::new(Grants::all()));

    dispatcher.dispatch(text_message("!tts hi")).await;
    dispatcher.dispatch(text_message("!tts hi")).await;

    // Two runs, two independent single invocations, no shared counter
    assert_eq!(calls.lock().unwrap().len(), 2);
    assert!(drain(&mut rx).is_empty());
}
