//! Message handling - Event-driven command dispatch

pub mod context;
pub mod dispatcher;
pub mod outbox;
pub mod parser;

#[cfg(test)]
mod tests;

pub use context::Context;
pub use dispatcher::{Dispatch, Dispatcher, Rejection};
pub use outbox::{spawn_delivery, Outbox};
pub use parser::{MessageParser, ParseOutcome};
