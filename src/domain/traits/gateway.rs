use async_trait::async_trait;

use crate::application::errors::GatewayError;
use crate::domain::entities::{OutgoingMessage, User};

/// Gateway trait - abstraction for the messaging platform transport
///
/// The dispatch core only consumes the send capability; receiving messages
/// is the adapter's concern and feeds the dispatcher from its own loop.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Deliver an outbound message, returning the platform's message id
    async fn send(&self, message: &OutgoingMessage) -> Result<String, GatewayError>;

    /// The identity the bot acts under on this platform
    fn bot_user(&self) -> User;
}
