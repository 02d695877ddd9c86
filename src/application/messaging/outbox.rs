//! Outbox - fire-and-forget delivery of outbound messages
//!
//! Dispatch completes when a message is accepted by the queue; the delivery
//! task performs the actual network send and logs failures. Delivery faults
//! are never retried and never feed back into dispatch state.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::application::errors::GatewayError;
use crate::domain::entities::OutgoingMessage;
use crate::domain::traits::Gateway;

/// Submission handle for outbound messages
///
/// Cheap to clone; one handle is embedded in every execution context.
#[derive(Clone)]
pub struct Outbox {
    tx: mpsc::UnboundedSender<OutgoingMessage>,
}

impl Outbox {
    /// Create an outbox and the receiving end of its queue
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<OutgoingMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Queue a message for delivery.
    ///
    /// Returns as soon as the message is accepted; fails only when the
    /// delivery task is gone.
    pub fn submit(&self, message: OutgoingMessage) -> Result<(), GatewayError> {
        self.tx.send(message).map_err(|_| GatewayError::QueueClosed)
    }
}

/// Drain the outbox queue through a gateway.
///
/// Sends stay ordered per queue. A failed send is logged and dropped.
pub fn spawn_delivery(
    gateway: Arc<dyn Gateway>,
    mut rx: mpsc::UnboundedReceiver<OutgoingMessage>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            match gateway.send(&message).await {
                Ok(id) => {
                    tracing::debug!("Delivered message {} to channel {}", id, message.channel_id);
                }
                Err(e) => {
                    tracing::warn!("Failed to deliver to channel {}: {}", message.channel_id, e);
                }
            }
        }
    })
}
