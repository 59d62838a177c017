//! The frontend side of a session: a FIFO pump from the wire to a handler.
//!
//! # Message Flow
//!
//! 1. The transport receiver forwards inbound JSON onto the message channel
//! 2. [`SessionLink::run`] reads one message at a time, in arrival order
//! 3. Each message is parsed as a [`CommandMessage`] and handed to the
//!    [`CommandHandler`]
//! 4. The handler's [`AckMessage`] is pushed back through the sender
//!
//! One message is processed to completion before the next is read, which is
//! what gives the bridge its per-session FIFO dispatch guarantee. A message
//! that fails to parse is logged and skipped; it never stalls the loop.

use std::sync::Arc;

use dombridge_protocol::{AckMessage, CommandMessage};
use parking_lot::Mutex;

use crate::transport::TransportParts;

/// Executes one command message against the frontend's DOM and reports how
/// it went. Implemented by the dispatcher in `dombridge`.
pub trait CommandHandler: Send {
    fn handle(&mut self, message: CommandMessage) -> AckMessage;
}

/// Lets a handler be shared between a running link and test code that wants
/// to poke it directly (e.g. to simulate frontend events).
impl<H: CommandHandler> CommandHandler for Arc<Mutex<H>> {
    fn handle(&mut self, message: CommandMessage) -> AckMessage {
        self.lock().handle(message)
    }
}

/// Drives one session's inbound command stream into a handler.
pub struct SessionLink<H: CommandHandler> {
    parts: TransportParts,
    handler: H,
}

impl<H: CommandHandler> SessionLink<H> {
    pub fn new(parts: TransportParts, handler: H) -> Self {
        Self { parts, handler }
    }

    /// Runs the pump loop until the wire closes.
    ///
    /// Spawn this on its own task; it owns the handler for the session's
    /// lifetime.
    pub async fn run(self) {
        let SessionLink {
            parts,
            mut handler,
        } = self;
        let TransportParts {
            mut sender,
            receiver,
            mut message_rx,
        } = parts;

        let receiver_handle = tokio::spawn(async move {
            if let Err(e) = receiver.run().await {
                tracing::error!(target: "dombridge.link", "transport receiver error: {e}");
            }
        });

        while let Some(value) = message_rx.recv().await {
            let message: CommandMessage = match serde_json::from_value(value) {
                Ok(message) => message,
                Err(e) => {
                    tracing::error!(target: "dombridge.link", "unparseable command message: {e}");
                    continue;
                }
            };

            tracing::debug!(
                target: "dombridge.link",
                command = %message.command,
                command_id = %message.command_id,
                "dispatching"
            );
            let ack = handler.handle(message);

            let payload = match serde_json::to_value(&ack) {
                Ok(payload) => payload,
                Err(e) => {
                    tracing::error!(target: "dombridge.link", "unserializable ack: {e}");
                    continue;
                }
            };
            if let Err(e) = sender.send(payload).await {
                // Backend gone; effects already applied stay applied, but
                // there is nobody left to report to.
                tracing::warn!(target: "dombridge.link", "ack send failed: {e}");
                break;
            }
        }

        tracing::debug!(target: "dombridge.link", "session link ended (wire closed)");
        receiver_handle.abort();
    }
}
