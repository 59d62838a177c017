//! Fake wire for unit testing dispatch and ack flow without a host.
//!
//! Provides an in-memory transport half with a controller for injecting
//! inbound messages and inspecting what the side under test sent.
//!
//! # Example
//!
//! ```ignore
//! let (parts, controller) = FakeWireBuilder::new().build();
//! let link = SessionLink::new(parts, dispatcher);
//! tokio::spawn(link.run());
//!
//! controller.inject_command(&message);
//! let acks = controller.take_sent().await;
//! ```

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use dombridge_protocol::CommandMessage;
use futures_util::FutureExt;
use serde_json::Value as JsonValue;
use tokio::sync::{Mutex, mpsc};

use crate::error::Result;
use crate::transport::{Transport, TransportParts, TransportReceiver};

/// Builder for fake wire instances.
pub struct FakeWireBuilder {
    // Nothing to configure yet; keeps the construction site stable.
}

impl FakeWireBuilder {
    pub fn new() -> Self {
        Self {}
    }

    /// Builds the fake wire and returns both parts and a controller.
    ///
    /// [`TransportParts`] goes to the session or link under test; the
    /// [`FakeWireController`] injects inbound messages and captures
    /// everything sent outbound.
    pub fn build(self) -> (TransportParts, FakeWireController) {
        let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        let sent = Arc::new(Mutex::new(Vec::new()));

        let sender = FakeWireSender {
            sent: Arc::clone(&sent),
        };
        let receiver = FakeWireReceiver {
            inbound_rx,
            message_tx,
        };
        let controller = FakeWireController { inbound_tx, sent };

        let parts = TransportParts {
            sender: Box::new(sender),
            receiver: Box::new(receiver),
            message_rx,
        };
        (parts, controller)
    }
}

impl Default for FakeWireBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Injects inbound messages and inspects outbound ones.
pub struct FakeWireController {
    inbound_tx: mpsc::UnboundedSender<JsonValue>,
    sent: Arc<Mutex<Vec<JsonValue>>>,
}

impl FakeWireController {
    /// Injects a raw JSON message, as if the peer had sent it.
    pub fn inject(&self, message: JsonValue) {
        let _ = self.inbound_tx.send(message);
    }

    /// Injects a command message.
    pub fn inject_command(&self, message: &CommandMessage) {
        self.inject(serde_json::to_value(message).expect("command message serializes"));
    }

    /// Closes the inbound side, as if the peer disconnected.
    pub fn disconnect(self) {
        drop(self.inbound_tx);
    }

    /// Takes all sent messages, clearing the buffer.
    pub async fn take_sent(&self) -> Vec<JsonValue> {
        std::mem::take(&mut *self.sent.lock().await)
    }
}

struct FakeWireSender {
    sent: Arc<Mutex<Vec<JsonValue>>>,
}

impl Transport for FakeWireSender {
    fn send(
        &mut self,
        message: JsonValue,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let sent = Arc::clone(&self.sent);
        async move {
            sent.lock().await.push(message);
            Ok(())
        }
        .boxed()
    }
}

struct FakeWireReceiver {
    inbound_rx: mpsc::UnboundedReceiver<JsonValue>,
    message_tx: mpsc::UnboundedSender<JsonValue>,
}

impl TransportReceiver for FakeWireReceiver {
    fn run(mut self: Box<Self>) -> Pin<Box<dyn Future<Output = Result<()>> + Send>> {
        async move {
            while let Some(message) = self.inbound_rx.recv().await {
                if self.message_tx.send(message).is_err() {
                    break;
                }
            }
            Ok(())
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_fake_wire_captures_sent_messages() {
        let (mut parts, controller) = FakeWireBuilder::new().build();

        parts.sender.send(json!({"outcome": "success"})).await.unwrap();
        parts.sender.send(json!({"outcome": "elementNotFound"})).await.unwrap();

        let sent = controller.take_sent().await;
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0]["outcome"], "success");
        assert_eq!(sent[1]["outcome"], "elementNotFound");
        assert!(controller.take_sent().await.is_empty());
    }

    #[tokio::test]
    async fn test_fake_wire_forwards_injected_messages() {
        let (mut parts, controller) = FakeWireBuilder::new().build();
        tokio::spawn(parts.receiver.run());

        controller.inject(json!({"command": "show"}));
        controller.inject(json!({"command": "hide"}));

        assert_eq!(parts.message_rx.recv().await.unwrap()["command"], "show");
        assert_eq!(parts.message_rx.recv().await.unwrap()["command"], "hide");
    }

    #[tokio::test]
    async fn test_disconnect_closes_message_stream() {
        let (mut parts, controller) = FakeWireBuilder::new().build();
        tokio::spawn(parts.receiver.run());

        controller.disconnect();
        assert!(parts.message_rx.recv().await.is_none());
    }
}
