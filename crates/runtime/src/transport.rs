//! Transport seam between one side of a session and the wire.
//!
//! A transport is split into a sender half and a receiver half so the
//! receiver can be driven on its own task while senders stay usable from
//! the session or link. Payloads are raw JSON values; the protocol types
//! live in `dombridge-protocol` and are applied one layer up.

use std::future::Future;
use std::pin::Pin;

use futures_util::FutureExt;
use serde_json::Value as JsonValue;
use tokio::sync::mpsc;

use crate::error::{Error, Result};

/// Outbound half of a transport.
pub trait Transport: Send {
    /// Pushes one message toward the peer. Non-blocking from the caller's
    /// perspective; completion means enqueued, not executed.
    fn send(&mut self, message: JsonValue)
    -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;
}

/// Inbound half of a transport.
///
/// `run` consumes the receiver and forwards every inbound message into the
/// message channel handed out in [`TransportParts`], preserving arrival
/// order. It returns when the wire closes.
pub trait TransportReceiver: Send {
    fn run(self: Box<Self>) -> Pin<Box<dyn Future<Output = Result<()>> + Send>>;
}

/// Everything one side of a session needs to talk to its peer.
pub struct TransportParts {
    pub sender: Box<dyn Transport>,
    pub receiver: Box<dyn TransportReceiver>,
    pub message_rx: mpsc::UnboundedReceiver<JsonValue>,
}

/// Builds an in-process transport pair for wiring a backend session and a
/// frontend link living in the same process.
///
/// Messages sent on one side arrive on the other side's `message_rx` in
/// send order. Dropping either side's receiver makes subsequent sends from
/// the peer fail with [`Error::NotConnected`].
pub fn pair() -> (TransportParts, TransportParts) {
    let (a_out_tx, a_out_rx) = mpsc::unbounded_channel();
    let (b_out_tx, b_out_rx) = mpsc::unbounded_channel();
    let (a_msg_tx, a_msg_rx) = mpsc::unbounded_channel();
    let (b_msg_tx, b_msg_rx) = mpsc::unbounded_channel();

    // Side A's outbound feeds side B's message stream and vice versa.
    let side_a = TransportParts {
        sender: Box::new(PipeSender { tx: a_out_tx }),
        receiver: Box::new(PipeReceiver {
            inbound_rx: b_out_rx,
            message_tx: a_msg_tx,
        }),
        message_rx: a_msg_rx,
    };
    let side_b = TransportParts {
        sender: Box::new(PipeSender { tx: b_out_tx }),
        receiver: Box::new(PipeReceiver {
            inbound_rx: a_out_rx,
            message_tx: b_msg_tx,
        }),
        message_rx: b_msg_rx,
    };
    (side_a, side_b)
}

struct PipeSender {
    tx: mpsc::UnboundedSender<JsonValue>,
}

impl Transport for PipeSender {
    fn send(
        &mut self,
        message: JsonValue,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let result = self.tx.send(message).map_err(|_| Error::NotConnected);
        async move { result }.boxed()
    }
}

struct PipeReceiver {
    inbound_rx: mpsc::UnboundedReceiver<JsonValue>,
    message_tx: mpsc::UnboundedSender<JsonValue>,
}

impl TransportReceiver for PipeReceiver {
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
    async fn test_pair_delivers_in_send_order() {
        let (mut backend, mut frontend) = pair();
        tokio::spawn(frontend.receiver.run());

        backend.sender.send(json!({"seq": "a"})).await.unwrap();
        backend.sender.send(json!({"seq": "b"})).await.unwrap();
        backend.sender.send(json!({"seq": "c"})).await.unwrap();

        for expected in ["a", "b", "c"] {
            let message = frontend.message_rx.recv().await.unwrap();
            assert_eq!(message["seq"], expected);
        }
    }

    #[tokio::test]
    async fn test_pair_is_bidirectional() {
        let (mut backend, mut frontend) = pair();
        tokio::spawn(backend.receiver.run());
        tokio::spawn(frontend.receiver.run());

        backend.sender.send(json!({"dir": "down"})).await.unwrap();
        frontend.sender.send(json!({"dir": "up"})).await.unwrap();

        assert_eq!(frontend.message_rx.recv().await.unwrap()["dir"], "down");
        assert_eq!(backend.message_rx.recv().await.unwrap()["dir"], "up");
    }

    #[tokio::test]
    async fn test_send_after_peer_dropped_is_not_connected() {
        let (mut backend, frontend) = pair();
        drop(frontend);

        let err = backend.sender.send(json!({})).await.unwrap_err();
        assert!(err.is_not_connected());
    }
}
