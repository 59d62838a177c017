//! The backend side of a session: catalog methods over a fire-and-forget
//! channel.
//!
//! `send` never waits for frontend completion; it validates, encodes,
//! enqueues, and returns the assigned command id. Acknowledgements arrive
//! on a results stream the backend drains when it wants them - they matter
//! for logging and retry decisions, not for the correctness of effects
//! already applied.
//!
//! A session pairs one backend logic instance with one connected frontend.
//! Disconnecting drops every undelivered command; nothing is queued for a
//! later reconnect, because stale UI commands replayed into a fresh render
//! are worse than dropped ones.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use dombridge_protocol::{AckMessage, CommandId, CommandMessage};
use dombridge_runtime::TransportParts;
use parking_lot::Mutex;
use tokio::sync::mpsc;

use crate::command::Command;
use crate::encoder::Encoder;
use crate::error::{Error, Result};
use crate::registry::CommandRegistry;

/// Acknowledgement as consumed by backend logic.
pub type CommandResult = AckMessage;

/// One backend-to-frontend connection lifetime.
pub struct Session {
    encoder: Encoder,
    outbound: Mutex<Option<mpsc::UnboundedSender<CommandMessage>>>,
    results: tokio::sync::Mutex<mpsc::UnboundedReceiver<CommandResult>>,
    connected: Arc<AtomicBool>,
}

impl Session {
    /// Takes ownership of the backend side of a transport and starts the
    /// outbound and acknowledgement pumps.
    pub fn connect(registry: Arc<CommandRegistry>, parts: TransportParts) -> Self {
        let TransportParts {
            mut sender,
            receiver,
            mut message_rx,
        } = parts;

        let connected = Arc::new(AtomicBool::new(true));
        let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel::<CommandMessage>();
        let (results_tx, results_rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            if let Err(e) = receiver.run().await {
                tracing::error!(target: "dombridge.session", "transport receiver error: {e}");
            }
        });

        // Outbound pump: commands already validated and encoded, in FIFO
        // order.
        let outbound_connected = Arc::clone(&connected);
        tokio::spawn(async move {
            while let Some(message) = outbound_rx.recv().await {
                let payload = match serde_json::to_value(&message) {
                    Ok(payload) => payload,
                    Err(e) => {
                        tracing::error!(target: "dombridge.session", "unserializable command: {e}");
                        continue;
                    }
                };
                if let Err(e) = sender.send(payload).await {
                    tracing::warn!(target: "dombridge.session", "send failed, marking disconnected: {e}");
                    outbound_connected.store(false, Ordering::SeqCst);
                    break;
                }
            }
        });

        // Ack pump: wire acks into the results stream.
        let ack_connected = Arc::clone(&connected);
        tokio::spawn(async move {
            while let Some(value) = message_rx.recv().await {
                match serde_json::from_value::<AckMessage>(value) {
                    Ok(ack) => {
                        if results_tx.send(ack).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::error!(target: "dombridge.session", "unparseable ack: {e}");
                    }
                }
            }
            tracing::debug!(target: "dombridge.session", "ack stream ended (frontend gone)");
            ack_connected.store(false, Ordering::SeqCst);
        });

        Self {
            encoder: Encoder::new(registry),
            outbound: Mutex::new(Some(outbound_tx)),
            results: tokio::sync::Mutex::new(results_rx),
            connected,
        }
    }

    /// Encodes and enqueues a command. Fire-and-forget: returns as soon as
    /// the message is on the channel, with the id to correlate its
    /// eventual acknowledgement.
    ///
    /// Fails with [`Error::SessionNotConnected`] when the frontend is
    /// gone; the command is dropped, not buffered.
    pub fn send(&self, command: Command) -> Result<CommandId> {
        if !self.is_connected() {
            return Err(Error::SessionNotConnected);
        }
        let message = self.encoder.encode(&command)?;
        let command_id = message.command_id.clone();

        let outbound = self.outbound.lock();
        let Some(tx) = outbound.as_ref() else {
            return Err(Error::SessionNotConnected);
        };
        if tx.send(message).is_err() {
            self.connected.store(false, Ordering::SeqCst);
            return Err(Error::SessionNotConnected);
        }
        tracing::debug!(target: "dombridge.session", %command_id, "command enqueued");
        Ok(command_id)
    }

    /// Receives the next acknowledgement, in dispatch order. Returns
    /// `None` once the session is disconnected and all pending acks are
    /// drained.
    pub async fn recv_result(&self) -> Option<CommandResult> {
        self.results.lock().await.recv().await
    }

    /// Drops the channel. Undelivered commands are discarded.
    pub fn disconnect(&self) {
        self.connected.store(false, Ordering::SeqCst);
        self.outbound.lock().take();
        tracing::debug!(target: "dombridge.session", "session disconnected");
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    // Catalog methods, 1:1 with the registry. Parameters beyond these
    // shapes (e.g. `anim`) go through `send` with an explicit `Command`.

    pub fn show(&self, target: &str) -> Result<CommandId> {
        self.send(Command::show(target))
    }

    pub fn hide(&self, target: &str) -> Result<CommandId> {
        self.send(Command::hide(target))
    }

    /// Flips the target's current visibility.
    pub fn toggle(&self, target: &str) -> Result<CommandId> {
        self.send(Command::toggle(target))
    }

    /// Shows the target when `condition` is true, hides it otherwise.
    pub fn toggle_if(&self, target: &str, condition: bool) -> Result<CommandId> {
        self.send(Command::toggle(target).condition(condition))
    }

    pub fn add_class(&self, target: &str, class: &str) -> Result<CommandId> {
        self.send(Command::add_class(target, class))
    }

    pub fn remove_class(&self, target: &str, class: &str) -> Result<CommandId> {
        self.send(Command::remove_class(target, class))
    }

    /// Flips the class on the target.
    pub fn toggle_class(&self, target: &str, class: &str) -> Result<CommandId> {
        self.send(Command::toggle_class(target, class))
    }

    /// Adds the class when `condition` is true, removes it otherwise.
    pub fn toggle_class_if(&self, target: &str, class: &str, condition: bool) -> Result<CommandId> {
        self.send(Command::toggle_class(target, class).condition(condition))
    }

    pub fn enable(&self, target: &str) -> Result<CommandId> {
        self.send(Command::enable(target))
    }

    pub fn disable(&self, target: &str) -> Result<CommandId> {
        self.send(Command::disable(target))
    }

    /// Flips the target's enabled state.
    pub fn toggle_state(&self, target: &str) -> Result<CommandId> {
        self.send(Command::toggle_state(target))
    }

    /// Enables the target when `condition` is true, disables it otherwise.
    pub fn toggle_state_if(&self, target: &str, condition: bool) -> Result<CommandId> {
        self.send(Command::toggle_state(target).condition(condition))
    }

    pub fn set_html(&self, target: &str, content: &str) -> Result<CommandId> {
        self.send(Command::html(target, content))
    }

    pub fn set_text(&self, target: &str, content: &str) -> Result<CommandId> {
        self.send(Command::text(target, content))
    }

    /// Restores the form's controls to their mount-time values.
    pub fn reset(&self, form: &str) -> Result<CommandId> {
        self.send(Command::reset(form))
    }

    pub fn alert(&self, message: &str) -> Result<CommandId> {
        self.send(Command::alert(message))
    }

    /// Appends rules to the session stylesheet.
    pub fn inject_stylesheet(&self, rules: &str) -> Result<CommandId> {
        self.send(Command::inline_css(rules))
    }

    /// Binds `command` to fire when `event` occurs at `source`.
    pub fn bind(&self, source: &str, event: &str, command: Command) -> Result<CommandId> {
        self.send(Command::bind(source, event, command))
    }

    pub fn bind_click(&self, source: &str, command: Command) -> Result<CommandId> {
        self.bind(source, "click", command)
    }
}
