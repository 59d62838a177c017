//! The binding table: frontend events wired to backend-issued commands.
//!
//! Entries persist for the session lifetime. A re-render that replaces the
//! source element does not remove its bindings; the bound command simply
//! reports `ElementNotFound` on its next dispatch.

use dombridge_protocol::CommandMessage;
use serde::{Deserialize, Serialize};

/// Opaque handle for unbinding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BindingHandle(u64);

/// One registered binding. Serializable so hosts can dump the table when
/// debugging a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BindingEntry {
    pub source: String,
    pub trigger_event: String,
    pub command: CommandMessage,
}

/// Maps (element, event) pairs to bound commands, in registration order.
#[derive(Debug, Default)]
pub struct BindingTable {
    next_handle: u64,
    entries: Vec<(BindingHandle, BindingEntry)>,
}

impl BindingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a binding. Multiple bindings on the same (element, event)
    /// pair are permitted and all fire, in registration order.
    pub fn bind(&mut self, entry: BindingEntry) -> BindingHandle {
        let handle = BindingHandle(self.next_handle);
        self.next_handle += 1;
        self.entries.push((handle, entry));
        handle
    }

    /// Removes a binding. Idempotent: unbinding an already-unbound handle
    /// is a no-op.
    pub fn unbind(&mut self, handle: BindingHandle) {
        self.entries.retain(|(h, _)| *h != handle);
    }

    /// The commands bound to this (element, event) pair, in registration
    /// order.
    pub fn matches(&self, source: &str, event: &str) -> Vec<CommandMessage> {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.source == source && entry.trigger_event == event)
            .map(|(_, entry)| entry.command.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
