//! Transport payloads: the command message and its acknowledgement.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::command::CommandKind;

/// Identifier correlating an acknowledgement with the command it answers.
///
/// Ids are strings on the wire (`"cmd-7"`); backends mint them from a
/// per-session monotonic counter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandId(String);

impl CommandId {
    /// Builds an id from a per-session sequence number.
    pub fn from_seq(seq: u64) -> Self {
        CommandId(format!("cmd-{seq}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CommandId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A command as pushed to the frontend.
///
/// Wire shape:
/// ```json
/// {
///   "commandId": "cmd-7",
///   "command": "toggleState",
///   "target": "submit",
///   "condition": false
/// }
/// ```
///
/// `target` is absent for global commands (alert, inlineCss); `condition`
/// is absent for unconditional commands; `params` is omitted when empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandMessage {
    pub command_id: CommandId,
    pub command: CommandKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub params: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<bool>,
}

/// How a dispatched command fared on the frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    /// The effect was applied.
    Success,
    /// The target was missing from the current DOM. Expected and transient;
    /// a re-render may have replaced the element.
    ElementNotFound,
    /// The command name is not in the dispatcher's registry.
    UnknownCommand,
    /// A parameter was missing or ill-shaped.
    InvalidParams,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }
}

/// Acknowledgement flowing back from the frontend to the backend.
///
/// Wire shape:
/// ```json
/// { "commandId": "cmd-7", "outcome": "elementNotFound", "detail": "no element 'submit'" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AckMessage {
    pub command_id: CommandId,
    pub outcome: Outcome,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl AckMessage {
    pub fn success(command_id: CommandId) -> Self {
        AckMessage {
            command_id,
            outcome: Outcome::Success,
            detail: None,
        }
    }

    pub fn failure(command_id: CommandId, outcome: Outcome, detail: impl Into<String>) -> Self {
        AckMessage {
            command_id,
            outcome,
            detail: Some(detail.into()),
        }
    }
}

/// Discriminated union of wire messages for hosts that multiplex both
/// directions over one pipe.
///
/// Uses serde's `untagged` to distinguish based on field presence:
/// command messages carry `command`, acknowledgements carry `outcome`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireMessage {
    Command(CommandMessage),
    Ack(AckMessage),
}
