//! Backend-facing error types.
//!
//! Encode-time failures (unknown command, bad params) are returned to the
//! call site and nothing is sent. Dispatch-time failures come back
//! asynchronously as [`CommandResult`](crate::CommandResult) outcomes and
//! are never raised as errors here.

use dombridge_protocol::CommandKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Command name not present in the registry. Programmer error; caught
    /// at encode time.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// A parameter was missing or ill-shaped at encode time.
    #[error("invalid params for {command}: {reason}")]
    InvalidParams { command: String, reason: String },

    /// A registration conflicted with an existing catalog entry. Fatal at
    /// startup.
    #[error("duplicate command registration: {0}")]
    DuplicateCommand(String),

    /// The session has no live frontend. The command was dropped, not
    /// buffered.
    #[error("session not connected")]
    SessionNotConnected,
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn invalid_params(command: &CommandKind, reason: impl Into<String>) -> Self {
        Error::InvalidParams {
            command: command.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<dombridge_runtime::Error> for Error {
    fn from(e: dombridge_runtime::Error) -> Self {
        match e {
            dombridge_runtime::Error::NotConnected | dombridge_runtime::Error::ChannelClosed => {
                Error::SessionNotConnected
            }
            dombridge_runtime::Error::Malformed(e) => Error::InvalidParams {
                command: "<wire>".to_string(),
                reason: e.to_string(),
            },
        }
    }
}
