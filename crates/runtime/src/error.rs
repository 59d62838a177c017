//! Channel-level errors.

use thiserror::Error;

/// Errors surfaced by the transport and the session link.
#[derive(Debug, Error)]
pub enum Error {
    /// The session has no live frontend. Sends are dropped and reported,
    /// never buffered for a later reconnect.
    #[error("session not connected")]
    NotConnected,

    /// The in-process channel closed underneath us.
    #[error("channel closed")]
    ChannelClosed,

    /// A wire payload failed to (de)serialize.
    #[error("malformed wire message: {0}")]
    Malformed(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn is_not_connected(&self) -> bool {
        matches!(self, Error::NotConnected)
    }
}
