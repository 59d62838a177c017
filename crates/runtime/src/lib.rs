//! Session transport and message pump for the dombridge command bridge.
//!
//! This crate owns the plumbing between a backend session and its connected
//! frontend: the [`Transport`] seam a host framework implements, an
//! in-process [`pair`] transport for same-process wiring, and the
//! [`SessionLink`] pump loop that feeds incoming command messages to a
//! [`CommandHandler`] and pushes acknowledgements back.
//!
//! Delivery is fire-and-forget and FIFO per session. There is no
//! request/response correlation here; the backend consumes acknowledgements
//! as a stream and matches them by command id if it cares.

pub mod error;
pub mod fake;
pub mod link;
pub mod transport;

pub use error::{Error, Result};
pub use fake::{FakeWireBuilder, FakeWireController};
pub use link::{CommandHandler, SessionLink};
pub use transport::{Transport, TransportParts, TransportReceiver, pair};
