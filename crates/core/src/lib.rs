// dombridge: server-driven DOM command bridge.
//
// Backend logic issues named, idempotent UI mutation commands; a connected
// frontend session dispatches them against its DOM and acknowledges each
// one. The host web framework owns rendering and session lifecycle; this
// crate owns the command catalog, encoding, the channel contract, and
// dispatch.

pub mod bindings;
pub mod command;
pub mod condition;
pub mod dispatcher;
pub mod dom;
pub mod effect;
pub mod encoder;
pub mod error;
pub mod registry;
pub mod session;

pub use bindings::{BindingEntry, BindingHandle, BindingTable};
pub use command::Command;
pub use dispatcher::{Dispatcher, FormSnapshot};
pub use dom::{Dom, MemoryDom, MemoryElement, SharedMemoryDom};
pub use effect::Effect;
pub use encoder::Encoder;
pub use error::{Error, Result};
pub use registry::{CommandRegistry, CommandSchema, CommandSpec, CustomEffect, ParamKind, ParamSpec};
pub use session::{CommandResult, Session};

pub use dombridge_protocol::{AckMessage, CommandId, CommandKind, CommandMessage, Outcome};
pub use dombridge_runtime::{CommandHandler, SessionLink, TransportParts, pair};
