//! Wire types for the dombridge UI command protocol.
//!
//! This crate contains the serde-serializable types exchanged between a
//! backend session and its connected frontend: the command catalog, the
//! command message, and the acknowledgement that flows back. These types
//! represent the "protocol layer" - the shapes of data as they appear on
//! the wire.
//!
//! # Design Philosophy
//!
//! Types in this crate are:
//! * Pure data: No behavior beyond serialization/deserialization
//! * 1:1 with protocol: Match the wire message shapes exactly
//! * Stable: Changes only when the wire protocol changes
//!
//! Higher-level ergonomic APIs are built on top of these types in
//! `dombridge`.

pub mod command;
pub mod message;

pub use command::*;
pub use message::*;
