//! Command encoding: validation against the registry schema plus id
//! assignment.
//!
//! Encoding is pure apart from the id counter; it never touches the DOM or
//! the channel. Validation failures are returned to the call site and
//! nothing is sent - encode-time errors are loud, dispatch-time errors are
//! reported asynchronously.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dombridge_protocol::{CommandId, CommandKind, CommandMessage};
use serde_json::Value;

use crate::command::Command;
use crate::error::{Error, Result};
use crate::registry::{CommandRegistry, CommandSchema, ParamKind};

/// Serializes backend-issued commands into transport messages.
pub struct Encoder {
    registry: Arc<CommandRegistry>,
    next_seq: AtomicU64,
}

impl Encoder {
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self {
            registry,
            next_seq: AtomicU64::new(0),
        }
    }

    /// Validates `command` against its registry schema and builds the wire
    /// message, assigning a fresh command id.
    pub fn encode(&self, command: &Command) -> Result<CommandMessage> {
        let spec = self.registry.lookup(command.kind())?;
        let schema = &spec.schema;

        self.check_target(command, schema)?;
        self.check_condition(command, schema)?;
        self.check_params(command, schema)?;

        let mut params = command.params().clone();
        if schema.carries_command {
            let nested = command.nested().ok_or_else(|| {
                Error::invalid_params(command.kind(), "missing bound command")
            })?;
            if nested.kind() == &CommandKind::Bind {
                return Err(Error::invalid_params(
                    command.kind(),
                    "bound command may not itself be a bind",
                ));
            }
            let nested_message = self.encode(nested)?;
            let nested_value = serde_json::to_value(nested_message).map_err(|e| {
                Error::invalid_params(command.kind(), format!("bound command unserializable: {e}"))
            })?;
            params.insert("command".to_string(), nested_value);
        } else if command.nested().is_some() {
            return Err(Error::invalid_params(
                command.kind(),
                "carries no nested command",
            ));
        }

        Ok(CommandMessage {
            command_id: CommandId::from_seq(self.next_seq.fetch_add(1, Ordering::SeqCst)),
            command: command.kind().clone(),
            target: command.target_ref().map(str::to_string),
            params,
            condition: command.condition_value(),
        })
    }

    fn check_target(&self, command: &Command, schema: &CommandSchema) -> Result<()> {
        match (schema.requires_target, command.target_ref()) {
            (true, None) => Err(Error::invalid_params(command.kind(), "missing target")),
            (true, Some("")) => Err(Error::invalid_params(command.kind(), "empty target")),
            (false, Some(_)) => Err(Error::invalid_params(command.kind(), "takes no target")),
            _ => Ok(()),
        }
    }

    fn check_condition(&self, command: &Command, schema: &CommandSchema) -> Result<()> {
        if command.condition_value().is_some() && !schema.accepts_condition {
            return Err(Error::invalid_params(command.kind(), "takes no condition"));
        }
        Ok(())
    }

    fn check_params(&self, command: &Command, schema: &CommandSchema) -> Result<()> {
        for param in &schema.params {
            match command.params().get(&param.name) {
                Some(value) => check_kind(value, param.kind).map_err(|problem| {
                    Error::invalid_params(
                        command.kind(),
                        format!("parameter `{}` {problem}", param.name),
                    )
                })?,
                None if param.required => {
                    return Err(Error::invalid_params(
                        command.kind(),
                        format!("missing required parameter `{}`", param.name),
                    ));
                }
                None => {}
            }
        }
        for name in command.params().keys() {
            if schema.param(name).is_none() {
                return Err(Error::invalid_params(
                    command.kind(),
                    format!("unexpected parameter `{name}`"),
                ));
            }
        }
        Ok(())
    }
}

fn check_kind(value: &Value, kind: ParamKind) -> std::result::Result<(), &'static str> {
    match kind {
        ParamKind::Bool => {
            if value.is_boolean() {
                Ok(())
            } else {
                Err("must be a boolean")
            }
        }
        ParamKind::String => {
            if value.is_string() {
                Ok(())
            } else {
                Err("must be a string")
            }
        }
        ParamKind::NonEmptyString => match value.as_str() {
            Some(s) if !s.is_empty() => Ok(()),
            Some(_) => Err("must be non-empty"),
            None => Err("must be a string"),
        },
    }
}
