//! The command registry: a fixed catalog of named operations with typed
//! parameter schemas.
//!
//! The registry is populated once at startup with the built-in catalog and
//! is read-only thereafter; the registration contract stays open so hosts
//! can add custom commands with their own effect callbacks.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use dombridge_protocol::{CommandKind, CommandMessage, Outcome};
use parking_lot::RwLock;

use crate::dom::Dom;
use crate::error::{Error, Result};

/// Expected JSON shape of one parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Bool,
    String,
    /// A string that must not be empty (class names, event names).
    NonEmptyString,
}

/// One parameter in a command's schema.
#[derive(Debug, Clone)]
pub struct ParamSpec {
    pub name: String,
    pub kind: ParamKind,
    pub required: bool,
}

/// Typed parameter schema for one command.
#[derive(Debug, Clone, Default)]
pub struct CommandSchema {
    /// Whether the command addresses an element. Global commands (alert,
    /// inlineCss) do not.
    pub requires_target: bool,
    /// Whether the command accepts a `condition` for branch selection.
    pub accepts_condition: bool,
    /// Whether the command carries a nested command (bind).
    pub carries_command: bool,
    pub params: Vec<ParamSpec>,
}

impl CommandSchema {
    /// Schema for a command that addresses one element.
    pub fn targeted() -> Self {
        Self {
            requires_target: true,
            ..Self::default()
        }
    }

    /// Schema for a global command with no target.
    pub fn global() -> Self {
        Self::default()
    }

    pub fn conditional(mut self) -> Self {
        self.accepts_condition = true;
        self
    }

    pub fn required(mut self, name: impl Into<String>, kind: ParamKind) -> Self {
        self.params.push(ParamSpec {
            name: name.into(),
            kind,
            required: true,
        });
        self
    }

    pub fn optional(mut self, name: impl Into<String>, kind: ParamKind) -> Self {
        self.params.push(ParamSpec {
            name: name.into(),
            kind,
            required: false,
        });
        self
    }

    fn nested(mut self) -> Self {
        self.carries_command = true;
        self
    }

    pub fn param(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }
}

/// Effect callback for a registry-extended command. Runs on the frontend
/// with the target already resolved (when the schema requires one).
pub type CustomEffect = Arc<dyn Fn(&mut dyn Dom, &CommandMessage) -> Outcome + Send + Sync>;

/// Registry entry: schema plus, for custom commands, the effect to apply.
/// Built-in commands dispatch through the dispatcher's own effect table and
/// carry no callback.
pub struct CommandSpec {
    pub schema: CommandSchema,
    pub effect: Option<CustomEffect>,
}

impl fmt::Debug for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandSpec")
            .field("schema", &self.schema)
            .field("effect", &self.effect.as_ref().map(|_| ".."))
            .finish()
    }
}

/// Catalog of known commands, keyed by kind.
pub struct CommandRegistry {
    entries: RwLock<HashMap<CommandKind, Arc<CommandSpec>>>,
}

impl CommandRegistry {
    /// Creates a registry holding the built-in catalog.
    pub fn builtin() -> Self {
        let registry = Self {
            entries: RwLock::new(HashMap::new()),
        };
        for (kind, schema) in builtin_catalog() {
            registry
                .register(kind, schema)
                .expect("built-in catalog has no duplicates");
        }
        registry
    }

    /// Registers a command schema. Fails with [`Error::DuplicateCommand`]
    /// if the name is already present.
    pub fn register(&self, kind: CommandKind, schema: CommandSchema) -> Result<()> {
        self.insert(kind, CommandSpec { schema, effect: None })
    }

    /// Registers a custom command with its frontend effect.
    pub fn register_custom(
        &self,
        name: impl Into<String>,
        schema: CommandSchema,
        effect: CustomEffect,
    ) -> Result<()> {
        let kind = CommandKind::from(name.into());
        self.insert(
            kind,
            CommandSpec {
                schema,
                effect: Some(effect),
            },
        )
    }

    fn insert(&self, kind: CommandKind, spec: CommandSpec) -> Result<()> {
        let mut entries = self.entries.write();
        if entries.contains_key(&kind) {
            return Err(Error::DuplicateCommand(kind.to_string()));
        }
        entries.insert(kind, Arc::new(spec));
        Ok(())
    }

    /// Looks up a command's spec. Fails with [`Error::UnknownCommand`] if
    /// the name is absent.
    pub fn lookup(&self, kind: &CommandKind) -> Result<Arc<CommandSpec>> {
        self.entries
            .read()
            .get(kind)
            .cloned()
            .ok_or_else(|| Error::UnknownCommand(kind.to_string()))
    }
}

fn builtin_catalog() -> Vec<(CommandKind, CommandSchema)> {
    vec![
        (
            CommandKind::Show,
            CommandSchema::targeted().optional("anim", ParamKind::Bool),
        ),
        (
            CommandKind::Hide,
            CommandSchema::targeted().optional("anim", ParamKind::Bool),
        ),
        (
            CommandKind::Toggle,
            CommandSchema::targeted()
                .conditional()
                .optional("anim", ParamKind::Bool),
        ),
        (
            CommandKind::AddClass,
            CommandSchema::targeted().required("class", ParamKind::NonEmptyString),
        ),
        (
            CommandKind::RemoveClass,
            CommandSchema::targeted().required("class", ParamKind::NonEmptyString),
        ),
        (
            CommandKind::ToggleClass,
            CommandSchema::targeted()
                .conditional()
                .required("class", ParamKind::NonEmptyString),
        ),
        (CommandKind::Enable, CommandSchema::targeted()),
        (CommandKind::Disable, CommandSchema::targeted()),
        (
            CommandKind::ToggleState,
            CommandSchema::targeted().conditional(),
        ),
        (
            CommandKind::Html,
            CommandSchema::targeted().required("content", ParamKind::String),
        ),
        (
            CommandKind::Text,
            CommandSchema::targeted().required("content", ParamKind::String),
        ),
        (
            CommandKind::Bind,
            CommandSchema::targeted()
                .required("event", ParamKind::NonEmptyString)
                .nested(),
        ),
        (CommandKind::Reset, CommandSchema::targeted()),
        (
            CommandKind::Alert,
            CommandSchema::global().required("message", ParamKind::String),
        ),
        (
            CommandKind::InlineCss,
            CommandSchema::global().required("rules", ParamKind::String),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_is_complete() {
        let registry = CommandRegistry::builtin();
        for kind in CommandKind::builtins() {
            assert!(registry.lookup(&kind).is_ok(), "missing {kind}");
        }
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let registry = CommandRegistry::builtin();
        let err = registry
            .register(CommandKind::Show, CommandSchema::targeted())
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateCommand(name) if name == "show"));
    }

    #[test]
    fn test_unknown_lookup_fails() {
        let registry = CommandRegistry::builtin();
        let err = registry
            .lookup(&CommandKind::Custom("spin".to_string()))
            .unwrap_err();
        assert!(matches!(err, Error::UnknownCommand(name) if name == "spin"));
    }

    #[test]
    fn test_custom_registration_round_trips() {
        let registry = CommandRegistry::builtin();
        registry
            .register_custom(
                "spin",
                CommandSchema::targeted(),
                Arc::new(|_dom, _msg| Outcome::Success),
            )
            .unwrap();

        let spec = registry
            .lookup(&CommandKind::Custom("spin".to_string()))
            .unwrap();
        assert!(spec.effect.is_some());
        assert!(spec.schema.requires_target);
    }
}
