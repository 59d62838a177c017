//! Backend-side command construction.
//!
//! A [`Command`] is the unencoded form of a UI mutation request: kind,
//! target, params, optional condition, and (for `bind`) a nested command.
//! It is immutable once handed to the encoder and consumed exactly once.

use dombridge_protocol::CommandKind;
use serde_json::{Map, Value};

/// A named, parameterized UI mutation request.
///
/// Catalog constructors cover the common shapes; `param` and `condition`
/// refine them. Validation happens at encode time, not here.
#[derive(Debug, Clone)]
pub struct Command {
    kind: CommandKind,
    target: Option<String>,
    params: Map<String, Value>,
    condition: Option<bool>,
    nested: Option<Box<Command>>,
}

impl Command {
    pub fn new(kind: CommandKind) -> Self {
        Self {
            kind,
            target: None,
            params: Map::new(),
            condition: None,
            nested: None,
        }
    }

    /// Sets the target element.
    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Sets a named parameter.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Sets the condition for a conditional command. The boolean is
    /// computed by the backend before encoding; the frontend never pulls
    /// live backend state.
    pub fn condition(mut self, condition: bool) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Sets the `anim` flag on show/hide/toggle.
    pub fn animated(self, animate: bool) -> Self {
        self.param("anim", animate)
    }

    pub fn kind(&self) -> &CommandKind {
        &self.kind
    }

    pub fn target_ref(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn params(&self) -> &Map<String, Value> {
        &self.params
    }

    pub fn condition_value(&self) -> Option<bool> {
        self.condition
    }

    pub fn nested(&self) -> Option<&Command> {
        self.nested.as_deref()
    }

    // Catalog constructors, 1:1 with the built-in registry.

    pub fn show(target: impl Into<String>) -> Self {
        Self::new(CommandKind::Show).target(target)
    }

    pub fn hide(target: impl Into<String>) -> Self {
        Self::new(CommandKind::Hide).target(target)
    }

    pub fn toggle(target: impl Into<String>) -> Self {
        Self::new(CommandKind::Toggle).target(target)
    }

    pub fn add_class(target: impl Into<String>, class: impl Into<String>) -> Self {
        Self::new(CommandKind::AddClass)
            .target(target)
            .param("class", class.into())
    }

    pub fn remove_class(target: impl Into<String>, class: impl Into<String>) -> Self {
        Self::new(CommandKind::RemoveClass)
            .target(target)
            .param("class", class.into())
    }

    pub fn toggle_class(target: impl Into<String>, class: impl Into<String>) -> Self {
        Self::new(CommandKind::ToggleClass)
            .target(target)
            .param("class", class.into())
    }

    pub fn enable(target: impl Into<String>) -> Self {
        Self::new(CommandKind::Enable).target(target)
    }

    pub fn disable(target: impl Into<String>) -> Self {
        Self::new(CommandKind::Disable).target(target)
    }

    /// Conditional enable/disable: condition true enables, false disables.
    pub fn toggle_state(target: impl Into<String>) -> Self {
        Self::new(CommandKind::ToggleState).target(target)
    }

    pub fn html(target: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(CommandKind::Html)
            .target(target)
            .param("content", content.into())
    }

    pub fn text(target: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(CommandKind::Text)
            .target(target)
            .param("content", content.into())
    }

    pub fn reset(form: impl Into<String>) -> Self {
        Self::new(CommandKind::Reset).target(form)
    }

    /// Global modal alert; takes no target.
    pub fn alert(message: impl Into<String>) -> Self {
        Self::new(CommandKind::Alert).param("message", message.into())
    }

    /// Appends rules to the session stylesheet; takes no target.
    pub fn inline_css(rules: impl Into<String>) -> Self {
        Self::new(CommandKind::InlineCss).param("rules", rules.into())
    }

    /// Binds `command` to fire when `event` occurs at `source`.
    pub fn bind(
        source: impl Into<String>,
        event: impl Into<String>,
        command: Command,
    ) -> Self {
        let mut bind = Self::new(CommandKind::Bind)
            .target(source)
            .param("event", event.into());
        bind.nested = Some(Box::new(command));
        bind
    }
}
