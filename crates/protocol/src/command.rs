//! The command catalog as it appears on the wire.

use serde::{Deserialize, Serialize};

/// Named UI mutation commands understood by a frontend dispatcher.
///
/// The built-in variants form a closed catalog; `Custom` carries any other
/// name so that registry-extended commands share the same wire shape. Wire
/// names are camelCase strings (`"addClass"`, `"inlineCss"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CommandKind {
    /// Make the target element visible.
    Show,
    /// Hide the target element.
    Hide,
    /// Flip the target's visibility, or pick show/hide from a condition.
    Toggle,
    /// Add a CSS class to the target's class list.
    AddClass,
    /// Remove a CSS class from the target's class list.
    RemoveClass,
    /// Flip a CSS class, or pick add/remove from a condition.
    ToggleClass,
    /// Clear the target's disabled state.
    Enable,
    /// Set the target's disabled state.
    Disable,
    /// Flip the target's enabled state, or pick enable/disable from a condition.
    ToggleState,
    /// Replace the target's inner HTML.
    Html,
    /// Replace the target's text content.
    Text,
    /// Register an event binding that dispatches a nested command on firing.
    Bind,
    /// Restore a form's controls to their mount-time values.
    Reset,
    /// Show a modal alert. Global; takes no target.
    Alert,
    /// Append rules to the session's stylesheet. Global; takes no target.
    InlineCss,
    /// A registry-extended command identified by name.
    Custom(String),
}

impl CommandKind {
    /// Returns the wire name for this command.
    pub fn as_str(&self) -> &str {
        match self {
            CommandKind::Show => "show",
            CommandKind::Hide => "hide",
            CommandKind::Toggle => "toggle",
            CommandKind::AddClass => "addClass",
            CommandKind::RemoveClass => "removeClass",
            CommandKind::ToggleClass => "toggleClass",
            CommandKind::Enable => "enable",
            CommandKind::Disable => "disable",
            CommandKind::ToggleState => "toggleState",
            CommandKind::Html => "html",
            CommandKind::Text => "text",
            CommandKind::Bind => "bind",
            CommandKind::Reset => "reset",
            CommandKind::Alert => "alert",
            CommandKind::InlineCss => "inlineCss",
            CommandKind::Custom(name) => name,
        }
    }

    /// Whether this is one of the built-in catalog commands.
    pub fn is_builtin(&self) -> bool {
        !matches!(self, CommandKind::Custom(_))
    }

    /// All built-in catalog commands, in catalog order.
    pub fn builtins() -> [CommandKind; 15] {
        [
            CommandKind::Show,
            CommandKind::Hide,
            CommandKind::Toggle,
            CommandKind::AddClass,
            CommandKind::RemoveClass,
            CommandKind::ToggleClass,
            CommandKind::Enable,
            CommandKind::Disable,
            CommandKind::ToggleState,
            CommandKind::Html,
            CommandKind::Text,
            CommandKind::Bind,
            CommandKind::Reset,
            CommandKind::Alert,
            CommandKind::InlineCss,
        ]
    }
}

impl From<String> for CommandKind {
    fn from(name: String) -> Self {
        match name.as_str() {
            "show" => CommandKind::Show,
            "hide" => CommandKind::Hide,
            "toggle" => CommandKind::Toggle,
            "addClass" => CommandKind::AddClass,
            "removeClass" => CommandKind::RemoveClass,
            "toggleClass" => CommandKind::ToggleClass,
            "enable" => CommandKind::Enable,
            "disable" => CommandKind::Disable,
            "toggleState" => CommandKind::ToggleState,
            "html" => CommandKind::Html,
            "text" => CommandKind::Text,
            "bind" => CommandKind::Bind,
            "reset" => CommandKind::Reset,
            "alert" => CommandKind::Alert,
            "inlineCss" => CommandKind::InlineCss,
            _ => CommandKind::Custom(name),
        }
    }
}

impl From<CommandKind> for String {
    fn from(kind: CommandKind) -> Self {
        kind.as_str().to_string()
    }
}

impl std::fmt::Display for CommandKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
