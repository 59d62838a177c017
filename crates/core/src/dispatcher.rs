//! The frontend dispatcher: command messages in, DOM effects out.
//!
//! # Dispatch Steps
//!
//! 1. Look up the command in the registry - `UnknownCommand` if absent
//! 2. Resolve the target against the current DOM - `ElementNotFound` if
//!    absent, except for targetless commands
//! 3. If a condition is present, select the branch via the condition
//!    evaluator
//! 4. Apply the DOM effect and ack
//!
//! Dispatch-time failures become acknowledgement outcomes, never panics;
//! one bad command must not stall the session. Effects are confined to the
//! target subtree except alert (global) and inlineCss (global stylesheet,
//! accumulative).

use std::collections::HashMap;
use std::sync::Arc;

use dombridge_protocol::{AckMessage, CommandKind, CommandMessage, Outcome};
use dombridge_runtime::CommandHandler;
use serde_json::Value;

use crate::bindings::{BindingEntry, BindingHandle, BindingTable};
use crate::condition;
use crate::dom::Dom;
use crate::effect::Effect;
use crate::registry::CommandRegistry;

/// Form-control values captured at mount time, consumed only by `reset`.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct FormSnapshot {
    values: Vec<(String, String)>,
}

/// Failure surface of one dispatch step: the outcome to ack plus a detail
/// string for the backend's logs.
type StepError = (Outcome, String);

/// Executes incoming commands against a [`Dom`].
///
/// The dispatcher is the only component that mutates the DOM; backend logic
/// reaches it exclusively through commands. It owns the binding table and
/// the mount-time form snapshots.
pub struct Dispatcher<D: Dom> {
    registry: Arc<CommandRegistry>,
    dom: D,
    bindings: BindingTable,
    form_snapshots: HashMap<String, FormSnapshot>,
}

impl<D: Dom> Dispatcher<D> {
    pub fn new(registry: Arc<CommandRegistry>, dom: D) -> Self {
        Self {
            registry,
            dom,
            bindings: BindingTable::new(),
            form_snapshots: HashMap::new(),
        }
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    pub fn dom_mut(&mut self) -> &mut D {
        &mut self.dom
    }

    pub fn bindings(&self) -> &BindingTable {
        &self.bindings
    }

    /// Captures the current values of `form`'s controls as the snapshot
    /// `reset` will restore. The host calls this when it mounts the form.
    pub fn mount_form(&mut self, form: &str) {
        let values = self
            .dom
            .form_controls(form)
            .into_iter()
            .filter_map(|id| {
                let value = self.dom.control_value(&id)?;
                Some((id, value))
            })
            .collect();
        self.form_snapshots
            .insert(form.to_string(), FormSnapshot { values });
    }

    /// Removes a binding registered through a `bind` command. Idempotent.
    pub fn unbind(&mut self, handle: BindingHandle) {
        self.bindings.unbind(handle);
    }

    /// Delivers a frontend event: every command bound to this
    /// (element, event) pair dispatches exactly once, in registration
    /// order.
    pub fn fire_event(&mut self, source: &str, event: &str) -> Vec<AckMessage> {
        self.bindings
            .matches(source, event)
            .into_iter()
            .map(|message| self.handle(message))
            .collect()
    }

    /// Dispatches one command message and produces its acknowledgement.
    pub fn handle(&mut self, message: CommandMessage) -> AckMessage {
        let command_id = message.command_id.clone();
        match self.apply(&message) {
            Ok(None) => AckMessage::success(command_id),
            Ok(Some(detail)) => AckMessage {
                command_id,
                outcome: Outcome::Success,
                detail: Some(detail),
            },
            Err((outcome, detail)) => {
                tracing::debug!(
                    target: "dombridge.dispatch",
                    command = %message.command,
                    ?outcome,
                    detail,
                    "dispatch failed"
                );
                AckMessage::failure(command_id, outcome, detail)
            }
        }
    }

    fn apply(&mut self, message: &CommandMessage) -> Result<Option<String>, StepError> {
        let Ok(spec) = self.registry.lookup(&message.command) else {
            return Err((
                Outcome::UnknownCommand,
                format!("no command `{}` in registry", message.command),
            ));
        };

        let target = if spec.schema.requires_target {
            let Some(target) = message.target.as_deref().filter(|t| !t.is_empty()) else {
                return Err((Outcome::InvalidParams, "missing target".to_string()));
            };
            if !self.dom.contains(target) {
                return Err((Outcome::ElementNotFound, format!("no element `{target}`")));
            }
            Some(target)
        } else {
            None
        };

        if let Some(effect) = &spec.effect {
            return match effect(&mut self.dom, message) {
                Outcome::Success => Ok(None),
                outcome => Err((outcome, format!("custom `{}` failed", message.command))),
            };
        }

        match &message.command {
            CommandKind::Show => {
                let animate = bool_param(message, "anim")?.unwrap_or(false);
                Effect::Show { animate }.apply(&mut self.dom, required(target)?);
            }
            CommandKind::Hide => {
                let animate = bool_param(message, "anim")?.unwrap_or(false);
                Effect::Hide { animate }.apply(&mut self.dom, required(target)?);
            }
            CommandKind::Toggle => {
                let target = required(target)?;
                let animate = bool_param(message, "anim")?.unwrap_or(false);
                let (on_true, on_false) = condition::toggle_branches(animate);
                let selected = match message.condition {
                    Some(c) => condition::resolve(c, on_true, on_false),
                    None => condition::resolve(!self.dom.is_visible(target), on_true, on_false),
                };
                selected.apply(&mut self.dom, target);
            }
            CommandKind::AddClass => {
                let class = str_param(message, "class")?;
                Effect::AddClass(class.to_string()).apply(&mut self.dom, required(target)?);
            }
            CommandKind::RemoveClass => {
                let class = str_param(message, "class")?;
                Effect::RemoveClass(class.to_string()).apply(&mut self.dom, required(target)?);
            }
            CommandKind::ToggleClass => {
                let target = required(target)?;
                let class = str_param(message, "class")?;
                let (on_true, on_false) = condition::toggle_class_branches(class);
                let selected = match message.condition {
                    Some(c) => condition::resolve(c, on_true, on_false),
                    None => {
                        condition::resolve(!self.dom.has_class(target, class), on_true, on_false)
                    }
                };
                selected.apply(&mut self.dom, target);
            }
            CommandKind::Enable => {
                Effect::Enable.apply(&mut self.dom, required(target)?);
            }
            CommandKind::Disable => {
                Effect::Disable.apply(&mut self.dom, required(target)?);
            }
            CommandKind::ToggleState => {
                let target = required(target)?;
                let (on_true, on_false) = condition::toggle_state_branches();
                let selected = match message.condition {
                    Some(c) => condition::resolve(c, on_true, on_false),
                    None => condition::resolve(!self.dom.is_enabled(target), on_true, on_false),
                };
                selected.apply(&mut self.dom, target);
            }
            CommandKind::Html => {
                let content = str_param(message, "content")?;
                self.dom.set_inner_html(required(target)?, content);
            }
            CommandKind::Text => {
                let content = str_param(message, "content")?;
                self.dom.set_text(required(target)?, content);
            }
            CommandKind::Bind => {
                let target = required(target)?;
                let event = str_param(message, "event")?;
                let nested_value = message.params.get("command").ok_or_else(|| {
                    (Outcome::InvalidParams, "missing bound command".to_string())
                })?;
                let nested: CommandMessage = serde_json::from_value(nested_value.clone())
                    .map_err(|e| {
                        (
                            Outcome::InvalidParams,
                            format!("malformed bound command: {e}"),
                        )
                    })?;
                self.bindings.bind(BindingEntry {
                    source: target.to_string(),
                    trigger_event: event.to_string(),
                    command: nested,
                });
            }
            CommandKind::Reset => {
                let form = required(target)?;
                match self.form_snapshots.get(form) {
                    Some(snapshot) => {
                        for (id, value) in &snapshot.values {
                            self.dom.set_control_value(id, value);
                        }
                    }
                    None => {
                        tracing::warn!(
                            target: "dombridge.dispatch",
                            form,
                            "reset without a mount-time snapshot; values left as-is"
                        );
                        return Ok(Some("no mount-time snapshot for form".to_string()));
                    }
                }
            }
            CommandKind::Alert => {
                let text = str_param(message, "message")?;
                self.dom.alert(text);
            }
            CommandKind::InlineCss => {
                let rules = str_param(message, "rules")?;
                self.dom.append_style_rules(rules);
            }
            CommandKind::Custom(name) => {
                return Err((
                    Outcome::UnknownCommand,
                    format!("no effect registered for `{name}`"),
                ));
            }
        }
        Ok(None)
    }
}

impl<D: Dom> CommandHandler for Dispatcher<D> {
    fn handle(&mut self, message: CommandMessage) -> AckMessage {
        Dispatcher::handle(self, message)
    }
}

/// The registry schema guarantees a target for every built-in that reaches
/// here; this guards wire messages produced by a foreign encoder.
fn required(target: Option<&str>) -> Result<&str, StepError> {
    target.ok_or_else(|| (Outcome::InvalidParams, "missing target".to_string()))
}

fn bool_param(message: &CommandMessage, name: &str) -> Result<Option<bool>, StepError> {
    match message.params.get(name) {
        None => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(_) => Err((
            Outcome::InvalidParams,
            format!("parameter `{name}` must be a boolean"),
        )),
    }
}

fn str_param<'a>(message: &'a CommandMessage, name: &str) -> Result<&'a str, StepError> {
    message
        .params
        .get(name)
        .and_then(Value::as_str)
        .ok_or_else(|| {
            (
                Outcome::InvalidParams,
                format!("missing or non-string parameter `{name}`"),
            )
        })
}
