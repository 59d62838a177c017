//! Condition evaluation for the conditional commands.
//!
//! One pure evaluator serves all three conditional commands instead of
//! three bespoke branches: toggleState selects enable/disable, toggleClass
//! selects add/remove, toggle selects show/hide.

use crate::effect::Effect;

/// Selects one of two effects from a boolean. Deterministic and pure; the
/// boolean was computed by the backend at issuance time.
pub fn resolve<E>(condition: bool, on_true: E, on_false: E) -> E {
    if condition { on_true } else { on_false }
}

/// The (on_true, on_false) effect pair for a conditional command's wire
/// parameters.
pub fn toggle_branches(animate: bool) -> (Effect, Effect) {
    (Effect::Show { animate }, Effect::Hide { animate })
}

pub fn toggle_class_branches(class: &str) -> (Effect, Effect) {
    (
        Effect::AddClass(class.to_string()),
        Effect::RemoveClass(class.to_string()),
    )
}

pub fn toggle_state_branches() -> (Effect, Effect) {
    (Effect::Enable, Effect::Disable)
}
