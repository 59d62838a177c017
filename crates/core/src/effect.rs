//! Concrete binary-state effects applied to a target element.

use crate::dom::Dom;

/// A resolved DOM effect for the binary-state commands. The conditional
/// commands each select between a pair of these; the unconditional ones map
/// to a single variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Show { animate: bool },
    Hide { animate: bool },
    AddClass(String),
    RemoveClass(String),
    Enable,
    Disable,
}

impl Effect {
    /// Applies this effect to `target`. The caller has already verified
    /// the target exists.
    pub fn apply(&self, dom: &mut dyn Dom, target: &str) {
        match self {
            Effect::Show { animate } => dom.set_visible(target, true, *animate),
            Effect::Hide { animate } => dom.set_visible(target, false, *animate),
            Effect::AddClass(class) => dom.add_class(target, class),
            Effect::RemoveClass(class) => dom.remove_class(target, class),
            Effect::Enable => dom.set_enabled(target, true),
            Effect::Disable => dom.set_enabled(target, false),
        }
    }
}
