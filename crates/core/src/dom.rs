//! The DOM access seam and an in-memory implementation.
//!
//! [`Dom`] is the contract the host framework fulfills: element lookup,
//! attribute and class mutation, content replacement, form control values,
//! and the two global surfaces (alert, stylesheet). The dispatcher is the
//! only component that calls it; backend logic never touches the DOM
//! except through commands.
//!
//! [`MemoryDom`] is an in-memory implementation shipped in src (not behind
//! `cfg(test)`) so integration tests and host prototypes can run the whole
//! bridge without a browser.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

/// DOM access layer provided by the host framework.
///
/// Mutations on a missing id must be silent no-ops; the dispatcher checks
/// [`Dom::contains`] first and reports `ElementNotFound` itself.
pub trait Dom: Send {
    /// Whether an element with this id exists in the current DOM.
    fn contains(&self, id: &str) -> bool;

    fn set_visible(&mut self, id: &str, visible: bool, animate: bool);
    fn is_visible(&self, id: &str) -> bool;

    /// Adds `class` to the element's class list. Class lists have set
    /// semantics; adding a present class is a no-op.
    fn add_class(&mut self, id: &str, class: &str);
    fn remove_class(&mut self, id: &str, class: &str);
    fn has_class(&self, id: &str, class: &str) -> bool;

    fn set_enabled(&mut self, id: &str, enabled: bool);
    fn is_enabled(&self, id: &str) -> bool;

    fn set_inner_html(&mut self, id: &str, html: &str);
    fn set_text(&mut self, id: &str, text: &str);

    /// Ids of the form-control descendants of `form`.
    fn form_controls(&self, form: &str) -> Vec<String>;
    fn control_value(&self, id: &str) -> Option<String>;
    fn set_control_value(&mut self, id: &str, value: &str);

    /// Shows a modal alert. Global; not tied to any element.
    fn alert(&mut self, message: &str);

    /// Appends rules to the session stylesheet. Accumulative: repeated
    /// calls add rules, they never replace earlier ones.
    fn append_style_rules(&mut self, rules: &str);
}

/// One element in a [`MemoryDom`].
#[derive(Debug, Clone)]
pub struct MemoryElement {
    pub visible: bool,
    pub enabled: bool,
    pub classes: Vec<String>,
    pub inner_html: String,
    pub text: String,
    pub value: Option<String>,
    /// Set on form controls: the id of the owning form.
    pub form: Option<String>,
}

impl Default for MemoryElement {
    fn default() -> Self {
        Self {
            visible: true,
            enabled: true,
            classes: Vec::new(),
            inner_html: String::new(),
            text: String::new(),
            value: None,
            form: None,
        }
    }
}

/// In-memory DOM for tests and host prototypes.
#[derive(Debug, Default)]
pub struct MemoryDom {
    elements: HashMap<String, MemoryElement>,
    alerts: Vec<String>,
    stylesheet: Vec<String>,
}

impl MemoryDom {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an element with default state (visible, enabled).
    pub fn insert(&mut self, id: impl Into<String>) {
        self.elements.insert(id.into(), MemoryElement::default());
    }

    /// Inserts a form control owned by `form`, with its initial value.
    pub fn insert_control(
        &mut self,
        form: impl Into<String>,
        id: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.elements.insert(
            id.into(),
            MemoryElement {
                value: Some(value.into()),
                form: Some(form.into()),
                ..MemoryElement::default()
            },
        );
    }

    /// Removes an element, as a host re-render would.
    pub fn remove(&mut self, id: &str) {
        self.elements.remove(id);
    }

    pub fn element(&self, id: &str) -> Option<&MemoryElement> {
        self.elements.get(id)
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    pub fn style_rules(&self) -> &[String] {
        &self.stylesheet
    }
}

impl Dom for MemoryDom {
    fn contains(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    fn set_visible(&mut self, id: &str, visible: bool, _animate: bool) {
        if let Some(el) = self.elements.get_mut(id) {
            el.visible = visible;
        }
    }

    fn is_visible(&self, id: &str) -> bool {
        self.elements.get(id).is_some_and(|el| el.visible)
    }

    fn add_class(&mut self, id: &str, class: &str) {
        if let Some(el) = self.elements.get_mut(id) {
            if !el.classes.iter().any(|c| c == class) {
                el.classes.push(class.to_string());
            }
        }
    }

    fn remove_class(&mut self, id: &str, class: &str) {
        if let Some(el) = self.elements.get_mut(id) {
            el.classes.retain(|c| c != class);
        }
    }

    fn has_class(&self, id: &str, class: &str) -> bool {
        self.elements
            .get(id)
            .is_some_and(|el| el.classes.iter().any(|c| c == class))
    }

    fn set_enabled(&mut self, id: &str, enabled: bool) {
        if let Some(el) = self.elements.get_mut(id) {
            el.enabled = enabled;
        }
    }

    fn is_enabled(&self, id: &str) -> bool {
        self.elements.get(id).is_some_and(|el| el.enabled)
    }

    fn set_inner_html(&mut self, id: &str, html: &str) {
        if let Some(el) = self.elements.get_mut(id) {
            el.inner_html = html.to_string();
        }
    }

    fn set_text(&mut self, id: &str, text: &str) {
        if let Some(el) = self.elements.get_mut(id) {
            el.text = text.to_string();
        }
    }

    fn form_controls(&self, form: &str) -> Vec<String> {
        let mut controls: Vec<String> = self
            .elements
            .iter()
            .filter(|(_, el)| el.form.as_deref() == Some(form))
            .map(|(id, _)| id.clone())
            .collect();
        controls.sort();
        controls
    }

    fn control_value(&self, id: &str) -> Option<String> {
        self.elements.get(id).and_then(|el| el.value.clone())
    }

    fn set_control_value(&mut self, id: &str, value: &str) {
        if let Some(el) = self.elements.get_mut(id) {
            el.value = Some(value.to_string());
        }
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn append_style_rules(&mut self, rules: &str) {
        self.stylesheet.push(rules.to_string());
    }
}

/// Clonable handle over a [`MemoryDom`], so a test can keep inspecting the
/// DOM after moving a dispatcher into a running session link.
#[derive(Clone, Default)]
pub struct SharedMemoryDom(Arc<Mutex<MemoryDom>>);

impl SharedMemoryDom {
    pub fn new(dom: MemoryDom) -> Self {
        Self(Arc::new(Mutex::new(dom)))
    }

    pub fn lock(&self) -> MutexGuard<'_, MemoryDom> {
        self.0.lock()
    }
}

impl Dom for SharedMemoryDom {
    fn contains(&self, id: &str) -> bool {
        self.0.lock().contains(id)
    }

    fn set_visible(&mut self, id: &str, visible: bool, animate: bool) {
        self.0.lock().set_visible(id, visible, animate);
    }

    fn is_visible(&self, id: &str) -> bool {
        self.0.lock().is_visible(id)
    }

    fn add_class(&mut self, id: &str, class: &str) {
        self.0.lock().add_class(id, class);
    }

    fn remove_class(&mut self, id: &str, class: &str) {
        self.0.lock().remove_class(id, class);
    }

    fn has_class(&self, id: &str, class: &str) -> bool {
        self.0.lock().has_class(id, class)
    }

    fn set_enabled(&mut self, id: &str, enabled: bool) {
        self.0.lock().set_enabled(id, enabled);
    }

    fn is_enabled(&self, id: &str) -> bool {
        self.0.lock().is_enabled(id)
    }

    fn set_inner_html(&mut self, id: &str, html: &str) {
        self.0.lock().set_inner_html(id, html);
    }

    fn set_text(&mut self, id: &str, text: &str) {
        self.0.lock().set_text(id, text);
    }

    fn form_controls(&self, form: &str) -> Vec<String> {
        self.0.lock().form_controls(form)
    }

    fn control_value(&self, id: &str) -> Option<String> {
        self.0.lock().control_value(id)
    }

    fn set_control_value(&mut self, id: &str, value: &str) {
        self.0.lock().set_control_value(id, value);
    }

    fn alert(&mut self, message: &str) {
        self.0.lock().alert(message);
    }

    fn append_style_rules(&mut self, rules: &str) {
        self.0.lock().append_style_rules(rules);
    }
}
