//! Dispatcher behavior against an in-memory DOM: effects, outcomes,
//! conditions, bindings, and form reset.

use std::sync::Arc;

use dombridge::{
    Command, CommandKind, CommandMessage, CommandRegistry, CommandSchema, Dispatcher, Dom,
    Encoder, MemoryDom, Outcome,
};

fn registry() -> Arc<CommandRegistry> {
    Arc::new(CommandRegistry::builtin())
}

struct Fixture {
    encoder: Encoder,
    dispatcher: Dispatcher<MemoryDom>,
}

impl Fixture {
    fn new(dom: MemoryDom) -> Self {
        let registry = registry();
        Self {
            encoder: Encoder::new(Arc::clone(&registry)),
            dispatcher: Dispatcher::new(registry, dom),
        }
    }

    fn dispatch(&mut self, command: Command) -> Outcome {
        let message = self.encoder.encode(&command).expect("command encodes");
        self.dispatcher.handle(message).outcome
    }
}

#[test]
fn test_enable_disable_set_and_clear_disabled_state() {
    let mut dom = MemoryDom::new();
    dom.insert("submit");
    let mut fx = Fixture::new(dom);

    assert_eq!(fx.dispatch(Command::disable("submit")), Outcome::Success);
    assert!(!fx.dispatcher.dom().is_enabled("submit"));

    assert_eq!(fx.dispatch(Command::enable("submit")), Outcome::Success);
    assert!(fx.dispatcher.dom().is_enabled("submit"));

    // Enabling an already-enabled element is an observable no-op.
    assert_eq!(fx.dispatch(Command::enable("submit")), Outcome::Success);
    assert!(fx.dispatcher.dom().is_enabled("submit"));
}

#[test]
fn test_show_hide_and_content_commands() {
    let mut dom = MemoryDom::new();
    dom.insert("advanced");
    let mut fx = Fixture::new(dom);

    assert_eq!(fx.dispatch(Command::hide("advanced")), Outcome::Success);
    assert!(!fx.dispatcher.dom().is_visible("advanced"));
    assert_eq!(fx.dispatch(Command::show("advanced")), Outcome::Success);
    assert!(fx.dispatcher.dom().is_visible("advanced"));

    assert_eq!(
        fx.dispatch(Command::html("advanced", "<p>options</p>")),
        Outcome::Success
    );
    assert_eq!(
        fx.dispatcher.dom().element("advanced").unwrap().inner_html,
        "<p>options</p>"
    );

    assert_eq!(
        fx.dispatch(Command::text("advanced", "plain")),
        Outcome::Success
    );
    assert_eq!(fx.dispatcher.dom().element("advanced").unwrap().text, "plain");
}

#[test]
fn test_missing_target_reports_element_not_found_without_side_effects() {
    let mut dom = MemoryDom::new();
    dom.insert("other");
    let mut fx = Fixture::new(dom);

    for command in [
        Command::show("ghost"),
        Command::disable("ghost"),
        Command::add_class("ghost", "big"),
        Command::html("ghost", "<p>hi</p>"),
        Command::reset("ghost"),
    ] {
        assert_eq!(fx.dispatch(command), Outcome::ElementNotFound);
    }

    // No mutation leaked to the element that does exist.
    let other = fx.dispatcher.dom().element("other").unwrap();
    assert!(other.visible);
    assert!(other.enabled);
    assert!(other.classes.is_empty());
    assert!(other.inner_html.is_empty());
}

#[test]
fn test_conditional_round_trips_restore_initial_state() {
    let mut dom = MemoryDom::new();
    dom.insert("submit");
    dom.insert("myapp");
    dom.insert("advanced");
    let mut fx = Fixture::new(dom);

    // Start disabled; enable then disable lands exactly where it started.
    fx.dispatch(Command::disable("submit"));
    fx.dispatch(Command::toggle_state("submit").condition(true));
    fx.dispatch(Command::toggle_state("submit").condition(false));
    assert!(!fx.dispatcher.dom().is_enabled("submit"));

    fx.dispatch(Command::toggle_class("myapp", "big").condition(true));
    fx.dispatch(Command::toggle_class("myapp", "big").condition(false));
    assert!(!fx.dispatcher.dom().has_class("myapp", "big"));

    fx.dispatch(Command::toggle("advanced").condition(true));
    fx.dispatch(Command::toggle("advanced").condition(false));
    assert!(!fx.dispatcher.dom().is_visible("advanced"));
}

#[test]
fn test_unconditioned_toggle_flips_current_state() {
    let mut dom = MemoryDom::new();
    dom.insert("advanced");
    let mut fx = Fixture::new(dom);

    assert!(fx.dispatcher.dom().is_visible("advanced"));
    fx.dispatch(Command::toggle("advanced"));
    assert!(!fx.dispatcher.dom().is_visible("advanced"));
    fx.dispatch(Command::toggle("advanced"));
    assert!(fx.dispatcher.dom().is_visible("advanced"));

    fx.dispatch(Command::toggle_state("advanced"));
    assert!(!fx.dispatcher.dom().is_enabled("advanced"));
    fx.dispatch(Command::toggle_state("advanced"));
    assert!(fx.dispatcher.dom().is_enabled("advanced"));
}

#[test]
fn test_add_class_twice_is_deduplicated() {
    let mut dom = MemoryDom::new();
    dom.insert("myapp");
    let mut fx = Fixture::new(dom);

    assert_eq!(fx.dispatch(Command::add_class("myapp", "big")), Outcome::Success);
    assert_eq!(fx.dispatch(Command::add_class("myapp", "big")), Outcome::Success);
    assert_eq!(fx.dispatcher.dom().element("myapp").unwrap().classes, ["big"]);
}

#[test]
fn test_reset_restores_mount_time_values() {
    let mut dom = MemoryDom::new();
    dom.insert("signup");
    dom.insert_control("signup", "name", "ada");
    dom.insert_control("signup", "email", "ada@example.com");
    let mut fx = Fixture::new(dom);
    fx.dispatcher.mount_form("signup");

    // Arbitrary user edits between mount and reset.
    fx.dispatcher.dom_mut().set_control_value("name", "grace");
    fx.dispatcher.dom_mut().set_control_value("name", "edsger");
    fx.dispatcher.dom_mut().set_control_value("email", "nobody@example.com");

    assert_eq!(fx.dispatch(Command::reset("signup")), Outcome::Success);
    assert_eq!(
        fx.dispatcher.dom().control_value("name").as_deref(),
        Some("ada")
    );
    assert_eq!(
        fx.dispatcher.dom().control_value("email").as_deref(),
        Some("ada@example.com")
    );
}

#[test]
fn test_reset_without_mount_snapshot_leaves_values() {
    let mut dom = MemoryDom::new();
    dom.insert("signup");
    dom.insert_control("signup", "name", "ada");
    let mut fx = Fixture::new(dom);

    fx.dispatcher.dom_mut().set_control_value("name", "grace");
    let message = fx.encoder.encode(&Command::reset("signup")).unwrap();
    let ack = fx.dispatcher.handle(message);

    assert_eq!(ack.outcome, Outcome::Success);
    assert!(ack.detail.unwrap().contains("snapshot"));
    assert_eq!(
        fx.dispatcher.dom().control_value("name").as_deref(),
        Some("grace")
    );
}

#[test]
fn test_bound_click_flips_visibility_once_per_firing() {
    let mut dom = MemoryDom::new();
    dom.insert("toggleAdvanced");
    dom.insert("advanced");
    let mut fx = Fixture::new(dom);

    assert_eq!(
        fx.dispatch(Command::bind(
            "toggleAdvanced",
            "click",
            Command::toggle("advanced"),
        )),
        Outcome::Success
    );
    assert_eq!(fx.dispatcher.bindings().len(), 1);

    assert!(fx.dispatcher.dom().is_visible("advanced"));
    let acks = fx.dispatcher.fire_event("toggleAdvanced", "click");
    assert_eq!(acks.len(), 1);
    assert_eq!(acks[0].outcome, Outcome::Success);
    assert!(!fx.dispatcher.dom().is_visible("advanced"));

    fx.dispatcher.fire_event("toggleAdvanced", "click");
    assert!(fx.dispatcher.dom().is_visible("advanced"));

    // An unrelated event fires nothing.
    assert!(fx.dispatcher.fire_event("toggleAdvanced", "change").is_empty());
}

#[test]
fn test_multiple_bindings_fire_in_registration_order() {
    let mut dom = MemoryDom::new();
    dom.insert("button");
    dom.insert("panel");
    let mut fx = Fixture::new(dom);

    fx.dispatch(Command::bind(
        "button",
        "click",
        Command::add_class("panel", "first"),
    ));
    fx.dispatch(Command::bind(
        "button",
        "click",
        Command::add_class("panel", "second"),
    ));

    fx.dispatcher.fire_event("button", "click");
    assert_eq!(
        fx.dispatcher.dom().element("panel").unwrap().classes,
        ["first", "second"]
    );
}

#[test]
fn test_binding_survives_target_removal_as_element_not_found() {
    let mut dom = MemoryDom::new();
    dom.insert("button");
    dom.insert("advanced");
    let mut fx = Fixture::new(dom);

    fx.dispatch(Command::bind(
        "button",
        "click",
        Command::toggle("advanced"),
    ));

    // A host re-render removes the bound command's target.
    fx.dispatcher.dom_mut().remove("advanced");
    let acks = fx.dispatcher.fire_event("button", "click");
    assert_eq!(acks.len(), 1);
    assert_eq!(acks[0].outcome, Outcome::ElementNotFound);
}

#[test]
fn test_alert_and_inline_css_are_global_and_accumulative() {
    let mut fx = Fixture::new(MemoryDom::new());

    assert_eq!(fx.dispatch(Command::alert("saved")), Outcome::Success);
    assert_eq!(
        fx.dispatch(Command::inline_css(".big { font-size: 2em; }")),
        Outcome::Success
    );
    assert_eq!(
        fx.dispatch(Command::inline_css(".hidden { display: none; }")),
        Outcome::Success
    );

    assert_eq!(fx.dispatcher.dom().alerts(), ["saved"]);
    assert_eq!(fx.dispatcher.dom().style_rules().len(), 2);
}

#[test]
fn test_custom_command_dispatches_through_registered_effect() {
    let registry = registry();
    registry
        .register_custom(
            "spin",
            CommandSchema::targeted(),
            Arc::new(|dom, message| {
                let target = message.target.as_deref().unwrap_or_default();
                dom.add_class(target, "spinning");
                Outcome::Success
            }),
        )
        .unwrap();

    let mut dom = MemoryDom::new();
    dom.insert("wheel");
    let encoder = Encoder::new(Arc::clone(&registry));
    let mut dispatcher = Dispatcher::new(registry, dom);

    let message = encoder
        .encode(&Command::new(CommandKind::Custom("spin".to_string())).target("wheel"))
        .unwrap();
    let ack = dispatcher.handle(message);
    assert_eq!(ack.outcome, Outcome::Success);
    assert!(dispatcher.dom().has_class("wheel", "spinning"));
}

#[test]
fn test_foreign_wire_messages_fail_soft() {
    let mut dom = MemoryDom::new();
    dom.insert("myapp");
    let mut fx = Fixture::new(dom);

    // Unknown command name from a foreign encoder.
    let unknown: CommandMessage = serde_json::from_value(serde_json::json!({
        "commandId": "cmd-100",
        "command": "sparkle",
        "target": "myapp"
    }))
    .unwrap();
    assert_eq!(fx.dispatcher.handle(unknown).outcome, Outcome::UnknownCommand);

    // Known command with a missing required parameter.
    let missing_class: CommandMessage = serde_json::from_value(serde_json::json!({
        "commandId": "cmd-101",
        "command": "addClass",
        "target": "myapp"
    }))
    .unwrap();
    assert_eq!(
        fx.dispatcher.handle(missing_class).outcome,
        Outcome::InvalidParams
    );

    // A later command still dispatches; bad commands never stall the
    // session.
    assert_eq!(fx.dispatch(Command::add_class("myapp", "big")), Outcome::Success);
    assert!(fx.dispatcher.dom().has_class("myapp", "big"));
}
