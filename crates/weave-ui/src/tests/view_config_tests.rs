use super::*;
use crate::component_view::{ComponentView, ViewAttributes};
use std::cell::Cell;
use weave_core::{Action, ActionWith};

use crate::dimension::{ComponentSize, Dimension, Point};
use crate::gestures::GestureEvent;

#[test]
fn attributes_keep_first_insertion_order() {
    let mut config = ViewConfig::new("Label");
    config.set("alpha", 0.5_f32);
    config.set("layer.corner_radius", 4.0_f32);
    config.set("alpha", 1.0_f32);

    let keys: Vec<String> = config.keys().map(ToString::to_string).collect();
    assert_eq!(keys, vec!["alpha", "layer.corner_radius"]);
    assert_eq!(config.get(&AttributeKey::view("alpha")), Some(&AttrValue::Float(1.0)));
}

#[test]
fn layer_keys_are_prefixed() {
    let view = ComponentView::new("Card")
        .background_color(Color::WHITE)
        .corner_radius(8.0)
        .border_width(1.0);

    let keys: Vec<String> = view.config().keys().map(ToString::to_string).collect();
    assert_eq!(
        keys,
        vec!["background_color", "layer.corner_radius", "layer.border_width"]
    );
    assert!(AttributeKey::from("layer.opacity").is_layer());
    assert!(!AttributeKey::from("opacity").is_layer());
}

#[test]
fn tap_handler_fires_with_event() {
    let hits = Rc::new(Cell::new(Point::default()));
    let seen = Rc::clone(&hits);
    let view = ComponentView::new("Button")
        .tap_handler(ActionWith::new(move |event: GestureEvent| seen.set(event.location)));

    let gesture = view.config().gesture(GestureKind::Tap).expect("tap gesture");
    gesture.fire(&GestureEvent::new(GestureKind::Tap, Point::new(3.0, 4.0)));

    assert_eq!(hits.get(), Point::new(3.0, 4.0));
    assert!(view.config().gesture(GestureKind::Pan).is_none());
}

#[test]
#[should_panic(expected = "expected a payload of type")]
fn gesture_rejects_foreign_payload() {
    let view = ComponentView::new("Button").pan_handler(ActionWith::new(|_: GestureEvent| {}));
    let gesture = view.config().gesture(GestureKind::Pan).expect("pan gesture");
    gesture.fire(&42_u8);
}

#[test]
fn on_tap_ignores_payload() {
    let taps = Rc::new(Cell::new(0));
    let counter = Rc::clone(&taps);
    let view =
        ComponentView::new("Button").on_tap(Action::new(move || counter.set(counter.get() + 1)));

    let gesture = view.config().gesture(GestureKind::Tap).expect("tap gesture");
    gesture.fire(&());
    gesture.fire(&GestureEvent::new(GestureKind::Tap, Point::default()));
    assert_eq!(taps.get(), 2);
}

#[test]
fn display_lists_class_and_attributes() {
    let config = ViewConfig::new("Label").with("text", "hi").with("alpha", 1.0_f32);
    assert_eq!(config.to_string(), r#"Label { text: "hi", alpha: 1 }"#);
}

#[test]
fn dimensions_display_units() {
    assert_eq!(Dimension::from(12).to_string(), "12pt");
    assert_eq!(Dimension::percent(50.0).to_string(), "50%");
    assert_eq!(Dimension::Auto.to_string(), "auto");
    assert_eq!(
        ComponentSize::points(10.0, 20.0).to_string(),
        "width: 10pt, height: 20pt"
    );
    assert_eq!(ComponentSize::default().to_string(), "unconstrained");
    assert_eq!(
        ComponentSize::relative(100.0, 50.0).height,
        Some(Dimension::Percent(50.0))
    );
}
