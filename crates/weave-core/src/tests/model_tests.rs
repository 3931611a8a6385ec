use super::*;
use std::cell::RefCell;
use std::time::Duration;

use crate::{Component, Inflater, Registry, TypeKey};

thread_local! {
    static CAPTURED: RefCell<Option<Model>> = RefCell::new(None);
}

#[derive(Clone)]
struct Probe;

impl Inflate for Probe {
    fn inflate(&self, inflater: &mut Inflater<'_>, model: Option<Model>) -> Component {
        CAPTURED.with(|slot| *slot.borrow_mut() = model.clone());
        inflater.attach_model(Component::empty(), TypeKey::of::<Probe>(), model)
    }
}

fn captured_after(root: &dyn Inflate) -> Model {
    let registry = Registry::new();
    Inflater::render(&registry, root);
    CAPTURED.with(|slot| slot.borrow_mut().take()).expect("model reached probe")
}

#[test]
fn lifecycle_entries_keep_declaration_order() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let first = Rc::clone(&log);
    let second = Rc::clone(&log);

    let model = captured_after(
        &Probe
            .on_will_mount(move || first.borrow_mut().push("f1"))
            .on_will_mount(move || second.borrow_mut().push("f2")),
    );

    assert_eq!(model.lifecycle.will_mount.len(), 2);
    for callback in &model.lifecycle.will_mount {
        callback();
    }
    assert_eq!(*log.borrow(), vec!["f1", "f2"]);
}

#[test]
fn animation_kinds_are_kept_apart() {
    let fade = Animation::new("fade", Duration::from_millis(200));
    let slide =
        Animation::new("slide", Duration::from_millis(300)).with_delay(Duration::from_millis(50));

    let model = captured_after(
        &Probe
            .on_initial_mount(fade.clone())
            .animation(slide.clone())
            .on_final_unmount(fade.clone()),
    );

    assert_eq!(model.animations.initial_mount, vec![fade.clone()]);
    assert_eq!(model.animations.update, vec![slide]);
    assert_eq!(model.animations.final_unmount, vec![fade]);
    assert!(model.lifecycle.is_empty());
}

#[test]
fn default_model_is_empty() {
    assert!(Model::default().is_empty());
    let model = Model::default().prepend_lifecycle(LifecycleDirective::DidInit(Rc::new(|| {})));
    assert!(!model.is_empty());
}

#[test]
fn empty_model_is_not_attached() {
    let registry = Registry::new();
    let (tree, _) = Inflater::render(&registry, &Probe);
    assert!(tree.model().is_none());
    assert_eq!(registry.node_count(), 0);
}
