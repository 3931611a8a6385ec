use super::*;
use crate::{Component, Context, Inflate, Inflater, Model, Registry, TypeKey, View};
use std::cell::{Cell, RefCell};

thread_local! {
    static PRESSED: RefCell<Vec<String>> = RefCell::new(Vec::new());
    static LAST_ACTION: RefCell<Option<Action>> = RefCell::new(None);
    static LAST_TYPED: RefCell<Option<ActionWith<u32>>> = RefCell::new(None);
}

#[derive(Debug)]
struct Target;

#[derive(Clone)]
struct Press(Action);

impl Inflate for Press {
    fn inflate(&self, inflater: &mut Inflater<'_>, model: Option<Model>) -> Component {
        LAST_ACTION.with(|slot| *slot.borrow_mut() = Some(self.0.clone()));
        inflater.attach_model(Component::new(Target), TypeKey::of::<Press>(), model)
    }
}

#[derive(Clone, crate::Slots)]
struct Button {
    label: String,
}

impl View for Button {
    type Body = Press;
    const ACTIONABLE: bool = true;

    fn body(&self, cx: &Context<Self>) -> Press {
        LAST_TYPED.with(|slot| {
            *slot.borrow_mut() = Some(cx.on_action_with(|button: &Button, times: u32| {
                PRESSED.with(|log| log.borrow_mut().push(format!("{}x{times}", button.label)))
            }))
        });
        Press(cx.on_action(|button: &Button| {
            PRESSED.with(|log| log.borrow_mut().push(button.label.clone()))
        }))
    }
}

fn button(label: &str) -> Button {
    Button {
        label: label.to_string(),
    }
}

fn pressed() -> Vec<String> {
    PRESSED.with(|log| log.borrow_mut().drain(..).collect())
}

fn last_action() -> Action {
    LAST_ACTION.with(|slot| slot.borrow().clone()).expect("action")
}

fn last_typed() -> ActionWith<u32> {
    LAST_TYPED.with(|slot| slot.borrow().clone()).expect("typed action")
}

#[test]
fn action_resolves_latest_descriptor() {
    let registry = Registry::new();
    Inflater::render(&registry, &button("first"));
    let action = last_action();

    Inflater::render(&registry, &button("second"));
    action.invoke();

    assert_eq!(pressed(), vec!["second".to_string()]);
}

#[test]
fn action_after_teardown_is_a_noop() {
    let registry = Registry::new();
    Inflater::render(&registry, &button("gone"));
    let action = last_action();
    let typed = last_typed();

    Inflater::render(&registry, &crate::Empty);
    action.invoke();
    typed.invoke(3);

    assert!(pressed().is_empty());
}

#[test]
fn action_after_registry_drop_is_a_noop() {
    let registry = Registry::new();
    Inflater::render(&registry, &button("gone"));
    let action = last_action();
    drop(registry);

    action.invoke();
    assert!(pressed().is_empty());
}

#[test]
fn demoted_action_matches_direct_invocation() {
    let registry = Registry::new();
    Inflater::render(&registry, &button("tap"));
    let typed = last_typed();

    typed.invoke(2);
    let direct = pressed();
    typed.demote(2).invoke();
    let demoted = pressed();

    assert_eq!(direct, demoted);
    assert_eq!(direct, vec!["tapx2".to_string()]);
}

#[test]
fn erased_action_accepts_matching_payload() {
    let registry = Registry::new();
    Inflater::render(&registry, &button("erased"));
    let erased = last_typed().erased();

    erased(&5_u32);
    assert_eq!(pressed(), vec!["erasedx5".to_string()]);
}

#[test]
#[should_panic(expected = "expected a payload of type u32")]
fn erased_action_rejects_other_payloads() {
    let erased = ActionWith::new(|_: u32| {}).erased();
    erased(&"not a number");
}

#[test]
fn target_actions_hold_target_weakly() {
    let hits = Rc::new(Cell::new(0));
    let target = Rc::new(Rc::clone(&hits));
    let action = Action::with_target(&target, |hits: &Rc<Cell<i32>>| hits.set(hits.get() + 1));
    let typed = ActionWith::with_target(&target, |hits: &Rc<Cell<i32>>, n: i32| {
        hits.set(hits.get() + n)
    });

    action.invoke();
    typed.invoke(10);
    assert_eq!(hits.get(), 11);

    drop(target);
    action.invoke();
    typed.invoke(10);
    assert_eq!(hits.get(), 11);
}

#[derive(Clone, crate::Slots)]
struct Detached;

impl View for Detached {
    type Body = Press;

    fn body(&self, cx: &Context<Self>) -> Press {
        Press(cx.on_action(|_| {}))
    }
}

#[test]
#[should_panic(expected = "declare it ACTIONABLE")]
fn action_without_node_panics() {
    let registry = Registry::new();
    Inflater::render(&registry, &Detached);
}
