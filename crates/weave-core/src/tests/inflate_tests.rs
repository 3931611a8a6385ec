use super::*;
use crate::{Composite, LifecycleExt, State};
use std::cell::{Cell, RefCell};

thread_local! {
    static BODY_CALLS: Cell<usize> = Cell::new(0);
    static COUNTERS: RefCell<Vec<State<i32>>> = RefCell::new(Vec::new());
}

#[derive(Debug, PartialEq)]
struct Text(String);

#[derive(Debug)]
struct StackPayload;

#[derive(Clone)]
struct Leaf(String);

impl Leaf {
    fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }
}

impl Inflate for Leaf {
    fn inflate(&self, inflater: &mut Inflater<'_>, model: Option<Model>) -> Component {
        inflater.attach_model(
            Component::new(Text(self.0.clone())),
            TypeKey::of::<Leaf>(),
            model,
        )
    }
}

#[derive(Clone)]
struct Stack(Vec<Rc<dyn Inflate>>);

impl Inflate for Stack {
    fn inflate(&self, inflater: &mut Inflater<'_>, model: Option<Model>) -> Component {
        let children = self.0.iter().map(|child| inflater.inflate(child)).collect();
        inflater.attach_model(
            Component::with_children(StackPayload, children),
            TypeKey::of::<Stack>(),
            model,
        )
    }
}

#[derive(Clone, crate::Slots)]
struct Counter {
    count: State<i32>,
}

impl Counter {
    fn new() -> Self {
        Self {
            count: State::new(|| 0),
        }
    }
}

impl View for Counter {
    type Body = Leaf;

    fn body(&self, _cx: &Context<Self>) -> Leaf {
        COUNTERS.with(|list| list.borrow_mut().push(self.count.clone()));
        Leaf::new(format!("count {}", self.count.get()))
    }
}

#[derive(Clone, crate::Slots)]
struct Greeting {
    name: &'static str,
}

impl View for Greeting {
    type Body = Leaf;

    fn body(&self, _cx: &Context<Self>) -> Leaf {
        Leaf::new(format!("hello {}", self.name))
    }
}

#[derive(Clone, crate::Slots)]
struct Keyed {
    key: &'static str,
    count: State<i32>,
}

impl View for Keyed {
    type Body = Leaf;

    fn id(&self) -> Option<ViewId> {
        Some(ViewId::new(self.key))
    }

    fn body(&self, _cx: &Context<Self>) -> Leaf {
        COUNTERS.with(|list| list.borrow_mut().push(self.count.clone()));
        Leaf::new(self.key)
    }
}

fn keyed(key: &'static str) -> Rc<dyn Inflate> {
    Rc::new(Keyed {
        key,
        count: State::new(|| 0),
    })
}

#[derive(Clone, crate::Slots)]
struct Card {
    title: &'static str,
    expanded: State<bool>,
}

impl View for Card {
    type Body = Leaf;
    const REUSABLE: bool = true;

    fn should_reuse(&self, previous: &Self) -> bool {
        self.title == previous.title
    }

    fn body(&self, _cx: &Context<Self>) -> Leaf {
        BODY_CALLS.with(|calls| calls.set(calls.get() + 1));
        if self.expanded.get() {
            Leaf::new(format!("{} (open)", self.title))
        } else {
            Leaf::new(self.title)
        }
    }
}

#[derive(Clone, crate::Slots)]
struct Ticker {
    ticks: State<i32>,
}

impl View for Ticker {
    type Body = Leaf;
    const REUSABLE: bool = true;

    fn should_reuse(&self, _previous: &Self) -> bool {
        true
    }

    fn body(&self, _cx: &Context<Self>) -> Leaf {
        let ticks = self.ticks.get();
        if ticks == 0 {
            self.ticks.set(1);
        }
        Leaf::new(format!("ticks {ticks}"))
    }
}

#[derive(Clone, crate::Slots)]
struct Switch {
    on: State<bool>,
}

impl View for Switch {
    type Body = Leaf;
    const REUSABLE: bool = true;

    fn should_reuse(&self, previous: &Self) -> bool {
        self.on.get() == previous.on.get()
    }

    fn body(&self, _cx: &Context<Self>) -> Leaf {
        BODY_CALLS.with(|calls| calls.set(calls.get() + 1));
        Leaf::new(if self.on.get() { "on" } else { "off" })
    }
}

fn switch() -> Switch {
    Switch {
        on: State::new(|| false),
    }
}

fn card(title: &'static str) -> Card {
    Card {
        title,
        expanded: State::new(|| false),
    }
}

fn take_counters() -> Vec<State<i32>> {
    COUNTERS.with(|list| list.borrow_mut().drain(..).collect())
}

fn texts(tree: &Component) -> Vec<String> {
    let mut out = Vec::new();
    tree.walk(&mut |component, _| {
        if let Some(Text(text)) = component.payload::<Text>() {
            out.push(text.clone());
        }
    });
    out
}

#[test]
fn stateless_composite_is_inlined() {
    let registry = Registry::new();
    let (tree, outcome) = Inflater::render(&registry, &Greeting { name: "weave" });

    assert_eq!(registry.node_count(), 0);
    assert_eq!(outcome.stats.inlined, 1);
    assert!(tree.identity().is_none());
    assert_eq!(tree.payload::<Text>(), Some(&Text("hello weave".into())));
}

#[test]
fn stateful_composite_gets_a_node() {
    let registry = Registry::new();
    let (tree, outcome) = Inflater::render(&registry, &Counter::new());

    assert_eq!(registry.node_count(), 1);
    assert_eq!(outcome.created.len(), 1);
    assert_eq!(outcome.stats.linked_slots, 1);
    let composite = tree.payload::<Composite>().expect("composite payload");
    assert_eq!(composite.view_type, TypeKey::of::<Counter>());
    assert_eq!(tree.identity(), Some(outcome.created[0]));
}

#[test]
fn identity_survives_unrelated_sibling_insertion() {
    let registry = Registry::new();
    let root = |with_header: bool| {
        let mut children: Vec<Rc<dyn Inflate>> = Vec::new();
        if with_header {
            children.push(Rc::new(Leaf::new("header")));
        }
        children.push(Rc::new(Counter::new()));
        Stack(children)
    };

    let (first, _) = Inflater::render(&registry, &root(false));
    take_counters()[0].set(5);
    let (second, outcome) = Inflater::render(&registry, &root(true));

    let counter_identity = |tree: &Component| {
        tree.children()
            .iter()
            .find_map(Component::identity)
            .expect("counter identity")
    };
    assert_eq!(counter_identity(&first), counter_identity(&second));
    assert!(outcome.created.is_empty());
    assert_eq!(texts(&second), vec!["header", "count 5"]);
}

#[test]
fn explicit_ids_follow_reordering() {
    let registry = Registry::new();
    Inflater::render(&registry, &Stack(vec![keyed("a"), keyed("b")]));
    let states = take_counters();
    states[0].set(1);
    states[1].set(2);

    let (_, outcome) = Inflater::render(&registry, &Stack(vec![keyed("b"), keyed("a")]));
    let reordered = take_counters();

    assert!(outcome.removed.is_empty());
    assert_eq!(reordered[0].get(), 2);
    assert_eq!(reordered[1].get(), 1);
}

#[test]
fn removed_subtrees_are_swept() {
    let registry = Registry::new();
    let root = |show: bool| {
        let child: Rc<dyn Inflate> = Rc::new(show.then(Counter::new));
        Stack(vec![child])
    };

    let (_, first) = Inflater::render(&registry, &root(true));
    let (tree, second) = Inflater::render(&registry, &root(false));

    assert_eq!(second.removed.len(), 1);
    assert_eq!(second.removed[0].identity, first.created[0]);
    assert_eq!(registry.node_count(), 0);
    assert!(tree.children()[0].is_empty());
}

#[test]
fn clean_reusable_view_skips_body() {
    BODY_CALLS.with(|calls| calls.set(0));
    let registry = Registry::new();

    let (first, _) = Inflater::render(&registry, &card("inbox"));
    let (second, outcome) = Inflater::render(&registry, &card("inbox"));

    assert_eq!(BODY_CALLS.with(Cell::get), 1);
    assert_eq!(outcome.stats.reused, 1);
    assert!(first.children()[0].ptr_eq(&second.children()[0]));
    assert_eq!(registry.node_count(), 1);
}

#[test]
fn reusable_view_renders_when_declined_or_dirty() {
    BODY_CALLS.with(|calls| calls.set(0));
    let registry = Registry::new();

    Inflater::render(&registry, &card("inbox"));
    Inflater::render(&registry, &card("archive"));
    assert_eq!(BODY_CALLS.with(Cell::get), 2);

    let descriptor = registry
        .descriptor(registry.identities()[0])
        .expect("descriptor");
    let stored = descriptor.downcast_ref::<Card>().expect("card");
    stored.expanded.set(true);

    let (tree, outcome) = Inflater::render(&registry, &card("archive"));
    assert_eq!(BODY_CALLS.with(Cell::get), 3);
    assert_eq!(outcome.stats.reused, 0);
    assert_eq!(texts(&tree), vec!["archive (open)"]);
}

#[test]
fn model_on_leaf_allocates_trackable_node() {
    let registry = Registry::new();
    let (tree, outcome) = Inflater::render(&registry, &Leaf::new("x").on_did_init(|| {}));

    assert_eq!(registry.node_count(), 1);
    assert_eq!(tree.identity(), Some(outcome.created[0]));
    assert_eq!(tree.model().map(|model| model.lifecycle.did_init.len()), Some(1));
    assert!(registry.model(outcome.created[0]).is_some());
}

#[test]
fn model_on_stateless_composite_gives_it_a_node() {
    let registry = Registry::new();
    let (tree, _) = Inflater::render(&registry, &Greeting { name: "m" }.on_will_mount(|| {}));

    assert!(tree.payload::<Composite>().is_some());
    assert!(tree.model().is_some());
    assert!(tree.children()[0].model().is_none());
}

#[test]
fn model_on_scoped_component_is_hosted() {
    let registry = Registry::new();
    let mut inflater = Inflater::new(&registry);
    let counter = inflater.inflate(&Counter::new());
    let hosted = counter.clone().on_will_dispose(|| {});
    let tree = inflater.inflate(&hosted);
    inflater.finish();

    assert!(tree.payload::<crate::ModelHost>().is_some());
    assert!(tree.children()[0].ptr_eq(&counter));
}

#[test]
fn option_and_either_select_branches() {
    let registry = Registry::new();
    let left: Either<Leaf, Greeting> = Either::Left(Leaf::new("left"));
    let right: Either<Leaf, Greeting> = Either::Right(Greeting { name: "right" });
    let none: Option<Leaf> = None;

    assert_eq!(texts(&Inflater::render(&registry, &left).0), vec!["left"]);
    assert_eq!(texts(&Inflater::render(&registry, &right).0), vec!["hello right"]);
    assert!(Inflater::render(&registry, &none).0.is_empty());
}

#[test]
fn write_during_body_rerenders_reusable_view() {
    let registry = Registry::new();
    let ticker = || Ticker {
        ticks: State::new(|| 0),
    };

    let (first, _) = Inflater::render(&registry, &ticker());
    assert_eq!(texts(&first), vec!["ticks 0"]);
    assert!(registry.needs_render());

    let (second, outcome) = Inflater::render(&registry, &ticker());
    assert_eq!(outcome.stats.reused, 0);
    assert_eq!(texts(&second), vec!["ticks 1"]);

    let (third, outcome) = Inflater::render(&registry, &ticker());
    assert_eq!(outcome.stats.reused, 1);
    assert_eq!(texts(&third), vec!["ticks 1"]);
}

#[test]
fn reuse_check_can_read_state() {
    let registry = Registry::new();
    Inflater::render(&registry, &switch());
    BODY_CALLS.with(|calls| calls.set(0));

    let view = switch();
    let (tree, outcome) = Inflater::render(&registry, &view);
    assert_eq!(outcome.stats.reused, 1);
    assert_eq!(BODY_CALLS.with(Cell::get), 0);
    assert_eq!(texts(&tree), vec!["off"]);
    assert!(view.on.is_linked());

    view.on.set(true);
    let (tree, outcome) = Inflater::render(&registry, &switch());
    assert_eq!(outcome.stats.reused, 0);
    assert_eq!(texts(&tree), vec!["on"]);
}
