//! Descriptor inflation.
//!
//! A pass walks the root descriptor top-down. Composite views that need a node
//! acquire it by identity, link their slots, and inflate their body inside a new
//! scope frame. Stateless composites are inlined into the parent frame. Nodes the
//! pass did not reach are swept when [`Inflater::finish`] runs.

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

use crate::action::{Action, ActionWith};
use crate::component::{Component, ScopeInfo};
use crate::identity::{Identity, ScopeFrame, TypeKey, ViewId};
use crate::model::Model;
use crate::registry::{Registry, RegistryHandle, RemovedNode};
use crate::slots::{SlotLinker, Slots};
use crate::view_model::ScopeHandle;

/// Anything that can produce a component during a pass.
pub trait Inflate: 'static {
    fn inflate(&self, inflater: &mut Inflater<'_>, model: Option<Model>) -> Component;
}

/// A composite descriptor.
///
/// `body` is called with a [`Context`] that can mint actions bound to this view's
/// node. Views with no slots, no id and none of the flags below never get a node.
pub trait View: Slots + Clone + 'static {
    type Body: Inflate;

    /// Keep a node so actions created in `body` can resolve this view.
    const ACTIONABLE: bool = false;
    /// Offer the previous render to [`View::should_reuse`].
    const REUSABLE: bool = false;

    fn body(&self, cx: &Context<Self>) -> Self::Body;

    fn id(&self) -> Option<ViewId> {
        None
    }

    fn should_reuse(&self, _previous: &Self) -> bool {
        false
    }
}

/// Per-body handle to the owning node.
pub struct Context<V> {
    scope: Option<(RegistryHandle, Identity)>,
    _view: PhantomData<fn() -> V>,
}

impl<V: 'static> Context<V> {
    fn scoped(registry: RegistryHandle, identity: Identity) -> Self {
        Self {
            scope: Some((registry, identity)),
            _view: PhantomData,
        }
    }

    fn detached() -> Self {
        Self {
            scope: None,
            _view: PhantomData,
        }
    }

    pub fn identity(&self) -> Option<Identity> {
        self.scope.as_ref().map(|(_, identity)| *identity)
    }

    pub fn scope(&self) -> Option<ScopeHandle> {
        self.scope
            .as_ref()
            .map(|(registry, identity)| ScopeHandle::new(registry.clone(), *identity))
    }

    fn bound(&self) -> (RegistryHandle, Identity) {
        match &self.scope {
            Some((registry, identity)) => (registry.clone(), *identity),
            None => panic!(
                "{} created an action without a node; declare it ACTIONABLE",
                std::any::type_name::<V>()
            ),
        }
    }

    pub fn on_action(&self, handler: impl Fn(&V) + 'static) -> Action {
        let (registry, identity) = self.bound();
        Action::scoped(registry, identity, handler)
    }

    pub fn on_action_with<P: 'static>(&self, handler: impl Fn(&V, P) + 'static) -> ActionWith<P> {
        let (registry, identity) = self.bound();
        ActionWith::scoped(registry, identity, handler)
    }

    /// Binds `handler` with a fixed payload.
    pub fn on_action_passing<P: Clone + 'static>(
        &self,
        payload: P,
        handler: impl Fn(&V, P) + 'static,
    ) -> Action {
        self.on_action_with(handler).demote(payload)
    }
}

impl<V> fmt::Debug for Context<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("view", &std::any::type_name::<V>())
            .field("identity", &self.scope.as_ref().map(|(_, identity)| *identity))
            .finish()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InflateStats {
    pub created: usize,
    pub reused: usize,
    pub inlined: usize,
    pub rendered: usize,
    pub linked_slots: usize,
}

#[derive(Debug)]
pub struct InflateOutcome {
    /// Identities created during the pass, in tree order.
    pub created: Vec<Identity>,
    pub removed: Vec<RemovedNode>,
    pub stats: InflateStats,
}

pub struct Inflater<'a> {
    registry: &'a Registry,
    root: ScopeFrame,
    frames: Vec<ScopeFrame>,
    stats: InflateStats,
    pass: u64,
}

impl<'a> Inflater<'a> {
    /// Starts a new pass over `registry`.
    pub fn new(registry: &'a Registry) -> Self {
        let pass = registry.begin_pass();
        Self {
            registry,
            root: ScopeFrame::new(Identity::ROOT, None),
            frames: Vec::new(),
            stats: InflateStats::default(),
            pass,
        }
    }

    /// Runs one full pass for `root`.
    pub fn render(registry: &Registry, root: &dyn Inflate) -> (Component, InflateOutcome) {
        let mut inflater = Inflater::new(registry);
        let tree = inflater.inflate(root);
        (tree, inflater.finish())
    }

    pub fn registry(&self) -> &Registry {
        self.registry
    }

    pub fn pass(&self) -> u64 {
        self.pass
    }

    pub fn stats(&self) -> InflateStats {
        self.stats
    }

    pub fn inflate<I: Inflate + ?Sized>(&mut self, descriptor: &I) -> Component {
        descriptor.inflate(self, None)
    }

    fn frame(&mut self) -> &mut ScopeFrame {
        self.frames.last_mut().unwrap_or(&mut self.root)
    }

    pub fn inflate_view<V: View>(&mut self, view: &V, model: Option<Model>) -> Component {
        let model = model.filter(|model| !model.is_empty());
        let type_key = TypeKey::of::<V>();
        let id = view.id();
        let needs_node =
            V::SLOT_COUNT > 0 || id.is_some() || model.is_some() || V::ACTIONABLE || V::REUSABLE;
        if !needs_node {
            self.stats.inlined += 1;
            let body = view.body(&Context::detached());
            return body.inflate(self, None);
        }

        let frame = self.frame();
        let identity = frame.next_identity(type_key, id);
        let parent = frame.node();
        let (node, created) = self.registry.acquire(identity, type_key, parent);
        if created {
            self.stats.created += 1;
        }
        let scope = ScopeInfo {
            node,
            identity,
            type_key,
        };
        let model = model.map(Rc::new);

        let mut linker = SlotLinker::new(self.registry, node, identity);
        view.link_slots(&mut linker);
        self.stats.linked_slots += linker.finish(type_key.name());

        if V::REUSABLE && !created {
            if let Some(rendered) = self.try_reuse(view, scope) {
                self.registry.set_model(node, model.clone());
                return rendered.with_scope(scope, model);
            }
        }

        let descriptor: Rc<dyn Any> = Rc::new(view.clone());
        self.registry.begin_render(node, descriptor);
        let cx = Context::scoped(self.registry.handle(), identity);
        let body = view.body(&cx);

        self.frames.push(ScopeFrame::new(identity, Some(node)));
        log::trace!("enter {identity} ({})", type_key.short_name());
        let child = body.inflate(self, None);
        log::trace!("leave {identity}");
        self.frames.pop();

        let component = Component::composite(child, scope, model.clone());
        self.registry.set_model(node, model);
        self.registry.finish_render(node, component.clone());
        self.stats.rendered += 1;
        component
    }

    fn try_reuse<V: View>(&mut self, view: &V, scope: ScopeInfo) -> Option<Component> {
        let (previous, rendered) = self.registry.cached_render(scope.node)?;
        let previous = previous.downcast_ref::<V>()?;
        if !view.should_reuse(previous) {
            return None;
        }
        self.registry.retain_subtree(scope.node);
        self.stats.reused += 1;
        log::debug!(
            "reusing {} ({})",
            scope.identity,
            scope.type_key.short_name()
        );
        Some(rendered)
    }

    /// Binds `model` to `component` through a node allocated in the current frame.
    ///
    /// An empty or absent model leaves the component untouched.
    pub fn attach_model(
        &mut self,
        component: Component,
        type_key: TypeKey,
        model: Option<Model>,
    ) -> Component {
        let Some(model) = model.filter(|model| !model.is_empty()) else {
            return component;
        };
        let frame = self.frame();
        let identity = frame.next_identity(type_key, None);
        let parent = frame.node();
        let (node, created) = self.registry.acquire(identity, type_key, parent);
        if created {
            self.stats.created += 1;
        }
        let model = Rc::new(model);
        self.registry.set_model(node, Some(Rc::clone(&model)));
        let scope = ScopeInfo {
            node,
            identity,
            type_key,
        };
        let component = if component.scope().is_some() {
            Component::model_host(component, scope, model)
        } else {
            component.with_scope(scope, Some(model))
        };
        self.registry.finish_render(node, component.clone());
        component
    }

    /// Ends the pass, tearing down every node it did not reach.
    pub fn finish(self) -> InflateOutcome {
        let (created, removed) = self.registry.sweep();
        log::debug!(
            "pass {} finished: {} created, {} reused, {} inlined, {} removed",
            self.pass,
            self.stats.created,
            self.stats.reused,
            self.stats.inlined,
            removed.len()
        );
        InflateOutcome {
            created,
            removed,
            stats: self.stats,
        }
    }
}

impl<V: View> Inflate for V {
    fn inflate(&self, inflater: &mut Inflater<'_>, model: Option<Model>) -> Component {
        inflater.inflate_view(self, model)
    }
}

impl Inflate for Component {
    fn inflate(&self, inflater: &mut Inflater<'_>, model: Option<Model>) -> Component {
        inflater.attach_model(self.clone(), TypeKey::of::<Component>(), model)
    }
}

/// Renders nothing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Empty;

impl Inflate for Empty {
    fn inflate(&self, inflater: &mut Inflater<'_>, model: Option<Model>) -> Component {
        inflater.attach_model(Component::empty(), TypeKey::of::<Empty>(), model)
    }
}

impl<I: Inflate> Inflate for Option<I> {
    fn inflate(&self, inflater: &mut Inflater<'_>, model: Option<Model>) -> Component {
        match self {
            Some(inner) => inner.inflate(inflater, model),
            None => Empty.inflate(inflater, model),
        }
    }
}

#[derive(Clone, Debug)]
pub enum Either<A, B> {
    Left(A),
    Right(B),
}

impl<A: Inflate, B: Inflate> Inflate for Either<A, B> {
    fn inflate(&self, inflater: &mut Inflater<'_>, model: Option<Model>) -> Component {
        match self {
            Either::Left(inner) => inner.inflate(inflater, model),
            Either::Right(inner) => inner.inflate(inflater, model),
        }
    }
}

impl Inflate for Box<dyn Inflate> {
    fn inflate(&self, inflater: &mut Inflater<'_>, model: Option<Model>) -> Component {
        (**self).inflate(inflater, model)
    }
}

impl Inflate for Rc<dyn Inflate> {
    fn inflate(&self, inflater: &mut Inflater<'_>, model: Option<Model>) -> Component {
        (**self).inflate(inflater, model)
    }
}

#[cfg(test)]
#[path = "tests/inflate_tests.rs"]
mod tests;
