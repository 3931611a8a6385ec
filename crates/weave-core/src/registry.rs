//! The identity → node arena.
//!
//! Every persistent node lives here and nowhere else. Descriptors, bindings and
//! actions only ever hold an [`Identity`] plus a weak [`RegistryHandle`], and
//! resolve the live node when they are used.

use std::any::{type_name, Any};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::collections::map::HashMap;
use crate::component::Component;
use crate::error::NodeError;
use crate::identity::{Identity, TypeKey};
use crate::model::Model;
use crate::platform::{DefaultScheduler, RenderScheduler};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Ordered state slots owned by one node.
#[derive(Default)]
pub struct StateStore {
    slots: Vec<Box<dyn Any>>,
}

impl StateStore {
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&dyn Any> {
        self.slots.get(index).map(|slot| &**slot)
    }

    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Any> {
        self.slots.get_mut(index).map(|slot| &mut **slot)
    }

    fn contains(&self, index: usize) -> bool {
        index < self.slots.len()
    }

    fn push(&mut self, value: Box<dyn Any>) {
        self.slots.push(value);
    }
}

impl fmt::Debug for StateStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateStore")
            .field("slots", &self.slots.len())
            .finish()
    }
}

pub(crate) struct NodeEntry {
    identity: Identity,
    type_key: TypeKey,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    slots: StateStore,
    descriptor: Option<Rc<dyn Any>>,
    rendered: Option<Component>,
    model: Option<Rc<Model>>,
    dirty: bool,
    seen_pass: u64,
}

/// A node torn down by the end-of-pass sweep.
pub struct RemovedNode {
    pub identity: Identity,
    pub type_key: TypeKey,
    pub model: Option<Rc<Model>>,
}

impl fmt::Debug for RemovedNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemovedNode")
            .field("identity", &self.identity)
            .field("type", &self.type_key.short_name())
            .field("has_model", &self.model.is_some())
            .finish()
    }
}

#[derive(Default)]
struct Arena {
    nodes: HashMap<NodeId, NodeEntry>,
    by_identity: HashMap<Identity, NodeId>,
    next_id: u64,
    pass: u64,
    created: Vec<NodeId>,
}

impl Arena {
    fn entry(&self, identity: Identity) -> Result<&NodeEntry, NodeError> {
        self.by_identity
            .get(&identity)
            .and_then(|id| self.nodes.get(id))
            .ok_or(NodeError::Missing { identity })
    }

    fn entry_mut(&mut self, identity: Identity) -> Result<&mut NodeEntry, NodeError> {
        let id = *self
            .by_identity
            .get(&identity)
            .ok_or(NodeError::Missing { identity })?;
        self.nodes
            .get_mut(&id)
            .ok_or(NodeError::Missing { identity })
    }

    fn mark_dirty_from(&mut self, mut current: Option<NodeId>) {
        while let Some(id) = current {
            match self.nodes.get_mut(&id) {
                Some(entry) => {
                    entry.dirty = true;
                    current = entry.parent;
                }
                None => break,
            }
        }
    }

    fn retain(&mut self, id: NodeId, pass: u64) {
        let mut stack = vec![id];
        while let Some(id) = stack.pop() {
            if let Some(entry) = self.nodes.get_mut(&id) {
                entry.seen_pass = pass;
                stack.extend(entry.children.iter().copied());
            }
        }
    }
}

struct RegistryInner {
    arena: RefCell<Arena>,
    render_requested: Cell<bool>,
    scheduler: Rc<dyn RenderScheduler>,
}

impl RegistryInner {
    fn request_render(&self) {
        if !self.render_requested.replace(true) {
            self.scheduler.request_render();
        }
    }
}

#[derive(Clone)]
pub struct Registry {
    inner: Rc<RegistryInner>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::with_scheduler(Rc::new(DefaultScheduler))
    }

    pub fn with_scheduler(scheduler: Rc<dyn RenderScheduler>) -> Self {
        Self {
            inner: Rc::new(RegistryInner {
                arena: RefCell::new(Arena::default()),
                render_requested: Cell::new(false),
                scheduler,
            }),
        }
    }

    pub fn handle(&self) -> RegistryHandle {
        RegistryHandle(Rc::downgrade(&self.inner))
    }

    pub fn node_count(&self) -> usize {
        self.inner.arena.borrow().nodes.len()
    }

    pub fn contains(&self, identity: Identity) -> bool {
        self.inner.arena.borrow().by_identity.contains_key(&identity)
    }

    pub fn node_id(&self, identity: Identity) -> Option<NodeId> {
        self.inner.arena.borrow().by_identity.get(&identity).copied()
    }

    pub fn identities(&self) -> Vec<Identity> {
        let arena = self.inner.arena.borrow();
        let mut ids: Vec<(NodeId, Identity)> = arena
            .nodes
            .iter()
            .map(|(id, entry)| (*id, entry.identity))
            .collect();
        ids.sort();
        ids.into_iter().map(|(_, identity)| identity).collect()
    }

    pub fn type_key(&self, identity: Identity) -> Option<TypeKey> {
        self.inner
            .arena
            .borrow()
            .entry(identity)
            .ok()
            .map(|entry| entry.type_key)
    }

    pub fn slot_count(&self, identity: Identity) -> Option<usize> {
        self.inner
            .arena
            .borrow()
            .entry(identity)
            .ok()
            .map(|entry| entry.slots.len())
    }

    /// Number of completed and in-flight render passes.
    pub fn pass(&self) -> u64 {
        self.inner.arena.borrow().pass
    }

    pub fn needs_render(&self) -> bool {
        self.inner.render_requested.get()
    }

    pub fn request_render(&self) {
        self.inner.request_render();
    }

    pub(crate) fn clear_render_request(&self) {
        self.inner.render_requested.set(false);
    }

    pub(crate) fn begin_pass(&self) -> u64 {
        let mut arena = self.inner.arena.borrow_mut();
        arena.pass += 1;
        arena.created.clear();
        arena.pass
    }

    /// Looks up the node for `identity`, creating it when absent, and marks it live
    /// for the current pass.
    pub(crate) fn acquire(
        &self,
        identity: Identity,
        type_key: TypeKey,
        parent: Option<NodeId>,
    ) -> (NodeId, bool) {
        let mut arena = self.inner.arena.borrow_mut();
        let pass = arena.pass;
        let (id, created) = match arena.by_identity.get(&identity).copied() {
            Some(id) => {
                if let Some(entry) = arena.nodes.get_mut(&id) {
                    entry.seen_pass = pass;
                }
                (id, false)
            }
            None => {
                arena.next_id += 1;
                let id = NodeId(arena.next_id);
                arena.nodes.insert(
                    id,
                    NodeEntry {
                        identity,
                        type_key,
                        parent,
                        children: Vec::new(),
                        slots: StateStore::default(),
                        descriptor: None,
                        rendered: None,
                        model: None,
                        dirty: true,
                        seen_pass: pass,
                    },
                );
                arena.by_identity.insert(identity, id);
                arena.created.push(id);
                log::debug!("created node {identity} ({})", type_key.short_name());
                (id, true)
            }
        };
        if let Some(parent) = parent {
            if let Some(entry) = arena.nodes.get_mut(&parent) {
                if !entry.children.contains(&id) {
                    entry.children.push(id);
                }
            }
        }
        (id, created)
    }

    pub(crate) fn retain_subtree(&self, node: NodeId) {
        let mut arena = self.inner.arena.borrow_mut();
        let pass = arena.pass;
        arena.retain(node, pass);
    }

    /// Returns the previous descriptor and render output when the node is clean.
    pub(crate) fn cached_render(&self, node: NodeId) -> Option<(Rc<dyn Any>, Component)> {
        let arena = self.inner.arena.borrow();
        let entry = arena.nodes.get(&node)?;
        if entry.dirty {
            return None;
        }
        Some((entry.descriptor.clone()?, entry.rendered.clone()?))
    }

    pub(crate) fn begin_render(&self, node: NodeId, descriptor: Rc<dyn Any>) {
        let mut arena = self.inner.arena.borrow_mut();
        if let Some(entry) = arena.nodes.get_mut(&node) {
            entry.children.clear();
            entry.descriptor = Some(descriptor);
            entry.dirty = false;
        }
    }

    pub(crate) fn finish_render(&self, node: NodeId, rendered: Component) {
        let mut arena = self.inner.arena.borrow_mut();
        if let Some(entry) = arena.nodes.get_mut(&node) {
            entry.rendered = Some(rendered);
        }
    }

    pub(crate) fn set_model(&self, node: NodeId, model: Option<Rc<Model>>) {
        let mut arena = self.inner.arena.borrow_mut();
        if let Some(entry) = arena.nodes.get_mut(&node) {
            entry.model = model;
        }
    }

    pub(crate) fn slot_len(&self, node: NodeId) -> usize {
        self.inner
            .arena
            .borrow()
            .nodes
            .get(&node)
            .map(|entry| entry.slots.len())
            .unwrap_or(0)
    }

    /// Installs the slot's initial value on first link. Returns `true` when the
    /// value was installed by this call.
    pub(crate) fn link_slot(
        &self,
        node: NodeId,
        index: usize,
        init: impl FnOnce() -> Box<dyn Any>,
    ) -> bool {
        let linked = {
            let arena = self.inner.arena.borrow();
            match arena.nodes.get(&node) {
                Some(entry) => entry.slots.contains(index),
                None => return false,
            }
        };
        if linked {
            return false;
        }
        // Evaluated without holding the arena so providers may read other state.
        let value = init();
        let mut arena = self.inner.arena.borrow_mut();
        match arena.nodes.get_mut(&node) {
            Some(entry) => {
                entry.slots.push(value);
                true
            }
            None => false,
        }
    }

    pub fn with_slot<T: 'static, R>(
        &self,
        identity: Identity,
        index: usize,
        f: impl FnOnce(&T) -> R,
    ) -> Result<R, NodeError> {
        let arena = self.inner.arena.borrow();
        let entry = arena.entry(identity)?;
        let value = entry
            .slots
            .get(index)
            .ok_or(NodeError::Missing { identity })?
            .downcast_ref::<T>()
            .ok_or(NodeError::TypeMismatch {
                identity,
                expected: type_name::<T>(),
            })?;
        Ok(f(value))
    }

    pub fn read_slot<T: Clone + 'static>(
        &self,
        identity: Identity,
        index: usize,
    ) -> Result<T, NodeError> {
        self.with_slot(identity, index, |value: &T| value.clone())
    }

    /// Mutates a slot in place and requests a render.
    ///
    /// `f` runs while the arena is borrowed; it must not touch other state.
    pub fn update_slot<T: 'static, R>(
        &self,
        identity: Identity,
        index: usize,
        f: impl FnOnce(&mut T) -> R,
    ) -> Result<R, NodeError> {
        let result = {
            let mut arena = self.inner.arena.borrow_mut();
            let entry = arena.entry_mut(identity)?;
            let value = entry
                .slots
                .get_mut(index)
                .ok_or(NodeError::Missing { identity })?
                .downcast_mut::<T>()
                .ok_or(NodeError::TypeMismatch {
                    identity,
                    expected: type_name::<T>(),
                })?;
            let result = f(value);
            let id = arena.by_identity.get(&identity).copied();
            arena.mark_dirty_from(id);
            result
        };
        self.inner.request_render();
        Ok(result)
    }

    pub fn write_slot<T: 'static>(
        &self,
        identity: Identity,
        index: usize,
        value: T,
    ) -> Result<(), NodeError> {
        self.update_slot(identity, index, move |slot: &mut T| *slot = value)
    }

    /// Invalidates the node and its ancestors so the next pass renders them again.
    pub fn mark_dirty(&self, identity: Identity) -> Result<(), NodeError> {
        {
            let mut arena = self.inner.arena.borrow_mut();
            let id = *arena
                .by_identity
                .get(&identity)
                .ok_or(NodeError::Missing { identity })?;
            arena.mark_dirty_from(Some(id));
        }
        self.inner.request_render();
        Ok(())
    }

    pub fn descriptor(&self, identity: Identity) -> Option<Rc<dyn Any>> {
        self.inner
            .arena
            .borrow()
            .entry(identity)
            .ok()
            .and_then(|entry| entry.descriptor.clone())
    }

    pub fn model(&self, identity: Identity) -> Option<Rc<Model>> {
        self.inner
            .arena
            .borrow()
            .entry(identity)
            .ok()
            .and_then(|entry| entry.model.clone())
    }

    pub fn parent(&self, identity: Identity) -> Option<Identity> {
        let arena = self.inner.arena.borrow();
        let parent = arena.entry(identity).ok()?.parent?;
        arena.nodes.get(&parent).map(|entry| entry.identity)
    }

    /// Tears down every node not seen in the current pass.
    ///
    /// Returns the identities created during the pass (in creation order) and the
    /// removed nodes (in creation order).
    pub(crate) fn sweep(&self) -> (Vec<Identity>, Vec<RemovedNode>) {
        let removed_entries = {
            let mut arena = self.inner.arena.borrow_mut();
            let pass = arena.pass;
            let mut stale: Vec<NodeId> = arena
                .nodes
                .iter()
                .filter(|(_, entry)| entry.seen_pass != pass)
                .map(|(id, _)| *id)
                .collect();
            stale.sort();
            let mut removed = Vec::with_capacity(stale.len());
            for id in stale {
                if let Some(entry) = arena.nodes.remove(&id) {
                    arena.by_identity.remove(&entry.identity);
                    log::debug!(
                        "tearing down node {} ({})",
                        entry.identity,
                        entry.type_key.short_name()
                    );
                    removed.push(entry);
                }
            }
            removed
        };
        let created = {
            let arena = self.inner.arena.borrow();
            arena
                .created
                .iter()
                .filter_map(|id| arena.nodes.get(id).map(|entry| entry.identity))
                .collect()
        };
        // Entries drop here, outside the borrow, since slot values may own arbitrary
        // user data.
        let removed = removed_entries
            .into_iter()
            .map(|entry| RemovedNode {
                identity: entry.identity,
                type_key: entry.type_key,
                model: entry.model.clone(),
            })
            .collect();
        (created, removed)
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arena = self.inner.arena.borrow();
        f.debug_struct("Registry")
            .field("nodes", &arena.nodes.len())
            .field("pass", &arena.pass)
            .finish()
    }
}

/// Weak reference to a [`Registry`], held by state links, actions and scope handles.
#[derive(Clone)]
pub struct RegistryHandle(Weak<RegistryInner>);

impl RegistryHandle {
    pub fn upgrade(&self) -> Option<Registry> {
        self.0.upgrade().map(|inner| Registry { inner })
    }

    pub fn is_alive(&self) -> bool {
        self.0.strong_count() > 0
    }
}

impl fmt::Debug for RegistryHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RegistryHandle")
            .field(&self.is_alive())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/registry_tests.rs"]
mod tests;
