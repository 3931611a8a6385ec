//! Explicit slot registration.
//!
//! A view lists its state-bearing fields through [`Slots`], normally via
//! `#[derive(Slots)]`. The linker walks them in declaration order and hands out
//! consecutive slot indices, so the field order is the slot order.

use std::any::Any;

use crate::error::NodeError;
use crate::identity::Identity;
use crate::registry::{NodeId, Registry, RegistryHandle};
use crate::view_model::ScopeHandle;

pub trait Slots {
    const SLOT_COUNT: usize;

    fn link_slots(&self, linker: &mut SlotLinker<'_>);
}

/// A field that occupies one slot of its owner's node.
pub trait Linkable {
    fn link(&self, linker: &mut SlotLinker<'_>);
}

pub struct SlotLinker<'a> {
    registry: &'a Registry,
    node: NodeId,
    identity: Identity,
    existing: usize,
    next: usize,
    installed: usize,
}

impl<'a> SlotLinker<'a> {
    pub(crate) fn new(registry: &'a Registry, node: NodeId, identity: Identity) -> Self {
        Self {
            registry,
            node,
            identity,
            existing: registry.slot_len(node),
            next: 0,
            installed: 0,
        }
    }

    pub fn identity(&self) -> Identity {
        self.identity
    }

    pub fn handle(&self) -> RegistryHandle {
        self.registry.handle()
    }

    pub fn scope(&self) -> ScopeHandle {
        ScopeHandle::new(self.registry.handle(), self.identity)
    }

    /// Claims the next slot index. `init` runs only when the node does not hold
    /// the slot yet; the returned flag reports whether it ran.
    pub fn claim(&mut self, init: impl FnOnce() -> Box<dyn Any>) -> (usize, bool) {
        let index = self.next;
        self.next += 1;
        let installed = self.registry.link_slot(self.node, index, init);
        if installed {
            self.installed += 1;
        }
        (index, installed)
    }

    /// Reads back a slot of the node being linked.
    pub fn read<T: Clone + 'static>(&self, index: usize) -> Result<T, NodeError> {
        self.registry.read_slot(self.identity, index)
    }

    /// Finishes linking and returns how many slots were installed. A node that
    /// already held slots must be linked with exactly the same count.
    pub(crate) fn finish(self, type_name: &str) -> usize {
        if self.existing != 0 && self.existing != self.next {
            log::error!(
                "{type_name} linked {} slots but node {} holds {}; state fields must keep a stable declaration order",
                self.next,
                self.identity,
                self.existing
            );
            debug_assert_eq!(
                self.existing, self.next,
                "slot count changed for {type_name}"
            );
        }
        self.installed
    }
}
