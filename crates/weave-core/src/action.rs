//! Deferred handlers bound to a node identity or a weakly held target.
//!
//! Scoped actions never hold the node. They capture the registry handle and the
//! identity, and look up the node's latest descriptor when invoked, so an action
//! that outlives its element silently does nothing.

use std::any::{type_name, Any};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::identity::Identity;
use crate::registry::RegistryHandle;

/// An action that accepts any payload and checks its type at invocation.
pub type ErasedAction = Rc<dyn Fn(&dyn Any)>;

fn resolve<V: 'static>(registry: &RegistryHandle, identity: Identity) -> Option<Rc<V>> {
    let Some(registry) = registry.upgrade() else {
        log::trace!("action for {identity} dropped: registry is gone");
        return None;
    };
    let Some(descriptor) = registry.descriptor(identity) else {
        log::trace!("action for {identity} dropped: node is gone");
        return None;
    };
    match descriptor.downcast::<V>() {
        Ok(view) => Some(view),
        Err(_) => panic!(
            "action bound to {} resolved node {identity} holding another descriptor type",
            type_name::<V>()
        ),
    }
}

fn payload_mismatch<P>(payload: &dyn Any) -> ! {
    panic!(
        "action expected a payload of type {} but received {:?}",
        type_name::<P>(),
        payload.type_id()
    )
}

#[derive(Clone)]
pub struct Action {
    handler: Rc<dyn Fn()>,
}

impl Action {
    pub fn new(handler: impl Fn() + 'static) -> Self {
        Self {
            handler: Rc::new(handler),
        }
    }

    pub fn noop() -> Self {
        Self::new(|| {})
    }

    /// Calls `handler` on `target` while it is still alive.
    pub fn with_target<T: 'static>(target: &Rc<T>, handler: impl Fn(&T) + 'static) -> Self {
        let target: Weak<T> = Rc::downgrade(target);
        Self::new(move || {
            if let Some(target) = target.upgrade() {
                handler(&target);
            }
        })
    }

    pub(crate) fn scoped<V: 'static>(
        registry: RegistryHandle,
        identity: Identity,
        handler: impl Fn(&V) + 'static,
    ) -> Self {
        Self::new(move || {
            if let Some(view) = resolve::<V>(&registry, identity) {
                handler(&view);
            }
        })
    }

    pub fn invoke(&self) {
        (self.handler)()
    }

    /// Adapts the action to a loosely typed callback site. The payload is ignored.
    pub fn erased(&self) -> ErasedAction {
        let handler = Rc::clone(&self.handler);
        Rc::new(move |_: &dyn Any| handler())
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.handler, &other.handler)
    }
}

impl Default for Action {
    fn default() -> Self {
        Self::noop()
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Action")
    }
}

pub struct ActionWith<P> {
    handler: Rc<dyn Fn(P)>,
}

impl<P: 'static> ActionWith<P> {
    pub fn new(handler: impl Fn(P) + 'static) -> Self {
        Self {
            handler: Rc::new(handler),
        }
    }

    pub fn with_target<T: 'static>(target: &Rc<T>, handler: impl Fn(&T, P) + 'static) -> Self {
        let target: Weak<T> = Rc::downgrade(target);
        Self::new(move |payload| {
            if let Some(target) = target.upgrade() {
                handler(&target, payload);
            }
        })
    }

    pub(crate) fn scoped<V: 'static>(
        registry: RegistryHandle,
        identity: Identity,
        handler: impl Fn(&V, P) + 'static,
    ) -> Self {
        Self::new(move |payload| {
            if let Some(view) = resolve::<V>(&registry, identity) {
                handler(&view, payload);
            }
        })
    }

    pub fn invoke(&self, payload: P) {
        (self.handler)(payload)
    }

    /// Fixes the payload, giving a parameterless action.
    pub fn demote(&self, payload: P) -> Action
    where
        P: Clone,
    {
        let handler = Rc::clone(&self.handler);
        Action::new(move || handler(payload.clone()))
    }

    /// Type-erased form. Invoking it with anything other than a `P` panics.
    pub fn erased(&self) -> ErasedAction
    where
        P: Clone,
    {
        let handler = Rc::clone(&self.handler);
        Rc::new(move |payload: &dyn Any| match payload.downcast_ref::<P>() {
            Some(payload) => handler(payload.clone()),
            None => payload_mismatch::<P>(payload),
        })
    }
}

impl<P> Clone for ActionWith<P> {
    fn clone(&self) -> Self {
        Self {
            handler: Rc::clone(&self.handler),
        }
    }
}

impl<P> fmt::Debug for ActionWith<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ActionWith<{}>", type_name::<P>())
    }
}

#[cfg(test)]
#[path = "tests/action_tests.rs"]
mod tests;
