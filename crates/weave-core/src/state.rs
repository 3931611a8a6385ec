use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::error::NodeError;
use crate::identity::Identity;
use crate::registry::RegistryHandle;
use crate::slots::{Linkable, SlotLinker};

#[derive(Clone)]
struct SlotRef {
    registry: RegistryHandle,
    identity: Identity,
    index: usize,
}

/// One persistent value owned by the node of the view that declares it.
///
/// The descriptor only carries the initial value provider. Once linked, reads and
/// writes go through the registry, so every descriptor generation for the same
/// identity observes the same value.
pub struct State<T> {
    init: Rc<dyn Fn() -> T>,
    link: RefCell<Option<SlotRef>>,
}

impl<T: 'static> State<T> {
    pub fn new(init: impl Fn() -> T + 'static) -> Self {
        Self {
            init: Rc::new(init),
            link: RefCell::new(None),
        }
    }

    pub fn is_linked(&self) -> bool {
        self.link.borrow().is_some()
    }

    pub fn identity(&self) -> Option<Identity> {
        self.link.borrow().as_ref().map(|link| link.identity)
    }

    fn slot(&self) -> SlotRef {
        match self.link.borrow().as_ref() {
            Some(link) => link.clone(),
            None => panic!(
                "State<{}> used before it was linked; state is only available inside the body of the view that declares it",
                std::any::type_name::<T>()
            ),
        }
    }

    /// Reads the persisted value, reporting a torn-down owner as an error.
    pub fn try_with<R>(&self, f: impl FnOnce(&T) -> R) -> Result<R, NodeError> {
        let slot = self.slot();
        let registry = slot.registry.upgrade().ok_or(NodeError::Missing {
            identity: slot.identity,
        })?;
        registry.with_slot::<T, R>(slot.identity, slot.index, f)
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        match self.try_with(f) {
            Ok(value) => value,
            Err(err) => panic!("failed to read state: {err}"),
        }
    }

    pub fn try_get(&self) -> Result<T, NodeError>
    where
        T: Clone,
    {
        self.try_with(T::clone)
    }

    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.with(T::clone)
    }

    /// Mutates the persisted value and schedules a render. Writes to a torn-down
    /// owner are dropped.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let slot = self.slot();
        let result = match slot.registry.upgrade() {
            Some(registry) => registry.update_slot::<T, ()>(slot.identity, slot.index, f),
            None => Err(NodeError::Missing {
                identity: slot.identity,
            }),
        };
        match result {
            Ok(()) => {}
            Err(err @ NodeError::Missing { .. }) => {
                log::warn!("ignoring state write: {err}");
            }
            Err(err) => panic!("failed to write state: {err}"),
        }
    }

    pub fn set(&self, value: T) {
        self.update(move |slot| *slot = value);
    }

    pub fn binding(&self) -> Binding<T>
    where
        T: Clone,
    {
        let reader = self.clone();
        let writer = self.clone();
        // Panics here rather than at first use.
        let _ = self.slot();
        Binding::new(move || reader.get(), move |value| writer.set(value))
    }
}

impl<T: Default + 'static> Default for State<T> {
    fn default() -> Self {
        Self::new(T::default)
    }
}

impl<T> Clone for State<T> {
    fn clone(&self) -> Self {
        Self {
            init: Rc::clone(&self.init),
            link: RefCell::new(self.link.borrow().clone()),
        }
    }
}

impl<T: 'static> Linkable for State<T> {
    fn link(&self, linker: &mut SlotLinker<'_>) {
        let init = Rc::clone(&self.init);
        let (index, _) = linker.claim(move || Box::new(init()));
        *self.link.borrow_mut() = Some(SlotRef {
            registry: linker.handle(),
            identity: linker.identity(),
            index,
        });
    }
}

impl<T> fmt::Debug for State<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.link.borrow().as_ref() {
            Some(link) => write!(
                f,
                "State<{}>({}[{}])",
                std::any::type_name::<T>(),
                link.identity,
                link.index
            ),
            None => write!(f, "State<{}>(unlinked)", std::any::type_name::<T>()),
        }
    }
}

/// A getter/setter pair handed to child views that edit a value they do not own.
pub struct Binding<T> {
    get: Rc<dyn Fn() -> T>,
    set: Rc<dyn Fn(T)>,
}

impl<T: 'static> Binding<T> {
    pub fn new(get: impl Fn() -> T + 'static, set: impl Fn(T) + 'static) -> Self {
        Self {
            get: Rc::new(get),
            set: Rc::new(set),
        }
    }

    /// A binding that always reads `value` and ignores writes.
    pub fn constant(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(move || value.clone(), |_| {})
    }

    pub fn get(&self) -> T {
        (self.get)()
    }

    pub fn set(&self, value: T) {
        (self.set)(value)
    }

    /// Derives a binding to a part of the value through explicit accessors.
    pub fn project<U: 'static>(
        &self,
        get: impl Fn(&T) -> U + 'static,
        set: impl Fn(&mut T, U) + 'static,
    ) -> Binding<U> {
        let read = Rc::clone(&self.get);
        let outer_get = Rc::clone(&self.get);
        let outer_set = Rc::clone(&self.set);
        Binding::new(
            move || get(&read()),
            move |part| {
                let mut whole = outer_get();
                set(&mut whole, part);
                outer_set(whole);
            },
        )
    }
}

impl<T> Clone for Binding<T> {
    fn clone(&self) -> Self {
        Self {
            get: Rc::clone(&self.get),
            set: Rc::clone(&self.set),
        }
    }
}

impl<T: PartialEq + 'static> PartialEq for Binding<T> {
    fn eq(&self, other: &Self) -> bool {
        self.get() == other.get()
    }
}

impl<T: fmt::Debug + 'static> fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Binding").field(&self.get()).finish()
    }
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
