//! Shared, reference-typed state that outlives individual descriptors.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::identity::Identity;
use crate::registry::RegistryHandle;
use crate::slots::{Linkable, SlotLinker};

/// Weak pointer to the node that owns a view model.
#[derive(Clone, Debug)]
pub struct ScopeHandle {
    registry: RegistryHandle,
    identity: Identity,
}

impl ScopeHandle {
    pub(crate) fn new(registry: RegistryHandle, identity: Identity) -> Self {
        Self { registry, identity }
    }

    pub fn identity(&self) -> Identity {
        self.identity
    }

    pub fn is_alive(&self) -> bool {
        self.registry
            .upgrade()
            .map(|registry| registry.contains(self.identity))
            .unwrap_or(false)
    }

    /// Invalidates the owning node. Returns `false` when it is gone.
    pub fn request_update(&self) -> bool {
        match self.registry.upgrade() {
            Some(registry) => match registry.mark_dirty(self.identity) {
                Ok(()) => true,
                Err(err) => {
                    log::warn!("ignoring view model update: {err}");
                    false
                }
            },
            None => false,
        }
    }
}

/// Implemented by view model types to receive their owner's scope once.
///
/// Forward the handle to every [`ViewModelState`] field.
pub trait ViewModelObject: 'static {
    fn attach(&self, scope: &ScopeHandle);
}

pub struct ViewModel<T> {
    init: Rc<dyn Fn() -> T>,
    instance: RefCell<Option<Rc<T>>>,
}

impl<T: ViewModelObject> ViewModel<T> {
    pub fn new(init: impl Fn() -> T + 'static) -> Self {
        Self {
            init: Rc::new(init),
            instance: RefCell::new(None),
        }
    }

    pub fn is_linked(&self) -> bool {
        self.instance.borrow().is_some()
    }

    pub fn get(&self) -> Rc<T> {
        match self.instance.borrow().as_ref() {
            Some(instance) => Rc::clone(instance),
            None => panic!(
                "ViewModel<{}> used before it was linked",
                std::any::type_name::<T>()
            ),
        }
    }
}

impl<T: ViewModelObject + Default> Default for ViewModel<T> {
    fn default() -> Self {
        Self::new(T::default)
    }
}

impl<T> Clone for ViewModel<T> {
    fn clone(&self) -> Self {
        Self {
            init: Rc::clone(&self.init),
            instance: RefCell::new(self.instance.borrow().clone()),
        }
    }
}

impl<T> PartialEq for ViewModel<T> {
    fn eq(&self, other: &Self) -> bool {
        match (&*self.instance.borrow(), &*other.instance.borrow()) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl<T> fmt::Debug for ViewModel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewModel")
            .field("type", &std::any::type_name::<T>())
            .field("linked", &self.instance.borrow().is_some())
            .finish()
    }
}

impl<T: ViewModelObject> Linkable for ViewModel<T> {
    fn link(&self, linker: &mut SlotLinker<'_>) {
        let init = Rc::clone(&self.init);
        let (index, installed) = linker.claim(move || Box::new(Rc::new(init())));
        let instance: Rc<T> = match linker.read(index) {
            Ok(instance) => instance,
            Err(err) => panic!("failed to link view model: {err}"),
        };
        if installed {
            instance.attach(&linker.scope());
        }
        *self.instance.borrow_mut() = Some(instance);
    }
}

/// A value inside a view model whose writes re-render the owning node.
pub struct ViewModelState<T> {
    value: RefCell<T>,
    scope: RefCell<Option<ScopeHandle>>,
}

impl<T> ViewModelState<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: RefCell::new(value),
            scope: RefCell::new(None),
        }
    }

    pub fn attach(&self, scope: &ScopeHandle) {
        *self.scope.borrow_mut() = Some(scope.clone());
    }

    pub fn is_attached(&self) -> bool {
        self.scope.borrow().is_some()
    }

    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.value.borrow().clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.value.borrow())
    }

    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let scope = match self.scope.borrow().as_ref() {
            Some(scope) => scope.clone(),
            None => panic!(
                "ViewModelState<{}> written before its view model was attached",
                std::any::type_name::<T>()
            ),
        };
        f(&mut self.value.borrow_mut());
        scope.request_update();
    }

    pub fn set(&self, value: T) {
        self.update(move |slot| *slot = value);
    }
}

impl<T: Default> Default for ViewModelState<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for ViewModelState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewModelState")
            .field("value", &self.value.borrow())
            .field("attached", &self.is_attached())
            .finish()
    }
}
