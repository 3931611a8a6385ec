use std::any::{type_name, Any};
use std::fmt;
use std::fmt::Write as _;
use std::rc::Rc;

use crate::identity::{short_type_name, Identity, TypeKey};
use crate::model::Model;
use crate::registry::NodeId;

/// Type-erased content of a [`Component`].
pub trait Payload: fmt::Debug + 'static {
    fn as_any(&self) -> &dyn Any;
}

impl<T: fmt::Debug + 'static> Payload for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Marks the output of a composite view that owns a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Composite {
    pub view_type: TypeKey,
}

/// Marks a node allocated only to carry a model for an already scoped child.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModelHost {
    pub type_key: TypeKey,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScopeInfo {
    pub node: NodeId,
    pub identity: Identity,
    pub type_key: TypeKey,
}

struct ComponentInner {
    payload: Option<Rc<dyn Payload>>,
    name: &'static str,
    children: Vec<Component>,
    scope: Option<ScopeInfo>,
    model: Option<Rc<Model>>,
    transparent: bool,
}

/// Immutable node of the render output.
#[derive(Clone)]
pub struct Component {
    inner: Rc<ComponentInner>,
}

impl Component {
    pub fn empty() -> Self {
        Self::build(None, "Empty", Vec::new(), false)
    }

    pub fn new<P: Payload>(payload: P) -> Self {
        Self::with_children(payload, Vec::new())
    }

    pub fn with_children<P: Payload>(payload: P, children: Vec<Component>) -> Self {
        Self::build(
            Some(Rc::new(payload)),
            short_type_name(type_name::<P>()),
            children,
            false,
        )
    }

    fn build(
        payload: Option<Rc<dyn Payload>>,
        name: &'static str,
        children: Vec<Component>,
        transparent: bool,
    ) -> Self {
        Self {
            inner: Rc::new(ComponentInner {
                payload,
                name,
                children,
                scope: None,
                model: None,
                transparent,
            }),
        }
    }

    pub(crate) fn composite(
        body: Component,
        scope: ScopeInfo,
        model: Option<Rc<Model>>,
    ) -> Self {
        let payload = Composite {
            view_type: scope.type_key,
        };
        Self::build(
            Some(Rc::new(payload)),
            scope.type_key.short_name(),
            vec![body],
            true,
        )
        .with_scope(scope, model)
    }

    pub(crate) fn model_host(child: Component, scope: ScopeInfo, model: Rc<Model>) -> Self {
        let payload = ModelHost {
            type_key: scope.type_key,
        };
        Self::build(Some(Rc::new(payload)), "ModelHost", vec![child], true)
            .with_scope(scope, Some(model))
    }

    /// Copy of this component bound to a node.
    pub(crate) fn with_scope(&self, scope: ScopeInfo, model: Option<Rc<Model>>) -> Self {
        Self {
            inner: Rc::new(ComponentInner {
                payload: self.inner.payload.clone(),
                name: self.inner.name,
                children: self.inner.children.clone(),
                scope: Some(scope),
                model,
                transparent: self.inner.transparent,
            }),
        }
    }

    pub fn payload<T: 'static>(&self) -> Option<&T> {
        self.inner
            .payload
            .as_deref()
            .and_then(|payload| payload.as_any().downcast_ref::<T>())
    }

    pub fn payload_dyn(&self) -> Option<&dyn Payload> {
        self.inner.payload.as_deref()
    }

    pub fn payload_name(&self) -> &'static str {
        self.inner.name
    }

    pub fn children(&self) -> &[Component] {
        &self.inner.children
    }

    pub fn child(&self, index: usize) -> Option<&Component> {
        self.inner.children.get(index)
    }

    pub fn scope(&self) -> Option<ScopeInfo> {
        self.inner.scope
    }

    pub fn node(&self) -> Option<NodeId> {
        self.inner.scope.map(|scope| scope.node)
    }

    pub fn identity(&self) -> Option<Identity> {
        self.inner.scope.map(|scope| scope.identity)
    }

    pub fn model(&self) -> Option<&Rc<Model>> {
        self.inner.model.as_ref()
    }

    /// `true` when nothing would be rendered: no payload, or only marker wrappers
    /// around empty components.
    pub fn is_empty(&self) -> bool {
        match self.inner.payload {
            None => self.inner.children.iter().all(Component::is_empty),
            Some(_) => {
                self.inner.transparent && self.inner.children.iter().all(Component::is_empty)
            }
        }
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Visits the tree in pre-order with the depth of each component.
    pub fn walk(&self, f: &mut impl FnMut(&Component, usize)) {
        self.walk_at(0, f);
    }

    fn walk_at(&self, depth: usize, f: &mut impl FnMut(&Component, usize)) {
        f(self, depth);
        for child in self.children() {
            child.walk_at(depth + 1, f);
        }
    }

    /// Indented outline of the tree, one component per line.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.walk(&mut |component, depth| {
            let _ = write!(out, "{:indent$}{}", "", component.payload_name(), indent = depth * 2);
            if let Some(identity) = component.identity() {
                let _ = write!(out, " {identity}");
            }
            if component.model().is_some() {
                out.push_str(" +model");
            }
            out.push('\n');
        });
        out
    }
}

impl Default for Component {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct(self.inner.name);
        if let Some(payload) = &self.inner.payload {
            s.field("payload", payload);
        }
        if let Some(identity) = self.identity() {
            s.field("identity", &identity);
        }
        if !self.inner.children.is_empty() {
            s.field("children", &self.inner.children);
        }
        s.finish()
    }
}

#[cfg(test)]
#[path = "tests/component_tests.rs"]
mod tests;
