use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::collections::map::HashMap;
use crate::hash::hash_one;
use crate::registry::NodeId;

/// Stable key matching a node across render passes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identity(u64);

impl Identity {
    pub const ROOT: Identity = Identity(0);

    pub fn raw(self) -> u64 {
        self.0
    }

    pub(crate) fn child(self, type_key: TypeKey, id: Option<ViewId>, ordinal: u32) -> Identity {
        Identity(hash_one(&(self.0, type_key.id, id, ordinal)))
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identity({:016x})", self.0)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:016x}", self.0)
    }
}

/// Explicit identifier an identifiable view reports from [`crate::View::id`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ViewId(u64);

impl ViewId {
    pub fn new<K: Hash + ?Sized>(key: &K) -> Self {
        Self(hash_one(key))
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

#[derive(Clone, Copy, Debug)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Type name without its module path.
    pub fn short_name(&self) -> &'static str {
        short_type_name(self.name)
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

pub(crate) fn short_type_name(name: &'static str) -> &'static str {
    let base = name.split('<').next().unwrap_or(name);
    let start = base.rfind("::").map(|index| index + 2).unwrap_or(0);
    &name[start..]
}

/// One level of the identity-allocation stack kept by the inflater.
pub(crate) struct ScopeFrame {
    identity: Identity,
    node: Option<NodeId>,
    ordinals: HashMap<(TypeKey, Option<ViewId>), u32>,
}

impl ScopeFrame {
    pub(crate) fn new(identity: Identity, node: Option<NodeId>) -> Self {
        Self {
            identity,
            node,
            ordinals: HashMap::default(),
        }
    }

    pub(crate) fn node(&self) -> Option<NodeId> {
        self.node
    }

    pub(crate) fn next_identity(&mut self, type_key: TypeKey, id: Option<ViewId>) -> Identity {
        let ordinal = self.ordinals.entry((type_key, id)).or_insert(0);
        let identity = self.identity.child(type_key, id, *ordinal);
        *ordinal += 1;
        identity
    }
}

#[cfg(test)]
#[path = "tests/identity_tests.rs"]
mod tests;
