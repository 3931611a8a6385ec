use thiserror::Error;

use crate::Identity;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodeError {
    #[error("node {identity} missing")]
    Missing { identity: Identity },
    #[error("node {identity} type mismatch; expected {expected}")]
    TypeMismatch {
        identity: Identity,
        expected: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("render did not settle after {passes} passes")]
    Unsettled { passes: usize },
    #[error(transparent)]
    Node(#[from] NodeError),
}
