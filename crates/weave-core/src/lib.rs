#![doc = r"Core runtime pieces for Weave: descriptor inflation, persistent node identity and state slots."]

extern crate self as weave_core;

pub mod action;
pub mod collections;
pub mod component;
pub mod error;
pub mod hash;
pub mod host;
pub mod identity;
pub mod inflate;
pub mod model;
pub mod platform;
pub mod registry;
pub mod slots;
pub mod state;
pub mod view_model;

pub use action::{Action, ActionWith, ErasedAction};
pub use component::{Component, Composite, ModelHost, Payload, ScopeInfo};
pub use error::{HostError, NodeError};
pub use host::{AnimationPhase, Host, HostConfig, RenderReport, ScheduledAnimation};
pub use identity::{Identity, TypeKey, ViewId};
pub use inflate::{Context, Either, Empty, InflateOutcome, InflateStats, Inflate, Inflater, View};
pub use model::{
    Animation, AnimationDirective, AnimationModifier, Animations, Callback, LifecycleCallbacks,
    LifecycleDirective, LifecycleExt, LifecycleModifier, Model,
};
pub use platform::{DefaultScheduler, RenderScheduler};
pub use registry::{NodeId, Registry, RegistryHandle, RemovedNode, StateStore};
pub use slots::{Linkable, SlotLinker, Slots};
pub use state::{Binding, State};
pub use view_model::{ScopeHandle, ViewModel, ViewModelObject, ViewModelState};

pub use weave_macros::Slots;
