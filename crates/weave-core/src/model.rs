//! The transient model threaded through modifiers.
//!
//! Non-structural modifiers (lifecycle callbacks, animations) do not produce a
//! component of their own. They add a directive to the model and pass it inward,
//! and the model lands on whatever component the innermost descriptor produces.

use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use crate::component::Component;
use crate::inflate::{Inflate, Inflater};

pub type Callback = Rc<dyn Fn()>;

#[derive(Clone, Default)]
pub struct LifecycleCallbacks {
    pub did_init: Vec<Callback>,
    pub will_mount: Vec<Callback>,
    pub did_unmount: Vec<Callback>,
    pub will_dispose: Vec<Callback>,
}

impl LifecycleCallbacks {
    pub fn is_empty(&self) -> bool {
        self.did_init.is_empty()
            && self.will_mount.is_empty()
            && self.did_unmount.is_empty()
            && self.will_dispose.is_empty()
    }
}

impl fmt::Debug for LifecycleCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifecycleCallbacks")
            .field("did_init", &self.did_init.len())
            .field("will_mount", &self.will_mount.len())
            .field("did_unmount", &self.did_unmount.len())
            .field("will_dispose", &self.will_dispose.len())
            .finish()
    }
}

/// An opaque animation directive. Interpolation belongs to the view layer.
#[derive(Clone, Debug, PartialEq)]
pub struct Animation {
    pub name: Cow<'static, str>,
    pub duration: Duration,
    pub delay: Duration,
}

impl Animation {
    pub fn new(name: impl Into<Cow<'static, str>>, duration: Duration) -> Self {
        Self {
            name: name.into(),
            duration,
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Animations {
    /// Applied when a mounted component is rendered again.
    pub update: Vec<Animation>,
    pub initial_mount: Vec<Animation>,
    pub final_unmount: Vec<Animation>,
}

impl Animations {
    pub fn is_empty(&self) -> bool {
        self.update.is_empty() && self.initial_mount.is_empty() && self.final_unmount.is_empty()
    }
}

#[derive(Clone, Debug, Default)]
pub struct Model {
    pub lifecycle: LifecycleCallbacks,
    pub animations: Animations,
}

impl Model {
    pub fn is_empty(&self) -> bool {
        self.lifecycle.is_empty() && self.animations.is_empty()
    }

    /// Adds `directive` in front of the existing entries of its kind.
    pub fn prepend_lifecycle(mut self, directive: LifecycleDirective) -> Self {
        let (list, callback) = match directive {
            LifecycleDirective::DidInit(cb) => (&mut self.lifecycle.did_init, cb),
            LifecycleDirective::WillMount(cb) => (&mut self.lifecycle.will_mount, cb),
            LifecycleDirective::DidUnmount(cb) => (&mut self.lifecycle.did_unmount, cb),
            LifecycleDirective::WillDispose(cb) => (&mut self.lifecycle.will_dispose, cb),
        };
        list.insert(0, callback);
        self
    }

    pub fn prepend_animation(mut self, directive: AnimationDirective) -> Self {
        let (list, animation) = match directive {
            AnimationDirective::Update(animation) => (&mut self.animations.update, animation),
            AnimationDirective::InitialMount(animation) => {
                (&mut self.animations.initial_mount, animation)
            }
            AnimationDirective::FinalUnmount(animation) => {
                (&mut self.animations.final_unmount, animation)
            }
        };
        list.insert(0, animation);
        self
    }
}

#[derive(Clone)]
pub enum LifecycleDirective {
    DidInit(Callback),
    WillMount(Callback),
    DidUnmount(Callback),
    WillDispose(Callback),
}

impl fmt::Debug for LifecycleDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecycleDirective::DidInit(_) => "DidInit",
            LifecycleDirective::WillMount(_) => "WillMount",
            LifecycleDirective::DidUnmount(_) => "DidUnmount",
            LifecycleDirective::WillDispose(_) => "WillDispose",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum AnimationDirective {
    Update(Animation),
    InitialMount(Animation),
    FinalUnmount(Animation),
}

#[derive(Clone, Debug)]
pub struct LifecycleModifier<I> {
    inner: I,
    directive: LifecycleDirective,
}

impl<I: Inflate> LifecycleModifier<I> {
    pub fn new(inner: I, directive: LifecycleDirective) -> Self {
        Self { inner, directive }
    }

    pub fn inner(&self) -> &I {
        &self.inner
    }
}

impl<I: Inflate> Inflate for LifecycleModifier<I> {
    fn inflate(&self, inflater: &mut Inflater<'_>, model: Option<Model>) -> Component {
        let model = model
            .unwrap_or_default()
            .prepend_lifecycle(self.directive.clone());
        self.inner.inflate(inflater, Some(model))
    }
}

#[derive(Clone, Debug)]
pub struct AnimationModifier<I> {
    inner: I,
    directive: AnimationDirective,
}

impl<I: Inflate> AnimationModifier<I> {
    pub fn new(inner: I, directive: AnimationDirective) -> Self {
        Self { inner, directive }
    }
}

impl<I: Inflate> Inflate for AnimationModifier<I> {
    fn inflate(&self, inflater: &mut Inflater<'_>, model: Option<Model>) -> Component {
        let model = model
            .unwrap_or_default()
            .prepend_animation(self.directive.clone());
        self.inner.inflate(inflater, Some(model))
    }
}

pub trait LifecycleExt: Inflate + Sized {
    fn on_did_init(self, callback: impl Fn() + 'static) -> LifecycleModifier<Self> {
        LifecycleModifier::new(self, LifecycleDirective::DidInit(Rc::new(callback)))
    }

    fn on_will_mount(self, callback: impl Fn() + 'static) -> LifecycleModifier<Self> {
        LifecycleModifier::new(self, LifecycleDirective::WillMount(Rc::new(callback)))
    }

    fn on_did_unmount(self, callback: impl Fn() + 'static) -> LifecycleModifier<Self> {
        LifecycleModifier::new(self, LifecycleDirective::DidUnmount(Rc::new(callback)))
    }

    fn on_will_dispose(self, callback: impl Fn() + 'static) -> LifecycleModifier<Self> {
        LifecycleModifier::new(self, LifecycleDirective::WillDispose(Rc::new(callback)))
    }

    fn animation(self, animation: Animation) -> AnimationModifier<Self> {
        AnimationModifier::new(self, AnimationDirective::Update(animation))
    }

    fn on_initial_mount(self, animation: Animation) -> AnimationModifier<Self> {
        AnimationModifier::new(self, AnimationDirective::InitialMount(animation))
    }

    fn on_final_unmount(self, animation: Animation) -> AnimationModifier<Self> {
        AnimationModifier::new(self, AnimationDirective::FinalUnmount(animation))
    }
}

impl<I: Inflate> LifecycleExt for I {}

#[cfg(test)]
#[path = "tests/model_tests.rs"]
mod tests;
