use std::any::Any;
use std::fmt;
use std::rc::Rc;

use weave_core::{Action, ActionWith, ErasedAction};

use crate::dimension::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GestureKind {
    Tap,
    Pan,
    LongPress,
}

impl GestureKind {
    pub fn name(self) -> &'static str {
        match self {
            GestureKind::Tap => "tap",
            GestureKind::Pan => "pan",
            GestureKind::LongPress => "long_press",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GesturePhase {
    Began,
    Changed,
    #[default]
    Ended,
    Cancelled,
}

/// What a recognizer reports to its handler.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureEvent {
    pub kind: GestureKind,
    pub phase: GesturePhase,
    pub location: Point,
    pub translation: Point,
}

impl GestureEvent {
    pub fn new(kind: GestureKind, location: Point) -> Self {
        Self {
            kind,
            phase: GesturePhase::default(),
            location,
            translation: Point::default(),
        }
    }

    pub fn with_phase(mut self, phase: GesturePhase) -> Self {
        self.phase = phase;
        self
    }

    pub fn with_translation(mut self, translation: Point) -> Self {
        self.translation = translation;
        self
    }
}

/// A recognizer to install on the view and the handler it drives.
#[derive(Clone)]
pub struct GestureAttribute {
    kind: GestureKind,
    handler: ErasedAction,
}

impl GestureAttribute {
    pub fn new(kind: GestureKind, action: ActionWith<GestureEvent>) -> Self {
        Self {
            kind,
            handler: action.erased(),
        }
    }

    pub fn from_action(kind: GestureKind, action: Action) -> Self {
        Self {
            kind,
            handler: action.erased(),
        }
    }

    pub fn kind(&self) -> GestureKind {
        self.kind
    }

    /// Delivers `payload` to the handler, which checks its type.
    pub fn fire(&self, payload: &dyn Any) {
        (self.handler)(payload)
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.kind == other.kind && Rc::ptr_eq(&self.handler, &other.handler)
    }
}

impl fmt::Debug for GestureAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("GestureAttribute").field(&self.kind).finish()
    }
}
