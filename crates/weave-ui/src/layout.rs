//! Structural layout modifiers.
//!
//! Unlike lifecycle and animation modifiers these add a level to the tree. The
//! wrapped descriptor is inflated without a model, the wrapper is built around
//! it, and the model that reached the modifier is attached to the wrapper.

use std::fmt;
use std::rc::Rc;

use bitflags::bitflags;
use weave_core::{Component, Inflate, Inflater, Model, TypeKey};

use crate::dimension::{ComponentSize, Dimension, EdgeInsets};

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct CenteringOptions: u8 {
        const X = 1 << 0;
        const Y = 1 << 1;
        const XY = Self::X.bits() | Self::Y.bits();
    }
}

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct SizingOptions: u8 {
        const MINIMUM_X = 1 << 0;
        const MINIMUM_Y = 1 << 1;
        const MINIMUM_XY = Self::MINIMUM_X.bits() | Self::MINIMUM_Y.bits();
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Sizing {
    pub size: ComponentSize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Inset {
    pub insets: EdgeInsets,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RatioLayout {
    pub ratio: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CenterLayout {
    pub centering: CenteringOptions,
    pub sizing: SizingOptions,
}

/// Children are `[content, background]`.
#[derive(Clone, Debug, PartialEq)]
pub struct BackgroundLayout;

/// Children are `[content, overlay]`.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayLayout;

#[derive(Clone)]
pub enum LayoutDirective {
    Frame(ComponentSize),
    Padding(EdgeInsets),
    Ratio(f32),
    Center {
        centering: CenteringOptions,
        sizing: SizingOptions,
    },
    Background(Rc<dyn Inflate>),
    Overlay(Rc<dyn Inflate>),
}

impl LayoutDirective {
    fn build(&self, inflater: &mut Inflater<'_>, content: Component) -> Component {
        match self {
            LayoutDirective::Frame(size) => {
                Component::with_children(Sizing { size: *size }, vec![content])
            }
            LayoutDirective::Padding(insets) => {
                Component::with_children(Inset { insets: *insets }, vec![content])
            }
            LayoutDirective::Ratio(ratio) => {
                Component::with_children(RatioLayout { ratio: *ratio }, vec![content])
            }
            LayoutDirective::Center { centering, sizing } => Component::with_children(
                CenterLayout {
                    centering: *centering,
                    sizing: *sizing,
                },
                vec![content],
            ),
            LayoutDirective::Background(background) => {
                let background = inflater.inflate(background);
                Component::with_children(BackgroundLayout, vec![content, background])
            }
            LayoutDirective::Overlay(overlay) => {
                let overlay = inflater.inflate(overlay);
                Component::with_children(OverlayLayout, vec![content, overlay])
            }
        }
    }

    fn type_key(&self) -> TypeKey {
        match self {
            LayoutDirective::Frame(_) => TypeKey::of::<Sizing>(),
            LayoutDirective::Padding(_) => TypeKey::of::<Inset>(),
            LayoutDirective::Ratio(_) => TypeKey::of::<RatioLayout>(),
            LayoutDirective::Center { .. } => TypeKey::of::<CenterLayout>(),
            LayoutDirective::Background(_) => TypeKey::of::<BackgroundLayout>(),
            LayoutDirective::Overlay(_) => TypeKey::of::<OverlayLayout>(),
        }
    }
}

impl fmt::Debug for LayoutDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutDirective::Frame(size) => write!(f, "Frame({size})"),
            LayoutDirective::Padding(insets) => write!(f, "Padding({insets:?})"),
            LayoutDirective::Ratio(ratio) => write!(f, "Ratio({ratio})"),
            LayoutDirective::Center { centering, sizing } => f
                .debug_struct("Center")
                .field("centering", centering)
                .field("sizing", sizing)
                .finish(),
            LayoutDirective::Background(_) => f.write_str("Background"),
            LayoutDirective::Overlay(_) => f.write_str("Overlay"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct LayoutModifier<I> {
    inner: I,
    directive: LayoutDirective,
}

impl<I: Inflate> LayoutModifier<I> {
    pub fn new(inner: I, directive: LayoutDirective) -> Self {
        Self { inner, directive }
    }

    pub fn directive(&self) -> &LayoutDirective {
        &self.directive
    }
}

impl<I: Inflate> Inflate for LayoutModifier<I> {
    fn inflate(&self, inflater: &mut Inflater<'_>, model: Option<Model>) -> Component {
        let content = self.inner.inflate(inflater, None);
        let wrapper = self.directive.build(inflater, content);
        inflater.attach_model(wrapper, self.directive.type_key(), model)
    }
}

pub trait LayoutExt: Inflate + Sized {
    fn frame(self, size: ComponentSize) -> LayoutModifier<Self> {
        LayoutModifier::new(self, LayoutDirective::Frame(size))
    }

    /// Fixed width and height in points.
    fn fixed_frame(self, width: f32, height: f32) -> LayoutModifier<Self> {
        self.frame(ComponentSize::points(width, height))
    }

    /// Width and height as percentages of the parent.
    fn relative_frame(self, width: f32, height: f32) -> LayoutModifier<Self> {
        self.frame(ComponentSize::new(
            Dimension::Percent(width),
            Dimension::Percent(height),
        ))
    }

    fn padding(self, all: f32) -> LayoutModifier<Self> {
        self.padding_insets(EdgeInsets::uniform(all))
    }

    fn padding_insets(self, insets: EdgeInsets) -> LayoutModifier<Self> {
        LayoutModifier::new(self, LayoutDirective::Padding(insets))
    }

    fn ratio(self, ratio: f32) -> LayoutModifier<Self> {
        LayoutModifier::new(self, LayoutDirective::Ratio(ratio))
    }

    fn center(self, centering: CenteringOptions, sizing: SizingOptions) -> LayoutModifier<Self> {
        LayoutModifier::new(self, LayoutDirective::Center { centering, sizing })
    }

    fn background(self, background: impl Inflate) -> LayoutModifier<Self> {
        LayoutModifier::new(self, LayoutDirective::Background(Rc::new(background)))
    }

    fn overlay(self, overlay: impl Inflate) -> LayoutModifier<Self> {
        LayoutModifier::new(self, LayoutDirective::Overlay(Rc::new(overlay)))
    }
}

impl<I: Inflate> LayoutExt for I {}

#[cfg(test)]
#[path = "tests/layout_tests.rs"]
mod tests;
