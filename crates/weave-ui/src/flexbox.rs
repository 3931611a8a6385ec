use std::fmt;
use std::rc::Rc;

use weave_core::{Component, Inflate, Inflater, Model, TypeKey};

use crate::component_view::{ViewAttributes, ViewPayload};
use crate::dimension::{ComponentSize, Dimension};
use crate::view_config::ViewConfig;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FlexDirection {
    #[default]
    Column,
    Row,
    ColumnReverse,
    RowReverse,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum JustifyContent {
    #[default]
    Start,
    Center,
    End,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AlignItems {
    Start,
    End,
    Center,
    Baseline,
    #[default]
    Stretch,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AlignContent {
    #[default]
    Start,
    End,
    Center,
    SpaceBetween,
    SpaceAround,
    Stretch,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AlignSelf {
    #[default]
    Auto,
    Start,
    End,
    Center,
    Baseline,
    Stretch,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FlexWrap {
    #[default]
    NoWrap,
    Wrap,
    WrapReverse,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LayoutDirection {
    #[default]
    ApplicationDirection,
    LeftToRight,
    RightToLeft,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FlexStyle {
    pub direction: FlexDirection,
    pub spacing: f32,
    pub justify_content: JustifyContent,
    pub align_items: AlignItems,
    pub align_content: AlignContent,
    pub wrap: FlexWrap,
    pub layout_direction: LayoutDirection,
}

impl FlexStyle {
    pub fn row() -> Self {
        Self {
            direction: FlexDirection::Row,
            ..Self::default()
        }
    }

    pub fn column() -> Self {
        Self::default()
    }

    pub fn spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn justify_content(mut self, justify: JustifyContent) -> Self {
        self.justify_content = justify;
        self
    }

    pub fn align_items(mut self, align: AlignItems) -> Self {
        self.align_items = align;
        self
    }

    pub fn wrap(mut self, wrap: FlexWrap) -> Self {
        self.wrap = wrap;
        self
    }
}

/// Per-child flex parameters.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FlexChildStyle {
    pub spacing_before: f32,
    pub spacing_after: f32,
    pub flex_grow: f32,
    pub flex_shrink: f32,
    pub align_self: AlignSelf,
    pub flex_basis: Option<Dimension>,
    pub z_index: i32,
    pub size_constraints: Option<ComponentSize>,
    pub use_text_rounding: bool,
    pub use_height_as_baseline: bool,
}

#[derive(Clone)]
pub struct FlexChild {
    pub style: FlexChildStyle,
    content: Rc<dyn Inflate>,
}

impl FlexChild {
    pub fn new(content: impl Inflate) -> Self {
        Self {
            style: FlexChildStyle::default(),
            content: Rc::new(content),
        }
    }

    pub fn from_rc(content: Rc<dyn Inflate>) -> Self {
        Self {
            style: FlexChildStyle::default(),
            content,
        }
    }

    pub fn style(mut self, style: FlexChildStyle) -> Self {
        self.style = style;
        self
    }

    pub fn grow(mut self, grow: f32) -> Self {
        self.style.flex_grow = grow;
        self
    }

    pub fn shrink(mut self, shrink: f32) -> Self {
        self.style.flex_shrink = shrink;
        self
    }

    pub fn basis(mut self, basis: impl Into<Dimension>) -> Self {
        self.style.flex_basis = Some(basis.into());
        self
    }

    pub fn align_self(mut self, align: AlignSelf) -> Self {
        self.style.align_self = align;
        self
    }

    pub fn spacing(mut self, before: f32, after: f32) -> Self {
        self.style.spacing_before = before;
        self.style.spacing_after = after;
        self
    }
}

impl fmt::Debug for FlexChild {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlexChild")
            .field("style", &self.style)
            .finish_non_exhaustive()
    }
}

/// Payload of an inflated [`Flexbox`]. `children[i]` is laid out with
/// `child_styles[i]`.
#[derive(Clone, Debug, PartialEq)]
pub struct FlexboxLayout {
    pub view: Option<ViewPayload>,
    pub style: FlexStyle,
    pub size: Option<ComponentSize>,
    pub child_styles: Vec<FlexChildStyle>,
}

#[derive(Clone, Debug, Default)]
pub struct Flexbox {
    view: Option<ViewConfig>,
    style: FlexStyle,
    size: Option<ComponentSize>,
    children: Vec<FlexChild>,
}

impl Flexbox {
    pub fn new(style: FlexStyle) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }

    pub fn row() -> Self {
        Self::new(FlexStyle::row())
    }

    pub fn column() -> Self {
        Self::new(FlexStyle::column())
    }

    pub fn view(mut self, config: ViewConfig) -> Self {
        self.view = Some(config);
        self
    }

    pub fn size(mut self, size: ComponentSize) -> Self {
        self.size = Some(size);
        self
    }

    pub fn child(mut self, content: impl Inflate) -> Self {
        self.children.push(FlexChild::new(content));
        self
    }

    pub fn flex_child(mut self, child: FlexChild) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = FlexChild>) -> Self {
        self.children.extend(children);
        self
    }
}

impl ViewAttributes for Flexbox {
    fn view_config_mut(&mut self) -> &mut ViewConfig {
        self.view.get_or_insert_with(ViewConfig::default)
    }
}

impl Inflate for Flexbox {
    fn inflate(&self, inflater: &mut Inflater<'_>, model: Option<Model>) -> Component {
        let mut children = Vec::with_capacity(self.children.len());
        let mut child_styles = Vec::with_capacity(self.children.len());
        for child in &self.children {
            let component = inflater.inflate(&child.content);
            if component.is_empty() {
                log::trace!("flexbox dropped an empty child");
                continue;
            }
            children.push(component);
            child_styles.push(child.style);
        }
        let layout = FlexboxLayout {
            view: self.view.clone().map(|config| ViewPayload {
                config,
                size: None,
            }),
            style: self.style,
            size: self.size,
            child_styles,
        };
        inflater.attach_model(
            Component::with_children(layout, children),
            TypeKey::of::<Flexbox>(),
            model,
        )
    }
}

#[cfg(test)]
#[path = "tests/flexbox_tests.rs"]
mod tests;
