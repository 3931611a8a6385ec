use weave_core::{Action, ActionWith, Component, Inflate, Inflater, Model, TypeKey};

use crate::dimension::{Color, ComponentSize};
use crate::gestures::{GestureAttribute, GestureEvent, GestureKind};
use crate::view_config::{AttrValue, AttributeKey, ContentMode, ViewClass, ViewConfig};

/// Payload of a component backed by a platform view.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewPayload {
    pub config: ViewConfig,
    pub size: Option<ComponentSize>,
}

/// Builder methods shared by everything that carries a [`ViewConfig`].
pub trait ViewAttributes: Sized {
    fn view_config_mut(&mut self) -> &mut ViewConfig;

    fn attribute(mut self, key: impl Into<AttributeKey>, value: impl Into<AttrValue>) -> Self {
        self.view_config_mut().set(key, value);
        self
    }

    fn layer_attribute(self, name: &'static str, value: impl Into<AttrValue>) -> Self {
        self.attribute(AttributeKey::layer(name), value)
    }

    fn background_color(self, color: Color) -> Self {
        self.attribute(AttributeKey::view("background_color"), color)
    }

    fn alpha(self, alpha: f32) -> Self {
        self.attribute(AttributeKey::view("alpha"), alpha)
    }

    fn clips_to_bounds(self, clips: bool) -> Self {
        self.attribute(AttributeKey::view("clips_to_bounds"), clips)
    }

    fn user_interaction_enabled(self, enabled: bool) -> Self {
        self.attribute(AttributeKey::view("user_interaction_enabled"), enabled)
    }

    fn content_mode(self, mode: ContentMode) -> Self {
        self.attribute(AttributeKey::view("content_mode"), mode)
    }

    fn border_width(self, width: f32) -> Self {
        self.layer_attribute("border_width", width)
    }

    fn border_color(self, color: Color) -> Self {
        self.layer_attribute("border_color", color)
    }

    fn corner_radius(self, radius: f32) -> Self {
        self.layer_attribute("corner_radius", radius)
    }

    fn gesture(self, gesture: GestureAttribute) -> Self {
        self.attribute(AttributeKey::Gesture(gesture.kind()), gesture)
    }

    fn tap_handler(self, action: ActionWith<GestureEvent>) -> Self {
        self.gesture(GestureAttribute::new(GestureKind::Tap, action))
    }

    fn pan_handler(self, action: ActionWith<GestureEvent>) -> Self {
        self.gesture(GestureAttribute::new(GestureKind::Pan, action))
    }

    fn long_press_handler(self, action: ActionWith<GestureEvent>) -> Self {
        self.gesture(GestureAttribute::new(GestureKind::LongPress, action))
    }

    /// Tap handler that ignores the event.
    fn on_tap(self, action: Action) -> Self {
        self.gesture(GestureAttribute::from_action(GestureKind::Tap, action))
    }
}

/// A leaf component backed by a platform view.
#[derive(Clone, Debug, Default)]
pub struct ComponentView {
    config: ViewConfig,
    size: Option<ComponentSize>,
}

impl ComponentView {
    pub fn new(class: impl Into<ViewClass>) -> Self {
        Self::with_config(ViewConfig::new(class))
    }

    pub fn with_config(config: ViewConfig) -> Self {
        Self { config, size: None }
    }

    pub fn size(mut self, size: ComponentSize) -> Self {
        self.size = Some(size);
        self
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    fn payload(&self) -> ViewPayload {
        ViewPayload {
            config: self.config.clone(),
            size: self.size,
        }
    }
}

impl ViewAttributes for ComponentView {
    fn view_config_mut(&mut self) -> &mut ViewConfig {
        &mut self.config
    }
}

impl Inflate for ComponentView {
    fn inflate(&self, inflater: &mut Inflater<'_>, model: Option<Model>) -> Component {
        inflater.attach_model(
            Component::new(self.payload()),
            TypeKey::of::<ComponentView>(),
            model,
        )
    }
}

/// A platform view hosting one child descriptor.
#[derive(Clone, Debug)]
pub struct WrapperComponentView<I> {
    view: ComponentView,
    child: I,
}

impl<I: Inflate> WrapperComponentView<I> {
    pub fn new(class: impl Into<ViewClass>, child: I) -> Self {
        Self {
            view: ComponentView::new(class),
            child,
        }
    }

    pub fn size(mut self, size: ComponentSize) -> Self {
        self.view = self.view.size(size);
        self
    }

    pub fn config(&self) -> &ViewConfig {
        self.view.config()
    }
}

impl<I> ViewAttributes for WrapperComponentView<I> {
    fn view_config_mut(&mut self) -> &mut ViewConfig {
        &mut self.view.config
    }
}

impl<I: Inflate> Inflate for WrapperComponentView<I> {
    fn inflate(&self, inflater: &mut Inflater<'_>, model: Option<Model>) -> Component {
        let child = self.child.inflate(inflater, None);
        inflater.attach_model(
            Component::with_children(self.view.payload(), vec![child]),
            TypeKey::of::<WrapperComponentView<I>>(),
            model,
        )
    }
}
