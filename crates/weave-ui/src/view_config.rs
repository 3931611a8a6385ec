//! Leaf view configuration: a view class and its ordered attributes.

use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::dimension::Color;
use crate::gestures::{GestureAttribute, GestureKind};

const LAYER_PREFIX: &str = "layer.";

/// Names the platform view class a component is backed by.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ViewClass(Cow<'static, str>);

impl ViewClass {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Default for ViewClass {
    fn default() -> Self {
        Self::new("View")
    }
}

impl From<&'static str> for ViewClass {
    fn from(name: &'static str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for ViewClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum AttributeKey {
    View(Cow<'static, str>),
    Layer(Cow<'static, str>),
    Gesture(GestureKind),
}

impl AttributeKey {
    pub fn view(name: impl Into<Cow<'static, str>>) -> Self {
        AttributeKey::View(name.into())
    }

    pub fn layer(name: impl Into<Cow<'static, str>>) -> Self {
        AttributeKey::Layer(name.into())
    }

    pub fn is_layer(&self) -> bool {
        matches!(self, AttributeKey::Layer(_))
    }
}

impl From<&'static str> for AttributeKey {
    fn from(name: &'static str) -> Self {
        match name.strip_prefix(LAYER_PREFIX) {
            Some(layer) => AttributeKey::layer(layer),
            None => AttributeKey::view(name),
        }
    }
}

impl fmt::Display for AttributeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeKey::View(name) => f.write_str(name),
            AttributeKey::Layer(name) => write!(f, "{LAYER_PREFIX}{name}"),
            AttributeKey::Gesture(kind) => write!(f, "gesture.{}", kind.name()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentMode {
    ScaleToFill,
    ScaleAspectFit,
    ScaleAspectFill,
    Center,
    Top,
    Bottom,
    Left,
    Right,
}

#[derive(Clone)]
pub enum AttrValue {
    Bool(bool),
    Float(f32),
    Int(i64),
    Text(Cow<'static, str>),
    Color(Color),
    ContentMode(ContentMode),
    Gesture(GestureAttribute),
    Custom(Rc<dyn Any>),
}

impl AttrValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            AttrValue::Float(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match self {
            AttrValue::Color(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttrValue::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_gesture(&self) -> Option<&GestureAttribute> {
        match self {
            AttrValue::Gesture(value) => Some(value),
            _ => None,
        }
    }

    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        match self {
            AttrValue::Custom(value) => value.downcast_ref::<T>(),
            _ => None,
        }
    }
}

impl PartialEq for AttrValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (AttrValue::Bool(a), AttrValue::Bool(b)) => a == b,
            (AttrValue::Float(a), AttrValue::Float(b)) => a == b,
            (AttrValue::Int(a), AttrValue::Int(b)) => a == b,
            (AttrValue::Text(a), AttrValue::Text(b)) => a == b,
            (AttrValue::Color(a), AttrValue::Color(b)) => a == b,
            (AttrValue::ContentMode(a), AttrValue::ContentMode(b)) => a == b,
            (AttrValue::Gesture(a), AttrValue::Gesture(b)) => a.ptr_eq(b),
            (AttrValue::Custom(a), AttrValue::Custom(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Bool(value) => write!(f, "{value}"),
            AttrValue::Float(value) => write!(f, "{value}"),
            AttrValue::Int(value) => write!(f, "{value}"),
            AttrValue::Text(value) => write!(f, "{value:?}"),
            AttrValue::Color(value) => write!(f, "{value:?}"),
            AttrValue::ContentMode(value) => write!(f, "{value:?}"),
            AttrValue::Gesture(value) => write!(f, "{value:?}"),
            AttrValue::Custom(_) => f.write_str("<custom>"),
        }
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

impl From<f32> for AttrValue {
    fn from(value: f32) -> Self {
        AttrValue::Float(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Int(value)
    }
}

impl From<i32> for AttrValue {
    fn from(value: i32) -> Self {
        AttrValue::Int(value.into())
    }
}

impl From<&'static str> for AttrValue {
    fn from(value: &'static str) -> Self {
        AttrValue::Text(Cow::Borrowed(value))
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(Cow::Owned(value))
    }
}

impl From<Color> for AttrValue {
    fn from(value: Color) -> Self {
        AttrValue::Color(value)
    }
}

impl From<ContentMode> for AttrValue {
    fn from(value: ContentMode) -> Self {
        AttrValue::ContentMode(value)
    }
}

impl From<GestureAttribute> for AttrValue {
    fn from(value: GestureAttribute) -> Self {
        AttrValue::Gesture(value)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewConfig {
    class: ViewClass,
    attributes: IndexMap<AttributeKey, AttrValue>,
}

impl ViewConfig {
    pub fn new(class: impl Into<ViewClass>) -> Self {
        Self {
            class: class.into(),
            attributes: IndexMap::new(),
        }
    }

    pub fn class(&self) -> &ViewClass {
        &self.class
    }

    /// Sets `key`. A key set again keeps its first position.
    pub fn set(&mut self, key: impl Into<AttributeKey>, value: impl Into<AttrValue>) {
        self.attributes.insert(key.into(), value.into());
    }

    pub fn with(mut self, key: impl Into<AttributeKey>, value: impl Into<AttrValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &AttributeKey) -> Option<&AttrValue> {
        self.attributes.get(key)
    }

    pub fn gesture(&self, kind: GestureKind) -> Option<&GestureAttribute> {
        self.get(&AttributeKey::Gesture(kind))
            .and_then(AttrValue::as_gesture)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AttributeKey, &AttrValue)> {
        self.attributes.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &AttributeKey> {
        self.attributes.keys()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl fmt::Display for ViewConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.class)?;
        if self.attributes.is_empty() {
            return Ok(());
        }
        f.write_str(" {")?;
        for (index, (key, value)) in self.attributes.iter().enumerate() {
            if index > 0 {
                f.write_str(",")?;
            }
            write!(f, " {key}: {value:?}")?;
        }
        f.write_str(" }")
    }
}

#[cfg(test)]
#[path = "tests/view_config_tests.rs"]
mod tests;
