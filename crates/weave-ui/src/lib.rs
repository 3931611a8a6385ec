#![doc = r"Leaf views, layout modifiers and flexbox containers built on weave-core."]

pub mod component_view;
pub mod dimension;
pub mod flexbox;
pub mod gestures;
pub mod layout;
pub mod view_config;

pub use component_view::{ComponentView, ViewAttributes, ViewPayload, WrapperComponentView};
pub use dimension::{Color, ComponentSize, Dimension, EdgeInsets, Point, Size};
pub use flexbox::{
    AlignContent, AlignItems, AlignSelf, FlexChild, FlexChildStyle, FlexDirection, FlexStyle,
    FlexWrap, Flexbox, FlexboxLayout, JustifyContent, LayoutDirection,
};
pub use gestures::{GestureAttribute, GestureEvent, GestureKind, GesturePhase};
pub use layout::{
    BackgroundLayout, CenterLayout, CenteringOptions, Inset, LayoutDirective, LayoutExt,
    LayoutModifier, OverlayLayout, RatioLayout, Sizing, SizingOptions,
};
pub use view_config::{AttrValue, AttributeKey, ContentMode, ViewClass, ViewConfig};

pub mod prelude {
    pub use crate::component_view::{ComponentView, ViewAttributes, WrapperComponentView};
    pub use crate::dimension::{Color, ComponentSize, Dimension, EdgeInsets};
    pub use crate::flexbox::{FlexChild, FlexStyle, Flexbox};
    pub use crate::gestures::{GestureEvent, GestureKind};
    pub use crate::layout::{CenteringOptions, LayoutExt, SizingOptions};
    pub use crate::view_config::{ContentMode, ViewConfig};
    pub use weave_core::{
        Action, ActionWith, Binding, Context, Either, Empty, Inflate, LifecycleExt, Slots, State,
        View, ViewModel, ViewModelObject, ViewModelState,
    };
}
