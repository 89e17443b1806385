//! Elements, view descriptions and the retained native view reconciler.

mod controller;
mod element;
mod native_view_node;
mod resolve;
mod view_description;
mod views;

pub use controller::{NativeViewController, UpdateContext};
pub use element::{Element, ElementContent, IntoElement};
pub use native_view_node::NativeViewNode;
pub use resolve::{ElementResolver, LayoutResolver};
pub use view_description::ViewDescription;
pub use views::ContainerView;

pub use blueprint_animation::{LayoutTransition, PerformRule, VisibilityTransition};
pub use blueprint_core::{ElementPath, ViewId};
pub use blueprint_ui_graphics::{LayoutAttributes, Point, Rect, Size, Transform3D};
pub use blueprint_ui_layout::{Layout, Measurable, SizeConstraint};

pub mod prelude {
    pub use crate::controller::NativeViewController;
    pub use crate::element::{Element, ElementContent, IntoElement};
    pub use crate::resolve::{ElementResolver, LayoutResolver};
    pub use crate::view_description::ViewDescription;
    pub use blueprint_animation::prelude::*;
    pub use blueprint_ui_graphics::{LayoutAttributes, Rect, Size};
}
