//! Pure math/data for positioning native views in Blueprint-RS
//!
//! This crate contains geometry primitives, 3D transforms and the
//! layout attributes that the reconciler applies to native views.

mod geometry;
mod layout_attributes;
mod transform;

pub use geometry::*;
pub use layout_attributes::*;
pub use transform::*;

pub mod prelude {
    pub use crate::geometry::{Point, Rect, Size};
    pub use crate::layout_attributes::LayoutAttributes;
    pub use crate::transform::Transform3D;
}
