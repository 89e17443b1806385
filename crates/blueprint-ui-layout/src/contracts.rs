use blueprint_ui_graphics::{LayoutAttributes, Size};

use crate::constraints::SizeConstraint;

/// Content that can report the size it would like to occupy.
pub trait Measurable {
    /// Measures the content within the provided constraint.
    fn measure(&self, constraint: SizeConstraint) -> Size;
}

impl<F> Measurable for F
where
    F: Fn(SizeConstraint) -> Size,
{
    fn measure(&self, constraint: SizeConstraint) -> Size {
        self(constraint)
    }
}

/// Policy responsible for sizing a container and positioning its children.
pub trait Layout {
    /// Computes the size of the container given its children.
    fn measure(&self, constraint: SizeConstraint, items: &[&dyn Measurable]) -> Size;

    /// Computes attributes for each child, in order, relative to the
    /// container's own coordinate space.
    fn layout(&self, size: Size, items: &[&dyn Measurable]) -> Vec<LayoutAttributes>;
}
