//! Size constraints used during measurement

use blueprint_ui_graphics::Size;

use crate::axis::AxisConstraint;

/// Constraints offered to content while it is measured.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SizeConstraint {
    pub width: AxisConstraint,
    pub height: AxisConstraint,
}

impl SizeConstraint {
    /// Creates constraints bounded by the given size on both axes.
    pub fn new(size: Size) -> Self {
        Self {
            width: AxisConstraint::AtMost(size.width),
            height: AxisConstraint::AtMost(size.height),
        }
    }

    /// Creates constraints with no limit on either axis.
    pub fn unconstrained() -> Self {
        Self {
            width: AxisConstraint::Unconstrained,
            height: AxisConstraint::Unconstrained,
        }
    }

    /// The largest size that satisfies these constraints.
    pub fn maximum(&self) -> Size {
        Size::new(self.width.maximum(), self.height.maximum())
    }

    /// Clamps the provided size to fit within these constraints.
    pub fn constrain(&self, size: Size) -> Size {
        Size::new(self.width.constrain(size.width), self.height.constrain(size.height))
    }
}

impl From<Size> for SizeConstraint {
    fn from(size: Size) -> Self {
        Self::new(size)
    }
}
