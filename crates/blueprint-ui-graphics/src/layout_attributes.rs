use crate::geometry::{Point, Rect, Size};
use crate::transform::Transform3D;

/// Visual attributes applied to a native view by its parent.
///
/// Structural equality decides whether a layout transition has to run
/// when a view is updated in place.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutAttributes {
    pub frame: Rect,
    pub transform: Transform3D,
    pub alpha: f32,
    pub is_user_interaction_enabled: bool,
    pub is_hidden: bool,
}

impl LayoutAttributes {
    pub fn with_frame(frame: Rect) -> Self {
        Self {
            frame,
            ..Self::default()
        }
    }

    pub fn with_size(size: Size) -> Self {
        Self::with_frame(Rect::from_size(size))
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.frame.x + self.frame.width / 2.0,
            self.frame.y + self.frame.height / 2.0,
        )
    }

    /// Same attributes with the frame moved by the given offset.
    pub fn offset_by(&self, origin: Point) -> Self {
        Self {
            frame: self.frame.translate(origin.x, origin.y),
            ..*self
        }
    }
}

impl Default for LayoutAttributes {
    fn default() -> Self {
        Self {
            frame: Rect::ZERO,
            transform: Transform3D::IDENTITY,
            alpha: 1.0,
            is_user_interaction_enabled: true,
            is_hidden: false,
        }
    }
}
