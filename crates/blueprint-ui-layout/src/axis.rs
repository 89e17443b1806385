//! Per-axis measurement constraints.

/// The space offered to content along one axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AxisConstraint {
    /// Content may take at most this many points.
    AtMost(f32),
    /// Content may take as much room as it wants.
    Unconstrained,
}

impl AxisConstraint {
    /// Returns the largest value satisfying the constraint.
    pub fn maximum(self) -> f32 {
        match self {
            AxisConstraint::AtMost(value) => value,
            AxisConstraint::Unconstrained => f32::INFINITY,
        }
    }

    /// Returns true if this axis is unconstrained.
    pub fn is_unconstrained(self) -> bool {
        matches!(self, AxisConstraint::Unconstrained)
    }

    /// Clamps `value` so it satisfies the constraint.
    pub fn constrain(self, value: f32) -> f32 {
        value.min(self.maximum())
    }
}
