//! Transitions for Blueprint-RS
//!
//! Visibility transitions animate views in and out of the hierarchy, layout
//! transitions decide how attribute changes on retained views are animated.

mod layout_transition;
mod visibility_transition;

pub use layout_transition::*;
pub use visibility_transition::*;

// Re-export the timing primitives transitions are built from
pub use blueprint_core::animation::{
    perform_without_animation, AnimationAttributes, AnimationCompletion, Easing, Lerp,
};

pub mod prelude {
    pub use crate::layout_transition::LayoutTransition;
    pub use crate::visibility_transition::{PerformRule, VisibilityTransition};
    pub use blueprint_core::animation::{AnimationAttributes, Easing};
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
