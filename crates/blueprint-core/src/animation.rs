//! Animation timing for Blueprint-RS
//!
//! Provides the easing curves and timing attributes used when native view
//! attributes change inside an animation scope, and linear interpolation for
//! the values those animations drive.

use blueprint_ui_graphics::{LayoutAttributes, Point, Rect, Size, Transform3D};

use crate::{Applier, ViewId};

/// Trait for types that can be linearly interpolated.
pub trait Lerp {
    fn lerp(&self, target: &Self, fraction: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction
    }
}

impl Lerp for Point {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        Point::new(self.x.lerp(&target.x, fraction), self.y.lerp(&target.y, fraction))
    }
}

impl Lerp for Size {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        Size::new(
            self.width.lerp(&target.width, fraction),
            self.height.lerp(&target.height, fraction),
        )
    }
}

impl Lerp for Rect {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        Rect::new(
            self.x.lerp(&target.x, fraction),
            self.y.lerp(&target.y, fraction),
            self.width.lerp(&target.width, fraction),
            self.height.lerp(&target.height, fraction),
        )
    }
}

impl Lerp for Transform3D {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        let mut m = self.m;
        for (row, target_row) in m.iter_mut().zip(target.m.iter()) {
            for (value, target_value) in row.iter_mut().zip(target_row.iter()) {
                *value = value.lerp(target_value, fraction);
            }
        }
        Transform3D { m }
    }
}

impl Lerp for LayoutAttributes {
    /// Boolean attributes are not animatable and take the target value
    /// immediately.
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        LayoutAttributes {
            frame: self.frame.lerp(&target.frame, fraction),
            transform: self.transform.lerp(&target.transform, fraction),
            alpha: self.alpha.lerp(&target.alpha, fraction),
            is_user_interaction_enabled: target.is_user_interaction_enabled,
            is_hidden: target.is_hidden,
        }
    }
}

/// Timing curves for animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Easing {
    /// Linear interpolation (no easing).
    Linear,
    /// Ease in using cubic curve.
    EaseIn,
    /// Ease out using cubic curve.
    EaseOut,
    /// Ease in and out using cubic curve.
    EaseInOut,
    /// Fast out, slow in (material design standard).
    FastOutSlowIn,
}

impl Easing {
    /// Apply the easing function to a linear fraction [0, 1].
    pub fn transform(&self, fraction: f32) -> f32 {
        match self {
            Easing::Linear => fraction,
            Easing::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, fraction),
            Easing::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, fraction),
            Easing::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, fraction),
            Easing::FastOutSlowIn => cubic_bezier(0.4, 0.0, 0.2, 1.0, fraction),
        }
    }
}

/// Cubic bezier curve approximation for easing.
fn cubic_bezier(_x1: f32, y1: f32, _x2: f32, y2: f32, t: f32) -> f32 {
    // Evaluates the y polynomial at t directly rather than solving for x.
    let t2 = t * t;
    let t3 = t2 * t;
    let mt = 1.0 - t;
    let mt2 = mt * mt;

    // B(t) = 3(1-t)^2 * t * P1 + 3(1-t) * t^2 * P2 + t^3, with P0 = (0,0) and P3 = (1,1)
    3.0 * mt2 * t * y1 + 3.0 * mt * t2 * y2 + t3
}

/// Parameters driving one animation scope.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationAttributes {
    /// Duration in milliseconds.
    pub duration_millis: u64,
    /// Timing curve.
    pub curve: Easing,
    /// Delay before the animation starts, in milliseconds.
    pub delay_millis: u64,
    /// Whether animated views keep receiving input while animating.
    pub allow_user_interaction: bool,
}

impl AnimationAttributes {
    pub fn new(duration_millis: u64, curve: Easing) -> Self {
        Self {
            duration_millis,
            curve,
            delay_millis: 0,
            allow_user_interaction: true,
        }
    }

    pub fn linear(duration_millis: u64) -> Self {
        Self::new(duration_millis, Easing::Linear)
    }

    pub fn with_delay(mut self, delay_millis: u64) -> Self {
        self.delay_millis = delay_millis;
        self
    }

    pub fn with_user_interaction(mut self, allow: bool) -> Self {
        self.allow_user_interaction = allow;
        self
    }

    /// Delay plus duration, in nanoseconds.
    pub fn total_nanos(&self) -> u64 {
        (self.delay_millis + self.duration_millis) * 1_000_000
    }

    /// Whether changes made under these attributes actually interpolate.
    pub fn is_animated(&self) -> bool {
        self.total_nanos() > 0
    }

    /// Eased progress after `elapsed_nanos` since the scope was committed.
    pub fn progress(&self, elapsed_nanos: u64) -> f32 {
        let delay = self.delay_millis * 1_000_000;
        if elapsed_nanos < delay {
            return 0.0;
        }
        let duration = self.duration_millis * 1_000_000;
        if duration == 0 {
            return 1.0;
        }
        let fraction = ((elapsed_nanos - delay) as f64 / duration as f64).min(1.0) as f32;
        self.curve.transform(fraction)
    }

    /// Runs `animations` inside an animation scope using these attributes.
    pub fn perform<R>(
        &self,
        applier: &mut dyn Applier,
        animations: impl FnOnce(&mut dyn Applier) -> R,
        completion: Option<AnimationCompletion>,
    ) -> R {
        applier.begin_animation(Some(*self));
        let result = animations(applier);
        applier.commit_animation(completion);
        result
    }
}

impl Default for AnimationAttributes {
    fn default() -> Self {
        Self::new(200, Easing::EaseInOut)
    }
}

/// Runs `body` with animation disabled, even inside an enclosing scope.
pub fn perform_without_animation<R>(
    applier: &mut dyn Applier,
    body: impl FnOnce(&mut dyn Applier) -> R,
) -> R {
    applier.begin_animation(None);
    let result = body(applier);
    applier.commit_animation(None);
    result
}

/// Work performed once an animation scope has finished.
///
/// Completions run from the applier's frame drain, never from inside a
/// reconciliation pass, so their effect is limited to detaching views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationCompletion {
    RemoveFromSuperview(ViewId),
}
