use blueprint_core::animation::{perform_without_animation, AnimationAttributes};
use blueprint_core::Applier;

/// How layout attribute changes on a retained view are animated.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LayoutTransition {
    /// Changes apply immediately, even inside an animation.
    None,
    /// Changes animate with the given attributes.
    Specific(AnimationAttributes),
    /// Changes follow whatever animation is currently active.
    #[default]
    Inherited,
    /// Follows an active animation, or animates with the given attributes
    /// when there is none.
    InheritedWithFallback(AnimationAttributes),
}

impl LayoutTransition {
    pub fn perform<R>(
        &self,
        applier: &mut dyn Applier,
        body: impl FnOnce(&mut dyn Applier) -> R,
    ) -> R {
        match self {
            LayoutTransition::None => perform_without_animation(applier, body),
            LayoutTransition::Specific(attributes) => attributes.perform(applier, body, None),
            LayoutTransition::Inherited => body(applier),
            LayoutTransition::InheritedWithFallback(fallback) => {
                if applier.inherited_animation().is_some() {
                    body(applier)
                } else {
                    fallback.perform(applier, body, None)
                }
            }
        }
    }
}
