use blueprint_core::animation::{perform_without_animation, AnimationAttributes, AnimationCompletion};
use blueprint_core::{Applier, ViewError, ViewId};
use blueprint_ui_graphics::{LayoutAttributes, Transform3D};

/// When a visibility transition runs if an ancestor is appearing in the
/// same update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PerformRule {
    /// Run even when nested inside other appearing transitions.
    Always,
    /// Run only when no ancestor is appearing.
    #[default]
    IfNotNested,
}

/// The transition used when a view is inserted into or removed from the
/// hierarchy during an update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityTransition {
    /// Alpha multiplier in the hidden state.
    pub alpha: f32,
    /// Transform applied after the view's own transform in the hidden state.
    pub transform: Transform3D,
    pub attributes: AnimationAttributes,
    pub performing: PerformRule,
}

impl VisibilityTransition {
    pub fn new(alpha: f32, transform: Transform3D) -> Self {
        Self {
            alpha,
            transform,
            attributes: AnimationAttributes::default(),
            performing: PerformRule::default(),
        }
    }

    /// Scales in and out.
    pub fn scale() -> Self {
        Self::new(1.0, Transform3D::scale(0.01, 0.01, 0.01))
    }

    /// Fades in and out.
    pub fn fade() -> Self {
        Self::new(0.0, Transform3D::IDENTITY)
    }

    /// Scales and fades simultaneously.
    pub fn scale_and_fade() -> Self {
        Self::new(0.0, Transform3D::scale(0.01, 0.01, 0.01))
    }

    pub fn with_attributes(mut self, attributes: AnimationAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_performing(mut self, performing: PerformRule) -> Self {
        self.performing = performing;
        self
    }

    /// The hidden variant of `attributes`.
    pub fn hidden_attributes(&self, attributes: &LayoutAttributes) -> LayoutAttributes {
        LayoutAttributes {
            transform: attributes.transform.concat(&self.transform),
            alpha: attributes.alpha * self.alpha,
            ..*attributes
        }
    }

    /// Snaps `view` to its hidden state, then animates it to `attributes`.
    pub fn perform_appearing(
        &self,
        applier: &mut dyn Applier,
        view: ViewId,
        attributes: &LayoutAttributes,
    ) -> Result<(), ViewError> {
        let hidden = self.hidden_attributes(attributes);
        perform_without_animation(applier, |applier| {
            applier.apply_layout_attributes(view, &hidden)
        })?;
        self.attributes.perform(
            applier,
            |applier| applier.apply_layout_attributes(view, attributes),
            None,
        )
    }

    /// Animates `view` to its hidden state and removes it from its
    /// superview once the animation completes.
    pub fn perform_disappearing(
        &self,
        applier: &mut dyn Applier,
        view: ViewId,
        attributes: &LayoutAttributes,
    ) -> Result<(), ViewError> {
        let hidden = self.hidden_attributes(attributes);
        self.attributes.perform(
            applier,
            |applier| applier.apply_layout_attributes(view, &hidden),
            Some(AnimationCompletion::RemoveFromSuperview(view)),
        )
    }
}
