use std::rc::Rc;

use blueprint_core::AnimationAttributes;
use blueprint_ui::{
    ContainerView, Element, ElementContent, IntoElement, LayoutTransition, Rect, ViewDescription,
    VisibilityTransition,
};

/// Wraps an element in a view that animates when it appears, disappears,
/// or changes layout.
#[derive(Clone)]
pub struct TransitionContainer {
    pub appearing_transition: VisibilityTransition,
    pub disappearing_transition: VisibilityTransition,
    pub layout_transition: LayoutTransition,
    pub wrapped_element: Rc<dyn Element>,
}

impl TransitionContainer {
    /// Fades in and out and animates layout changes with the default
    /// animation attributes.
    pub fn new(element: impl IntoElement) -> Self {
        Self {
            appearing_transition: VisibilityTransition::fade(),
            disappearing_transition: VisibilityTransition::fade(),
            layout_transition: LayoutTransition::Specific(AnimationAttributes::default()),
            wrapped_element: element.into_element(),
        }
    }

    pub fn appearing(mut self, transition: VisibilityTransition) -> Self {
        self.appearing_transition = transition;
        self
    }

    pub fn disappearing(mut self, transition: VisibilityTransition) -> Self {
        self.disappearing_transition = transition;
        self
    }

    pub fn layout(mut self, transition: LayoutTransition) -> Self {
        self.layout_transition = transition;
        self
    }
}

impl Element for TransitionContainer {
    fn content(&self) -> ElementContent {
        ElementContent::child(self.wrapped_element.clone())
    }

    fn backing_view_description(
        &self,
        _bounds: Rect,
        _subtree_extent: Option<Rect>,
    ) -> Option<ViewDescription> {
        Some(
            ViewDescription::of::<ContainerView>()
                .appearing_transition(self.appearing_transition)
                .disappearing_transition(self.disappearing_transition)
                .layout_transition(self.layout_transition),
        )
    }
}
