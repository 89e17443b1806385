use blueprint_core::ElementPath;
use blueprint_ui_graphics::LayoutAttributes;

use crate::view_description::ViewDescription;

/// One resolved native view: what to build, where to put it, and its
/// resolved children keyed by path.
///
/// Nodes are produced fresh by every layout pass and consumed by
/// [`NativeViewController::update`](crate::NativeViewController::update).
#[derive(Clone, Debug)]
pub struct NativeViewNode {
    pub view_description: ViewDescription,
    pub layout_attributes: LayoutAttributes,
    pub children: Vec<(ElementPath, NativeViewNode)>,
}

impl NativeViewNode {
    pub fn new(
        view_description: ViewDescription,
        layout_attributes: LayoutAttributes,
        children: Vec<(ElementPath, NativeViewNode)>,
    ) -> Self {
        Self {
            view_description,
            layout_attributes,
            children,
        }
    }

    pub fn leaf(view_description: ViewDescription, layout_attributes: LayoutAttributes) -> Self {
        Self::new(view_description, layout_attributes, Vec::new())
    }

    /// Total number of nodes in this subtree, including `self`.
    pub fn count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(|(_, child)| child.count())
            .sum::<usize>()
    }
}
