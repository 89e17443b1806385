use blueprint_core::ElementPath;
use blueprint_ui_graphics::{LayoutAttributes, Rect};

use crate::element::Element;
use crate::native_view_node::NativeViewNode;

/// Turns an element tree into the positioned native view nodes the
/// reconciler consumes.
pub trait LayoutResolver {
    fn resolve(&self, element: &dyn Element, bounds: Rect) -> Vec<(ElementPath, NativeViewNode)>;
}

/// Lays elements out with their own content layouts.
///
/// Elements without a backing view do not produce nodes; their children
/// are hoisted into the nearest ancestor that has one, with frames
/// offset accordingly.
#[derive(Debug, Default, Clone, Copy)]
pub struct ElementResolver;

impl ElementResolver {
    pub fn new() -> Self {
        Self
    }

    fn resolve_element(
        &self,
        element: &dyn Element,
        path: ElementPath,
        attributes: LayoutAttributes,
    ) -> Vec<(ElementPath, NativeViewNode)> {
        let size = attributes.frame.size();
        let children: Vec<_> = element
            .content()
            .perform_layout(size)
            .into_iter()
            .enumerate()
            .flat_map(|(index, (child_attributes, child))| {
                self.resolve_element(child.as_ref(), path.appending(index), child_attributes)
            })
            .collect();

        // Direct nodes only: a backed child's own subtree stays inside its view.
        let subtree_extent = children
            .iter()
            .map(|(_, node)| node.layout_attributes.frame)
            .reduce(Rect::union);

        match element.backing_view_description(Rect::from_size(size), subtree_extent) {
            Some(description) => vec![(path, NativeViewNode::new(description, attributes, children))],
            None => {
                let origin = attributes.frame.origin();
                children
                    .into_iter()
                    .map(|(path, mut node)| {
                        node.layout_attributes = node.layout_attributes.offset_by(origin);
                        (path, node)
                    })
                    .collect()
            }
        }
    }
}

impl LayoutResolver for ElementResolver {
    fn resolve(&self, element: &dyn Element, bounds: Rect) -> Vec<(ElementPath, NativeViewNode)> {
        let root = LayoutAttributes::with_frame(Rect::from_size(bounds.size()));
        self.resolve_element(element, ElementPath::empty(), root)
    }
}

#[cfg(test)]
#[path = "tests/resolve_tests.rs"]
mod tests;
