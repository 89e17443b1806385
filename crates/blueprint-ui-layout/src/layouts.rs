//! Layouts shared by the built-in elements.

use blueprint_ui_graphics::{LayoutAttributes, Size};

use crate::constraints::SizeConstraint;
use crate::contracts::{Layout, Measurable};

/// Sizes itself to its single child and gives the child its full bounds.
#[derive(Clone, Copy, Debug, Default)]
pub struct PassthroughLayout;

impl Layout for PassthroughLayout {
    fn measure(&self, constraint: SizeConstraint, items: &[&dyn Measurable]) -> Size {
        debug_assert!(items.len() <= 1, "passthrough layout takes a single child");
        items
            .first()
            .map(|item| item.measure(constraint))
            .unwrap_or_default()
    }

    fn layout(&self, size: Size, items: &[&dyn Measurable]) -> Vec<LayoutAttributes> {
        items
            .iter()
            .map(|_| LayoutAttributes::with_size(size))
            .collect()
    }
}

/// Stacks every child on top of each other, each filling the container.
#[derive(Clone, Copy, Debug, Default)]
pub struct OverlayLayout;

impl Layout for OverlayLayout {
    fn measure(&self, constraint: SizeConstraint, items: &[&dyn Measurable]) -> Size {
        items.iter().fold(Size::ZERO, |acc, item| {
            let size = item.measure(constraint);
            Size::new(acc.width.max(size.width), acc.height.max(size.height))
        })
    }

    fn layout(&self, size: Size, items: &[&dyn Measurable]) -> Vec<LayoutAttributes> {
        items
            .iter()
            .map(|_| LayoutAttributes::with_size(size))
            .collect()
    }
}
