use std::fmt;
use std::rc::Rc;

use blueprint_ui_graphics::{LayoutAttributes, Rect, Size};
use blueprint_ui_layout::{Layout, Measurable, PassthroughLayout, SizeConstraint};

use crate::view_description::ViewDescription;

/// An immutable, declarative piece of UI.
///
/// Elements have no identity of their own; the reconciler keys them by
/// their position in the tree.
pub trait Element: 'static {
    /// How the element sizes itself and positions its children.
    fn content(&self) -> ElementContent;

    /// The native view backing this element, if any. Elements without one
    /// only position their children.
    ///
    /// `bounds` is the element's own bounds, `subtree_extent` the union of
    /// the frames of the nodes resolved directly beneath it, in its own
    /// coordinate space. Children hoisted out of view-less descendants count;
    /// the contents of nested backed views do not.
    fn backing_view_description(
        &self,
        _bounds: Rect,
        _subtree_extent: Option<Rect>,
    ) -> Option<ViewDescription> {
        None
    }
}

/// Conversion into the shared element handle used throughout the crate.
pub trait IntoElement {
    fn into_element(self) -> Rc<dyn Element>;
}

impl<E: Element> IntoElement for E {
    fn into_element(self) -> Rc<dyn Element> {
        Rc::new(self)
    }
}

impl IntoElement for Rc<dyn Element> {
    fn into_element(self) -> Rc<dyn Element> {
        self
    }
}

enum Storage {
    Measuring(Box<dyn Measurable>),
    Layout {
        layout: Box<dyn Layout>,
        children: Vec<Rc<dyn Element>>,
    },
}

/// The sizing and child placement behaviour of an element.
pub struct ElementContent {
    storage: Storage,
}

impl ElementContent {
    /// Leaf content sized by `measurable`.
    pub fn measuring(measurable: impl Measurable + 'static) -> Self {
        Self {
            storage: Storage::Measuring(Box::new(measurable)),
        }
    }

    /// Leaf content with a fixed intrinsic size.
    pub fn intrinsic(size: Size) -> Self {
        Self::measuring(move |_: SizeConstraint| size)
    }

    pub fn empty() -> Self {
        Self::intrinsic(Size::ZERO)
    }

    /// A single child sized like the container and filling it.
    pub fn child(element: Rc<dyn Element>) -> Self {
        Self::layout(PassthroughLayout, vec![element])
    }

    pub fn layout(layout: impl Layout + 'static, children: Vec<Rc<dyn Element>>) -> Self {
        Self {
            storage: Storage::Layout {
                layout: Box::new(layout),
                children,
            },
        }
    }

    pub fn children(&self) -> &[Rc<dyn Element>] {
        match &self.storage {
            Storage::Measuring(_) => &[],
            Storage::Layout { children, .. } => children,
        }
    }

    pub fn child_count(&self) -> usize {
        self.children().len()
    }

    /// Positions the children inside a container of `size`.
    pub fn perform_layout(&self, size: Size) -> Vec<(LayoutAttributes, Rc<dyn Element>)> {
        let Storage::Layout { layout, children } = &self.storage else {
            return Vec::new();
        };
        let measurables = element_measurables(children);
        let items = as_items(&measurables);
        let attributes = layout.layout(size, &items);
        debug_assert_eq!(
            attributes.len(),
            children.len(),
            "layout must place every child"
        );
        attributes.into_iter().zip(children.iter().cloned()).collect()
    }
}

impl Measurable for ElementContent {
    fn measure(&self, constraint: SizeConstraint) -> Size {
        match &self.storage {
            Storage::Measuring(measurable) => measurable.measure(constraint),
            Storage::Layout { layout, children } => {
                let measurables = element_measurables(children);
                layout.measure(constraint, &as_items(&measurables))
            }
        }
    }
}

impl fmt::Debug for ElementContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.storage {
            Storage::Measuring(_) => f.write_str("ElementContent::Measuring"),
            Storage::Layout { children, .. } => f
                .debug_struct("ElementContent::Layout")
                .field("children", &children.len())
                .finish(),
        }
    }
}

struct ElementMeasurable<'a>(&'a dyn Element);

impl Measurable for ElementMeasurable<'_> {
    fn measure(&self, constraint: SizeConstraint) -> Size {
        self.0.content().measure(constraint)
    }
}

fn element_measurables(children: &[Rc<dyn Element>]) -> Vec<ElementMeasurable<'_>> {
    children
        .iter()
        .map(|child| ElementMeasurable(child.as_ref()))
        .collect()
}

fn as_items<'a>(measurables: &'a [ElementMeasurable<'a>]) -> Vec<&'a dyn Measurable> {
    measurables
        .iter()
        .map(|measurable| measurable as &dyn Measurable)
        .collect()
}
