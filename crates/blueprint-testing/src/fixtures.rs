//! Views, descriptions, elements and collaborators shared by tests and
//! benchmarks.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};

use blueprint_core::{ElementPath, LayoutScheduler, NativeView};
use blueprint_ui::{
    Element, ElementContent, IntoElement, Layout, LayoutAttributes, LayoutResolver, Measurable,
    NativeViewNode, Rect, Size, SizeConstraint, ViewDescription,
};

/// A native view that records how it has been configured.
#[derive(Debug, Default)]
pub struct TestView {
    pub title: String,
    pub configure_count: usize,
    pub mounted: bool,
}

impl NativeView for TestView {
    fn mount(&mut self) {
        self.mounted = true;
    }

    fn unmount(&mut self) {
        self.mounted = false;
    }
}

/// A second view type, for exercising type changes at a path.
#[derive(Debug, Default)]
pub struct OtherTestView;

impl NativeView for OtherTestView {}

/// Describes a [`TestView`] that counts its configurations.
pub fn test_description() -> ViewDescription {
    ViewDescription::of::<TestView>().configure(|view: &mut TestView| view.configure_count += 1)
}

/// Describes a [`TestView`] configured with `title`.
pub fn titled_description(title: &str) -> ViewDescription {
    let title = title.to_string();
    test_description().configure(move |view: &mut TestView| view.title.clone_from(&title))
}

pub fn other_description() -> ViewDescription {
    ViewDescription::of::<OtherTestView>()
}

pub fn frame(x: f32, y: f32, width: f32, height: f32) -> LayoutAttributes {
    LayoutAttributes::with_frame(Rect::new(x, y, width, height))
}

/// A childless [`TestView`] node 10 points square at `x`.
pub fn test_node(x: f32) -> NativeViewNode {
    NativeViewNode::leaf(test_description(), frame(x, 0.0, 10.0, 10.0))
}

/// Keys `node` as the `index`-th child of the root.
pub fn keyed(index: usize, node: NativeViewNode) -> (ElementPath, NativeViewNode) {
    (ElementPath::from([index]), node)
}

/// Schedules nothing, but counts how often a layout pass was requested.
#[derive(Debug, Default)]
pub struct TestScheduler {
    requests: AtomicUsize,
}

impl TestScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

impl LayoutScheduler for TestScheduler {
    fn schedule_layout(&self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
struct StaticResolverState {
    nodes: RefCell<Vec<(ElementPath, NativeViewNode)>>,
    calls: Cell<usize>,
}

/// Resolves any element to a fixed set of nodes that tests can swap out
/// between passes. Clones share their state.
#[derive(Clone, Default)]
pub struct StaticResolver {
    state: Rc<StaticResolverState>,
}

impl StaticResolver {
    pub fn new(nodes: Vec<(ElementPath, NativeViewNode)>) -> Self {
        let resolver = Self::default();
        resolver.set_nodes(nodes);
        resolver
    }

    pub fn set_nodes(&self, nodes: Vec<(ElementPath, NativeViewNode)>) {
        *self.state.nodes.borrow_mut() = nodes;
    }

    /// Number of times the resolver has run.
    pub fn calls(&self) -> usize {
        self.state.calls.get()
    }
}

impl LayoutResolver for StaticResolver {
    fn resolve(&self, _element: &dyn Element, _bounds: Rect) -> Vec<(ElementPath, NativeViewNode)> {
        self.state.calls.set(self.state.calls.get() + 1);
        self.state.nodes.borrow().clone()
    }
}

/// A leaf element with a fixed intrinsic size.
#[derive(Clone, Debug)]
pub struct FixedElement {
    pub size: Size,
    pub description: Option<ViewDescription>,
}

impl FixedElement {
    /// Backed by a [`TestView`].
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Size::new(width, height),
            description: Some(test_description()),
        }
    }

    /// Without a backing view.
    pub fn layout_only(width: f32, height: f32) -> Self {
        Self {
            size: Size::new(width, height),
            description: None,
        }
    }

    pub fn with_description(mut self, description: ViewDescription) -> Self {
        self.description = Some(description);
        self
    }
}

impl Element for FixedElement {
    fn content(&self) -> ElementContent {
        ElementContent::intrinsic(self.size)
    }

    fn backing_view_description(&self, _bounds: Rect, _extent: Option<Rect>) -> Option<ViewDescription> {
        self.description.clone()
    }
}

/// Stacks children vertically, each as tall as it measures and as wide as
/// the container.
#[derive(Clone, Copy, Debug, Default)]
pub struct StackLayout;

impl Layout for StackLayout {
    fn measure(&self, constraint: SizeConstraint, items: &[&dyn Measurable]) -> Size {
        let size = items.iter().fold(Size::ZERO, |acc, item| {
            let size = item.measure(constraint);
            Size::new(acc.width.max(size.width), acc.height + size.height)
        });
        constraint.constrain(size)
    }

    fn layout(&self, size: Size, items: &[&dyn Measurable]) -> Vec<LayoutAttributes> {
        let mut y = 0.0;
        items
            .iter()
            .map(|item| {
                let height = item.measure(SizeConstraint::new(size)).height;
                let attributes = frame(0.0, y, size.width, height);
                y += height;
                attributes
            })
            .collect()
    }
}

/// A vertical stack of child elements.
#[derive(Clone)]
pub struct StackElement {
    pub children: Vec<Rc<dyn Element>>,
    pub description: Option<ViewDescription>,
}

impl StackElement {
    /// A stack backed by a [`TestView`].
    pub fn new(children: Vec<Rc<dyn Element>>) -> Self {
        Self {
            children,
            description: Some(test_description()),
        }
    }

    pub fn layout_only(children: Vec<Rc<dyn Element>>) -> Self {
        Self {
            children,
            description: None,
        }
    }

    pub fn with_description(mut self, description: ViewDescription) -> Self {
        self.description = Some(description);
        self
    }

    pub fn child(mut self, element: impl IntoElement) -> Self {
        self.children.push(element.into_element());
        self
    }
}

impl Element for StackElement {
    fn content(&self) -> ElementContent {
        ElementContent::layout(StackLayout, self.children.clone())
    }

    fn backing_view_description(&self, _bounds: Rect, _extent: Option<Rect>) -> Option<ViewDescription> {
        self.description.clone()
    }
}
