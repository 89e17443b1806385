//! Host surface for Blueprint-RS.
//!
//! [`BlueprintView`] owns an applier, a layout resolver and the root of the
//! retained controller tree. Embedders hand it an element and bounds and call
//! [`BlueprintView::layout_subviews`] whenever the scheduler asks for a pass.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Instant;

use blueprint_core::{
    with_environment, Applier, DefaultScheduler, ElementPath, EnvironmentValues, LayoutScheduler,
    MemoryApplier, ViewError, ViewId,
};
use blueprint_ui::{
    ContainerView, Element, IntoElement, LayoutAttributes, LayoutResolver, Measurable,
    NativeViewController, NativeViewNode, Rect, Size, SizeConstraint, UpdateContext,
    ViewDescription,
};

/// Whether a host is currently reconciling its view hierarchy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdatePhase {
    Idle,
    Updating,
}

/// Marks a host as [`UpdatePhase::Updating`] for as long as it lives.
///
/// Beginning a pass while another one is in flight panics: views configured
/// during a pass must not synchronously trigger further passes.
struct UpdatePass<'a> {
    phase: &'a Cell<UpdatePhase>,
}

impl<'a> UpdatePass<'a> {
    fn begin(phase: &'a Cell<UpdatePhase>) -> Self {
        assert!(
            phase.get() == UpdatePhase::Idle,
            "reentrant update: views must not trigger a layout pass of their own host while it is updating"
        );
        phase.set(UpdatePhase::Updating);
        Self { phase }
    }
}

impl Drop for UpdatePass<'_> {
    fn drop(&mut self) {
        self.phase.set(UpdatePhase::Idle);
    }
}

struct UpdateRequest {
    element: Option<Rc<dyn Element>>,
    needs_update: bool,
    animated: bool,
    bounds: Rect,
    environment: EnvironmentValues,
    last_update_bounds: Option<Rect>,
}

/// What one pass works from, detached from the live request so the request
/// may change while the pass runs.
struct PassInput {
    element: Option<Rc<dyn Element>>,
    animated: bool,
    bounds: Rect,
    environment: EnvironmentValues,
}

struct ViewTree<A> {
    applier: A,
    resolver: Box<dyn LayoutResolver>,
    root: NativeViewController,
}

struct HostInner<A> {
    phase: Cell<UpdatePhase>,
    request: RefCell<UpdateRequest>,
    tree: RefCell<ViewTree<A>>,
    scheduler: RefCell<Arc<dyn LayoutScheduler>>,
    start_time: Instant,
}

/// Displays an element tree inside a single root native view.
///
/// Clones share the same host.
pub struct BlueprintView<A: Applier + 'static = MemoryApplier> {
    inner: Rc<HostInner<A>>,
}

impl<A: Applier + 'static> Clone for BlueprintView<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<A: Applier + 'static> BlueprintView<A> {
    /// Creates a host with no element, building its root container view in
    /// `applier`.
    pub fn new(mut applier: A, resolver: impl LayoutResolver + 'static) -> Result<Self, ViewError> {
        let root = NativeViewController::new(&mut applier, &root_node(Rect::ZERO, Vec::new()), false)?;
        Ok(Self {
            inner: Rc::new(HostInner {
                phase: Cell::new(UpdatePhase::Idle),
                request: RefCell::new(UpdateRequest {
                    element: None,
                    needs_update: true,
                    animated: false,
                    bounds: Rect::ZERO,
                    environment: EnvironmentValues::new(),
                    last_update_bounds: None,
                }),
                tree: RefCell::new(ViewTree {
                    applier,
                    resolver: Box::new(resolver),
                    root,
                }),
                scheduler: RefCell::new(Arc::new(DefaultScheduler)),
                start_time: Instant::now(),
            }),
        })
    }

    pub fn with_scheduler(self, scheduler: Arc<dyn LayoutScheduler>) -> Self {
        *self.inner.scheduler.borrow_mut() = scheduler;
        self
    }

    pub fn phase(&self) -> UpdatePhase {
        self.inner.phase.get()
    }

    /// Replaces the displayed element, animating the next pass if the
    /// applier currently has an animation in flight.
    pub fn set_element(&self, element: impl IntoElement) {
        let animated = self.should_animate_changes();
        self.set_element_animated(Some(element.into_element()), animated);
    }

    pub fn set_element_animated(&self, element: Option<Rc<dyn Element>>, animated: bool) {
        {
            let mut request = self.inner.request.borrow_mut();
            request.element = element;
            request.animated = animated;
        }
        self.set_needs_update();
    }

    pub fn clear_element(&self) {
        let animated = self.should_animate_changes();
        self.set_element_animated(None, animated);
    }

    pub fn element(&self) -> Option<Rc<dyn Element>> {
        self.inner.request.borrow().element.clone()
    }

    pub fn set_bounds(&self, bounds: Rect) {
        let changed = {
            let mut request = self.inner.request.borrow_mut();
            let changed = request.bounds != bounds;
            request.bounds = bounds;
            changed
        };
        if changed {
            self.schedule_layout();
        }
    }

    pub fn bounds(&self) -> Rect {
        self.inner.request.borrow().bounds
    }

    /// Environment pushed around resolving and measuring the element.
    pub fn set_environment(&self, environment: EnvironmentValues) {
        self.inner.request.borrow_mut().environment = environment;
        self.set_needs_update();
    }

    pub fn environment(&self) -> EnvironmentValues {
        self.inner.request.borrow().environment.clone()
    }

    /// Whether the applier is inside an animation scope with a non-zero
    /// duration. Always `false` while a pass is running.
    pub fn should_animate_changes(&self) -> bool {
        self.inner.tree.try_borrow().is_ok_and(|tree| {
            tree.applier
                .inherited_animation()
                .is_some_and(|animation| animation.total_nanos() > 0)
        })
    }

    /// Measures the element. A zero `size` measures without constraints.
    pub fn measure(&self, size: Size) -> Size {
        let (element, environment) = {
            let request = self.inner.request.borrow();
            (request.element.clone(), request.environment.clone())
        };
        let Some(element) = element else {
            return Size::ZERO;
        };
        let constraint = if size == Size::ZERO {
            SizeConstraint::unconstrained()
        } else {
            SizeConstraint::new(size)
        };
        with_environment(environment, || element.content().measure(constraint))
    }

    /// Reconciles the view hierarchy if the element, environment or bounds
    /// changed since the last pass. A failed pass leaves every attached view
    /// owned by the controller tree and is retried by the next call.
    ///
    /// Panics if called while this host is already updating.
    pub fn layout_subviews(&self) {
        let _pass = UpdatePass::begin(&self.inner.phase);
        if let Err(err) = self.inner.update_if_needed() {
            log::error!("view hierarchy update failed: {err}");
            self.inner.request.borrow_mut().needs_update = true;
        }
    }

    /// The controllers directly under the root, keyed by path, after
    /// bringing the hierarchy up to date.
    pub fn native_view_controllers(&self) -> Vec<(ElementPath, ViewId)> {
        self.layout_subviews();
        self.inner
            .tree
            .borrow()
            .root
            .children()
            .iter()
            .map(|(path, controller)| (path.clone(), controller.view()))
            .collect()
    }

    pub fn root_view(&self) -> ViewId {
        self.inner.tree.borrow().root.view()
    }

    /// Advances animations and fires due completions.
    pub fn drain_frame(&self, frame_time_nanos: u64) {
        match self.inner.tree.try_borrow_mut() {
            Ok(mut tree) => tree.applier.drain_frame(frame_time_nanos),
            Err(_) => log::warn!("drain_frame ignored while the view hierarchy is updating"),
        }
    }

    /// Drains a frame at the wall-clock time elapsed since the host was
    /// created.
    pub fn update(&self) {
        let frame_time = Instant::now()
            .checked_duration_since(self.inner.start_time)
            .unwrap_or_default()
            .as_nanos() as u64;
        self.drain_frame(frame_time);
    }

    pub fn with_applier<R>(&self, f: impl FnOnce(&mut A) -> R) -> R {
        f(&mut self.inner.tree.borrow_mut().applier)
    }

    pub fn with_root_controller<R>(&self, f: impl FnOnce(&NativeViewController) -> R) -> R {
        f(&self.inner.tree.borrow().root)
    }

    fn set_needs_update(&self) {
        let schedule = {
            let mut request = self.inner.request.borrow_mut();
            !std::mem::replace(&mut request.needs_update, true)
        };
        if schedule {
            self.schedule_layout();
        }
    }

    fn schedule_layout(&self) {
        let scheduler = self.inner.scheduler.borrow().clone();
        scheduler.schedule_layout();
    }
}

impl BlueprintView<MemoryApplier> {
    /// Renders the hierarchy under the root view.
    pub fn dump_tree(&self) -> String {
        let tree = self.inner.tree.borrow();
        tree.applier.dump_tree(Some(tree.root.view()))
    }
}

impl<A: Applier + 'static> HostInner<A> {
    fn take_pass_input(&self) -> Option<PassInput> {
        let mut request = self.request.borrow_mut();
        if !request.needs_update && request.last_update_bounds == Some(request.bounds) {
            return None;
        }
        request.needs_update = false;
        request.last_update_bounds = Some(request.bounds);
        Some(PassInput {
            element: request.element.clone(),
            animated: request.animated,
            bounds: request.bounds,
            environment: request.environment.clone(),
        })
    }

    fn update_if_needed(&self) -> Result<(), ViewError> {
        let Some(input) = self.take_pass_input() else {
            return Ok(());
        };
        let mut tree = self.tree.borrow_mut();
        let ViewTree {
            applier,
            resolver,
            root,
        } = &mut *tree;

        with_environment(input.environment, || {
            let children = match &input.element {
                Some(element) => resolver.resolve(element.as_ref(), Rect::from_size(input.bounds.size())),
                None => Vec::new(),
            };
            applier.apply_layout_attributes(root.view(), &LayoutAttributes::with_frame(input.bounds))?;

            let mut context = UpdateContext::new();
            root.update(
                &mut *applier,
                &root_node(input.bounds, children),
                input.animated,
                &mut context,
            )?;
            log::debug!(
                "view hierarchy updated: {} created, {} updated, {} removed",
                context.created(),
                context.updated(),
                context.removed()
            );
            Ok(())
        })
    }
}

impl<A: Applier + 'static> fmt::Debug for BlueprintView<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlueprintView")
            .field("phase", &self.inner.phase.get())
            .field("bounds", &self.inner.request.try_borrow().map(|r| r.bounds).ok())
            .finish_non_exhaustive()
    }
}

fn root_node(bounds: Rect, children: Vec<(ElementPath, NativeViewNode)>) -> NativeViewNode {
    NativeViewNode::new(
        ViewDescription::of::<ContainerView>(),
        LayoutAttributes::with_frame(bounds),
        children,
    )
}

pub mod prelude {
    pub use crate::{BlueprintView, UpdatePhase};
    pub use blueprint_ui::prelude::*;
}
