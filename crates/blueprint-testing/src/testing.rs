use blueprint_core::{Applier, ElementPath, MemoryApplier, ViewError, ViewId};
use blueprint_ui::{
    ContainerView, LayoutAttributes, NativeViewController, NativeViewNode, UpdateContext,
    ViewDescription,
};

/// Headless harness for driving the reconciler directly.
///
/// Owns an in-memory applier and a root controller wrapping a plain
/// container view, mirroring what a host view sets up, so tests can feed
/// resolved nodes straight into update passes.
pub struct ReconcilerHarness {
    applier: MemoryApplier,
    root: NativeViewController,
}

impl ReconcilerHarness {
    pub fn new() -> Self {
        let mut applier = MemoryApplier::new();
        let root = NativeViewController::new(&mut applier, &Self::root_node(Vec::new()), false)
            .expect("root view");
        Self { applier, root }
    }

    /// Runs one update pass with `children` under the root and returns the
    /// pass statistics.
    pub fn update(
        &mut self,
        children: Vec<(ElementPath, NativeViewNode)>,
        animated: bool,
    ) -> Result<UpdateContext, ViewError> {
        let mut context = UpdateContext::new();
        self.root.update(
            &mut self.applier,
            &Self::root_node(children),
            animated,
            &mut context,
        )?;
        Ok(context)
    }

    /// Drains frame callbacks at the supplied timestamp so animations
    /// progress and their completions fire.
    pub fn advance_frame(&mut self, frame_time_nanos: u64) {
        self.applier.drain_frame(frame_time_nanos);
    }

    pub fn root(&self) -> &NativeViewController {
        &self.root
    }

    pub fn root_view(&self) -> ViewId {
        self.root.view()
    }

    /// The views currently attached to the root, in order.
    pub fn subviews(&self) -> Vec<ViewId> {
        self.applier.subviews(self.root.view()).unwrap_or_default()
    }

    /// The view retained for the root child at `path`.
    pub fn view_at(&self, path: impl Into<ElementPath>) -> Option<ViewId> {
        self.root.child(&path.into()).map(NativeViewController::view)
    }

    pub fn applier(&self) -> &MemoryApplier {
        &self.applier
    }

    pub fn applier_mut(&mut self) -> &mut MemoryApplier {
        &mut self.applier
    }

    pub fn dump_tree(&self) -> String {
        self.applier.dump_tree(Some(self.root.view()))
    }

    fn root_node(children: Vec<(ElementPath, NativeViewNode)>) -> NativeViewNode {
        NativeViewNode::new(
            ViewDescription::of::<ContainerView>(),
            LayoutAttributes::default(),
            children,
        )
    }
}

impl Default for ReconcilerHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for tests that only need temporary access to a
/// `ReconcilerHarness`.
pub fn run_reconciler<R>(f: impl FnOnce(&mut ReconcilerHarness) -> R) -> R {
    let mut harness = ReconcilerHarness::new();
    f(&mut harness)
}
