use std::fmt;
use std::rc::Rc;

use blueprint_animation::{LayoutTransition, VisibilityTransition};
use blueprint_core::{Applier, NativeView, ViewError, ViewId, ViewType};

type BuildFn = Rc<dyn Fn() -> Box<dyn NativeView>>;
type PrepareFn = Rc<dyn Fn(&mut dyn Applier, ViewId) -> Result<(), ViewError>>;
type ConfigureFn = Rc<dyn Fn(&mut dyn NativeView)>;
type ContentViewFn = Rc<dyn Fn(&dyn Applier, ViewId) -> Result<ViewId, ViewError>>;

/// A recipe for building and configuring one native view.
///
/// Descriptions are cheap to clone; the closures they carry are shared.
#[derive(Clone)]
pub struct ViewDescription {
    view_type: ViewType,
    build: BuildFn,
    prepare: Option<PrepareFn>,
    configure: Vec<ConfigureFn>,
    content_view: Option<ContentViewFn>,
    appearing_transition: Option<VisibilityTransition>,
    disappearing_transition: Option<VisibilityTransition>,
    layout_transition: LayoutTransition,
}

impl ViewDescription {
    /// Describes a view of type `V` built with `V::default()`.
    pub fn of<V: NativeView + Default>() -> Self {
        Self::new(V::default)
    }

    pub fn new<V: NativeView>(build: impl Fn() -> V + 'static) -> Self {
        Self {
            view_type: ViewType::of::<V>(),
            build: Rc::new(move || Box::new(build()) as Box<dyn NativeView>),
            prepare: None,
            configure: Vec::new(),
            content_view: None,
            appearing_transition: None,
            disappearing_transition: None,
            layout_transition: LayoutTransition::default(),
        }
    }

    /// Adds a configuration step run on every update, after the earlier
    /// ones.
    ///
    /// Panics if `V` is not the described view type.
    pub fn configure<V: NativeView>(mut self, configure: impl Fn(&mut V) + 'static) -> Self {
        assert_eq!(
            ViewType::of::<V>(),
            self.view_type,
            "configuration for {} added to a {} description",
            ViewType::of::<V>(),
            self.view_type
        );
        self.configure.push(Rc::new(move |view: &mut dyn NativeView| {
            if let Some(view) = view.as_any_mut().downcast_mut::<V>() {
                configure(view);
            }
        }));
        self
    }

    /// Runs once right after the view is created, before it is configured.
    /// Views composed of internal subviews create them here.
    pub fn prepare(
        mut self,
        prepare: impl Fn(&mut dyn Applier, ViewId) -> Result<(), ViewError> + 'static,
    ) -> Self {
        self.prepare = Some(Rc::new(prepare));
        self
    }

    /// Selects the view that children are inserted into. Defaults to the
    /// view itself.
    pub fn content_view(
        mut self,
        select: impl Fn(&dyn Applier, ViewId) -> Result<ViewId, ViewError> + 'static,
    ) -> Self {
        self.content_view = Some(Rc::new(select));
        self
    }

    pub fn appearing_transition(mut self, transition: VisibilityTransition) -> Self {
        self.appearing_transition = Some(transition);
        self
    }

    pub fn disappearing_transition(mut self, transition: VisibilityTransition) -> Self {
        self.disappearing_transition = Some(transition);
        self
    }

    /// Uses `transition` both when appearing and when disappearing.
    pub fn visibility_transition(self, transition: VisibilityTransition) -> Self {
        self.appearing_transition(transition)
            .disappearing_transition(transition)
    }

    pub fn layout_transition(mut self, transition: LayoutTransition) -> Self {
        self.layout_transition = transition;
        self
    }

    pub fn view_type(&self) -> ViewType {
        self.view_type
    }

    pub fn appearing(&self) -> Option<VisibilityTransition> {
        self.appearing_transition
    }

    pub fn disappearing(&self) -> Option<VisibilityTransition> {
        self.disappearing_transition
    }

    pub fn layout(&self) -> LayoutTransition {
        self.layout_transition
    }

    /// Whether a view built from `other` can be reconfigured by `self`.
    pub fn is_compatible(&self, other: &ViewDescription) -> bool {
        self.view_type == other.view_type
    }

    /// Creates the native view inside `applier`. A view whose preparation
    /// fails is disposed again.
    pub fn build(&self, applier: &mut dyn Applier) -> Result<ViewId, ViewError> {
        let view = applier.create(self.view_type, (self.build)());
        if let Some(prepare) = &self.prepare {
            if let Err(err) = prepare(applier, view) {
                applier.remove_from_superview(view);
                return Err(err);
            }
        }
        Ok(view)
    }

    /// Runs every configuration step on `view`.
    pub fn apply_to(&self, applier: &mut dyn Applier, view: ViewId) -> Result<(), ViewError> {
        let found = applier.view_type(view)?;
        if found != self.view_type {
            return Err(ViewError::TypeMismatch {
                id: view,
                expected: self.view_type.name(),
                found: found.name(),
            });
        }
        for configure in &self.configure {
            configure(applier.view_mut(view)?);
        }
        Ok(())
    }

    /// The view that children of `view` attach to.
    pub fn content_view_in(&self, applier: &dyn Applier, view: ViewId) -> Result<ViewId, ViewError> {
        match &self.content_view {
            Some(select) => select(applier, view),
            None => Ok(view),
        }
    }
}

impl fmt::Debug for ViewDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewDescription")
            .field("view_type", &self.view_type)
            .field("configure", &self.configure.len())
            .field("appearing_transition", &self.appearing_transition)
            .field("disappearing_transition", &self.disappearing_transition)
            .field("layout_transition", &self.layout_transition)
            .finish()
    }
}
