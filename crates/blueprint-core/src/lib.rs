#![doc = r"Core runtime pieces for Blueprint-RS: the native view boundary, environment and animation timing."]

extern crate self as blueprint_core;

pub mod animation;
pub mod collections;
pub mod environment;
pub mod hash;
mod memory_applier;
pub mod path;
pub mod platform;

pub use animation::{
    perform_without_animation, AnimationAttributes, AnimationCompletion, Easing, Lerp,
};
pub use environment::{
    environment, with_environment, EnvironmentKey, EnvironmentScope, EnvironmentStack,
    EnvironmentValues, ScreenScaleKey,
};
pub use memory_applier::MemoryApplier;
pub use path::ElementPath;
pub use platform::{DefaultScheduler, LayoutScheduler};

use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

use blueprint_ui_graphics::LayoutAttributes;

pub type ViewId = usize;

/// A concrete native view living inside an [`Applier`].
///
/// The hooks are invoked by the applier when the view enters or leaves
/// a view hierarchy.
pub trait NativeView: Any {
    fn mount(&mut self) {}
    fn unmount(&mut self) {}
}

impl dyn NativeView {
    pub fn as_any(&self) -> &dyn Any {
        self
    }

    pub fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Identity of a native view type; descriptions sharing a type can reuse
/// each other's views.
#[derive(Clone, Copy, Debug)]
pub struct ViewType {
    id: TypeId,
    name: &'static str,
}

impl ViewType {
    pub fn of<V: NativeView>() -> Self {
        Self {
            id: TypeId::of::<V>(),
            name: type_name::<V>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Unqualified type name, handy for logs and tree dumps.
    pub fn short_name(&self) -> &'static str {
        self.name.rsplit("::").next().unwrap_or(self.name)
    }
}

impl PartialEq for ViewType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ViewType {}

impl Hash for ViewType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for ViewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    Missing {
        id: ViewId,
    },
    TypeMismatch {
        id: ViewId,
        expected: &'static str,
        found: &'static str,
    },
    CyclicInsertion {
        parent: ViewId,
        child: ViewId,
    },
}

impl fmt::Display for ViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewError::Missing { id } => write!(f, "view {id} missing"),
            ViewError::TypeMismatch {
                id,
                expected,
                found,
            } => {
                write!(f, "view {id} type mismatch; expected {expected}, found {found}")
            }
            ViewError::CyclicInsertion { parent, child } => {
                write!(f, "cannot insert view {child} into its own descendant {parent}")
            }
        }
    }
}

impl std::error::Error for ViewError {}

/// The boundary between the reconciler and a platform's native views.
///
/// Views are owned by the applier and addressed by [`ViewId`]. Layout
/// attribute changes made between [`begin_animation`](Applier::begin_animation)
/// and [`commit_animation`](Applier::commit_animation) are animated with
/// the innermost open scope's attributes.
pub trait Applier {
    fn create(&mut self, view_type: ViewType, view: Box<dyn NativeView>) -> ViewId;

    fn view_mut(&mut self, id: ViewId) -> Result<&mut dyn NativeView, ViewError>;

    fn view_type(&self, id: ViewId) -> Result<ViewType, ViewError>;

    fn contains(&self, id: ViewId) -> bool;

    fn subviews(&self, id: ViewId) -> Result<Vec<ViewId>, ViewError>;

    fn superview(&self, id: ViewId) -> Result<Option<ViewId>, ViewError>;

    /// Inserts `child` into `parent` at `index`, moving it if it already
    /// has a superview. Indices past the end append.
    fn insert_subview(&mut self, parent: ViewId, child: ViewId, index: usize)
        -> Result<(), ViewError>;

    /// Detaches the view and releases it together with its subviews.
    /// Removing a view that no longer exists is a no-op.
    fn remove_from_superview(&mut self, id: ViewId);

    fn layout_attributes(&self, id: ViewId) -> Result<LayoutAttributes, ViewError>;

    fn apply_layout_attributes(
        &mut self,
        id: ViewId,
        attributes: &LayoutAttributes,
    ) -> Result<(), ViewError>;

    /// Opens an animation scope. `None` suppresses animation for changes
    /// made inside the scope.
    fn begin_animation(&mut self, animation: Option<AnimationAttributes>);

    fn commit_animation(&mut self, completion: Option<AnimationCompletion>);

    /// The animation that changes made right now would inherit.
    fn inherited_animation(&self) -> Option<AnimationAttributes>;

    /// Advances running animations to `frame_time_nanos` and fires the
    /// completions that became due.
    fn drain_frame(&mut self, _frame_time_nanos: u64) {}
}

#[cfg(test)]
#[path = "tests/memory_applier_tests.rs"]
mod tests;
