//! Scoped environment values available to elements during layout and
//! measurement.

use std::any::{type_name, Any, TypeId};
use std::cell::RefCell;
use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

use crate::collections::map::HashMap;
use crate::hash::DefaultBuildHasher;

/// A typed key into [`EnvironmentValues`].
///
/// Reading a key that was never set yields [`EnvironmentKey::default_value`].
pub trait EnvironmentKey: 'static {
    type Value: Clone + 'static;

    fn default_value() -> Self::Value;
}

/// The display scale used to round measured sizes to physical pixels.
pub struct ScreenScaleKey;

impl EnvironmentKey for ScreenScaleKey {
    type Value = f32;

    fn default_value() -> f32 {
        1.0
    }
}

/// Immutable mapping from environment keys to values.
#[derive(Clone, Default)]
pub struct EnvironmentValues {
    values: HashMap<TypeId, Rc<dyn Any>, DefaultBuildHasher>,
}

impl EnvironmentValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value stored for `K`, or its default.
    ///
    /// Panics if the stored value is not a `K::Value`.
    pub fn get<K: EnvironmentKey>(&self) -> K::Value {
        match self.values.get(&TypeId::of::<K>()) {
            Some(value) => match value.downcast_ref::<K::Value>() {
                Some(value) => value.clone(),
                None => panic!(
                    "environment value for {} is not a {}",
                    type_name::<K>(),
                    type_name::<K::Value>()
                ),
            },
            None => K::default_value(),
        }
    }

    pub fn set<K: EnvironmentKey>(&mut self, value: K::Value) {
        self.values.insert(TypeId::of::<K>(), Rc::new(value));
    }

    /// Stores an already type-erased value. The type is checked on read.
    pub fn set_erased<K: EnvironmentKey>(&mut self, value: Rc<dyn Any>) {
        self.values.insert(TypeId::of::<K>(), value);
    }

    /// Copy of these values with `K` replaced.
    pub fn with<K: EnvironmentKey>(&self, value: K::Value) -> Self {
        let mut values = self.clone();
        values.set::<K>(value);
        values
    }

    pub fn contains<K: EnvironmentKey>(&self) -> bool {
        self.values.contains_key(&TypeId::of::<K>())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn screen_scale(&self) -> f32 {
        self.get::<ScreenScaleKey>()
    }
}

impl fmt::Debug for EnvironmentValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvironmentValues")
            .field("len", &self.values.len())
            .finish()
    }
}

thread_local! {
    static ENVIRONMENT_STACK: RefCell<Vec<EnvironmentValues>> = const { RefCell::new(Vec::new()) };
}

/// The per-thread stack of environments active during layout.
pub struct EnvironmentStack;

impl EnvironmentStack {
    pub fn push(values: EnvironmentValues) {
        ENVIRONMENT_STACK.with(|stack| stack.borrow_mut().push(values));
    }

    pub fn pop() -> Option<EnvironmentValues> {
        ENVIRONMENT_STACK.with(|stack| stack.borrow_mut().pop())
    }

    /// The innermost environment, or an empty one outside any scope.
    pub fn current() -> EnvironmentValues {
        ENVIRONMENT_STACK.with(|stack| stack.borrow().last().cloned().unwrap_or_default())
    }

    pub fn depth() -> usize {
        ENVIRONMENT_STACK.with(|stack| stack.borrow().len())
    }

    /// Drops every entry above `depth`.
    fn truncate(depth: usize) {
        ENVIRONMENT_STACK.with(|stack| stack.borrow_mut().truncate(depth));
    }

    /// Pushes `values` for the lifetime of the returned guard.
    pub fn scoped(values: EnvironmentValues) -> EnvironmentScope {
        Self::push(values);
        EnvironmentScope {
            depth: Self::depth(),
            _not_send: PhantomData,
        }
    }
}

/// Pops its environment when dropped, including during unwinding.
#[must_use = "the environment is popped as soon as the scope is dropped"]
pub struct EnvironmentScope {
    depth: usize,
    _not_send: PhantomData<Rc<()>>,
}

impl Drop for EnvironmentScope {
    fn drop(&mut self) {
        let depth = EnvironmentStack::depth();
        if !std::thread::panicking() {
            debug_assert_eq!(
                depth, self.depth,
                "environment scope closed at depth {} but was opened at depth {}",
                depth, self.depth
            );
        }
        EnvironmentStack::truncate(self.depth - 1);
    }
}

/// Runs `f` with `values` as the current environment.
pub fn with_environment<R>(values: EnvironmentValues, f: impl FnOnce() -> R) -> R {
    let _scope = EnvironmentStack::scoped(values);
    f()
}

/// Reads `K` from the current environment.
pub fn environment<K: EnvironmentKey>() -> K::Value {
    EnvironmentStack::current().get::<K>()
}

#[cfg(test)]
#[path = "tests/environment_tests.rs"]
mod tests;
