//! Common elements for Blueprint-RS built on the element and view
//! description APIs.

mod label;
mod transition_container;

pub use label::{Label, LabelView};
pub use transition_container::TransitionContainer;

pub mod prelude {
    pub use crate::label::Label;
    pub use crate::transition_container::TransitionContainer;
}

#[cfg(test)]
#[path = "tests/controls_tests.rs"]
mod tests;
