//! Measurement & layout contracts for Blueprint-RS

mod axis;
mod constraints;
mod contracts;
mod layouts;

pub use axis::*;
pub use constraints::*;
pub use contracts::*;
pub use layouts::*;

pub mod prelude {
    pub use crate::axis::AxisConstraint;
    pub use crate::constraints::SizeConstraint;
    pub use crate::contracts::{Layout, Measurable};
    pub use crate::layouts::{OverlayLayout, PassthroughLayout};
}
