//! Testing utilities and harness for Blueprint-RS

pub mod fixtures;
pub mod testing;

// Re-export testing utilities
pub use fixtures::*;
pub use testing::*;

pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::testing::*;
}
