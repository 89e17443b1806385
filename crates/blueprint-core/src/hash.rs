#[cfg(feature = "std-hash")]
pub mod default {
    pub use std::collections::hash_map::RandomState as DefaultBuildHasher;
}

#[cfg(not(feature = "std-hash"))]
pub mod default {
    pub use ahash::RandomState as DefaultBuildHasher;
}

/// Hasher builder used for path-keyed maps throughout the workspace.
pub use default::DefaultBuildHasher;
