//! Platform abstraction traits for Blueprint hosts.
//!
//! A host surface never performs a view hierarchy update on its own
//! initiative; it asks the platform to run a layout pass and does the
//! work from there.

/// Schedules layout passes for a host view.
///
/// Implementations must be safe to use from multiple threads, although
/// the layout pass itself always runs on the UI thread.
pub trait LayoutScheduler: Send + Sync {
    /// Request that the host run a layout pass soon.
    fn schedule_layout(&self);
}

/// Scheduler that ignores requests; the embedder drives layout passes.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultScheduler;

impl LayoutScheduler for DefaultScheduler {
    fn schedule_layout(&self) {}
}
