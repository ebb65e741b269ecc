//! Step observer trait for monitoring simulation progress.

/// Trait for observing the phases of a simulated frame.
///
/// Implement this to monitor progress (e.g., for debugging,
/// visualization, or performance profiling). All methods have default
/// no-op implementations.
pub trait StepObserver {
    /// Called after each of the sub-step dispatches completes.
    fn on_substep(&mut self, _substep: usize) {}

    /// Called after parameter sync has rewritten the spring array.
    fn on_parameter_sync(&mut self) {}

    /// Called when a frame is fully complete.
    fn on_frame_complete(&mut self) {}
}

/// A no-op observer that does nothing. Use as default when no
/// observation is needed.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}
