pub mod source;
pub mod stats;
pub mod trace;

pub use source::{RunQueueMeta, SchedulerObserver};
pub use stats::{SampleMode, SchedStats};

use tracing::debug;

/// Scheduler introspection probe.
///
/// Wraps a read-only [`SchedulerObserver`] and exposes the two entry
/// points: numeric sampling and formatted trace capture. Both are
/// synchronous, bounded, and always succeed.
pub struct Probe<O> {
    observer: O,
}

impl<O: SchedulerObserver> Probe<O> {
    pub fn new(observer: O) -> Self {
        Self { observer }
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Snapshots scheduler statistics. See [`stats::sample`].
    pub fn sample(&self, mode: SampleMode) -> SchedStats {
        stats::sample(&self.observer, mode)
    }

    /// Dumps a formatted scheduler trace into `out`, returning the number
    /// of bytes written.
    ///
    /// The write target is installed for exactly this call and torn down
    /// before returning, on every exit path. Output that does not fit in
    /// `out` is dropped silently; an empty `out` is a valid way to ask for
    /// nothing.
    pub fn capture_trace(&self, out: &mut [u8], detailed: bool) -> usize {
        let written = trace::capture_with(out, || {
            trace::format::write_sched_trace(&self.observer, detailed);
        });
        debug!(written, detailed, "captured scheduler trace");
        written
    }
}
