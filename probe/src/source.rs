//! Read-only view of scheduler internals.
//!
//! The scheduler owns and mutates everything behind this trait; the probe
//! only reads. Implementations must not take the scheduler's own locks in
//! these accessors, otherwise sampling would perturb the hot path it is
//! trying to observe.

/// Ring-buffer metadata for one logical processor's local run queue.
///
/// Values are raw unsynchronized reads. Under concurrent pushes/pops the
/// pair (`head`, `tail`) may be torn: `tail` can appear behind `head`.
/// Consumers must go through [`queued_in_ring`] to recover a usable count.
///
/// [`queued_in_ring`]: crate::stats::queued_in_ring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunQueueMeta {
    /// Index of the next entry to run.
    pub head: i32,
    /// Index of the next free entry.
    pub tail: i32,
    /// Ring storage size.
    pub capacity: i32,
}

/// Capability handed to the probe by the scheduler.
///
/// Every method is an independent snapshot: no two reads are mutually
/// consistent, and none may block or allocate. The slot table is sized for
/// the maximum possible parallelism, so slots past the configured level
/// (or never started) report `None` and are skipped.
pub trait SchedulerObserver {
    /// Size of the logical-processor slot table.
    fn slot_count(&self) -> usize;

    /// Run-queue metadata for slot `slot`, or `None` if the slot is unused.
    fn run_queue_meta(&self, slot: usize) -> Option<RunQueueMeta>;

    /// Maximum number of logical processors allowed to run concurrently.
    fn max_procs(&self) -> i32;

    /// Current count of live OS worker threads.
    fn worker_threads(&self) -> i32;

    /// Logical processors currently idle.
    fn idle_procs(&self) -> i32;

    /// Worker threads currently parked.
    fn idle_threads(&self) -> i32;

    /// Length of the global (non-per-processor) run queue.
    fn global_runq_len(&self) -> i32;

    /// Milliseconds since the scheduler started. Used in the trace header.
    fn uptime_millis(&self) -> u64;
}

impl<O: SchedulerObserver + ?Sized> SchedulerObserver for &O {
    fn slot_count(&self) -> usize {
        (**self).slot_count()
    }

    fn run_queue_meta(&self, slot: usize) -> Option<RunQueueMeta> {
        (**self).run_queue_meta(slot)
    }

    fn max_procs(&self) -> i32 {
        (**self).max_procs()
    }

    fn worker_threads(&self) -> i32 {
        (**self).worker_threads()
    }

    fn idle_procs(&self) -> i32 {
        (**self).idle_procs()
    }

    fn idle_threads(&self) -> i32 {
        (**self).idle_threads()
    }

    fn global_runq_len(&self) -> i32 {
        (**self).global_runq_len()
    }

    fn uptime_millis(&self) -> u64 {
        (**self).uptime_millis()
    }
}
