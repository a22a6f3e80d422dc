//! Point-in-time scheduler statistics.
//!
//! Responsibilities:
//! - Walk the logical-processor slot table and sum run-queue occupancy
//!   and capacity, correcting for torn head/tail reads.
//! - Copy the global scalars (parallelism level, worker-thread count) into
//!   a flat record the caller owns outright.
//!
//! Non-responsibilities:
//! - Synchronizing with the scheduler (deliberately lock-free reads).
//! - Aggregating samples over time (each call stands alone).

use serde::{Deserialize, Serialize};

use crate::source::{RunQueueMeta, SchedulerObserver};

/// Field set selector for [`sample`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleMode {
    /// Run-queue totals and the two global scalars only.
    Basic,
    /// Additionally reads idle-processor, idle-thread and global run-queue
    /// counts.
    Extended,
}

/// Flat snapshot of scheduler state.
///
/// A value copy with no ties back to scheduler internals; safe to send
/// across threads or through a serialization boundary. Fields are each an
/// independent best-effort read, not a transactionally consistent set.
///
/// Holds `0 <= local_runq_occupied <= local_runq_capacity` on every sample,
/// even while the scheduler mutates its queues mid-walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedStats {
    /// Configured parallelism level.
    pub max_procs: i32,
    /// Live OS worker threads backing the scheduler.
    pub worker_threads: i32,
    /// Entries queued across all present local run queues.
    pub local_runq_occupied: i32,
    /// Summed ring capacity across all present local run queues.
    pub local_runq_capacity: i32,
    /// Idle logical processors. `None` in [`SampleMode::Basic`].
    pub idle_procs: Option<i32>,
    /// Parked worker threads. `None` in [`SampleMode::Basic`].
    pub idle_threads: Option<i32>,
    /// Global run-queue length. `None` in [`SampleMode::Basic`].
    pub global_runq: Option<i32>,
}

/// Recovers a non-negative occupancy count from possibly torn ring indices.
///
/// `tail - head` is the naive count; when `tail` has wrapped past zero
/// relative to `head` it goes transiently negative and the ring capacity is
/// added back. The result is held inside `0..=capacity` so that no torn
/// read can ever contribute a negative or over-capacity value to the
/// totals. Arithmetic is done in `i64` so the rule stays explicit instead
/// of leaning on integer-wrap behavior.
pub fn queued_in_ring(meta: RunQueueMeta) -> i32 {
    let capacity = i64::from(meta.capacity.max(0));
    let mut queued = i64::from(meta.tail) - i64::from(meta.head);
    if queued < 0 {
        queued += capacity;
    }
    queued.clamp(0, capacity) as i32
}

/// Samples the observer into a [`SchedStats`] record.
///
/// Walks slots `0..max_procs` (bounded by the table size), skipping absent
/// slots. Never blocks, never allocates, and cannot fail; the result is a
/// best-effort approximation whose structural invariants always hold.
pub fn sample<O: SchedulerObserver>(observer: &O, mode: SampleMode) -> SchedStats {
    let mut occupied: i32 = 0;
    let mut capacity: i32 = 0;

    let max_procs = observer.max_procs();
    let walk = observer.slot_count().min(max_procs.max(0) as usize);

    for slot in 0..walk {
        let Some(meta) = observer.run_queue_meta(slot) else {
            continue;
        };
        occupied = occupied.saturating_add(queued_in_ring(meta));
        capacity = capacity.saturating_add(meta.capacity.max(0));
    }

    let mut stats = SchedStats {
        max_procs,
        worker_threads: observer.worker_threads(),
        local_runq_occupied: occupied,
        local_runq_capacity: capacity,
        idle_procs: None,
        idle_threads: None,
        global_runq: None,
    };

    if mode == SampleMode::Extended {
        stats.idle_procs = Some(observer.idle_procs());
        stats.idle_threads = Some(observer.idle_threads());
        stats.global_runq = Some(observer.global_runq_len());
    }

    stats
}
