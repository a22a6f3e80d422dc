//! Human-readable scheduler trace.

use std::fmt::Write as _;

use crate::source::SchedulerObserver;
use crate::stats::queued_in_ring;
use crate::trace::TraceWriter;

/// Writes the scheduler trace through the target installed on this thread.
///
/// One summary line always; with `detailed`, one line per slot in the
/// walked range. Output past the installed budget is dropped by the sink,
/// so a short buffer simply truncates the dump.
pub fn write_sched_trace<O: SchedulerObserver>(observer: &O, detailed: bool) {
    let mut w = TraceWriter;

    let _ = writeln!(
        w,
        "SCHED {}ms: maxprocs={} idleprocs={} threads={} idlethreads={} runqueue={}",
        observer.uptime_millis(),
        observer.max_procs(),
        observer.idle_procs(),
        observer.worker_threads(),
        observer.idle_threads(),
        observer.global_runq_len(),
    );

    if !detailed {
        return;
    }

    let walk = observer
        .slot_count()
        .min(observer.max_procs().max(0) as usize);

    for slot in 0..walk {
        match observer.run_queue_meta(slot) {
            Some(meta) => {
                let _ = writeln!(
                    w,
                    "  P{slot}: runq={}/{} head={} tail={}",
                    queued_in_ring(meta),
                    meta.capacity,
                    meta.head,
                    meta.tail,
                );
            }
            None => {
                let _ = writeln!(w, "  P{slot}: absent");
            }
        }
    }
}
