//! Scheduler gauges.
//!
//! Bridges the probe into the registry: one chained monitor under the
//! `sched` group that takes an extended sample per stats walk and emits
//! each field as a flat gauge.

use std::sync::Arc;

use tracing::error;

use probe::{Probe, SampleMode, SchedStats, SchedulerObserver};

use crate::store::MonitorStore;
use crate::MonitorFunc;

/// Registers scheduler statistics on `store` under `sched.runtime`.
pub fn register_scheduler<O>(store: &MonitorStore, probe: Arc<Probe<O>>)
where
    O: SchedulerObserver + Send + Sync + 'static,
{
    let group = store.group_named("sched");
    let monitor = MonitorFunc::new(move |cb: &mut dyn FnMut(&str, f64)| {
        let stats = probe.sample(SampleMode::Extended);
        emit_sched_stats(&stats, cb);
    });

    if let Err(err) = group.chain("runtime", Arc::new(monitor)) {
        error!(%err, "failed to register scheduler gauges");
    }
}

/// Flattens a [`SchedStats`] record into `(name, f64)` gauges. Extended
/// fields are emitted only when the sample carries them.
pub fn emit_sched_stats(stats: &SchedStats, cb: &mut dyn FnMut(&str, f64)) {
    cb("max_procs", f64::from(stats.max_procs));
    cb("worker_threads", f64::from(stats.worker_threads));
    cb("local_runq_occupied", f64::from(stats.local_runq_occupied));
    cb("local_runq_capacity", f64::from(stats.local_runq_capacity));

    if let Some(idle_procs) = stats.idle_procs {
        cb("idle_procs", f64::from(idle_procs));
    }
    if let Some(idle_threads) = stats.idle_threads {
        cb("idle_threads", f64::from(idle_threads));
    }
    if let Some(global_runq) = stats.global_runq {
        cb("global_runq", f64::from(global_runq));
    }
}
