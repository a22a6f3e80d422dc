use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::error;

use crate::chained::ChainedMonitor;
use crate::error::MonitorError;
use crate::event::EventMonitor;
use crate::{sanitize_name, Monitor};

#[derive(Clone)]
enum Slot {
    Chained(Arc<ChainedMonitor>),
    Event(Arc<EventMonitor>),
}

impl Slot {
    fn as_monitor(&self) -> Arc<dyn Monitor> {
        match self {
            Slot::Chained(m) => m.clone(),
            Slot::Event(m) => m.clone(),
        }
    }
}

/// A named set of monitors. Stats are emitted as `<group>.<name>.<stat>`,
/// walked in sorted name order.
pub struct MonitorGroup {
    name: String,
    monitors: RwLock<BTreeMap<String, Slot>>,
}

impl MonitorGroup {
    pub fn new(name: &str) -> Self {
        Self {
            name: sanitize_name(name),
            monitors: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Hooks `monitor` into the group under `name`.
    ///
    /// Chaining the same name again swaps the target in place. A name
    /// already used by a non-chained monitor is a registration bug and is
    /// reported as [`MonitorError::TypeConflict`].
    pub fn chain(&self, name: &str, monitor: Arc<dyn Monitor>) -> Result<(), MonitorError> {
        let name = sanitize_name(name);
        let entry = {
            let mut monitors = self.monitors.write();
            let slot = monitors
                .entry(name.clone())
                .or_insert_with(|| Slot::Chained(Arc::new(ChainedMonitor::new())));
            match slot {
                Slot::Chained(chained) => chained.clone(),
                _ => return Err(MonitorError::TypeConflict { name }),
            }
        };
        entry.set(monitor);
        Ok(())
    }

    /// Counts one occurrence of `name`.
    ///
    /// Fire-and-forget: a name clash with a different monitor kind is
    /// logged and the event dropped rather than surfaced to the hot path.
    pub fn event(&self, name: &str) {
        let name = sanitize_name(name);
        let entry = {
            let mut monitors = self.monitors.write();
            let slot = monitors
                .entry(name.clone())
                .or_insert_with(|| Slot::Event(Arc::new(EventMonitor::new())));
            match slot {
                Slot::Event(events) => events.clone(),
                _ => {
                    drop(monitors);
                    error!(error = %MonitorError::TypeConflict { name }, "event dropped");
                    return;
                }
            }
        };
        entry.add();
    }

    pub fn stats(&self, cb: &mut dyn FnMut(&str, f64)) {
        let snapshot: Vec<(String, Slot)> = self
            .monitors
            .read()
            .iter()
            .map(|(name, slot)| (name.clone(), slot.clone()))
            .collect();

        for (name, slot) in snapshot {
            slot.as_monitor().stats(&mut |sub, val| {
                cb(&format!("{}.{}.{}", self.name, name, sub), val);
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MonitorFunc;

    fn gauge(val: f64) -> Arc<dyn Monitor> {
        Arc::new(MonitorFunc::new(move |cb: &mut dyn FnMut(&str, f64)| {
            cb("gauge", val);
        }))
    }

    fn drain(group: &MonitorGroup) -> Vec<(String, f64)> {
        let mut out = Vec::new();
        group.stats(&mut |name, val| out.push((name.to_string(), val)));
        out
    }

    #[test]
    fn stats_are_fully_qualified_and_sorted() {
        let group = MonitorGroup::new("env");
        group.chain("beta", gauge(2.0)).unwrap();
        group.chain("alpha", gauge(1.0)).unwrap();

        assert_eq!(
            drain(&group),
            vec![
                ("env.alpha.gauge".to_string(), 1.0),
                ("env.beta.gauge".to_string(), 2.0),
            ]
        );
    }

    #[test]
    fn rechaining_swaps_in_place() {
        let group = MonitorGroup::new("env");
        group.chain("runtime", gauge(1.0)).unwrap();
        group.chain("runtime", gauge(9.0)).unwrap();

        assert_eq!(drain(&group), vec![("env.runtime.gauge".to_string(), 9.0)]);
    }

    #[test]
    fn events_count_under_their_own_name() {
        let group = MonitorGroup::new("env");
        group.event("restarts");
        group.event("restarts");

        assert_eq!(
            drain(&group),
            vec![("env.restarts.count".to_string(), 2.0)]
        );
    }

    #[test]
    fn chain_over_an_event_name_is_a_type_conflict() {
        let group = MonitorGroup::new("env");
        group.event("restarts");

        let err = group.chain("restarts", gauge(1.0)).unwrap_err();
        assert!(matches!(err, MonitorError::TypeConflict { name } if name == "restarts"));
    }

    #[test]
    fn event_over_a_chained_name_is_dropped_not_panicked() {
        let group = MonitorGroup::new("env");
        group.chain("runtime", gauge(1.0)).unwrap();

        group.event("runtime");

        assert_eq!(drain(&group), vec![("env.runtime.gauge".to_string(), 1.0)]);
    }

    #[test]
    fn group_and_member_names_are_sanitized() {
        let group = MonitorGroup::new("my service");
        group.event("cache/hits");

        assert_eq!(
            drain(&group),
            vec![("my_service.cache.hits.count".to_string(), 1.0)]
        );
    }
}
