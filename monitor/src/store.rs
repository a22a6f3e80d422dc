use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::group::MonitorGroup;
use crate::sanitize_name;

/// Thread-safe registry of named monitor groups.
#[derive(Default)]
pub struct MonitorStore {
    groups: RwLock<BTreeMap<String, Arc<MonitorGroup>>>,
}

impl MonitorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the group registered under `name`, creating it on first use.
    pub fn group_named(&self, name: &str) -> Arc<MonitorGroup> {
        let name = sanitize_name(name);
        if let Some(group) = self.groups.read().get(&name) {
            return group.clone();
        }
        self.groups
            .write()
            .entry(name.clone())
            .or_insert_with(|| Arc::new(MonitorGroup::new(&name)))
            .clone()
    }

    /// Calls `cb` with every statistic registered on this store, groups
    /// walked in sorted name order.
    pub fn stats(&self, cb: &mut dyn FnMut(&str, f64)) {
        let snapshot: Vec<Arc<MonitorGroup>> = self.groups.read().values().cloned().collect();
        for group in snapshot {
            group.stats(cb);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Monitor, MonitorFunc};

    fn gauge(val: f64) -> Arc<dyn Monitor> {
        Arc::new(MonitorFunc::new(move |cb: &mut dyn FnMut(&str, f64)| {
            cb("gauge", val);
        }))
    }

    #[test]
    fn group_named_returns_the_same_group() {
        let store = MonitorStore::new();
        let a = store.group_named("env");
        let b = store.group_named("env");

        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn lookup_goes_through_sanitization() {
        let store = MonitorStore::new();
        let a = store.group_named("my/env");
        let b = store.group_named("my.env");

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.name(), "my.env");
    }

    #[test]
    fn stats_walk_groups_in_sorted_order() {
        let store = MonitorStore::new();
        store.group_named("zeta").chain("m", gauge(1.0)).unwrap();
        store.group_named("alpha").chain("m", gauge(2.0)).unwrap();

        let mut names = Vec::new();
        store.stats(&mut |name, _| names.push(name.to_string()));

        assert_eq!(names, vec!["alpha.m.gauge", "zeta.m.gauge"]);
    }
}
