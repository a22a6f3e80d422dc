use std::sync::Arc;

use parking_lot::Mutex;

use crate::Monitor;

/// A named hook whose target can be swapped after registration.
///
/// An empty chain emits nothing; the registry entry keeps its place either
/// way, so re-chaining does not reorder the walk.
#[derive(Default)]
pub struct ChainedMonitor {
    inner: Mutex<Option<Arc<dyn Monitor>>>,
}

impl ChainedMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the chained target.
    pub fn set(&self, monitor: Arc<dyn Monitor>) {
        *self.inner.lock() = Some(monitor);
    }
}

impl Monitor for ChainedMonitor {
    fn stats(&self, cb: &mut dyn FnMut(&str, f64)) {
        // Clone out of the lock so the target runs without holding it.
        let target = self.inner.lock().clone();
        if let Some(target) = target {
            target.stats(cb);
        }
    }
}
