use std::sync::atomic::{AtomicU64, Ordering};

use crate::Monitor;

/// Occurrence counter. `add` is safe on hot paths; readers see a plain
/// monotonic count.
#[derive(Default)]
pub struct EventMonitor {
    count: AtomicU64,
}

impl EventMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self) {
        self.count.fetch_add(1, Ordering::Relaxed);
    }
}

impl Monitor for EventMonitor {
    fn stats(&self, cb: &mut dyn FnMut(&str, f64)) {
        cb("count", self.count.load(Ordering::Relaxed) as f64);
    }
}
