//! Gauge registry over the scheduler probe.
//!
//! Anything implementing [`Monitor`] can be attached to a [`MonitorStore`]
//! and later walked to produce flat `(name, f64)` pairs for whatever
//! collection layer sits on top.

use std::collections::BTreeMap;

pub mod chained;
pub mod error;
pub mod event;
pub mod group;
pub mod sched;
pub mod store;

pub use chained::ChainedMonitor;
pub use error::MonitorError;
pub use event::EventMonitor;
pub use group::MonitorGroup;
pub use store::MonitorStore;

/// The basic key/value interface. Anything that implements `Monitor` can be
/// connected to the registry for later processing.
pub trait Monitor: Send + Sync {
    fn stats(&self, cb: &mut dyn FnMut(&str, f64));
}

/// Adapter turning a plain closure into a [`Monitor`].
pub struct MonitorFunc<F>(F);

impl<F> MonitorFunc<F>
where
    F: Fn(&mut dyn FnMut(&str, f64)) + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> Monitor for MonitorFunc<F>
where
    F: Fn(&mut dyn FnMut(&str, f64)) + Send + Sync,
{
    fn stats(&self, cb: &mut dyn FnMut(&str, f64)) {
        (self.0)(cb)
    }
}

/// Re-emits `monitor`'s stats with `prefix.` prepended to every name.
pub fn prefix_stats(prefix: &str, monitor: &dyn Monitor, cb: &mut dyn FnMut(&str, f64)) {
    monitor.stats(&mut |sub, val| cb(&format!("{prefix}.{sub}"), val));
}

/// Drains a monitor into a sorted map. Test and debugging convenience.
pub fn collect(monitor: &dyn Monitor) -> BTreeMap<String, f64> {
    let mut out = BTreeMap::new();
    monitor.stats(&mut |name, val| {
        out.insert(name.to_string(), val);
    });
    out
}

/// Normalizes a registry name: `/` becomes `.`, anything outside
/// `[a-zA-Z0-9_.-]` becomes `_`.
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' => '.',
            c if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-') => c,
            _ => '_',
        })
        .collect()
}
