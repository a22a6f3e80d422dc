//! Scoped redirection of scheduler trace output.
//!
//! A trace capture installs a write target on the calling thread, runs a
//! formatter that emits through [`trace_write`], then tears the target down
//! again. Teardown happens on every exit path, including a panicking
//! formatter, so no later code can write through a stale target after the
//! caller's buffer has gone out of scope.
//!
//! Captures on the same thread must not nest; the inner capture wins for
//! its scope and the outer one reports zero bytes. Captures on different
//! threads are fully independent.

pub mod format;

use std::cell::RefCell;
use std::fmt;

thread_local! {
    static SINK: RefCell<Option<Sink>> = const { RefCell::new(None) };
}

struct Sink {
    accepted: Vec<u8>,
    remaining: usize,
}

/// Appends `bytes` to the write target installed on this thread.
///
/// At most the remaining budget is accepted; the overflow is dropped
/// silently. Returns the number of bytes accepted, which is zero when no
/// target is installed.
pub fn trace_write(bytes: &[u8]) -> usize {
    SINK.with(|cell| {
        let mut slot = cell.borrow_mut();
        let Some(sink) = slot.as_mut() else {
            return 0;
        };
        let take = bytes.len().min(sink.remaining);
        sink.accepted.extend_from_slice(&bytes[..take]);
        sink.remaining -= take;
        take
    })
}

/// `fmt::Write` adapter over [`trace_write`].
///
/// Truncation is not an error: `write_str` always reports success so that
/// formatters keep running (and keep being dropped) once the budget is
/// exhausted.
pub struct TraceWriter;

impl fmt::Write for TraceWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        trace_write(s.as_bytes());
        Ok(())
    }
}

struct Installed;

impl Installed {
    fn install(budget: usize) -> Self {
        SINK.with(|cell| {
            *cell.borrow_mut() = Some(Sink {
                accepted: Vec::with_capacity(budget),
                remaining: budget,
            });
        });
        Installed
    }

    fn uninstall(self) -> Option<Sink> {
        SINK.with(|cell| cell.borrow_mut().take())
    }
}

impl Drop for Installed {
    fn drop(&mut self) {
        SINK.with(|cell| {
            cell.borrow_mut().take();
        });
    }
}

/// Runs `format` with a write target of `out.len()` bytes installed, then
/// copies whatever it emitted into the front of `out`.
///
/// Returns the number of bytes written. Bytes of `out` past that count are
/// left untouched. An empty `out` returns 0 without installing anything,
/// leaving any target already on this thread as it was.
pub fn capture_with<F: FnOnce()>(out: &mut [u8], format: F) -> usize {
    if out.is_empty() {
        return 0;
    }

    let installed = Installed::install(out.len());
    format();
    let Some(sink) = installed.uninstall() else {
        return 0;
    };

    let written = sink.accepted.len();
    out[..written].copy_from_slice(&sink.accepted);
    written
}
