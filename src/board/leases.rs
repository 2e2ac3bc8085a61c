use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

/// Kernel lines currently held by a live `LineHandle`.
///
/// Lease bookkeeping is process-local only. It does not know about lines exported
/// by other processes, and it is independent of the kernel export state.
#[derive(Debug, Default)]
pub struct Leases {
    lines: Mutex<HashSet<u32>>,
}

impl Leases {
    pub fn new() -> Self {
        Self {
            lines: Mutex::new(HashSet::with_capacity(28)),
        }
    }

    /// Returns `false` when the line is already leased.
    pub fn lease(&self, line: u32) -> bool {
        self.lock().insert(line)
    }

    pub fn release(&self, line: u32) {
        self.lock().remove(&line);
    }

    pub fn is_leased(&self, line: u32) -> bool {
        self.lock().contains(&line)
    }

    // A panic while holding the lock cannot leave the set half-updated, so a
    // poisoned lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, HashSet<u32>> {
        self.lines.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
