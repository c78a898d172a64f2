//! Single-flight guard for form submissions

use std::collections::HashSet;
use std::sync::Mutex;

/// Tracks submissions whose write is still pending
///
/// Keys are submission fingerprints, so a repeated click on the same
/// form is rejected while a different visitor's submission proceeds.
#[derive(Debug, Default)]
pub struct SubmitGuard {
    in_flight: Mutex<HashSet<String>>,
}

impl SubmitGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `key` as in flight, or `None` if it already is
    pub fn try_begin(&self, key: &str) -> Option<InFlight<'_>> {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        if in_flight.insert(key.to_string()) {
            Some(InFlight {
                guard: self,
                key: key.to_string(),
            })
        } else {
            None
        }
    }

    pub fn is_in_flight(&self, key: &str) -> bool {
        self.in_flight
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(key)
    }
}

/// Releases its key when dropped
#[derive(Debug)]
pub struct InFlight<'a> {
    guard: &'a SubmitGuard,
    key: String,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.guard
            .in_flight
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&self.key);
    }
}
