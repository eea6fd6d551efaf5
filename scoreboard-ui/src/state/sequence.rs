//! Fetch ordering
//!
//! Every fetch takes a ticket when it starts. A response is applied only if
//! its ticket is newer than the last applied one, so a slow early fetch never
//! overwrites a later one.

use std::cell::Cell;
use std::rc::Rc;

#[derive(Clone, Default)]
pub struct Sequencer {
    issued: Rc<Cell<u64>>,
    applied: Rc<Cell<u64>>,
}

impl Sequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ticket for a fetch about to start; the first is 1
    pub fn begin(&self) -> u64 {
        let next = self.issued.get() + 1;
        self.issued.set(next);
        next
    }

    /// Claim the right to apply a response
    pub fn try_apply(&self, ticket: u64) -> bool {
        if ticket > self.applied.get() {
            self.applied.set(ticket);
            true
        } else {
            false
        }
    }

    /// A response for `ticket` has been superseded by an applied newer one
    pub fn is_stale(&self, ticket: u64) -> bool {
        ticket <= self.applied.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_order() {
        let seq = Sequencer::new();
        let a = seq.begin();
        let b = seq.begin();
        assert!(seq.try_apply(a));
        assert!(seq.try_apply(b));
    }

    #[test]
    fn test_late_response_dropped() {
        let seq = Sequencer::new();
        let a = seq.begin();
        let b = seq.begin();
        assert!(seq.try_apply(b));
        assert!(!seq.try_apply(a));
    }

    #[test]
    fn test_stale_after_newer_applied() {
        let seq = Sequencer::new();
        let a = seq.begin();
        let b = seq.begin();
        assert!(!seq.is_stale(a));
        assert!(seq.try_apply(b));
        assert!(seq.is_stale(a));
        assert!(seq.is_stale(b));
    }

    #[test]
    fn test_clones_share_counters() {
        let seq = Sequencer::new();
        let other = seq.clone();
        assert_eq!(seq.begin(), 1);
        assert_eq!(other.begin(), 2);
    }
}
