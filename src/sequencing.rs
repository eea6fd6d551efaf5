//! Request sequencing
//!
//! Fetches are not ordered on the wire: a read started early can land after
//! a read started later. Each fetch takes a [`Ticket`] before it is sent, and
//! its response is applied only if no newer ticket has been applied yet.

use std::sync::atomic::{AtomicU64, Ordering};

/// Position of one request in issue order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Monotonic issue/apply counters
#[derive(Debug, Default)]
pub struct RequestSequencer {
    issued: AtomicU64,
    applied: AtomicU64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the next ticket. The first ticket is 1.
    pub fn begin(&self) -> Ticket {
        Ticket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Claim the right to apply the response for `ticket`.
    ///
    /// Returns `false` when a newer response has already been applied; the
    /// caller must then drop its response.
    pub fn try_apply(&self, ticket: Ticket) -> bool {
        let previous = self.applied.fetch_max(ticket.0, Ordering::SeqCst);
        previous < ticket.0
    }

    /// Most recently issued ticket value (0 before the first request)
    pub fn latest_issued(&self) -> u64 {
        self.issued.load(Ordering::SeqCst)
    }

    /// Most recently applied ticket value
    pub fn latest_applied(&self) -> u64 {
        self.applied.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_order_responses_apply() {
        let seq = RequestSequencer::new();
        let a = seq.begin();
        assert!(seq.try_apply(a));
        let b = seq.begin();
        assert!(seq.try_apply(b));
        assert_eq!(seq.latest_applied(), 2);
    }

    #[test]
    fn test_stale_response_dropped() {
        let seq = RequestSequencer::new();
        let a = seq.begin();
        let b = seq.begin();

        assert!(seq.try_apply(b));
        assert!(!seq.try_apply(a));
        assert_eq!(seq.latest_applied(), b.value());
    }

    #[test]
    fn test_ticket_applies_once() {
        let seq = RequestSequencer::new();
        let a = seq.begin();
        assert!(seq.try_apply(a));
        assert!(!seq.try_apply(a));
    }

    #[test]
    fn test_tickets_are_monotonic_across_threads() {
        let seq = std::sync::Arc::new(RequestSequencer::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let seq = std::sync::Arc::clone(&seq);
                std::thread::spawn(move || (0..100).map(|_| seq.begin().value()).collect::<Vec<_>>())
            })
            .collect();

        let mut all: Vec<u64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        all.sort_unstable();
        all.dedup();

        assert_eq!(all.len(), 800);
        assert_eq!(seq.latest_issued(), 800);
    }
}
