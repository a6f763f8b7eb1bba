//! Request Sequencing
//!
//! A view that refetches when its inputs change takes a ticket per request
//! and only applies the response if the ticket is still the latest.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct RequestSequencer {
    latest: Arc<AtomicU64>,
}

#[derive(Debug)]
pub struct Ticket {
    id: u64,
    latest: Arc<AtomicU64>,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Supersedes every earlier ticket.
    pub fn next(&self) -> Ticket {
        let id = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        Ticket { id, latest: self.latest.clone() }
    }
}

impl Ticket {
    pub fn is_current(&self) -> bool {
        self.latest.load(Ordering::SeqCst) == self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_later_ticket_supersedes() {
        let seq = RequestSequencer::new();
        let first = seq.next();
        assert!(first.is_current());

        let second = seq.next();
        assert!(!first.is_current());
        assert!(second.is_current());
    }

    #[test]
    fn test_clones_share_sequence() {
        let seq = RequestSequencer::new();
        let other = seq.clone();
        let ticket = seq.next();
        other.next();
        assert!(!ticket.is_current());
    }
}
