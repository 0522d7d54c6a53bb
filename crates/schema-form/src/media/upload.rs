//! Upload generations.
//!
//! Every file selection on a field takes a fresh ticket. A read that
//! finishes after a newer selection on the same field holds a stale ticket
//! and must not commit.

use std::collections::HashMap;

use crate::value::MediaKind;

/// Claim on a field issued when a file is selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTicket {
    pub path: String,
    pub generation: u64,
    pub kind: MediaKind,
}

#[derive(Debug, Default)]
pub struct UploadTracker {
    latest: HashMap<String, u64>,
    next: u64,
}

impl UploadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket for `path`, superseding any earlier ticket for it.
    pub fn begin(&mut self, path: &str, kind: MediaKind) -> UploadTicket {
        self.next += 1;
        self.latest.insert(path.to_string(), self.next);
        UploadTicket {
            path: path.to_string(),
            generation: self.next,
            kind,
        }
    }

    pub fn is_current(&self, ticket: &UploadTicket) -> bool {
        self.latest.get(&ticket.path) == Some(&ticket.generation)
    }

    /// Retire a ticket once it has committed or failed. Returns whether it
    /// was current.
    pub fn finish(&mut self, ticket: &UploadTicket) -> bool {
        if self.is_current(ticket) {
            self.latest.remove(&ticket.path);
            true
        } else {
            false
        }
    }

    /// Invalidate outstanding tickets at `path` or beneath it.
    pub fn cancel_within(&mut self, path: &str) {
        self.latest
            .retain(|pending, _| !schema_form_path::is_within(path, pending));
    }

    pub fn pending(&self) -> usize {
        self.latest.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_ticket_wins() {
        let mut tracker = UploadTracker::new();
        let first = tracker.begin("photo", MediaKind::Image);
        let second = tracker.begin("photo", MediaKind::Image);
        assert!(!tracker.is_current(&first));
        assert!(tracker.is_current(&second));
        assert!(!tracker.finish(&first));
        assert!(tracker.finish(&second));
        assert!(!tracker.is_current(&second));
    }

    #[test]
    fn test_paths_are_independent() {
        let mut tracker = UploadTracker::new();
        let a = tracker.begin("a", MediaKind::File);
        let b = tracker.begin("b", MediaKind::File);
        assert!(tracker.is_current(&a));
        assert!(tracker.is_current(&b));
        assert_eq!(tracker.pending(), 2);
    }

    #[test]
    fn test_cancel_within() {
        let mut tracker = UploadTracker::new();
        let nested = tracker.begin("items[0].clip", MediaKind::Audio);
        let other = tracker.begin("cover", MediaKind::Image);
        tracker.cancel_within("items");
        assert!(!tracker.is_current(&nested));
        assert!(tracker.is_current(&other));
    }
}
