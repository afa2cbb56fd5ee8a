//! Bounded, append-only combat log
//!
//! Observability aid for the player: never consulted for control flow.

use std::collections::VecDeque;

/// Ring buffer of human-readable battle events, oldest dropped first
#[derive(Debug, Clone)]
pub struct CombatLog {
    entries: VecDeque<String>,
    capacity: usize,
}

impl CombatLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, line: impl Into<String>) {
        let line = line.into();
        tracing::debug!(target: "combat_log", "{line}");
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(line);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn last(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_drops_oldest_at_capacity() {
        let mut log = CombatLog::new(3);
        for i in 0..5 {
            log.push(format!("event {i}"));
        }
        assert_eq!(log.len(), 3);
        let lines: Vec<&str> = log.iter().collect();
        assert_eq!(lines, vec!["event 2", "event 3", "event 4"]);
    }

    #[test]
    fn test_last_entry() {
        let mut log = CombatLog::new(10);
        log.push("first");
        log.push("second");
        assert_eq!(log.last(), Some("second"));
    }
}
