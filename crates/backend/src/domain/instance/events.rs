use chrono::Utc;
use contracts::instance::{EventLevel, InstanceEvent};
use std::collections::VecDeque;

pub const EVENT_LOG_CAPACITY: usize = 512;

/// Bounded in-memory event log of one instance, oldest entries are dropped first
#[derive(Debug, Clone)]
pub struct EventLog {
    entries: VecDeque<InstanceEvent>,
    capacity: usize,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::with_capacity(EVENT_LOG_CAPACITY)
    }
}

impl EventLog {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(EVENT_LOG_CAPACITY)),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, level: EventLevel, message: impl Into<String>) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(InstanceEvent {
            timestamp: Utc::now(),
            level,
            message: message.into(),
        });
    }

    /// Entries oldest first
    pub fn snapshot(&self) -> Vec<InstanceEvent> {
        self.entries.iter().cloned().collect()
    }
}
