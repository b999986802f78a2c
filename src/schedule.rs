//! Named, cancelable delayed tasks on a logical clock.
//!
//! The scheduler never sleeps and owns no threads. The host reports elapsed
//! time and drains due keys with [`Scheduler::pop_due`]; what a key means is
//! up to the owner. Scheduling a key that is already pending replaces its
//! deadline, which is what makes debouncing work.

use std::collections::BTreeMap;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pending {
    deadline: Duration,
    seq: u64,
}

/// Pending tasks keyed by `K`, at most one per key.
#[derive(Debug, Clone)]
pub struct Scheduler<K> {
    now: Duration,
    seq: u64,
    pending: BTreeMap<K, Pending>,
}

impl<K: Ord + Clone> Default for Scheduler<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Clone> Scheduler<K> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            seq: 0,
            pending: BTreeMap::new(),
        }
    }

    /// Current logical time since the scheduler was created.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Run `key` after `delay`. Returns true if an earlier pending run of the
    /// same key was replaced.
    pub fn schedule(&mut self, key: K, delay: Duration) -> bool {
        self.seq += 1;
        let pending = Pending {
            deadline: self.now + delay,
            seq: self.seq,
        };
        self.pending.insert(key, pending).is_some()
    }

    /// Drop a pending run. Returns false if nothing was scheduled.
    pub fn cancel(&mut self, key: &K) -> bool {
        self.pending.remove(key).is_some()
    }

    pub fn is_scheduled(&self, key: &K) -> bool {
        self.pending.contains_key(key)
    }

    /// Time left until `key` fires.
    pub fn remaining(&self, key: &K) -> Option<Duration> {
        self.pending
            .get(key)
            .map(|p| p.deadline.saturating_sub(self.now))
    }

    /// Time left until the earliest pending key fires.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending
            .values()
            .map(|p| p.deadline)
            .min()
            .map(|d| d.saturating_sub(self.now))
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Remove and return the earliest key due at or before `until`, moving the
    /// clock to its deadline. Keys with equal deadlines come out in the order
    /// they were scheduled.
    pub fn pop_due(&mut self, until: Duration) -> Option<K> {
        let (key, pending) = self
            .pending
            .iter()
            .filter(|(_, p)| p.deadline <= until)
            .min_by_key(|(_, p)| (p.deadline, p.seq))
            .map(|(k, p)| (k.clone(), *p))?;
        self.pending.remove(&key);
        self.now = self.now.max(pending.deadline);
        Some(key)
    }

    /// Move the clock forward to `until` (never backwards).
    pub fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }

    /// Rename or drop pending keys, keeping their deadlines. `f` returns the
    /// new key, or `None` to cancel.
    pub fn rekey(&mut self, mut f: impl FnMut(&K) -> Option<K>) {
        let old = std::mem::take(&mut self.pending);
        for (key, pending) in old {
            if let Some(new_key) = f(&key) {
                self.pending.insert(new_key, pending);
            }
        }
    }
}
