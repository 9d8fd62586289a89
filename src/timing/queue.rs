//! Slotmap-backed timer queue.
//!
//! Each controller owns one [`TimerQueue`], keyed by its own timer-kind enum.
//! Timer ids are generational, so cancelling a timer that already fired (or
//! was cancelled) is a harmless no-op and can never hit a newer timer that
//! reused the slot.

use slotmap::{new_key_type, SlotMap};

use super::clock::Millis;

new_key_type! {
    /// Handle to a scheduled timer.
    pub struct TimerId;
}

#[derive(Debug, Clone)]
struct Entry<K> {
    kind: K,
    deadline: Millis,
    /// Insertion sequence, breaks ties between equal deadlines (FIFO).
    seq: u64,
}

// ---------------------------------------------------------------------------
// TimerQueue
// ---------------------------------------------------------------------------

/// A small set of pending one-shot timers.
///
/// Interval behaviour is built by the owner re-scheduling from inside its
/// fire handler.
#[derive(Debug, Clone)]
pub struct TimerQueue<K> {
    entries: SlotMap<TimerId, Entry<K>>,
    next_seq: u64,
}

impl<K: Copy> TimerQueue<K> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            entries: SlotMap::with_key(),
            next_seq: 0,
        }
    }

    /// Schedule a timer of `kind` to fire at the absolute time `deadline`.
    pub fn schedule(&mut self, kind: K, deadline: Millis) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.insert(Entry {
            kind,
            deadline,
            seq,
        })
    }

    /// Cancel a timer. Returns whether it was still pending.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.entries.remove(id).is_some()
    }

    /// Whether the timer is still pending.
    pub fn contains(&self, id: TimerId) -> bool {
        self.entries.contains_key(id)
    }

    /// The earliest pending deadline, if any.
    pub fn next_deadline(&self) -> Option<Millis> {
        self.entries.values().map(|e| e.deadline).min()
    }

    /// Remove and return the earliest timer due at or before `now`.
    ///
    /// Returns `(id, kind, deadline)`. Call repeatedly until `None` to drain;
    /// handlers may schedule new timers between calls and those are honoured
    /// in order as long as they are also due.
    pub fn pop_due(&mut self, now: Millis) -> Option<(TimerId, K, Millis)> {
        let id = self
            .entries
            .iter()
            .filter(|(_, e)| e.deadline <= now)
            .min_by_key(|(_, e)| (e.deadline, e.seq))
            .map(|(id, _)| id)?;
        let entry = self.entries.remove(id)?;
        Some((id, entry.kind, entry.deadline))
    }

    /// Cancel everything.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// The number of pending timers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no timers are pending.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Copy> Default for TimerQueue<K> {
    fn default() -> Self {
        Self::new()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
