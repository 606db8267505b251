use std::collections::VecDeque;
use std::time::Duration;

use thiserror::Error;

pub const MAX_ALARMS: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AlarmError {
    #[error("all {capacity} alarm slots are in use")]
    CapacityExceeded { capacity: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmArm {
    Armed,
    AlreadyActive,
}

#[derive(Debug, Clone, Copy)]
struct AlarmSlot<K> {
    key: K,
    remaining: Duration,
}

/// One-shot countdown timers keyed by a game-defined enum. Each key can be
/// armed at most once at a time. Expired keys wait in a due queue, in arming
/// order, until the driver takes them one by one with [`next_due`].
///
/// [`next_due`]: AlarmScheduler::next_due
#[derive(Debug)]
pub struct AlarmScheduler<K> {
    capacity: usize,
    slots: Vec<AlarmSlot<K>>,
    due: VecDeque<K>,
}

impl<K: Copy + Eq> Default for AlarmScheduler<K> {
    fn default() -> Self {
        Self::with_capacity(MAX_ALARMS)
    }
}

impl<K: Copy + Eq> AlarmScheduler<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            slots: Vec::with_capacity(capacity),
            due: VecDeque::new(),
        }
    }

    /// Arms `key`. Arming an already-active key leaves its countdown alone.
    /// Arming a key that expired but has not been dispatched yet replaces the
    /// pending firing with the new countdown.
    pub fn set(&mut self, key: K, duration: Duration) -> Result<AlarmArm, AlarmError> {
        if self.is_active(key) {
            return Ok(AlarmArm::AlreadyActive);
        }
        if self.slots.len() >= self.capacity {
            return Err(AlarmError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        self.due.retain(|due| *due != key);
        self.slots.push(AlarmSlot {
            key,
            remaining: duration,
        });
        Ok(AlarmArm::Armed)
    }

    pub fn set_seconds(&mut self, key: K, seconds: f32) -> Result<AlarmArm, AlarmError> {
        let seconds = if seconds.is_finite() {
            seconds.clamp(0.0, u32::MAX as f32)
        } else {
            0.0
        };
        self.set(key, Duration::from_secs_f32(seconds))
    }

    pub fn is_active(&self, key: K) -> bool {
        self.slots.iter().any(|slot| slot.key == key)
    }

    pub fn remaining(&self, key: K) -> Option<Duration> {
        self.slots
            .iter()
            .find(|slot| slot.key == key)
            .map(|slot| slot.remaining)
    }

    /// Disarms `key` without firing, including an expiry still waiting in
    /// the due queue.
    pub fn cancel(&mut self, key: K) -> bool {
        let before = self.slots.len() + self.due.len();
        self.slots.retain(|slot| slot.key != key);
        self.due.retain(|due| *due != key);
        self.slots.len() + self.due.len() != before
    }

    pub fn cancel_all(&mut self) -> usize {
        let cancelled = self.slots.len() + self.due.len();
        self.slots.clear();
        self.due.clear();
        cancelled
    }

    pub fn active_count(&self) -> usize {
        self.slots.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Counts every alarm down by `elapsed` and moves the expired ones to the
    /// due queue. Returns how many expired.
    pub fn tick(&mut self, elapsed: Duration) -> usize {
        let due = &mut self.due;
        let before = due.len();
        self.slots.retain_mut(|slot| {
            slot.remaining = slot.remaining.saturating_sub(elapsed);
            if slot.remaining.is_zero() {
                due.push_back(slot.key);
                false
            } else {
                true
            }
        });
        due.len() - before
    }

    /// Takes the oldest expired key. The key is retired first, so its handler
    /// may re-arm it.
    pub fn next_due(&mut self) -> Option<K> {
        self.due.pop_front()
    }

    pub fn due_count(&self) -> usize {
        self.due.len()
    }
}
