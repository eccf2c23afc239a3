//! Cancellable delayed tasks on a logical millisecond clock.
//!
//! Every simulated backend delay (login, uploads, biometric capture,
//! validation stages, chat replies) is a task here. Tasks carry the screen
//! that owns them so the router can drop them when that screen is left.

use crate::screen::Screen;

#[derive(Debug, Clone)]
struct ScheduledTask<T> {
    seq: u64,
    due_ms: u64,
    owner: Screen,
    payload: T,
}

/// Pending-task queue keyed by due time.
///
/// Tasks with the same due time fire in the order they were scheduled.
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    tasks: Vec<ScheduledTask<T>>,
    next_seq: u64,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_seq: 0,
        }
    }

    /// Queue `payload` to fire `delay_ms` after `now_ms`.
    pub fn schedule(&mut self, now_ms: u64, delay_ms: u64, owner: Screen, payload: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.tasks.push(ScheduledTask {
            seq,
            due_ms: now_ms.saturating_add(delay_ms),
            owner,
            payload,
        });
    }

    /// Drop every task owned by `owner`, returning how many were removed.
    pub fn cancel_owned_by(&mut self, owner: Screen) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.owner != owner);
        before - self.tasks.len()
    }

    /// Remove and return the earliest task due at or before `now_ms`,
    /// together with its due time.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<(u64, T)> {
        let idx = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= now_ms)
            .min_by_key(|(_, t)| (t.due_ms, t.seq))
            .map(|(i, _)| i)?;
        let task = self.tasks.remove(idx);
        Some((task.due_ms, task.payload))
    }

    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    pub fn pending_for(&self, owner: Screen) -> usize {
        self.tasks.iter().filter(|t| t.owner == owner).count()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_fires_before_due() {
        let mut s = Scheduler::new();
        s.schedule(0, 1000, Screen::Login, "a");
        assert_eq!(s.pop_due(999), None);
        assert_eq!(s.pop_due(1000), Some((1000, "a")));
        assert!(s.is_empty());
    }

    #[test]
    fn fires_in_due_then_insertion_order() {
        let mut s = Scheduler::new();
        s.schedule(0, 500, Screen::Chat, "late");
        s.schedule(0, 100, Screen::Chat, "first");
        s.schedule(0, 100, Screen::Chat, "second");

        assert_eq!(s.pop_due(1000), Some((100, "first")));
        assert_eq!(s.pop_due(1000), Some((100, "second")));
        assert_eq!(s.pop_due(1000), Some((500, "late")));
        assert_eq!(s.pop_due(1000), None);
    }

    #[test]
    fn cancel_by_owner_leaves_other_screens() {
        let mut s = Scheduler::new();
        s.schedule(0, 10, Screen::Validation, 1);
        s.schedule(0, 20, Screen::Validation, 2);
        s.schedule(0, 30, Screen::Chat, 3);

        assert_eq!(s.cancel_owned_by(Screen::Validation), 2);
        assert_eq!(s.pending(), 1);
        assert_eq!(s.pending_for(Screen::Chat), 1);
        assert_eq!(s.pop_due(25), None);
        assert_eq!(s.pop_due(100), Some((30, 3)));
    }
}
