//! Virtual-time scheduler for delayed game mutations
//!
//! The host advances time explicitly, so delayed work (mismatch concealment,
//! hint concealment, the countdown) runs deterministically. Every task carries
//! the generation of the game that scheduled it; the game drops tasks from
//! older generations instead of applying them to a newer board.

use serde::{Deserialize, Serialize};

/// Delayed work the game schedules on itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Task {
    /// Turn a mismatched pair face down and unlock the board
    ConcealMismatch { first: usize, second: usize },
    /// Turn a hinted pair face down
    ConcealHint { first: usize, second: usize },
    /// One second of the countdown elapsed
    CountdownTick,
}

/// A task waiting for its due time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scheduled {
    pub due_ms: u64,
    pub generation: u64,
    pub task: Task,
    /// Insertion order, breaks ties between equal due times
    seq: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scheduler {
    now_ms: u64,
    next_seq: u64,
    pending: Vec<Scheduled>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn schedule(&mut self, delay_ms: u64, generation: u64, task: Task) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Scheduled {
            due_ms: self.now_ms + delay_ms,
            generation,
            task,
            seq,
        });
    }

    /// Drop every pending task matching `pred`
    pub fn cancel_where(&mut self, pred: impl Fn(&Task) -> bool) {
        self.pending.retain(|s| !pred(&s.task));
    }

    /// Remove the earliest task due at or before `until_ms`, moving the clock to its due time
    pub fn pop_due(&mut self, until_ms: u64) -> Option<Scheduled> {
        let (idx, _) = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, s)| s.due_ms <= until_ms)
            .min_by_key(|(_, s)| (s.due_ms, s.seq))?;
        let scheduled = self.pending.swap_remove(idx);
        self.now_ms = self.now_ms.max(scheduled.due_ms);
        Some(scheduled)
    }

    /// Move the clock forward once everything due has run
    pub fn settle(&mut self, until_ms: u64) {
        self.now_ms = self.now_ms.max(until_ms);
    }

    pub fn pending(&self) -> &[Scheduled] {
        &self.pending
    }

    /// Due time of the next task, if any
    pub fn next_due(&self) -> Option<u64> {
        self.pending.iter().map(|s| s.due_ms).min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop_in_due_order() {
        let mut sched = Scheduler::new();
        sched.schedule(1000, 1, Task::CountdownTick);
        sched.schedule(800, 1, Task::ConcealMismatch { first: 0, second: 1 });
        sched.schedule(800, 1, Task::ConcealHint { first: 2, second: 3 });

        assert!(sched.pop_due(500).is_none());
        assert_eq!(sched.now_ms(), 0);

        let first = sched.pop_due(1000).unwrap();
        assert_eq!(first.task, Task::ConcealMismatch { first: 0, second: 1 });
        assert_eq!(sched.now_ms(), 800);

        let second = sched.pop_due(1000).unwrap();
        assert_eq!(second.task, Task::ConcealHint { first: 2, second: 3 });

        let third = sched.pop_due(1000).unwrap();
        assert_eq!(third.task, Task::CountdownTick);
        assert_eq!(sched.now_ms(), 1000);
        assert!(sched.pop_due(1000).is_none());
    }

    #[test]
    fn test_delay_is_relative_to_now() {
        let mut sched = Scheduler::new();
        sched.settle(2500);
        sched.schedule(1000, 3, Task::CountdownTick);
        assert_eq!(sched.next_due(), Some(3500));
        assert_eq!(sched.pending()[0].generation, 3);
    }

    #[test]
    fn test_cancel_where() {
        let mut sched = Scheduler::new();
        sched.schedule(1000, 1, Task::CountdownTick);
        sched.schedule(800, 1, Task::ConcealMismatch { first: 0, second: 1 });
        sched.cancel_where(|t| matches!(t, Task::CountdownTick));
        assert_eq!(sched.pending().len(), 1);
        assert_eq!(sched.next_due(), Some(800));
    }
}
