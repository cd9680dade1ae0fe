//! Virtual-clock task scheduler for delayed transitions.
//!
//! The host owns real time and feeds elapsed time in through
//! `MatchEngine::advance`. Tasks fire in due order (ties in scheduling
//! order). Every task carries the `CancelToken` of the board it was
//! scheduled against; regenerating the board cancels the old token so
//! nothing stale fires against a fresh board.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Deferred engine transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Task {
    /// Judge the two face-up cards.
    Resolve,
    /// Move on to the next level.
    AdvanceLevel,
}

/// Ties a task to one board generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CancelToken(pub u64);

#[derive(Clone, Debug)]
struct ScheduledTask {
    due: Duration,
    seq: u64,
    task: Task,
    token: CancelToken,
}

/// Pending tasks ordered by due time.
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    now: Duration,
    next_seq: u64,
    pending: Vec<ScheduledTask>,
}

impl Scheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedule `task` to fire `delay` after now.
    pub fn schedule(&mut self, delay: Duration, task: Task, token: CancelToken) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(ScheduledTask {
            due: self.now.saturating_add(delay),
            seq,
            task,
            token,
        });
    }

    /// Drop every task carrying `token`. Returns how many were dropped.
    pub fn cancel(&mut self, token: CancelToken) -> usize {
        let before = self.pending.len();
        self.pending.retain(|t| t.token != token);
        before - self.pending.len()
    }

    /// Number of tasks waiting to fire.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Is a task of this kind waiting?
    #[must_use]
    pub fn is_pending(&self, task: Task) -> bool {
        self.pending.iter().any(|t| t.task == task)
    }

    /// Due time of the earliest task.
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        self.pending.iter().map(|t| t.due).min()
    }

    /// Remove and return the earliest task due at or before `deadline`.
    ///
    /// Moves the clock forward to that task's due time, so tasks scheduled
    /// while handling it are timed from when it fired.
    pub fn pop_due(&mut self, deadline: Duration) -> Option<(Task, CancelToken)> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= deadline)
            .min_by_key(|(_, t)| (t.due, t.seq))
            .map(|(i, _)| i)?;

        let task = self.pending.swap_remove(idx);
        self.now = self.now.max(task.due);
        Some((task.task, task.token))
    }

    /// Move the clock to `deadline` (never backwards).
    pub fn advance_to(&mut self, deadline: Duration) {
        self.now = self.now.max(deadline);
    }
}
