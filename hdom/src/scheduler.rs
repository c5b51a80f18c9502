//! Deterministic scheduler for animation frames and timers.
//!
//! Time is virtual: it only moves when the host calls [`Scheduler::advance`]
//! (or steps with [`Scheduler::next_due`]). Terminal hosts advance it by the
//! wall-clock time elapsed between polls; tests advance it explicitly.

use std::time::Duration;

use crate::listeners::OwnerId;

/// Delay between a frame request and its callback.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// Next animation frame.
    Frame,
    /// One-shot timer.
    Timer,
}

/// A task whose deadline has passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiredTask {
    pub id: TaskId,
    pub owner: OwnerId,
    pub kind: TaskKind,
    /// Scheduler time at which the task fired.
    pub at: Duration,
}

#[derive(Debug, Clone)]
struct Task {
    id: TaskId,
    owner: OwnerId,
    kind: TaskKind,
    due: Duration,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    now: Duration,
    next_id: u64,
    tasks: Vec<Task>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time since the scheduler was created.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Request a callback on the next animation frame.
    pub fn request_frame(&mut self, owner: OwnerId) -> TaskId {
        self.push(owner, TaskKind::Frame, FRAME_INTERVAL)
    }

    /// Request a callback once `delay` has elapsed.
    pub fn set_timeout(&mut self, owner: OwnerId, delay: Duration) -> TaskId {
        self.push(owner, TaskKind::Timer, delay)
    }

    fn push(&mut self, owner: OwnerId, kind: TaskKind, delay: Duration) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        let due = self.now + delay;
        log::trace!("[scheduler] {:?} {:?} for {} due at {:?}", kind, id, owner, due);
        self.tasks.push(Task { id, owner, kind, due });
        id
    }

    /// Cancel a pending task. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        before != self.tasks.len()
    }

    /// Cancel every task owned by `owner`.
    pub fn cancel_owner(&mut self, owner: OwnerId) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.owner != owner);
        before - self.tasks.len()
    }

    pub fn is_pending(&self, id: TaskId) -> bool {
        self.tasks.iter().any(|t| t.id == id)
    }

    pub fn pending_count(&self) -> usize {
        self.tasks.len()
    }

    /// Pop the earliest task due at or before `deadline`, moving the clock to
    /// its due time. Ties fire in scheduling order.
    pub fn next_due(&mut self, deadline: Duration) -> Option<FiredTask> {
        let pos = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= deadline)
            .min_by_key(|(_, t)| (t.due, t.id))
            .map(|(pos, _)| pos)?;

        let task = self.tasks.remove(pos);
        self.now = self.now.max(task.due);
        Some(FiredTask {
            id: task.id,
            owner: task.owner,
            kind: task.kind,
            at: self.now,
        })
    }

    /// Move the clock forward without firing anything. Never moves backwards.
    pub fn set_now(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }

    /// Advance the clock by `by` and return every task that became due, in
    /// firing order.
    pub fn advance(&mut self, by: Duration) -> Vec<FiredTask> {
        let deadline = self.now + by;
        let mut fired = Vec::new();
        while let Some(task) = self.next_due(deadline) {
            fired.push(task);
        }
        self.now = deadline;
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ties_fire_in_scheduling_order() {
        let owner = OwnerId::next();
        let mut scheduler = Scheduler::new();
        let a = scheduler.set_timeout(owner, Duration::from_millis(10));
        let b = scheduler.set_timeout(owner, Duration::from_millis(10));

        let fired: Vec<_> = scheduler
            .advance(Duration::from_millis(10))
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(fired, vec![a, b]);
    }

    #[test]
    fn test_next_due_moves_clock_to_due_time() {
        let owner = OwnerId::next();
        let mut scheduler = Scheduler::new();
        scheduler.set_timeout(owner, Duration::from_millis(50));

        let task = scheduler.next_due(Duration::from_millis(500)).unwrap();
        assert_eq!(task.at, Duration::from_millis(50));
        assert_eq!(scheduler.now(), Duration::from_millis(50));
    }
}
