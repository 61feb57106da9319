//! Generation-tagged deferred work.
//!
//! All post-transition cleanup runs through here instead of free-floating
//! timers. Every task carries the drawer generation it was scheduled
//! under; the generation bumps on each open/close, so a stale task from a
//! previous cycle drains as a no-op instead of mutating state for the
//! wrong cycle.

use tracing::trace;
use veldra_core::time::Millis;

/// Monotonic open/close cycle counter.
pub type Generation = u64;

/// Deferred actions a drawer schedules for itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Reset the active snap point to the first one after the close
    /// transition finishes.
    ResetActiveSnapPoint,
    /// Restore the body background after the background-scale transition.
    RestoreBackgroundColor,
    /// Re-enable position restoration after a non-modal close.
    RestorePositionSetting,
    /// Instantaneously reset a parent drawer's transform after a nested
    /// drawer finished closing.
    ResetParentTransform,
    /// Manually bring the focused input into view after the keyboard
    /// settled.
    ScrollFocusedIntoView,
}

#[derive(Debug, Clone, Copy)]
struct Scheduled {
    fire_at: Millis,
    generation: Generation,
    task: Task,
}

/// Single-threaded task queue drained from the host's event loop.
#[derive(Debug, Default)]
pub struct Scheduler {
    queue: Vec<Scheduled>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    pub fn schedule(&mut self, task: Task, delay: Millis, now: Millis, generation: Generation) {
        self.queue.push(Scheduled {
            fire_at: now + delay,
            generation,
            task,
        });
    }

    /// Remove every pending instance of a task, fired or not.
    pub fn cancel(&mut self, task: Task) {
        self.queue.retain(|scheduled| scheduled.task != task);
    }

    /// Pop all due tasks scheduled under the current generation. Due tasks
    /// from older generations are dropped.
    pub fn drain_due(&mut self, now: Millis, current: Generation) -> Vec<Task> {
        let mut due = Vec::new();
        self.queue.retain(|scheduled| {
            if scheduled.fire_at > now {
                return true;
            }
            if scheduled.generation == current {
                due.push(scheduled.task);
            } else {
                trace!(task = ?scheduled.task, "dropping stale scheduled task");
            }
            false
        });
        due
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
