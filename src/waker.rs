use crate::executor::Handle;
use crate::task::Task;

use log::trace;
use std::fmt;

/// A capability to schedule one task on one executor.
///
/// Logically the pair (executor, task). The executor constructs a fresh
/// waker for every poll; futures that suspend hand a clone to the
/// [`Reactor`](crate::Reactor) or stash it wherever their eventual wake-up
/// comes from. Clones are cheap.
#[derive(Clone)]
pub struct Waker {
    handle: Handle,
    task: Task,
}

impl Waker {
    pub(crate) fn new(handle: Handle, task: Task) -> Waker {
        Waker { handle, task }
    }

    /// Re-enqueue the associated task at the tail of the run queue.
    ///
    /// Waking a settled task is a no-op: the executor never polls a future
    /// after it has settled. Waking a task that is already queued is also a
    /// no-op, so repeated readiness events collapse into one dispatch.
    pub fn wake(&self) {
        if !self.task.is_active() {
            trace!("wake of settled task ignored; task={:?}", self.task);
            return;
        }

        self.handle.enqueue(self.task.clone());
    }

    /// The task this waker schedules.
    pub fn task(&self) -> &Task {
        &self.task
    }
}

impl fmt::Debug for Waker {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("Waker").field("task", &self.task).finish()
    }
}
