use crate::future::{Async, SharedFuture};
use crate::reactor::Reactor;
use crate::task::Task;
use crate::waker::Waker;

use log::{debug, trace};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::rc::Rc;

/// Bounded FIFO of runnable tasks.
///
/// Capacity is fixed at creation; an enqueue beyond capacity is dropped.
/// Callers guarantee the number of simultaneously pending tasks never
/// exceeds the capacity they asked for.
#[derive(Debug)]
struct RunQueue {
    tasks: VecDeque<Task>,
    capacity: usize,
}

impl RunQueue {
    fn with_capacity(capacity: usize) -> RunQueue {
        RunQueue {
            tasks: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    fn push(&mut self, task: Task) {
        if task.is_queued() {
            trace!("task already queued; collapsing enqueue; task={:?}", task);
            return;
        }

        if self.tasks.len() == self.capacity {
            debug!("run queue full; dropping enqueue; task={:?}", task);
            return;
        }

        task.set_queued(true);
        self.tasks.push_back(task);
    }

    fn pop(&mut self) -> Option<Task> {
        let task = self.tasks.pop_front();

        if let Some(ref task) = task {
            task.set_queued(false);
        }

        task
    }
}

/// The single-threaded cooperative scheduler.
///
/// Owns the run queue and the [`Reactor`]. Spawned futures are driven to
/// settlement by [`run`](Executor::run); no thread is ever created, and all
/// polling, waking and reactor dispatch happens on the calling thread.
///
/// Dropping the executor releases the reactor and any tasks still queued;
/// drop only after `run` has returned.
#[derive(Debug)]
pub struct Executor {
    queue: Rc<RefCell<RunQueue>>,
    reactor: Reactor,
}

/// Cloneable spawner for an [`Executor`].
///
/// Usable both outside and during a `run` invocation, e.g. from inside a
/// future that wants to put additional work on the queue.
#[derive(Clone, Debug)]
pub struct Handle {
    queue: Rc<RefCell<RunQueue>>,
}

impl Executor {
    /// Create an executor whose run queue holds up to `capacity` tasks,
    /// owning a fresh reactor.
    pub fn new(capacity: usize) -> io::Result<Executor> {
        debug!("creating executor; capacity={}", capacity);

        Ok(Executor {
            queue: Rc::new(RefCell::new(RunQueue::with_capacity(capacity))),
            reactor: Reactor::new()?,
        })
    }

    /// Return a handle for spawning tasks onto this executor.
    pub fn handle(&self) -> Handle {
        Handle {
            queue: self.queue.clone(),
        }
    }

    /// Mark the future active and enqueue it; see [`Handle::spawn`].
    pub fn spawn(&self, future: SharedFuture) -> Task {
        self.handle().spawn(future)
    }

    /// The reactor owned by this executor.
    pub fn reactor(&mut self) -> &mut Reactor {
        &mut self.reactor
    }

    /// Drive spawned tasks until quiescence.
    ///
    /// Pops tasks in FIFO order and polls each with a fresh [`Waker`]. A
    /// task that settles captures its outcome and goes inactive; a task
    /// that returns [`Async::NotReady`] has, by contract, arranged its own
    /// resumption. When the queue drains and descriptor registrations
    /// remain, blocks in [`Reactor::poll`] until events re-enqueue tasks.
    ///
    /// Returns once the queue is empty and no registrations remain. A
    /// reactor poll failure is fatal and aborts the run with the error.
    pub fn run(&mut self) -> io::Result<()> {
        debug!("running executor");

        loop {
            loop {
                let task = self.queue.borrow_mut().pop();
                let task = match task {
                    Some(task) => task,
                    None => break,
                };

                // A stale wake-up can outlive settlement; never poll a
                // settled future again.
                if task.is_settled() {
                    trace!("skipping settled task; task={:?}", task);
                    continue;
                }

                let waker = Waker::new(self.handle(), task.clone());
                trace!("polling task; task={:?}", task);

                match task.poll(&mut self.reactor, &waker) {
                    Ok(Async::NotReady) => {
                        // The task registered a descriptor or handed its
                        // waker elsewhere; forget it until woken.
                    }
                    Ok(Async::Ready(value)) => {
                        debug!("task completed; task={:?}", task);
                        task.settle(Ok(value));
                    }
                    Err(code) => {
                        debug!("task failed; code={:?}; task={:?}", code, task);
                        task.settle(Err(code));
                    }
                }
            }

            if self.reactor.registered() == 0 {
                break;
            }

            self.reactor.poll()?;
        }

        debug!("executor quiescent");
        Ok(())
    }
}

impl Handle {
    /// Mark the future active and enqueue it at the tail of the run queue.
    ///
    /// If the queue is full the enqueue is a no-op and the task is never
    /// polled. Returns a [`Task`] handle for observing settlement.
    pub fn spawn(&self, future: SharedFuture) -> Task {
        let task = Task::new(future);

        debug!("spawning task; task={:?}", task);
        task.set_active(true);
        self.queue.borrow_mut().push(task.clone());

        task
    }

    pub(crate) fn enqueue(&self, task: Task) {
        trace!("waking task; task={:?}", task);
        self.queue.borrow_mut().push(task);
    }
}
