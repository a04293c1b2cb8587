//! Deterministic host with a virtual clock.
//!
//! Timers fire only when [`ManualHost::advance`] moves the clock past their
//! deadline, idle tasks only on [`ManualHost::run_idle`], and spawned futures
//! are polled on a `futures` [`LocalPool`] after each of those steps.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::mem;
use std::rc::Rc;
use std::time::Duration;

use futures::executor::{LocalPool, LocalSpawner};
use futures::future::LocalBoxFuture;
use futures::task::LocalSpawnExt;

use super::{Host, Task, TaskHandle};

struct Timer {
    handle: TaskHandle,
    due: Duration,
    task: Task,
}

struct ManualHostInner {
    window: bool,
    idle: bool,
    now: Cell<Duration>,
    next_id: Cell<u64>,
    timers: RefCell<Vec<Timer>>,
    idle_queue: RefCell<VecDeque<(TaskHandle, Task)>>,
    pool: RefCell<LocalPool>,
    spawner: LocalSpawner,
}

/// Host whose clock and idle periods are driven explicitly by the caller.
#[derive(Clone)]
pub struct ManualHost {
    inner: Rc<ManualHostInner>,
}

impl Default for ManualHost {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualHost {
    /// Browser-like host with idle support.
    #[must_use]
    pub fn new() -> Self {
        Self::with_facilities(true, true)
    }

    /// Browser-like host without idle support (timer fallback applies).
    #[must_use]
    pub fn without_idle() -> Self {
        Self::with_facilities(true, false)
    }

    /// Host with no window global, as in a server-side or test runtime.
    #[must_use]
    pub fn headless() -> Self {
        Self::with_facilities(false, false)
    }

    fn with_facilities(window: bool, idle: bool) -> Self {
        let pool = LocalPool::new();
        let spawner = pool.spawner();
        Self {
            inner: Rc::new(ManualHostInner {
                window,
                idle,
                now: Cell::new(Duration::ZERO),
                next_id: Cell::new(0),
                timers: RefCell::new(Vec::new()),
                idle_queue: RefCell::new(VecDeque::new()),
                pool: RefCell::new(pool),
                spawner,
            }),
        }
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.inner.now.get()
    }

    /// Number of timers waiting for their deadline.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.inner.timers.borrow().len()
    }

    /// Number of tasks waiting for idle time.
    #[must_use]
    pub fn pending_idle(&self) -> usize {
        self.inner.idle_queue.borrow().len()
    }

    /// Move the clock forward by `by`, firing due timers in deadline order.
    ///
    /// Timers scheduled by fired tasks run in the same call when their deadline
    /// falls inside the window.
    pub fn advance(&self, by: Duration) {
        let target = self.now() + by;
        self.run_until_stalled();
        while let Some(timer) = self.take_next_due(target) {
            self.inner.now.set(timer.due);
            (timer.task)();
            self.run_until_stalled();
        }
        self.inner.now.set(target);
    }

    /// Run every task queued for idle time when the call starts.
    ///
    /// Returns the number of tasks run.
    pub fn run_idle(&self) -> usize {
        let batch = mem::take(&mut *self.inner.idle_queue.borrow_mut());
        let count = batch.len();
        for (_, task) in batch {
            task();
            self.run_until_stalled();
        }
        count
    }

    /// Poll spawned futures until none can make progress.
    pub fn run_until_stalled(&self) {
        self.inner.pool.borrow_mut().run_until_stalled();
    }

    fn next_handle(&self) -> TaskHandle {
        let id = self.inner.next_id.get() + 1;
        self.inner.next_id.set(id);
        TaskHandle::new(id)
    }

    fn take_next_due(&self, target: Duration) -> Option<Timer> {
        let mut timers = self.inner.timers.borrow_mut();
        let index = timers
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.due <= target)
            .min_by_key(|(_, timer)| (timer.due, timer.handle))
            .map(|(index, _)| index)?;
        Some(timers.remove(index))
    }
}

impl Host for ManualHost {
    fn has_window(&self) -> bool {
        self.inner.window
    }

    fn supports_idle(&self) -> bool {
        self.inner.idle
    }

    fn schedule_idle(&self, task: Task) -> TaskHandle {
        if !self.inner.idle {
            return self.schedule_after(Duration::ZERO, task);
        }
        let handle = self.next_handle();
        self.inner.idle_queue.borrow_mut().push_back((handle, task));
        handle
    }

    fn schedule_after(&self, delay: Duration, task: Task) -> TaskHandle {
        let handle = self.next_handle();
        let due = self.now() + delay;
        self.inner
            .timers
            .borrow_mut()
            .push(Timer { handle, due, task });
        handle
    }

    fn cancel(&self, handle: TaskHandle) {
        self.inner
            .timers
            .borrow_mut()
            .retain(|timer| timer.handle != handle);
        self.inner
            .idle_queue
            .borrow_mut()
            .retain(|(queued, _)| *queued != handle);
    }

    fn spawn(&self, future: LocalBoxFuture<'static, ()>) {
        if let Err(err) = self.inner.spawner.spawn_local(future) {
            tracing::debug!(error = %err, "manual host executor shut down; dropping future");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, impl Fn(&'static str) -> Task) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let make = move |label: &'static str| -> Task {
            let sink = Rc::clone(&sink);
            Box::new(move || sink.borrow_mut().push(label))
        };
        (log, make)
    }

    #[test]
    fn timers_fire_in_deadline_order() {
        let host = ManualHost::new();
        let (log, task) = recorder();
        host.schedule_after(Duration::from_millis(30), task("late"));
        host.schedule_after(Duration::from_millis(10), task("early"));
        host.schedule_after(Duration::from_millis(10), task("early-second"));

        host.advance(Duration::from_millis(9));
        assert!(log.borrow().is_empty());

        host.advance(Duration::from_millis(25));
        assert_eq!(*log.borrow(), vec!["early", "early-second", "late"]);
        assert_eq!(host.now(), Duration::from_millis(34));
        assert_eq!(host.pending_timers(), 0);
    }

    #[test]
    fn zero_delay_waits_for_next_turn() {
        let host = ManualHost::new();
        let (log, task) = recorder();
        host.schedule_after(Duration::ZERO, task("tick"));
        assert!(log.borrow().is_empty());

        host.advance(Duration::ZERO);
        assert_eq!(*log.borrow(), vec!["tick"]);
    }

    #[test]
    fn cancel_removes_timers_and_idle_tasks() {
        let host = ManualHost::new();
        let (log, task) = recorder();
        let timer = host.schedule_after(Duration::from_millis(5), task("timer"));
        let idle = host.schedule_idle(task("idle"));
        host.cancel(timer);
        host.cancel(idle);
        host.cancel(TaskHandle::new(999));

        host.advance(Duration::from_millis(10));
        assert_eq!(host.run_idle(), 0);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn idle_tasks_queued_while_idle_wait_for_next_period() {
        let host = ManualHost::new();
        let (log, task) = recorder();
        let nested_host = host.clone();
        let nested = task("nested");
        host.schedule_idle(Box::new(move || {
            nested_host.schedule_idle(nested);
        }));

        assert_eq!(host.run_idle(), 1);
        assert!(log.borrow().is_empty());
        assert_eq!(host.pending_idle(), 1);
        assert_eq!(host.run_idle(), 1);
        assert_eq!(*log.borrow(), vec!["nested"]);
    }

    #[test]
    fn idle_without_support_becomes_zero_delay_timer() {
        let host = ManualHost::without_idle();
        let (log, task) = recorder();
        host.schedule_idle(task("fallback"));
        assert_eq!(host.pending_idle(), 0);
        assert_eq!(host.pending_timers(), 1);

        host.advance(Duration::ZERO);
        assert_eq!(*log.borrow(), vec!["fallback"]);
    }

    #[test]
    fn spawned_futures_run_when_host_is_driven() {
        let host = ManualHost::headless();
        let done = Rc::new(Cell::new(false));
        let flag = Rc::clone(&done);
        host.spawn(Box::pin(async move { flag.set(true) }));
        assert!(!done.get());

        host.run_until_stalled();
        assert!(done.get());
        assert!(!host.has_window());
    }
}
