//! Trailing-edge debounce over a [`Host`] timer.
//!
//! # Design
//! - Each call cancels the pending timer and schedules a new one; only the
//!   last arguments reach the callback.
//! - Clones share one timer. Separate [`debounce`] calls never interact.
//! - A scheduled call keeps the shared state alive, so it still fires after
//!   every handle is dropped. Only [`Debounced::cancel`] withdraws it.
//! - The callback can be swapped without touching the pending call, which lets
//!   a component keep one debouncer across renders.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use crate::core::host::{Host, TaskHandle};

struct Shared<A, H: Host> {
    host: H,
    wait: Duration,
    callback: RefCell<Rc<dyn Fn(A)>>,
    pending: Cell<Option<TaskHandle>>,
}

/// Debounced wrapper around a callback; see [`debounce`].
pub struct Debounced<A, H: Host> {
    shared: Rc<Shared<A, H>>,
}

impl<A, H: Host> Clone for Debounced<A, H> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<A, H: Host> fmt::Debug for Debounced<A, H> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Debounced")
            .field("wait", &self.shared.wait)
            .field("pending", &self.shared.pending.get())
            .finish()
    }
}

/// Wrap `callback` so bursts of calls collapse into one trailing call made
/// `wait` after the last of them.
pub fn debounce<A, H, F>(host: H, wait: Duration, callback: F) -> Debounced<A, H>
where
    A: 'static,
    H: Host + 'static,
    F: Fn(A) + 'static,
{
    let callback: Rc<dyn Fn(A)> = Rc::new(callback);
    Debounced {
        shared: Rc::new(Shared {
            host,
            wait,
            callback: RefCell::new(callback),
            pending: Cell::new(None),
        }),
    }
}

impl<A: 'static, H: Host + 'static> Debounced<A, H> {
    /// Restart the quiet period with `args` as the pending arguments.
    pub fn call(&self, args: A) {
        self.cancel();
        let shared = Rc::clone(&self.shared);
        let handle = self.shared.host.schedule_after(
            self.shared.wait,
            Box::new(move || {
                shared.pending.set(None);
                let callback = shared.callback.borrow().clone();
                callback(args);
            }),
        );
        self.shared.pending.set(Some(handle));
    }

    /// Replace the callback. A pending call is kept and will reach the new
    /// callback.
    pub fn set_callback<F: Fn(A) + 'static>(&self, callback: F) {
        let callback: Rc<dyn Fn(A)> = Rc::new(callback);
        *self.shared.callback.borrow_mut() = callback;
    }

    /// Drop the pending call, if any.
    pub fn cancel(&self) {
        if let Some(handle) = self.shared.pending.take() {
            self.shared.host.cancel(handle);
        }
    }

    /// Whether a trailing call is scheduled.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.shared.pending.get().is_some()
    }

    /// Quiet period length.
    #[must_use]
    pub fn wait(&self) -> Duration {
        self.shared.wait
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::host::ManualHost;

    type Calls = Rc<RefCell<Vec<String>>>;

    fn recording(host: &ManualHost, wait_ms: u64) -> (Debounced<String, ManualHost>, Calls) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        let wait = Duration::from_millis(wait_ms);
        let debounced = debounce(host.clone(), wait, move |query: String| {
            sink.borrow_mut().push(query);
        });
        (debounced, calls)
    }

    #[test]
    fn burst_collapses_into_last_call() {
        let host = ManualHost::new();
        let (debounced, calls) = recording(&host, 100);

        for query in ["w", "wh", "who", "whoi", "whois"] {
            debounced.call(query.to_string());
            host.advance(Duration::from_millis(50));
        }
        assert!(calls.borrow().is_empty());
        assert!(debounced.is_pending());

        host.advance(Duration::from_millis(50));
        assert_eq!(*calls.borrow(), vec!["whois".to_string()]);
        assert!(!debounced.is_pending());

        host.advance(Duration::from_secs(1));
        assert_eq!(calls.borrow().len(), 1);
    }

    #[test]
    fn separate_quiet_periods_each_fire() {
        let host = ManualHost::new();
        let (debounced, calls) = recording(&host, 100);

        debounced.call("first".to_string());
        host.advance(Duration::from_millis(150));
        debounced.call("second".to_string());
        host.advance(Duration::from_millis(150));

        assert_eq!(*calls.borrow(), vec!["first".to_string(), "second".to_string()]);
    }

    #[test]
    fn zero_wait_is_deferred_not_synchronous() {
        let host = ManualHost::new();
        let (debounced, calls) = recording(&host, 0);

        debounced.call("now".to_string());
        assert!(calls.borrow().is_empty());

        host.advance(Duration::ZERO);
        assert_eq!(*calls.borrow(), vec!["now".to_string()]);
    }

    #[test]
    fn instances_from_same_callback_are_independent() {
        let host = ManualHost::new();
        let calls = Rc::new(RefCell::new(Vec::new()));
        let make = |label: &'static str| {
            let sink = Rc::clone(&calls);
            debounce(host.clone(), Duration::from_millis(100), move |value: u32| {
                sink.borrow_mut().push((label, value));
            })
        };
        let left = make("left");
        let right = make("right");

        left.call(1);
        host.advance(Duration::from_millis(60));
        right.call(2);
        left.call(3);
        host.advance(Duration::from_millis(100));

        assert_eq!(*calls.borrow(), vec![("right", 2), ("left", 3)]);
    }

    #[test]
    fn clones_share_the_pending_call() {
        let host = ManualHost::new();
        let (debounced, calls) = recording(&host, 100);
        let clone = debounced.clone();

        debounced.call("from-original".to_string());
        clone.call("from-clone".to_string());
        host.advance(Duration::from_millis(100));

        assert_eq!(*calls.borrow(), vec!["from-clone".to_string()]);
    }

    #[test]
    fn cancel_discards_pending_call() {
        let host = ManualHost::new();
        let (debounced, calls) = recording(&host, 100);

        debounced.call("cancelled".to_string());
        debounced.cancel();
        assert_eq!(host.pending_timers(), 0);
        host.advance(Duration::from_millis(200));
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn pending_call_outlives_dropped_handle() {
        let host = ManualHost::new();
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        debounce(host.clone(), Duration::from_millis(100), move |query: String| {
            sink.borrow_mut().push(query);
        })
        .call("whois".to_string());

        host.advance(Duration::from_millis(200));
        assert_eq!(*calls.borrow(), vec!["whois".to_string()]);

        let (debounced, calls) = recording(&host, 100);
        debounced.call("dropped".to_string());
        drop(debounced);
        host.advance(Duration::from_millis(100));
        assert_eq!(*calls.borrow(), vec!["dropped".to_string()]);
        assert_eq!(host.pending_timers(), 0);
    }

    #[test]
    fn replaced_callback_receives_pending_call() {
        let host = ManualHost::new();
        let (debounced, first) = recording(&host, 250);
        let second = Rc::new(RefCell::new(Vec::new()));

        debounced.call("abcd".to_string());
        host.advance(Duration::from_millis(100));
        let sink = Rc::clone(&second);
        debounced.set_callback(move |query: String| sink.borrow_mut().push(query));
        assert!(debounced.is_pending());

        host.advance(Duration::from_millis(150));
        assert!(first.borrow().is_empty());
        assert_eq!(*second.borrow(), vec!["abcd".to_string()]);
    }
}
