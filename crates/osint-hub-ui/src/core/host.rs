//! Injected scheduling capability used by the preload and debounce helpers.
//!
//! # Design
//! - Hosts own every idle/timer registration so callers stay deterministic
//!   under test ([`ManualHost`]) and in the browser (`web::WebHost`).
//! - Everything is single-threaded: tasks and futures are `'static` but not
//!   `Send`.
//! - Handles are opaque; cancelling a fired or unknown handle is a no-op.

use std::time::Duration;

use futures::future::LocalBoxFuture;

mod manual;

pub use manual::ManualHost;

/// Opaque handle for a scheduled idle or timer task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

impl TaskHandle {
    /// Wrap a host-assigned identifier.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Host-assigned identifier.
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// Longest delay, in milliseconds, a browser timer honours. Larger values
/// overflow a signed 32-bit integer and fire immediately.
pub const MAX_BROWSER_TIMEOUT_MS: u32 = i32::MAX.unsigned_abs();

/// `delay` in whole milliseconds, clamped to [`MAX_BROWSER_TIMEOUT_MS`].
#[must_use]
pub fn browser_timeout_millis(delay: Duration) -> u32 {
    u32::try_from(delay.as_millis())
        .map_or(MAX_BROWSER_TIMEOUT_MS, |millis| millis.min(MAX_BROWSER_TIMEOUT_MS))
}

/// Zero-argument callback run at most once by a host.
pub type Task = Box<dyn FnOnce() + 'static>;

/// Idle, timer and task facilities provided by the environment.
pub trait Host {
    /// Whether a browser-like window global is present.
    fn has_window(&self) -> bool;

    /// Whether the host can defer work until it reports idle time.
    fn supports_idle(&self) -> bool;

    /// Run `task` once the host is idle.
    ///
    /// Hosts without idle support fall back to a zero-delay timer; callers that
    /// need a different fallback check [`Host::supports_idle`] first.
    fn schedule_idle(&self, task: Task) -> TaskHandle;

    /// Run `task` after `delay`. A zero delay still waits for the next timer
    /// turn and never runs synchronously.
    fn schedule_after(&self, delay: Duration, task: Task) -> TaskHandle;

    /// Drop a pending idle or timer task.
    fn cancel(&self, handle: TaskHandle);

    /// Drive a future to completion on the host's local executor.
    fn spawn(&self, future: LocalBoxFuture<'static, ()>);
}
