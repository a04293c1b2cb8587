//! Browser bindings for the core capabilities.
//!
//! # Design
//! - [`WebHost`] keeps every pending callback alive in a registry until it fires
//!   or is cancelled; fired entries are pruned on the next registry access so a
//!   callback never drops itself mid-call.
//! - [`BrowserStore`] maps `localStorage` exceptions onto [`StoreError`].
//! - Nothing here panics when a global is missing; callers see the absence
//!   through [`Host::has_window`] or [`StoreError::Unavailable`].

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use std::time::Duration;

use futures::future::LocalBoxFuture;
use gloo::storage::{LocalStorage, Storage as _};
use gloo_net::http::Request;
use gloo_timers::callback::Timeout;
use js_sys::{Function, Reflect};
use osint_hub_telemetry::{Fault, FaultObserver};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

use crate::core::error::{ImportError, StoreError, StoreResult};
use crate::core::host::{Host, Task, TaskHandle, browser_timeout_millis};
use crate::core::preload::ComponentImport;
use crate::core::storage::KeyValueStore;

const REQUEST_IDLE: &str = "requestIdleCallback";
const CANCEL_IDLE: &str = "cancelIdleCallback";

enum Registration {
    Timer(Timeout),
    Idle {
        id: JsValue,
        _callback: Closure<dyn FnMut()>,
    },
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    live: HashMap<u64, Registration>,
    fired: Vec<u64>,
}

impl Registry {
    fn prune(&mut self) {
        for id in std::mem::take(&mut self.fired) {
            self.live.remove(&id);
        }
    }

    fn allocate(&mut self) -> u64 {
        self.prune();
        self.next_id += 1;
        self.next_id
    }
}

/// [`Host`] backed by `window` timers and `requestIdleCallback`.
#[derive(Clone, Default)]
pub struct WebHost {
    registry: Rc<RefCell<Registry>>,
}

impl WebHost {
    /// Host bound to the current global scope.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn firing(&self, id: u64, task: Task) -> impl FnOnce() + 'static {
        let registry: Weak<RefCell<Registry>> = Rc::downgrade(&self.registry);
        move || {
            if let Some(registry) = registry.upgrade() {
                registry.borrow_mut().fired.push(id);
            }
            task();
        }
    }
}

fn window_function(name: &str) -> Option<(web_sys::Window, Function)> {
    let window = web_sys::window()?;
    let function = Reflect::get(&window, &JsValue::from_str(name))
        .ok()?
        .dyn_into::<Function>()
        .ok()?;
    Some((window, function))
}

impl Host for WebHost {
    fn has_window(&self) -> bool {
        web_sys::window().is_some()
    }

    fn supports_idle(&self) -> bool {
        window_function(REQUEST_IDLE).is_some()
    }

    fn schedule_idle(&self, task: Task) -> TaskHandle {
        let Some((window, request)) = window_function(REQUEST_IDLE) else {
            return self.schedule_after(Duration::ZERO, task);
        };
        let id = self.registry.borrow_mut().allocate();
        let slot: Rc<RefCell<Option<Task>>> = Rc::new(RefCell::new(Some(task)));
        let pending = Rc::clone(&slot);
        let callback: Closure<dyn FnMut()> = Closure::once(self.firing(
            id,
            Box::new(move || {
                let task = pending.borrow_mut().take();
                if let Some(task) = task {
                    task();
                }
            }),
        ));
        match request.call1(&window, callback.as_ref()) {
            Ok(idle_id) => {
                self.registry.borrow_mut().live.insert(
                    id,
                    Registration::Idle {
                        id: idle_id,
                        _callback: callback,
                    },
                );
                TaskHandle::new(id)
            }
            Err(err) => {
                tracing::debug!(error = ?err, "requestIdleCallback failed; using timer");
                let task = slot.borrow_mut().take();
                task.map_or(TaskHandle::new(id), |task| {
                    self.schedule_after(Duration::ZERO, task)
                })
            }
        }
    }

    fn schedule_after(&self, delay: Duration, task: Task) -> TaskHandle {
        let id = self.registry.borrow_mut().allocate();
        let timeout = Timeout::new(browser_timeout_millis(delay), self.firing(id, task));
        self.registry
            .borrow_mut()
            .live
            .insert(id, Registration::Timer(timeout));
        TaskHandle::new(id)
    }

    fn cancel(&self, handle: TaskHandle) {
        let removed = {
            let mut registry = self.registry.borrow_mut();
            registry.prune();
            registry.live.remove(&handle.id())
        };
        match removed {
            Some(Registration::Timer(timeout)) => drop(timeout),
            Some(Registration::Idle { id, .. }) => {
                if let Some((window, cancel)) = window_function(CANCEL_IDLE)
                    && let Err(err) = cancel.call1(&window, &id)
                {
                    tracing::debug!(error = ?err, "cancelIdleCallback failed");
                }
            }
            None => {}
        }
    }

    fn spawn(&self, future: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(future);
    }
}

/// [`KeyValueStore`] over `window.localStorage`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStore;

impl BrowserStore {
    /// `LocalStorage::raw` throws when storage is missing or blocked, so
    /// availability is checked first.
    fn storage() -> StoreResult<web_sys::Storage> {
        let available = web_sys::window()
            .and_then(|window| window.local_storage().ok().flatten())
            .is_some();
        if available {
            Ok(LocalStorage::raw())
        } else {
            Err(StoreError::Unavailable)
        }
    }
}

impl KeyValueStore for BrowserStore {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        Self::storage()?
            .get_item(key)
            .map_err(|err| backend_error(&err))
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        Self::storage()?.set_item(key, value).map_err(|err| {
            if is_quota_error(&err) {
                StoreError::QuotaExceeded {
                    key: key.to_string(),
                    required: key.len() + value.len(),
                    capacity: None,
                }
            } else {
                backend_error(&err)
            }
        })
    }

    fn remove_item(&self, key: &str) -> StoreResult<()> {
        Self::storage()?
            .remove_item(key)
            .map_err(|err| backend_error(&err))
    }
}

fn is_quota_error(err: &JsValue) -> bool {
    err.dyn_ref::<web_sys::DomException>()
        .is_some_and(|exception| exception.name() == "QuotaExceededError")
}

fn backend_error(err: &JsValue) -> StoreError {
    let detail = err
        .dyn_ref::<web_sys::DomException>()
        .map_or_else(|| format!("{err:?}"), |exception| exception.message());
    StoreError::Backend { detail }
}

/// Observer that mirrors swallowed faults to the browser console.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleObserver;

impl FaultObserver for ConsoleObserver {
    fn observe(&self, fault: &Fault) {
        let payload =
            serde_json::to_string(fault).unwrap_or_else(|_| fault.kind().to_string());
        gloo::console::debug!("osint-hub fault", payload);
    }
}

/// Import that warms a lazily-loaded chunk by fetching `url`.
#[must_use]
pub fn prefetch_import(name: &str, url: &'static str) -> ComponentImport {
    let module = name.to_string();
    ComponentImport::new(name, move || {
        let module = module.clone();
        async move {
            let response = Request::get(url)
                .send()
                .await
                .map_err(|err| ImportError::Fetch {
                    module: module.clone(),
                    detail: err.to_string(),
                })?;
            if response.ok() {
                Ok(())
            } else {
                Err(ImportError::Status {
                    module,
                    status: response.status(),
                })
            }
        }
    })
}
