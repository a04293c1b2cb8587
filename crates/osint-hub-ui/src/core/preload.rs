//! Deferred component imports ("preloading") and their trigger strategies.
//!
//! # Design
//! - A preload is an optimisation: the real navigation import pays full cost
//!   when a preload failed or never ran, so failures are discarded after being
//!   handed to the observer.
//! - Idle time is preferred; hosts without an idle facility use a short timer.
//! - Without a window global nothing is scheduled at all.
//! - There is no deduplication across requests; the module loader owns that.

use std::fmt;
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

use futures::future::LocalBoxFuture;
use osint_hub_telemetry::{Fault, SharedObserver, default_observer};

use crate::core::config::PreloadConfig;
use crate::core::error::ImportResult;
use crate::core::host::{Host, Task};

type LoadFn = dyn Fn() -> LocalBoxFuture<'static, ImportResult>;

/// Zero-argument import that asynchronously loads a UI module.
#[derive(Clone)]
pub struct ComponentImport {
    name: Rc<str>,
    load: Rc<LoadFn>,
}

impl ComponentImport {
    /// Wrap an async loader under a module name used in fault reports.
    pub fn new<F, Fut>(name: impl Into<String>, load: F) -> Self
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = ImportResult> + 'static,
    {
        let name: String = name.into();
        Self {
            name: Rc::from(name),
            load: Rc::new(move || Box::pin(load()) as LocalBoxFuture<'static, ImportResult>),
        }
    }

    /// Module name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Start the import.
    #[must_use]
    pub fn load(&self) -> LocalBoxFuture<'static, ImportResult> {
        (self.load)()
    }
}

impl PartialEq for ComponentImport {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.load, &other.load)
    }
}

impl fmt::Debug for ComponentImport {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ComponentImport")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Event handler that starts a preload each time it fires.
#[derive(Clone)]
pub struct PreloadTrigger {
    fire: Rc<dyn Fn()>,
}

impl PreloadTrigger {
    fn new(fire: impl Fn() + 'static) -> Self {
        Self {
            fire: Rc::new(fire),
        }
    }

    /// Run the trigger.
    pub fn fire(&self) {
        (self.fire)();
    }
}

impl PartialEq for PreloadTrigger {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.fire, &other.fire)
    }
}

impl fmt::Debug for PreloadTrigger {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("PreloadTrigger")
    }
}

/// Handlers for pointer-enter and keyboard-focus events.
#[derive(Clone, Debug, PartialEq)]
pub struct HoverBindings {
    /// Attach to the element's mouse-enter event.
    pub on_mouse_enter: PreloadTrigger,
    /// Attach to the element's focus event.
    pub on_focus: PreloadTrigger,
}

/// Schedules [`ComponentImport`]s against a [`Host`].
#[derive(Clone)]
pub struct Preloader<H> {
    host: H,
    config: PreloadConfig,
    observer: SharedObserver,
}

impl<H: fmt::Debug> fmt::Debug for Preloader<H> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Preloader")
            .field("host", &self.host)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<H: Host + Clone + 'static> Preloader<H> {
    /// Preloader with default timings and the tracing observer.
    #[must_use]
    pub fn new(host: H) -> Self {
        Self {
            host,
            config: PreloadConfig::default(),
            observer: default_observer(),
        }
    }

    /// Replace the timing configuration.
    #[must_use]
    pub fn with_config(mut self, config: PreloadConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the fault observer.
    #[must_use]
    pub fn with_observer(mut self, observer: SharedObserver) -> Self {
        self.observer = observer;
        self
    }

    /// Host used for scheduling.
    #[must_use]
    pub const fn host(&self) -> &H {
        &self.host
    }

    /// Schedule one invocation of `import` at idle time (or after the idle
    /// fallback timer). A no-op without a window.
    pub fn preload_component(&self, import: &ComponentImport) {
        if !self.host.has_window() {
            self.observer.observe(&Fault::EnvironmentAbsent {
                operation: "preload_component",
            });
            return;
        }
        let task = self.import_task(import);
        if self.host.supports_idle() {
            tracing::trace!(module = import.name(), "preload deferred to idle");
            self.host.schedule_idle(task);
        } else {
            tracing::trace!(
                module = import.name(),
                fallback_ms = self.config.idle_fallback_ms,
                "idle scheduling unavailable; using timer"
            );
            self.host.schedule_after(self.config.idle_fallback(), task);
        }
    }

    /// Bindings that preload `import` whenever the element is hovered or
    /// focused. Every firing schedules a fresh preload.
    #[must_use]
    pub fn on_hover(&self, import: &ComponentImport) -> HoverBindings {
        let preloader = self.clone();
        let import = import.clone();
        let trigger = PreloadTrigger::new(move || preloader.preload_component(&import));
        HoverBindings {
            on_mouse_enter: trigger.clone(),
            on_focus: trigger,
        }
    }

    /// Start preloading now, deferred to idle time.
    pub fn on_idle(&self, import: &ComponentImport) {
        self.preload_component(import);
    }

    /// Preload after `delay` (the configured default when `None`), then wait
    /// for idle time as [`Preloader::preload_component`] does.
    pub fn after_delay(&self, import: &ComponentImport, delay: Option<Duration>) {
        if !self.host.has_window() {
            self.observer.observe(&Fault::EnvironmentAbsent {
                operation: "after_delay",
            });
            return;
        }
        let delay = delay.unwrap_or_else(|| self.config.default_delay());
        let preloader = self.clone();
        let import = import.clone();
        self.host.schedule_after(
            delay,
            Box::new(move || preloader.preload_component(&import)),
        );
    }

    fn import_task(&self, import: &ComponentImport) -> Task {
        let host = self.host.clone();
        let observer = Rc::clone(&self.observer);
        let import = import.clone();
        Box::new(move || {
            let pending = import.load();
            host.spawn(Box::pin(async move {
                if let Err(err) = pending.await {
                    observer.observe(&Fault::Import {
                        module: import.name().to_string(),
                        detail: err.to_string(),
                    });
                }
            }));
        })
    }
}
