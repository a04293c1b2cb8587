//! Fault records and the observer hook used by failure-swallowing helpers.
//!
//! # Design
//! - Helpers never propagate store or import faults; they hand a [`Fault`]
//!   to a [`FaultObserver`] instead and carry on.
//! - Observers must not panic. The default observer only emits a `tracing`
//!   event, which is free when no subscriber is installed.

use std::fmt;
use std::rc::Rc;

use serde::Serialize;

/// Storage operation that produced a fault.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreOperation {
    /// Reading and decoding an entry.
    Get,
    /// Encoding and writing an entry.
    Set,
    /// Deleting an entry.
    Remove,
}

impl StoreOperation {
    /// Stable label used in logs and metric labels.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Set => "set",
            Self::Remove => "remove",
        }
    }
}

impl fmt::Display for StoreOperation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// A failure that was recovered locally instead of surfacing to the caller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Fault {
    /// The persistent key-value store rejected or corrupted an operation.
    Store {
        /// Operation that failed.
        operation: StoreOperation,
        /// Key involved in the operation.
        key: String,
        /// Human-readable failure detail.
        detail: String,
    },
    /// A deferred module import failed and was discarded.
    Import {
        /// Name of the module being warmed.
        module: String,
        /// Human-readable failure detail.
        detail: String,
    },
    /// A browser global was missing so the operation was skipped.
    EnvironmentAbsent {
        /// Operation that was skipped.
        operation: &'static str,
    },
}

impl Fault {
    /// Fault category label (`store`, `import`, `environment_absent`).
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Store { .. } => "store",
            Self::Import { .. } => "import",
            Self::EnvironmentAbsent { .. } => "environment_absent",
        }
    }

    /// Operation label used alongside [`Fault::kind`] in metrics.
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::Store { operation, .. } => operation.as_str(),
            Self::Import { .. } => "import",
            Self::EnvironmentAbsent { operation } => operation,
        }
    }
}

/// Receives faults that helpers swallowed on the caller's behalf.
pub trait FaultObserver {
    /// Record a swallowed fault.
    fn observe(&self, fault: &Fault);
}

impl<F> FaultObserver for F
where
    F: Fn(&Fault),
{
    fn observe(&self, fault: &Fault) {
        self(fault);
    }
}

/// Reference-counted observer handle shared by single-threaded helpers.
pub type SharedObserver = Rc<dyn FaultObserver>;

/// Observer that emits a debug-level `tracing` event per fault.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl FaultObserver for TracingObserver {
    fn observe(&self, fault: &Fault) {
        match fault {
            Fault::Store {
                operation,
                key,
                detail,
            } => {
                tracing::debug!(
                    %operation,
                    key = %key,
                    detail = %detail,
                    "storage fault swallowed"
                );
            }
            Fault::Import { module, detail } => {
                tracing::debug!(module = %module, detail = %detail, "preload failed; ignoring");
            }
            Fault::EnvironmentAbsent { operation } => {
                tracing::trace!(operation, "no browser environment; skipping");
            }
        }
    }
}

/// Observer that discards every fault.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl FaultObserver for NoopObserver {
    fn observe(&self, _fault: &Fault) {}
}

/// Observer installed when the caller does not provide one.
#[must_use]
pub fn default_observer() -> SharedObserver {
    Rc::new(TracingObserver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn store_fault() -> Fault {
        Fault::Store {
            operation: StoreOperation::Set,
            key: "osint-hub-theme".to_string(),
            detail: "quota exceeded".to_string(),
        }
    }

    #[test]
    fn closures_act_as_observers() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let observer: SharedObserver = Rc::new(move |fault: &Fault| {
            sink.borrow_mut().push(fault.kind());
        });

        observer.observe(&store_fault());
        observer.observe(&Fault::EnvironmentAbsent {
            operation: "preload_component",
        });

        assert_eq!(*seen.borrow(), vec!["store", "environment_absent"]);
    }

    #[test]
    fn fault_labels_are_stable() {
        assert_eq!(store_fault().operation(), "set");
        let import = Fault::Import {
            module: "ExportTools".to_string(),
            detail: "network".to_string(),
        };
        assert_eq!(import.kind(), "import");
        assert_eq!(import.operation(), "import");
    }

    #[test]
    fn faults_serialize_with_kind_tag() {
        let value = serde_json::to_value(store_fault()).expect("serialize fault");
        assert_eq!(value["kind"], "store");
        assert_eq!(value["operation"], "set");
        assert_eq!(value["key"], "osint-hub-theme");
    }

    #[test]
    fn builtin_observers_do_not_panic_without_subscriber() {
        TracingObserver.observe(&store_fault());
        NoopObserver.observe(&store_fault());
        default_observer().observe(&Fault::EnvironmentAbsent { operation: "after_delay" });
    }
}
