#![forbid(unsafe_code)]
#![warn(
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]

//! Telemetry primitives shared across the OSINT Hub workspace.
//!
//! The UI helpers swallow every failure by contract; this crate gives those
//! swallowed failures somewhere to go. It centralises logging bootstrap, the
//! fault taxonomy with its observer hook, and optional Prometheus counters.
//!
//! Layout: `observer.rs` (fault records and observers), `init.rs` (native
//! logging bootstrap), `metrics.rs` + `error.rs` (Prometheus counters, behind
//! the `metrics` feature).

#[cfg(feature = "metrics")]
pub mod error;
#[cfg(not(target_arch = "wasm32"))]
mod init;
#[cfg(feature = "metrics")]
mod metrics;
mod observer;

#[cfg(feature = "metrics")]
pub use error::{Result, TelemetryError};
#[cfg(not(target_arch = "wasm32"))]
pub use init::{
    DEFAULT_LOG_LEVEL, LOG_FORMAT_ENV, LOG_LEVEL_ENV, LogFormat, LoggingConfig, init_logging,
    installed_format,
};
#[cfg(feature = "metrics")]
pub use metrics::FaultMetrics;
pub use observer::{
    Fault, FaultObserver, NoopObserver, SharedObserver, StoreOperation, TracingObserver,
    default_observer,
};
