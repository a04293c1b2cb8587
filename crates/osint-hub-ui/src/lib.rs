#![forbid(unsafe_code)]
#![warn(
    dead_code,
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
#![allow(clippy::multiple_crate_versions)]
//! OSINT Hub web front end.
//!
//! The [`core`] module holds the browser-independent building blocks
//! (persisted preferences, theme tokens, debouncing and component preloading).
//! On `wasm32` the [`web`] module binds them to the real browser and
//! [`run_app`] mounts the Yew application.

pub mod core;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod components;
#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(target_arch = "wasm32")]
pub use app::run_app;

pub use crate::core::config::{PreloadConfig, SearchConfig, UiConfig};
pub use crate::core::debounce::{Debounced, debounce};
pub use crate::core::error::{ConfigError, ImportError, StoreError, ThemeError};
pub use crate::core::host::{Host, ManualHost, TaskHandle};
pub use crate::core::preferences::Preferences;
pub use crate::core::preload::{ComponentImport, HoverBindings, PreloadTrigger, Preloader};
pub use crate::core::storage::{KeyValueStore, MemoryStore, Storage, StorageKey};
pub use crate::core::theme::{AccentColor, ButtonVariants, Theme, ThemeMode, create_theme};
