//! DOM-free primitives: storage, theming, debouncing and preloading.
//!
//! Everything here runs natively so it can be tested without a browser; the
//! browser bindings live in `crate::web`.

pub mod config;
pub mod debounce;
pub mod error;
pub mod host;
pub mod preferences;
pub mod preload;
pub mod storage;
pub mod theme;
