//! Persisted key/value settings over an injected string store.
//!
//! # Design
//! - [`KeyValueStore`] is the only seam to the host (`localStorage` in the
//!   browser, [`MemoryStore`] in tests).
//! - [`Storage`] never fails: reads degrade to the caller's default and writes
//!   become no-ops. Every swallowed fault is reported to the observer.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use osint_hub_telemetry::{Fault, SharedObserver, StoreOperation, default_observer};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::core::error::{StoreError, StoreResult};

/// Recognized settings keys shared by every consumer of the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// Selected theme mode.
    Theme,
    /// Favorited tool identifiers.
    Favorites,
    /// Recent search queries.
    SearchHistory,
    /// Interface language tag.
    Language,
}

impl StorageKey {
    /// All recognized keys.
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [
            Self::Theme,
            Self::Favorites,
            Self::SearchHistory,
            Self::Language,
        ]
    }

    /// Stable key persisted in the store.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Theme => "osint-hub-theme",
            Self::Favorites => "osint-hub-favorites",
            Self::SearchHistory => "osint-hub-search-history",
            Self::Language => "osint-hub-language",
        }
    }
}

impl AsRef<str> for StorageKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// String-keyed store of string payloads.
pub trait KeyValueStore {
    /// Read the raw payload under `key`.
    ///
    /// # Errors
    /// Returns [`StoreError`] when the backend cannot be read.
    fn get_item(&self, key: &str) -> StoreResult<Option<String>>;

    /// Write `value` under `key`.
    ///
    /// # Errors
    /// Returns [`StoreError`] when the backend is unavailable or full.
    fn set_item(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Delete the entry under `key`; deleting a missing key succeeds.
    ///
    /// # Errors
    /// Returns [`StoreError`] when the backend is unavailable.
    fn remove_item(&self, key: &str) -> StoreResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Rc<S> {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> StoreResult<()> {
        (**self).remove_item(key)
    }
}

/// In-memory store with an optional byte capacity.
///
/// Capacity counts key and value bytes, roughly how browsers account quota.
#[derive(Debug)]
pub struct MemoryStore {
    entries: RefCell<BTreeMap<String, String>>,
    capacity: Option<usize>,
    available: Cell<bool>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Unbounded, available store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RefCell::new(BTreeMap::new()),
            capacity: None,
            available: Cell::new(true),
        }
    }

    /// Store that rejects writes beyond `bytes`.
    #[must_use]
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            capacity: Some(bytes),
            ..Self::new()
        }
    }

    /// Toggle availability; an unavailable store fails every operation.
    pub fn set_available(&self, available: bool) {
        self.available.set(available);
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Whether the store holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Bytes currently used by keys and values.
    #[must_use]
    pub fn used_bytes(&self) -> usize {
        self.entries
            .borrow()
            .iter()
            .map(|(key, value)| key.len() + value.len())
            .sum()
    }

    fn ensure_available(&self) -> StoreResult<()> {
        if self.available.get() {
            Ok(())
        } else {
            Err(StoreError::Unavailable)
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        self.ensure_available()?;
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        self.ensure_available()?;
        if let Some(capacity) = self.capacity {
            let replaced = self
                .entries
                .borrow()
                .get(key)
                .map_or(0, |existing| key.len() + existing.len());
            let required = key.len() + value.len();
            if self.used_bytes() - replaced + required > capacity {
                return Err(StoreError::QuotaExceeded {
                    key: key.to_string(),
                    required,
                    capacity: Some(capacity),
                });
            }
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StoreResult<()> {
        self.ensure_available()?;
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// JSON settings wrapper that never fails to the caller.
#[derive(Clone)]
pub struct Storage<S> {
    store: S,
    observer: SharedObserver,
}

impl<S: KeyValueStore> Storage<S> {
    /// Wrap `store`, reporting faults to the default tracing observer.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self {
            store,
            observer: default_observer(),
        }
    }

    /// Replace the fault observer.
    #[must_use]
    pub fn with_observer(mut self, observer: SharedObserver) -> Self {
        self.observer = observer;
        self
    }

    /// Underlying store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Decode the value under `key`, or `default` when it is absent, empty or
    /// undecodable, or when the store cannot be read.
    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.store.get_item(key) {
            Ok(Some(raw)) if !raw.is_empty() => match serde_json::from_str(&raw) {
                Ok(value) => value,
                Err(err) => {
                    self.report(StoreOperation::Get, key, err.to_string());
                    default
                }
            },
            Ok(_) => default,
            Err(err) => {
                self.report(StoreOperation::Get, key, err.to_string());
                default
            }
        }
    }

    /// [`Storage::get`] with `T::default()` as the fallback.
    pub fn get_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        self.get(key, T::default())
    }

    /// Encode and write `value` under `key`; failures are dropped.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let encoded = match serde_json::to_string(value) {
            Ok(encoded) => encoded,
            Err(err) => {
                self.report(StoreOperation::Set, key, err.to_string());
                return;
            }
        };
        if let Err(err) = self.store.set_item(key, &encoded) {
            self.report(StoreOperation::Set, key, err.to_string());
        }
    }

    /// Delete the entry under `key`; failures are dropped.
    pub fn remove(&self, key: &str) {
        if let Err(err) = self.store.remove_item(key) {
            self.report(StoreOperation::Remove, key, err.to_string());
        }
    }

    fn report(&self, operation: StoreOperation, key: &str, detail: String) {
        self.observer.observe(&Fault::Store {
            operation,
            key: key.to_string(),
            detail,
        });
    }
}
