// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Show-once persistence.
//!
//! A [`ShownStore`] remembers one boolean per identifier. The
//! [`OneShotRegistry`] sits on top of a store and is what showcases consult:
//! it never fails a show because of storage, it logs instead.

use core::fmt;
use std::io;

use hashbrown::HashMap;
use tracing::{debug, warn};

/// Failure to read or write persisted show-once flags.
#[derive(Debug)]
pub enum StoreError {
    /// The backing file could not be read or written.
    Io(io::Error),
    /// The backing file is not a valid flag map.
    #[cfg(feature = "json_store")]
    Json(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "show-once store I/O failed: {err}"),
            #[cfg(feature = "json_store")]
            Self::Json(err) => write!(f, "show-once store is malformed: {err}"),
        }
    }
}

impl core::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            #[cfg(feature = "json_store")]
            Self::Json(err) => Some(err),
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

#[cfg(feature = "json_store")]
impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// Key/value storage of "has been shown" flags.
pub trait ShownStore {
    /// Returns `true` if `id` was marked shown.
    fn is_shown(&self, id: &str) -> bool;

    /// Marks `id` as shown.
    fn mark_shown(&mut self, id: &str) -> Result<(), StoreError>;

    /// Forgets `id`.
    fn remove(&mut self, id: &str) -> Result<(), StoreError>;

    /// Forgets every identifier.
    fn clear(&mut self) -> Result<(), StoreError>;
}

/// Flags kept in memory for the life of the process.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    shown: HashMap<String, bool>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of identifiers marked shown.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shown.values().filter(|v| **v).count()
    }

    /// Returns `true` if nothing is marked shown.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ShownStore for MemoryStore {
    fn is_shown(&self, id: &str) -> bool {
        self.shown.get(id).copied().unwrap_or(false)
    }

    fn mark_shown(&mut self, id: &str) -> Result<(), StoreError> {
        self.shown.insert(id.to_owned(), true);
        Ok(())
    }

    fn remove(&mut self, id: &str) -> Result<(), StoreError> {
        self.shown.remove(id);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.shown.clear();
        Ok(())
    }
}

/// Show-once bookkeeping over a [`ShownStore`].
#[derive(Clone, Debug, Default)]
pub struct OneShotRegistry<S> {
    store: S,
}

impl<S: ShownStore> OneShotRegistry<S> {
    /// Wraps `store`.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The backing store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the backing store.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Returns `true` if a showcase with this one-shot id has been shown.
    ///
    /// Showcases without an id are never "shown before".
    #[must_use]
    pub fn is_shown_before(&self, id: Option<&str>) -> bool {
        id.is_some_and(|id| self.store.is_shown(id))
    }

    /// Records that `id` was shown.
    ///
    /// Storage failures are logged; the showcase stays on screen regardless.
    pub fn mark_shown(&mut self, id: &str) {
        match self.store.mark_shown(id) {
            Ok(()) => debug!(id, "show-once flag persisted"),
            Err(err) => warn!(id, %err, "failed to persist show-once flag"),
        }
    }

    /// Forgets `id` so its showcase can be shown again.
    pub fn reset(&mut self, id: &str) {
        if let Err(err) = self.store.remove(id) {
            warn!(id, %err, "failed to reset show-once flag");
        }
    }

    /// Forgets every identifier.
    pub fn reset_all(&mut self) {
        if let Err(err) = self.store.clear() {
            warn!(%err, "failed to reset show-once flags");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingStore;

    impl ShownStore for FailingStore {
        fn is_shown(&self, _id: &str) -> bool {
            false
        }

        fn mark_shown(&mut self, _id: &str) -> Result<(), StoreError> {
            Err(io::Error::other("disk full").into())
        }

        fn remove(&mut self, _id: &str) -> Result<(), StoreError> {
            Err(io::Error::other("read only").into())
        }

        fn clear(&mut self) -> Result<(), StoreError> {
            Err(io::Error::other("read only").into())
        }
    }

    #[test]
    fn memory_store_round_trip() {
        let mut registry = OneShotRegistry::new(MemoryStore::new());
        assert!(!registry.is_shown_before(Some("intro")));
        registry.mark_shown("intro");
        registry.mark_shown("intro");
        assert!(registry.is_shown_before(Some("intro")));
        assert_eq!(registry.store().len(), 1);

        registry.reset("intro");
        assert!(!registry.is_shown_before(Some("intro")));

        registry.mark_shown("a");
        registry.mark_shown("b");
        registry.reset_all();
        assert!(registry.store().is_empty());
    }

    #[test]
    fn no_id_is_never_shown_before() {
        let mut registry = OneShotRegistry::new(MemoryStore::new());
        registry.mark_shown("");
        assert!(!registry.is_shown_before(None));
    }

    #[test]
    fn failing_store_does_not_panic() {
        let mut registry = OneShotRegistry::new(FailingStore);
        registry.mark_shown("intro");
        registry.reset("intro");
        registry.reset_all();
        assert!(!registry.is_shown_before(Some("intro")));
    }

    #[test]
    fn store_error_reports_its_source() {
        let err = StoreError::from(io::Error::other("boom"));
        assert!(err.to_string().contains("boom"));
        assert!(core::error::Error::source(&err).is_some());
    }
}
