// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Process-wide showcase state, passed explicitly.
//!
//! A [`Stage`] owns the show-once registry and remembers which showcase is
//! active on each host window. Every showcase operation takes the stage it
//! runs on, so tests (and multi-window apps) can keep independent stages.

use hashbrown::HashMap;
use tracing::debug;

use crate::host::{Host, HostId, ShowcaseKey};
use crate::store::{MemoryStore, OneShotRegistry, ShownStore};

#[derive(Clone, Copy, Debug)]
struct Active {
    key: ShowcaseKey,
    hide_requested: bool,
}

/// Registry of active showcases and show-once flags.
#[derive(Debug)]
pub struct Stage<S = MemoryStore> {
    registry: OneShotRegistry<S>,
    active: HashMap<HostId, Active>,
    next_key: u64,
}

impl Default for Stage<MemoryStore> {
    fn default() -> Self {
        Self::new(MemoryStore::new())
    }
}

impl<S: ShownStore> Stage<S> {
    /// Creates a stage persisting show-once flags in `store`.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self {
            registry: OneShotRegistry::new(store),
            active: HashMap::new(),
            next_key: 0,
        }
    }

    /// The show-once registry.
    #[must_use]
    pub fn registry(&self) -> &OneShotRegistry<S> {
        &self.registry
    }

    /// Mutable access to the show-once registry.
    pub fn registry_mut(&mut self) -> &mut OneShotRegistry<S> {
        &mut self.registry
    }

    /// Returns `true` if the showcase with one-shot `id` has been shown.
    #[must_use]
    pub fn is_shown_before(&self, id: &str) -> bool {
        self.registry.is_shown_before(Some(id))
    }

    /// Forgets that `id` was shown.
    pub fn reset_show_once(&mut self, id: &str) {
        self.registry.reset(id);
    }

    /// Forgets every shown identifier.
    pub fn reset_all_show_once(&mut self) {
        self.registry.reset_all();
    }

    /// Returns `true` if a showcase is attached to `host`.
    ///
    /// This includes a showcase that is running its exit transition.
    #[must_use]
    pub fn is_visible(&self, host: HostId) -> bool {
        self.active.contains_key(&host)
    }

    /// The showcase attached to `host`, if any.
    #[must_use]
    pub fn active(&self, host: HostId) -> Option<ShowcaseKey> {
        self.active.get(&host).map(|a| a.key)
    }

    /// Asks the showcase attached to `host` to hide.
    ///
    /// The request is picked up by that showcase on its next event or frame;
    /// a frame is requested so that happens promptly. Returns `false` if
    /// nothing is attached.
    pub fn hide_current<H: Host + ?Sized>(&mut self, host: &mut H) -> bool {
        let Some(active) = self.active.get_mut(&host.id()) else {
            return false;
        };
        active.hide_requested = true;
        debug!(host = host.id().0, key = active.key.0, "hide requested");
        host.request_frame(active.key);
        true
    }

    pub(crate) fn allocate_key(&mut self) -> ShowcaseKey {
        self.next_key += 1;
        ShowcaseKey(self.next_key)
    }

    /// Registers `key` as the active showcase on `host`.
    ///
    /// Returns `false` if another showcase already holds that host.
    pub(crate) fn activate(&mut self, host: HostId, key: ShowcaseKey) -> bool {
        match self.active.get(&host) {
            Some(active) => active.key == key,
            None => {
                self.active.insert(
                    host,
                    Active {
                        key,
                        hide_requested: false,
                    },
                );
                true
            }
        }
    }

    pub(crate) fn deactivate(&mut self, host: HostId, key: ShowcaseKey) {
        if self.active.get(&host).is_some_and(|a| a.key == key) {
            self.active.remove(&host);
        }
    }

    /// Consumes a pending hide request for `key` on `host`.
    pub(crate) fn take_hide_request(&mut self, host: HostId, key: ShowcaseKey) -> bool {
        match self.active.get_mut(&host) {
            Some(active) if active.key == key => core::mem::take(&mut active.hide_requested),
            _ => false,
        }
    }
}
