// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A [`ShownStore`] backed by a JSON file.
//!
//! The file holds a single object mapping identifiers to `true`:
//!
//! ```json
//! { "intro": true, "settings_tour": true }
//! ```
//!
//! Every change is written through immediately.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::store::{ShownStore, StoreError};

/// File name used by [`JsonFileStore::open_default`].
pub const DEFAULT_STORE_FILE: &str = "showcase_shown.json";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
struct ShownFlags(BTreeMap<String, bool>);

/// Show-once flags persisted as JSON.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    flags: ShownFlags,
}

impl JsonFileStore {
    /// Opens the store at `path`.
    ///
    /// A missing file is an empty store; it is created on the first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let flags = match fs::read_to_string(&path) {
            Ok(contents) if contents.trim().is_empty() => ShownFlags::default(),
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => ShownFlags::default(),
            Err(err) => return Err(err.into()),
        };
        debug!(path = %path.display(), count = flags.0.len(), "opened show-once store");
        Ok(Self { path, flags })
    }

    /// Opens [`DEFAULT_STORE_FILE`] in `app`'s directory under the platform
    /// data directory, falling back to the working directory.
    pub fn open_default(app: &str) -> Result<Self, StoreError> {
        Self::open(Self::default_path(app))
    }

    /// Where [`JsonFileStore::open_default`] looks for `app`.
    #[must_use]
    pub fn default_path(app: &str) -> PathBuf {
        let mut path = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(app);
        path.push(DEFAULT_STORE_FILE);
        path
    }

    /// The backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(&self.flags)?;
        fs::write(&self.path, contents)?;
        Ok(())
    }
}

impl ShownStore for JsonFileStore {
    fn is_shown(&self, id: &str) -> bool {
        self.flags.0.get(id).copied().unwrap_or(false)
    }

    fn mark_shown(&mut self, id: &str) -> Result<(), StoreError> {
        if self.flags.0.insert(id.to_owned(), true) == Some(true) {
            return Ok(());
        }
        self.save()
    }

    fn remove(&mut self, id: &str) -> Result<(), StoreError> {
        if self.flags.0.remove(id).is_none() {
            return Ok(());
        }
        self.save()
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.flags.0.clear();
        self.save()
    }
}
