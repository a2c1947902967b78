// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! File-backed key/value store.
//!
//! Each backend origin gets one JSON object on disk mapping keys to string
//! values. Every mutation rewrites the whole object through a uniquely named
//! owner-only temp file and a rename, so multi-key writes land together or
//! not at all.
//!
//! If the store directory cannot be created the store is marked unavailable:
//! reads see nothing and writes fail with [`StorageError::Unavailable`].
//! A file that no longer parses reads as empty and is replaced or removed by
//! the next mutation.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tempfile::NamedTempFile;
use tracing::{debug, warn};
use url::Url;

use super::paths::{origin_label, StoragePaths};
use super::KeyValueStore;

/// Error type for file store operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("storage unavailable at {0}")]
    Unavailable(PathBuf),
}

pub type StorageResult<T> = Result<T, StorageError>;

type Entries = BTreeMap<String, String>;

#[derive(Debug)]
pub struct FileStore {
    file: PathBuf,
    available: bool,
    // Serializes read-modify-write cycles through this handle.
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Open the store for the origin of `base_url` under `paths`.
    pub fn open(paths: &StoragePaths, base_url: &Url) -> Self {
        Self::open_file(paths.origin_store(&origin_label(base_url)))
    }

    /// Open a store backed by an explicit file.
    pub fn open_file(file: impl Into<PathBuf>) -> Self {
        let file = file.into();
        let available = match fs::create_dir_all(parent_dir(&file)) {
            Ok(()) => true,
            Err(e) => {
                warn!(
                    path = %file.display(),
                    error = %e,
                    "Session storage unavailable, continuing without persistence"
                );
                false
            }
        };

        Self {
            file,
            available,
            write_lock: Mutex::new(()),
        }
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn path(&self) -> &Path {
        &self.file
    }

    fn read_entries(&self) -> StorageResult<Entries> {
        if !self.available {
            return Err(StorageError::Unavailable(self.file.clone()));
        }

        match fs::read(&self.file) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Entries::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_entries(&self, entries: &Entries) -> StorageResult<()> {
        if entries.is_empty() {
            return match fs::remove_file(&self.file) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(e.into()),
            };
        }

        // Created with owner-only permissions and a unique name.
        let mut temp = NamedTempFile::new_in(parent_dir(&self.file))?;
        {
            let mut writer = BufWriter::new(temp.as_file_mut());
            serde_json::to_writer_pretty(&mut writer, entries)?;
            writer.flush()?;
        }

        temp.persist(&self.file).map_err(|e| e.error)?;
        Ok(())
    }

    /// Read, apply, and write back if `apply` changed anything or the file on
    /// disk was unreadable.
    fn update(&self, apply: impl FnOnce(&mut Entries) -> bool) -> StorageResult<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let (mut entries, corrupt) = match self.read_entries() {
            Ok(entries) => (entries, false),
            Err(StorageError::Json(e)) => {
                warn!(
                    path = %self.file.display(),
                    error = %e,
                    "Session store file is corrupt, discarding it"
                );
                (Entries::new(), true)
            }
            Err(e) => return Err(e),
        };

        if apply(&mut entries) || corrupt {
            self.write_entries(&entries)?;
        }
        Ok(())
    }
}

fn parent_dir(file: &Path) -> &Path {
    file.parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or(Path::new("."))
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        if !self.available {
            return None;
        }

        match self.read_entries() {
            Ok(mut entries) => entries.remove(key),
            Err(StorageError::Json(e)) => {
                debug!(key, error = %e, "Session store file is corrupt, reading as empty");
                None
            }
            Err(e) => {
                warn!(key, error = %e, "Failed to read session store");
                None
            }
        }
    }

    fn set_many(&self, pairs: &[(&str, &str)]) -> StorageResult<()> {
        self.update(|entries| {
            for (key, value) in pairs {
                entries.insert((*key).to_string(), (*value).to_string());
            }
            !pairs.is_empty()
        })
    }

    fn remove_many(&self, keys: &[&str]) -> StorageResult<()> {
        self.update(|entries| {
            let mut changed = false;
            for key in keys {
                changed |= entries.remove(*key).is_some();
            }
            changed
        })
    }
}
