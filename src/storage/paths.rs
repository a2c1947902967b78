// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Path utilities for the persistent store layout.

use std::path::{Path, PathBuf};

use url::Url;

/// Storage path utilities.
///
/// ```text
/// <root>/
///   origins/
///     {origin}.json   # key/value map for one backend origin
/// ```
#[derive(Debug, Clone)]
pub struct StoragePaths {
    root: PathBuf,
}

impl StoragePaths {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Root directory for all persisted data.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory containing one store file per backend origin.
    pub fn origins_dir(&self) -> PathBuf {
        self.root.join("origins")
    }

    /// Store file for a given origin label.
    pub fn origin_store(&self, origin: &str) -> PathBuf {
        self.origins_dir().join(format!("{origin}.json"))
    }
}

/// Filesystem-safe label for the origin (scheme, host, port) of a URL.
///
/// Two base URLs on the same origin share a store, mirroring browser
/// storage scoping.
pub fn origin_label(url: &Url) -> String {
    let host = url.host_str().unwrap_or("local");
    let port = url
        .port_or_known_default()
        .map(|p| p.to_string())
        .unwrap_or_default();

    format!("{}_{}_{}", url.scheme(), host, port)
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
