// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Persistent Store
//!
//! Durable key → string mapping that survives process restarts, scoped to
//! the backend origin. The session layer keeps exactly three entries here:
//!
//! | Key | Value |
//! |-----|-------|
//! | `access_token` | Bearer token issued at login |
//! | `user` | User snapshot JSON |
//! | `wallet` | Wallet session JSON (no token) |
//!
//! Reads never fail: an unavailable or corrupt store reads as empty, which
//! the session layer treats as "never connected". Writes report failure so
//! the session layer never claims a connection it could not persist.

pub mod file_store;
pub mod memory;
pub mod paths;

pub use file_store::{FileStore, StorageError, StorageResult};
pub use memory::MemoryStore;
pub use paths::{origin_label, StoragePaths};

/// Key holding the bearer token.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Key holding the serialized user snapshot.
pub const USER_KEY: &str = "user";

/// Key holding the serialized wallet session.
pub const WALLET_KEY: &str = "wallet";

/// Every key owned by the session; written and cleared as one unit.
pub const SESSION_KEYS: [&str; 3] = [ACCESS_TOKEN_KEY, USER_KEY, WALLET_KEY];

/// Key/value storage abstraction.
///
/// Multi-key operations are one logical transaction from the caller's point
/// of view: on `Err` none of the pairs were applied.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set_many(&self, pairs: &[(&str, &str)]) -> StorageResult<()>;

    /// Remove `keys`. Also discards unreadable contents, so a successful
    /// call leaves none of `keys` behind.
    fn remove_many(&self, keys: &[&str]) -> StorageResult<()>;

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.set_many(&[(key, value)])
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.remove_many(&[key])
    }
}
