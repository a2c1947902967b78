// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Wallet Session
//!
//! Mocked wallet connection and the session lifecycle built on it.
//!
//! - `address` - mock address generation
//! - `session` - session data, lifecycle states and events
//! - `controller` - connect, disconnect and rehydrate

pub mod address;
pub mod controller;
pub mod session;

pub use controller::WalletSessionController;
pub use session::{ConnectionState, PersistedSessionError, SessionEvent, WalletSession};
