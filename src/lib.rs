// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! NFTix Client - wallet session and ticketing API client
//!
//! Connects a (mock) wallet to the NFTix backend, keeps the resulting
//! session in a per-origin persistent store, and exposes typed access to
//! the events, tickets and marketplace endpoints.
//!
//! ## Modules
//!
//! - `wallet` - Session lifecycle (connect, disconnect, rehydrate)
//! - `auth` - Register and login exchange
//! - `api` - Authenticated gateway and resource clients
//! - `storage` - Persistent key/value store
//! - `state` - Shared session state and events
//!
//! ```no_run
//! # async fn run() -> nftix_client::ClientResult<()> {
//! use nftix_client::{ClientConfig, NftixClient};
//!
//! let client = NftixClient::new(ClientConfig::from_env()?)?;
//! client.wallet().rehydrate();
//! if !client.wallet().is_connected() {
//!     client.wallet().connect("sui").await?;
//! }
//! let tickets = client.my_tickets().await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
pub mod storage;
pub mod wallet;

#[cfg(test)]
mod test_support;

pub use client::NftixClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use wallet::{ConnectionState, SessionEvent, WalletSession, WalletSessionController};
