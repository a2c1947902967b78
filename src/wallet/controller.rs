// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wallet session controller.
//!
//! Owns the connection lifecycle:
//!
//! ```text
//! Disconnected --connect()--> Connecting --ok--> Connected
//!                                  \--err--> Disconnected
//! Connected --disconnect() / 401--> Disconnected
//! Disconnected --rehydrate()--> Connected | Disconnected
//! ```

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::{info, warn};

use crate::auth::AuthClient;
use crate::error::ClientResult;
use crate::models::WalletAddress;
use crate::state::SessionState;

use super::session::{ConnectionState, SessionEvent, WalletSession};

#[derive(Clone)]
pub struct WalletSessionController {
    session: Arc<SessionState>,
    auth: AuthClient,
}

/// Rolls an unfinished connect back when dropped, including when the
/// connect future itself is dropped mid-exchange.
struct ConnectAttempt<'a> {
    session: &'a SessionState,
    generation: u64,
}

impl Drop for ConnectAttempt<'_> {
    fn drop(&mut self) {
        self.session.abort_connect(self.generation);
    }
}

impl WalletSessionController {
    pub fn new(session: Arc<SessionState>, auth: AuthClient) -> Self {
        Self { session, auth }
    }

    /// Connect a (mock) wallet and establish a backend session.
    ///
    /// Fails with `ConnectInProgress` or `AlreadyConnected` unless the
    /// session is disconnected, and with `Storage` if the session cannot be
    /// persisted. On any failure the session ends up `Disconnected` with
    /// nothing persisted.
    pub async fn connect(&self, wallet_type: &str) -> ClientResult<WalletSession> {
        let generation = self.session.begin_connect()?;
        let _attempt = ConnectAttempt {
            session: &self.session,
            generation,
        };

        let address = WalletAddress::generate_mock();
        info!(%address, wallet_type, "Connecting wallet");

        let result = match self.auth.authenticate(&address).await {
            Ok(auth) => {
                let wallet = WalletSession::connected(address, wallet_type, auth.user.clone());
                self.session.complete_connect(generation, wallet, &auth)
            }
            Err(e) => Err(e),
        };

        if let Err(e) = &result {
            warn!(error = %e, "Wallet connection failed");
        }
        result
    }

    /// Clear the session locally and in the store. Safe to call when
    /// already disconnected; `Disconnected` is broadcast either way.
    pub fn disconnect(&self) {
        self.session.disconnect();
    }

    /// Restore a persisted session, discarding partial or corrupt state.
    pub fn rehydrate(&self) -> ConnectionState {
        self.session.rehydrate()
    }

    pub fn state(&self) -> ConnectionState {
        self.session.phase()
    }

    pub fn is_connected(&self) -> bool {
        self.state() == ConnectionState::Connected
    }

    /// Snapshot of the current session.
    pub fn session(&self) -> WalletSession {
        self.session.wallet()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.session.subscribe()
    }
}
