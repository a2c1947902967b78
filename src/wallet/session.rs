// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wallet session data and its persisted form.

use serde::{Deserialize, Serialize};

use crate::models::{User, WalletAddress};

/// Connection lifecycle of the wallet session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

/// Notifications broadcast when the session changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A session was established by `connect` or restored by `rehydrate`.
    Connected { address: WalletAddress },
    /// The session was cleared locally.
    Disconnected,
    /// The backend rejected the token; the UI should return to its root view.
    Expired,
}

/// In-memory wallet session, also persisted under the `wallet` key.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WalletSession {
    pub address: WalletAddress,
    pub is_connected: bool,
    /// Label chosen by the user; no behavior depends on it.
    pub wallet_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl WalletSession {
    pub fn connected(address: WalletAddress, wallet_type: impl Into<String>, user: User) -> Self {
        Self {
            address,
            is_connected: true,
            wallet_type: wallet_type.into(),
            user: Some(user),
        }
    }

    /// Rebuild a session from the three persisted entries.
    ///
    /// All three must be present and parse, and the wallet entry must
    /// describe a connected wallet. The separately stored user snapshot wins
    /// over any user embedded in the wallet entry.
    pub fn from_persisted(
        token: Option<&str>,
        user: Option<&str>,
        wallet: Option<&str>,
    ) -> Result<Self, PersistedSessionError> {
        let token = token.ok_or(PersistedSessionError::Missing("access_token"))?;
        let user = user.ok_or(PersistedSessionError::Missing("user"))?;
        let wallet = wallet.ok_or(PersistedSessionError::Missing("wallet"))?;

        if token.trim().is_empty() {
            return Err(PersistedSessionError::Missing("access_token"));
        }

        let user: User = serde_json::from_str(user).map_err(|e| PersistedSessionError::Corrupt {
            key: "user",
            reason: e.to_string(),
        })?;
        let wallet: WalletSession =
            serde_json::from_str(wallet).map_err(|e| PersistedSessionError::Corrupt {
                key: "wallet",
                reason: e.to_string(),
            })?;

        if !wallet.is_connected || wallet.address.is_empty() {
            return Err(PersistedSessionError::NotConnected);
        }

        Ok(Self {
            user: Some(user),
            ..wallet
        })
    }
}

/// Why persisted session state could not be restored.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PersistedSessionError {
    #[error("persisted key `{0}` is missing")]
    Missing(&'static str),

    #[error("persisted key `{key}` is corrupt: {reason}")]
    Corrupt { key: &'static str, reason: String },

    #[error("persisted wallet is not marked as connected")]
    NotConnected,
}
