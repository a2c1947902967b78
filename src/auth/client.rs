// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Auth exchange client: turns a wallet address into a backend session.

use tracing::{debug, info, warn};

use crate::api::Gateway;
use crate::error::ClientResult;
use crate::models::{AuthSession, LoginRequest, RegisterRequest, User, WalletAddress};

use super::signature::MockSignature;

#[derive(Clone)]
pub struct AuthClient {
    gateway: Gateway,
}

impl AuthClient {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    /// Create a user record for `address`.
    ///
    /// Fails when the address is already registered; see [`authenticate`].
    ///
    /// [`authenticate`]: AuthClient::authenticate
    pub async fn register(&self, address: &WalletAddress) -> ClientResult<User> {
        self.gateway
            .post(
                &["users"],
                &RegisterRequest {
                    wallet_address: address,
                },
            )
            .await
    }

    /// Exchange an address and signature for a bearer token.
    pub async fn login(
        &self,
        address: &WalletAddress,
        signature: &MockSignature,
    ) -> ClientResult<AuthSession> {
        self.gateway
            .post(
                &["auth", "login"],
                &LoginRequest {
                    wallet_address: address,
                    signature: signature.as_str(),
                },
            )
            .await
    }

    /// Register (idempotently) and then log in.
    ///
    /// Registration failures are expected for returning wallets and never
    /// stop the flow; login failures are returned unchanged. Nothing is
    /// persisted here.
    pub async fn authenticate(&self, address: &WalletAddress) -> ClientResult<AuthSession> {
        match self.register(address).await {
            Ok(user) => debug!(%address, user_id = %user.id, "Registered new user"),
            Err(e) if e.is_conflict() => {
                debug!(%address, "Address already registered, proceeding to login")
            }
            Err(e) => warn!(%address, error = %e, "Registration failed, proceeding to login"),
        }

        let signature = MockSignature::generate();
        let session = self.login(address, &signature).await?;
        info!(%address, user_id = %session.user.id, "Authenticated with backend");
        Ok(session)
    }
}
