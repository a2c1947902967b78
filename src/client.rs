// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Top-level client wiring.
//!
//! [`NftixClient`] owns one session state, one gateway and one wallet
//! controller, all sharing the same persistent store.

use std::sync::Arc;

use tracing::info;

use crate::api::{EventsApi, Gateway, MarketplaceApi, TicketsApi};
use crate::auth::AuthClient;
use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::models::Ticket;
use crate::state::SessionState;
use crate::storage::{FileStore, KeyValueStore, StoragePaths};
use crate::wallet::WalletSessionController;

#[derive(Clone)]
pub struct NftixClient {
    config: ClientConfig,
    gateway: Gateway,
    wallet: WalletSessionController,
}

impl NftixClient {
    /// Build a client persisting its session under `config.data_dir`,
    /// scoped to the origin of the API base URL.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let paths = StoragePaths::new(&config.data_dir);
        let store = FileStore::open(&paths, &config.api_base_url);
        info!(
            base_url = %config.api_base_url,
            store = %store.path().display(),
            persistent = store.is_available(),
            "Client initialized"
        );
        Self::with_store(config, Arc::new(store))
    }

    /// Build a client over an explicit store.
    pub fn with_store(config: ClientConfig, store: Arc<dyn KeyValueStore>) -> ClientResult<Self> {
        let session = Arc::new(SessionState::new(store));
        let gateway = Gateway::new(&config, session.clone())?;
        let wallet = WalletSessionController::new(session, AuthClient::new(gateway.clone()));

        Ok(Self {
            config,
            gateway,
            wallet,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn wallet(&self) -> &WalletSessionController {
        &self.wallet
    }

    pub fn events(&self) -> EventsApi<'_> {
        EventsApi::new(&self.gateway)
    }

    pub fn tickets(&self) -> TicketsApi<'_> {
        TicketsApi::new(&self.gateway)
    }

    pub fn marketplace(&self) -> MarketplaceApi<'_> {
        MarketplaceApi::new(&self.gateway)
    }

    /// Tickets owned by the connected wallet; empty when disconnected.
    pub async fn my_tickets(&self) -> ClientResult<Vec<Ticket>> {
        let address = self.wallet.session().address;
        self.tickets().for_owner(&address).await
    }
}
