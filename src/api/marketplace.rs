// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Marketplace endpoints.

use serde_json::Value;
use tracing::debug;

use crate::error::{ClientError, ClientResult};
use crate::models::{ListTicketRequest, MarketplaceListing};

use super::Gateway;

pub struct MarketplaceApi<'a> {
    gateway: &'a Gateway,
}

impl<'a> MarketplaceApi<'a> {
    pub fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    pub async fn listings(&self) -> ClientResult<Vec<MarketplaceListing>> {
        self.gateway.get(&["marketplace", "listings"]).await
    }

    /// Buy a listed ticket.
    pub async fn buy(&self, listing_id: &str) -> ClientResult<Value> {
        if listing_id.trim().is_empty() {
            return Err(ClientError::invalid_request("listing id must not be empty"));
        }
        self.gateway
            .post_empty(&["marketplace", "buy", listing_id])
            .await
    }

    /// Put a ticket up for resale. The request is validated before sending.
    pub async fn list_ticket(&self, request: &ListTicketRequest) -> ClientResult<Value> {
        request.validate()?;
        debug!(
            ticket_id = %request.ticket_id,
            is_auction = request.is_auction,
            "Listing ticket"
        );
        self.gateway.post(&["marketplace", "list"], request).await
    }
}
