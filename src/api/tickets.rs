// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Ticket endpoints.

use serde_json::Value;

use crate::error::{ClientError, ClientResult};
use crate::models::{Ticket, TransferTicketRequest, WalletAddress};

use super::Gateway;

pub struct TicketsApi<'a> {
    gateway: &'a Gateway,
}

impl<'a> TicketsApi<'a> {
    pub fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// Tickets held by `owner`. An empty address owns nothing.
    pub async fn for_owner(&self, owner: &WalletAddress) -> ClientResult<Vec<Ticket>> {
        if owner.is_empty() {
            return Ok(Vec::new());
        }
        self.gateway
            .get(&["tickets", "user", owner.as_str()])
            .await
    }

    /// Transfer a ticket. The backend's response is passed through as-is.
    pub async fn transfer(&self, ticket_id: &str, recipient: &WalletAddress) -> ClientResult<Value> {
        if ticket_id.trim().is_empty() {
            return Err(ClientError::invalid_request("ticket id must not be empty"));
        }
        if recipient.is_empty() {
            return Err(ClientError::invalid_request("recipient address must not be empty"));
        }

        let request = TransferTicketRequest {
            recipient_address: recipient.clone(),
        };
        self.gateway
            .post(&["tickets", ticket_id, "transfer"], &request)
            .await
    }
}
