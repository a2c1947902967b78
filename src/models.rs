// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response structures exchanged with the NFTix backend. All
//! wire names are camelCase, matching the backend's JSON.
//!
//! ## Wallet Address Type
//!
//! The [`WalletAddress`] newtype wraps the client-held account identifier.
//! In the mocked wallet flow it is a `0x`-prefixed hex string with no
//! cryptographic meaning.
//!
//! ## Model Categories
//!
//! - **Users & Auth**: backend user snapshot and login response
//! - **Events**: events and their ticket tiers
//! - **Tickets**: owned tickets and transfers
//! - **Marketplace**: resale listings

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ClientError, ClientResult};

// =============================================================================
// Wallet Address Type
// =============================================================================

/// Client-held wallet address.
///
/// ```rust,ignore
/// let addr = WalletAddress::from("0x742d35cc6634c0532925a3b844bc9e7595f4ab12");
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct WalletAddress(pub String);

impl WalletAddress {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for WalletAddress {
    fn from(value: String) -> Self {
        WalletAddress(value)
    }
}

impl From<&str> for WalletAddress {
    fn from(value: &str) -> Self {
        WalletAddress(value.to_string())
    }
}

impl From<WalletAddress> for String {
    fn from(value: WalletAddress) -> Self {
        value.0
    }
}

// =============================================================================
// User & Auth Models
// =============================================================================

/// Backend user record.
///
/// Only `id` is required: the login response carries a reduced user, and the
/// full record adds event lists and timestamps. Fields the client does not
/// model are kept in `extra` so the snapshot persists unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub wallet_address: WalletAddress,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub is_event_organizer: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub favorite_events: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub created_events: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attended_events: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Bearer credential and user snapshot returned by `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthSession {
    #[serde(rename = "access_token")]
    pub token: String,
    pub user: User,
}

/// Body of `POST /users`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest<'a> {
    pub wallet_address: &'a WalletAddress,
}

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest<'a> {
    pub wallet_address: &'a WalletAddress,
    pub signature: &'a str,
}

// =============================================================================
// Event Models
// =============================================================================

/// Chain the event's tickets are minted on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlockchainInfo {
    pub network: String,
}

/// A priced class of tickets within an event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TicketTier {
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub description: String,
    pub total_supply: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sold: Option<u32>,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl TicketTier {
    /// Tickets still available in this tier.
    pub fn remaining(&self) -> u32 {
        self.total_supply.saturating_sub(self.sold.unwrap_or(0))
    }
}

fn default_true() -> bool {
    true
}

/// An event as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub mongo_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub long_description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub venue: String,
    #[serde(default)]
    pub image_url: String,
    pub organizer: String,
    #[serde(default)]
    pub ticket_tiers: Vec<TicketTier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_attendees: Option<u32>,
    #[serde(default)]
    pub max_attendees: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_revenue: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blockchain: Option<BlockchainInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendees: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Event {
    /// Identifier to use in event URLs: the document `_id` when present,
    /// otherwise `id`.
    pub fn key(&self) -> &str {
        match self.mongo_id.as_deref() {
            Some(mongo_id) if !mongo_id.is_empty() => mongo_id,
            _ => &self.id,
        }
    }
}

/// Body of `POST /events`: an event without server-assigned fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub long_description: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub start_date: String,
    pub end_date: String,
    pub location: String,
    pub venue: String,
    #[serde(default)]
    pub image_url: String,
    pub organizer: String,
    pub ticket_tiers: Vec<TicketTier>,
    pub max_attendees: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blockchain: Option<BlockchainInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
}

/// Body of `PUT /events/{id}`; only the fields that are set are sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_tiers: Option<Vec<TicketTier>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_attendees: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
}

impl EventUpdate {
    pub fn is_empty(&self) -> bool {
        self == &EventUpdate::default()
    }
}

// =============================================================================
// Ticket Models
// =============================================================================

/// A ticket owned by a wallet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: String,
    pub event_id: String,
    pub owner: WalletAddress,
    pub price: f64,
    #[serde(default)]
    pub qr_code: String,
    pub event: Event,
    #[serde(default)]
    pub is_for_sale: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<f64>,
}

/// Body of `POST /tickets/{id}/transfer`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TransferTicketRequest {
    pub recipient_address: WalletAddress,
}

// =============================================================================
// Marketplace Models
// =============================================================================

/// A ticket offered for resale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MarketplaceListing {
    pub id: String,
    pub ticket: Ticket,
    pub seller: WalletAddress,
    pub price: f64,
    #[serde(default)]
    pub listing_date: String,
    #[serde(default)]
    pub is_auction: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auction_end_date: Option<String>,
}

/// Body of `POST /marketplace/list`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListTicketRequest {
    pub ticket_id: String,
    pub price: f64,
    pub is_auction: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auction_end_date: Option<String>,
}

impl ListTicketRequest {
    pub fn fixed_price(ticket_id: impl Into<String>, price: f64) -> Self {
        Self {
            ticket_id: ticket_id.into(),
            price,
            is_auction: false,
            auction_end_date: None,
        }
    }

    pub fn auction(ticket_id: impl Into<String>, price: f64, ends_at: impl Into<String>) -> Self {
        Self {
            ticket_id: ticket_id.into(),
            price,
            is_auction: true,
            auction_end_date: Some(ends_at.into()),
        }
    }

    pub fn validate(&self) -> ClientResult<()> {
        if self.ticket_id.trim().is_empty() {
            return Err(ClientError::invalid_request("ticket_id must not be empty"));
        }

        if !self.price.is_finite() || self.price <= 0.0 {
            return Err(ClientError::invalid_request("price must be a positive amount"));
        }

        if self.is_auction
            && self
                .auction_end_date
                .as_deref()
                .is_none_or(|date| date.trim().is_empty())
        {
            return Err(ClientError::invalid_request(
                "auction listings require an auction end date",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reduced_login_user_parses() {
        let user: User = serde_json::from_value(json!({ "id": "u1" })).unwrap();
        assert_eq!(user.id, "u1");
        assert!(user.wallet_address.is_empty());
        assert!(!user.is_verified);
        assert!(user.extra.is_empty());
    }

    #[test]
    fn unknown_user_fields_survive_a_store_round_trip() {
        let raw = json!({
            "id": "u1",
            "walletAddress": "0xabc",
            "isVerified": true,
            "isEventOrganizer": false,
            "lastLogin": "2025-06-01T10:00:00Z",
            "__v": 0,
            "avatar": "https://img.example/a.png"
        });
        let user: User = serde_json::from_value(raw).unwrap();
        assert_eq!(user.extra.get("__v"), Some(&json!(0)));

        let reparsed: User = serde_json::from_str(&serde_json::to_string(&user).unwrap()).unwrap();
        assert_eq!(reparsed, user);
    }

    #[test]
    fn auth_session_uses_access_token_on_the_wire() {
        let session: AuthSession = serde_json::from_value(json!({
            "access_token": "t1",
            "user": { "id": "u1" }
        }))
        .unwrap();
        assert_eq!(session.token, "t1");
        assert_eq!(session.user.id, "u1");
    }

    #[test]
    fn login_request_is_camel_case() {
        let address = WalletAddress::from("0xabc");
        let body = serde_json::to_value(LoginRequest {
            wallet_address: &address,
            signature: "auth_1_x",
        })
        .unwrap();
        assert_eq!(body, json!({ "walletAddress": "0xabc", "signature": "auth_1_x" }));
    }

    #[test]
    fn event_key_falls_back_to_mongo_id() {
        let event: Event = serde_json::from_value(json!({
            "_id": "665f",
            "title": "Launch",
            "startDate": "2025-06-01",
            "endDate": "2025-06-02",
            "organizer": "u1"
        }))
        .unwrap();
        assert_eq!(event.key(), "665f");
    }

    #[test]
    fn event_key_prefers_mongo_id_over_id() {
        let event: Event = serde_json::from_value(json!({
            "id": "e1",
            "_id": "665f",
            "title": "Launch",
            "startDate": "2025-06-01",
            "endDate": "2025-06-02",
            "organizer": "u1"
        }))
        .unwrap();
        assert_eq!(event.key(), "665f");

        let event: Event = serde_json::from_value(json!({
            "id": "e1",
            "title": "Launch",
            "startDate": "2025-06-01",
            "endDate": "2025-06-02",
            "organizer": "u1"
        }))
        .unwrap();
        assert_eq!(event.key(), "e1");
    }

    #[test]
    fn tier_remaining_saturates() {
        let mut tier = TicketTier {
            name: "GA".into(),
            price: 10.0,
            description: String::new(),
            total_supply: 5,
            sold: Some(2),
            benefits: vec![],
            is_active: true,
            created_at: None,
            updated_at: None,
        };
        assert_eq!(tier.remaining(), 3);
        tier.sold = Some(9);
        assert_eq!(tier.remaining(), 0);
    }

    #[test]
    fn event_update_skips_unset_fields() {
        let update = EventUpdate {
            title: Some("Renamed".into()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&update).unwrap(), json!({ "title": "Renamed" }));
        assert!(!update.is_empty());
        assert!(EventUpdate::default().is_empty());
    }

    #[test]
    fn listing_validation() {
        assert!(ListTicketRequest::fixed_price("t1", 12.5).validate().is_ok());
        assert!(ListTicketRequest::auction("t1", 1.0, "2025-07-01").validate().is_ok());

        assert!(ListTicketRequest::fixed_price("", 12.5).validate().is_err());
        assert!(ListTicketRequest::fixed_price("t1", 0.0).validate().is_err());
        assert!(ListTicketRequest::fixed_price("t1", f64::NAN).validate().is_err());

        let mut auction = ListTicketRequest::auction("t1", 1.0, "2025-07-01");
        auction.auction_end_date = None;
        assert!(matches!(auction.validate(), Err(ClientError::InvalidRequest(_))));
    }
}
