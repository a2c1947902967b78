// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Backend API
//!
//! Typed access to the NFTix REST backend.
//!
//! | Client | Endpoints |
//! |--------|-----------|
//! | [`EventsApi`] | `/events`, `/events/organizer/{id}`, `/events/{id}` |
//! | [`TicketsApi`] | `/tickets/user/{address}`, `/tickets/{id}/transfer` |
//! | [`MarketplaceApi`] | `/marketplace/listings`, `/marketplace/buy/{id}`, `/marketplace/list` |
//!
//! All of them go through the [`Gateway`], which handles bearer tokens and
//! session expiry.

pub mod events;
pub mod gateway;
pub mod marketplace;
pub mod tickets;

pub use events::EventsApi;
pub use gateway::Gateway;
pub use marketplace::MarketplaceApi;
pub use tickets::TicketsApi;
