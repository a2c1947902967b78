// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Event endpoints.

use tracing::debug;

use crate::error::{ClientError, ClientResult};
use crate::models::{Event, EventUpdate, NewEvent};

use super::Gateway;

pub struct EventsApi<'a> {
    gateway: &'a Gateway,
}

impl<'a> EventsApi<'a> {
    pub fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// All published events.
    pub async fn list(&self) -> ClientResult<Vec<Event>> {
        self.gateway.get(&["events"]).await
    }

    /// Events created by one organizer. An empty id matches nothing.
    pub async fn by_organizer(&self, organizer_id: &str) -> ClientResult<Vec<Event>> {
        if organizer_id.trim().is_empty() {
            debug!("No organizer id, skipping organizer events lookup");
            return Ok(Vec::new());
        }
        self.gateway
            .get(&["events", "organizer", organizer_id])
            .await
    }

    pub async fn create(&self, event: &NewEvent) -> ClientResult<Event> {
        self.gateway.post(&["events"], event).await
    }

    pub async fn update(&self, id: &str, update: &EventUpdate) -> ClientResult<Event> {
        require_id(id)?;
        if update.is_empty() {
            return Err(ClientError::invalid_request("event update has no fields set"));
        }
        self.gateway.put(&["events", id], update).await
    }

    /// Delete an event, returning the id that was removed.
    pub async fn delete(&self, id: &str) -> ClientResult<String> {
        require_id(id)?;
        self.gateway.delete(&["events", id]).await?;
        Ok(id.to_string())
    }
}

fn require_id(id: &str) -> ClientResult<()> {
    if id.trim().is_empty() {
        return Err(ClientError::invalid_request("event id must not be empty"));
    }
    Ok(())
}
