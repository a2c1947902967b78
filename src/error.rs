// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Client error type.
//!
//! Backend failures are carried verbatim (status plus raw body) so callers
//! can surface whatever the server said. Unauthorized responses get their own
//! variant because the gateway has already torn the session down by the time
//! the caller sees them.

use reqwest::StatusCode;

use crate::storage::StorageError;

/// Result alias used throughout the crate.
pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Backend answered with a non-success status other than 401.
    #[error("backend returned {status}: {body}")]
    Api { status: StatusCode, body: String },

    /// Backend answered 401; the local session has been cleared.
    #[error("unauthorized: {body}")]
    Unauthorized { body: String },

    /// The call did not complete within the configured timeout.
    #[error("request timed out")]
    Timeout,

    #[error("transport error: {0}")]
    Transport(String),

    /// Response body did not match the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("a wallet connection is already in progress")]
    ConnectInProgress,

    #[error("a wallet is already connected")]
    AlreadyConnected,

    /// The session was torn down while the connect exchange was in flight.
    #[error("wallet connection was aborted by a disconnect")]
    ConnectAborted,

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The session could not be persisted, so it was not established.
    #[error("session storage failed: {0}")]
    Storage(#[from] StorageError),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ClientError {
    pub fn api(status: StatusCode, body: impl Into<String>) -> Self {
        Self::Api {
            status,
            body: body.into(),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// HTTP status associated with this error, if it came from the backend.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Unauthorized { .. } => Some(StatusCode::UNAUTHORIZED),
            _ => None,
        }
    }

    /// True for the "address already registered" response from `POST /users`.
    pub fn is_conflict(&self) -> bool {
        self.status() == Some(StatusCode::CONFLICT)
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ClientError::Timeout
        } else if e.is_decode() {
            ClientError::Decode(e.to_string())
        } else {
            ClientError::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Decode(e.to_string())
    }
}
