// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authenticated request gateway.
//!
//! Every backend call goes through [`Gateway`]. On the way out it reads the
//! bearer token from the persistent store and attaches it; on the way back
//! a 401 from any endpoint tears the local session down and broadcasts
//! [`SessionEvent::Expired`](crate::wallet::SessionEvent::Expired), unless
//! the session was replaced while the request was in flight. The original
//! call still fails, with [`ClientError::Unauthorized`].

use std::sync::Arc;

use reqwest::{Client, Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::state::SessionState;

#[derive(Clone)]
pub struct Gateway {
    base_url: Url,
    http: Client,
    session: Arc<SessionState>,
}

impl Gateway {
    pub fn new(config: &ClientConfig, session: Arc<SessionState>) -> ClientResult<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ClientError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: config.api_base_url.clone(),
            http,
            session,
        })
    }

    pub fn session(&self) -> &Arc<SessionState> {
        &self.session
    }

    /// Append path segments to the base URL, percent-encoding each one.
    pub fn endpoint(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::Config("base URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> ClientResult<T> {
        let body = self.execute(Method::GET, segments, None).await?;
        decode(&body)
    }

    pub async fn post<B, T>(&self, segments: &[&str], payload: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = self
            .execute(Method::POST, segments, Some(to_json(payload)?))
            .await?;
        decode(&body)
    }

    /// POST without a request body.
    pub async fn post_empty<T: DeserializeOwned>(&self, segments: &[&str]) -> ClientResult<T> {
        let body = self.execute(Method::POST, segments, None).await?;
        decode(&body)
    }

    pub async fn put<B, T>(&self, segments: &[&str], payload: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = self
            .execute(Method::PUT, segments, Some(to_json(payload)?))
            .await?;
        decode(&body)
    }

    /// DELETE; any response body is ignored.
    pub async fn delete(&self, segments: &[&str]) -> ClientResult<()> {
        self.execute(Method::DELETE, segments, None).await?;
        Ok(())
    }

    async fn execute(
        &self,
        method: Method,
        segments: &[&str],
        payload: Option<Value>,
    ) -> ClientResult<String> {
        let url = self.endpoint(segments)?;
        let path = url.path().to_string();

        let generation = self.session.generation();
        let mut request = self.http.request(method.clone(), url);
        if let Some(token) = self.session.bearer_token() {
            request = request.bearer_auth(token);
        }
        if let Some(payload) = payload {
            request = request.json(&payload);
        }

        debug!(%method, %path, "Sending backend request");
        let response = request.send().await.inspect_err(|e| {
            debug!(%method, %path, error = %e, "Backend request failed");
        })?;
        let status = response.status();
        let body = response.text().await?;

        if status == StatusCode::UNAUTHORIZED {
            warn!(%method, %path, "Backend rejected credentials");
            self.session.expire(generation);
            return Err(ClientError::Unauthorized { body });
        }

        if !status.is_success() {
            debug!(%method, %path, %status, "Backend returned an error");
            return Err(ClientError::Api { status, body });
        }

        Ok(body)
    }
}

fn to_json<B: Serialize + ?Sized>(payload: &B) -> ClientResult<Value> {
    serde_json::to_value(payload).map_err(|e| ClientError::invalid_request(e.to_string()))
}

fn decode<T: DeserializeOwned>(body: &str) -> ClientResult<T> {
    // Some mutations answer with an empty body.
    let body = if body.trim().is_empty() { "null" } else { body };
    Ok(serde_json::from_str(body)?)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use super::*;
    use crate::storage::{KeyValueStore, MemoryStore, ACCESS_TOKEN_KEY, SESSION_KEYS};
    use crate::test_support::MockBackend;
    use crate::wallet::SessionEvent;

    fn gateway(backend: &MockBackend, store: Arc<MemoryStore>) -> Gateway {
        let session = Arc::new(SessionState::new(store));
        Gateway::new(&backend.config(), session).unwrap()
    }

    #[tokio::test]
    async fn endpoint_appends_encoded_segments() {
        let backend = MockBackend::start().await;
        let gateway = gateway(&backend, Arc::new(MemoryStore::new()));

        let url = gateway.endpoint(&["events", "organizer", "a b/c"]).unwrap();
        assert!(url.path().ends_with("/api/v1/events/organizer/a%20b%2Fc"));
    }

    #[tokio::test]
    async fn attaches_bearer_token_when_persisted() {
        let backend = MockBackend::start().await;
        backend.respond(Method::GET, "/events", 200, json!([]));
        let store = Arc::new(MemoryStore::new());
        let gateway = gateway(&backend, store.clone());

        let _: Vec<Value> = gateway.get(&["events"]).await.unwrap();
        store.set(ACCESS_TOKEN_KEY, "t1").unwrap();
        let _: Vec<Value> = gateway.get(&["events"]).await.unwrap();

        let hits = backend.requests_to(Method::GET, "/events");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].authorization, None);
        assert_eq!(hits[1].authorization.as_deref(), Some("Bearer t1"));
    }

    #[tokio::test]
    async fn unauthorized_tears_down_and_broadcasts() {
        let backend = MockBackend::start().await;
        backend.respond(Method::GET, "/marketplace/listings", 401, json!({ "message": "expired" }));
        let store = Arc::new(MemoryStore::new());
        store
            .set_many(&[("access_token", "t1"), ("user", "{}"), ("wallet", "{}")])
            .unwrap();
        let gateway = gateway(&backend, store.clone());
        let mut events = gateway.session().subscribe();

        let err = gateway
            .get::<Vec<Value>>(&["marketplace", "listings"])
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Unauthorized { .. }));
        for key in SESSION_KEYS {
            assert_eq!(store.get(key), None);
        }
        assert_eq!(events.try_recv().unwrap(), SessionEvent::Expired);
    }

    #[tokio::test]
    async fn error_bodies_are_returned_verbatim() {
        let backend = MockBackend::start().await;
        backend.respond(Method::POST, "/events", 422, json!({ "message": "title required" }));
        let gateway = gateway(&backend, Arc::new(MemoryStore::new()));

        let err = gateway
            .post::<_, Value>(&["events"], &json!({}))
            .await
            .unwrap_err();

        match err {
            ClientError::Api { status, body } => {
                assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
                assert_eq!(
                    serde_json::from_str::<Value>(&body).unwrap(),
                    json!({ "message": "title required" })
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn slow_backend_surfaces_timeout() {
        let backend = MockBackend::start().await;
        backend.respond_after(
            Duration::from_secs(2),
            Method::GET,
            "/events",
            200,
            json!([]),
        );
        let session = Arc::new(SessionState::new(Arc::new(MemoryStore::new())));
        let config = backend
            .config()
            .with_request_timeout(Duration::from_millis(100));
        let gateway = Gateway::new(&config, session).unwrap();

        let err = gateway.get::<Vec<Value>>(&["events"]).await.unwrap_err();
        assert!(matches!(err, ClientError::Timeout));
    }

    #[tokio::test]
    async fn mismatched_body_is_a_decode_error() {
        let backend = MockBackend::start().await;
        backend.respond(Method::GET, "/events", 200, json!({ "not": "a list" }));
        let gateway = gateway(&backend, Arc::new(MemoryStore::new()));

        let err = gateway.get::<Vec<Value>>(&["events"]).await.unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_transport_error() {
        let config = ClientConfig::default()
            .with_base_url(Url::parse("http://127.0.0.1:9/api/v1").unwrap())
            .with_request_timeout(Duration::from_secs(2));
        let session = Arc::new(SessionState::new(Arc::new(MemoryStore::new())));
        let gateway = Gateway::new(&config, session).unwrap();

        let err = gateway.get::<Vec<Value>>(&["events"]).await.unwrap_err();
        assert!(matches!(err, ClientError::Transport(_) | ClientError::Timeout));
    }

    #[tokio::test]
    async fn late_unauthorized_for_an_old_token_keeps_the_new_session() {
        let backend = MockBackend::start().await;
        backend.respond(Method::POST, "/users", 409, json!({}));
        backend.respond(
            Method::POST,
            "/auth/login",
            200,
            json!({ "access_token": "t1", "user": { "id": "u1" } }),
        );
        backend.respond_after(
            Duration::from_millis(400),
            Method::GET,
            "/events",
            401,
            json!({ "message": "jwt expired" }),
        );
        let store = Arc::new(MemoryStore::new());
        let client = crate::client::NftixClient::with_store(backend.config(), store.clone()).unwrap();
        client.wallet().connect("sui").await.unwrap();

        let stale = {
            let client = client.clone();
            tokio::spawn(async move { client.events().list().await })
        };
        while backend.requests_to(Method::GET, "/events").is_empty() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        client.wallet().disconnect();
        backend.respond(
            Method::POST,
            "/auth/login",
            200,
            json!({ "access_token": "t2", "user": { "id": "u1" } }),
        );
        client.wallet().connect("sui").await.unwrap();

        let err = stale.await.unwrap().unwrap_err();
        assert!(matches!(err, ClientError::Unauthorized { .. }));

        let hit = &backend.requests_to(Method::GET, "/events")[0];
        assert_eq!(hit.authorization.as_deref(), Some("Bearer t1"));
        assert_eq!(
            client.wallet().state(),
            crate::wallet::ConnectionState::Connected
        );
        assert_eq!(store.get(ACCESS_TOKEN_KEY), Some("t2".to_string()));
    }
}
