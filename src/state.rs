// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Shared session state.
//!
//! Both the wallet controller and the request gateway hold an
//! `Arc<SessionState>`. Every mutation of the session (establishing it,
//! restoring it, tearing it down) goes through the methods here, so the
//! persisted keys and the in-memory session always move together.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::error::{ClientError, ClientResult};
use crate::models::AuthSession;
use crate::storage::{
    KeyValueStore, StorageError, ACCESS_TOKEN_KEY, SESSION_KEYS, USER_KEY, WALLET_KEY,
};
use crate::wallet::{ConnectionState, SessionEvent, WalletSession};

const EVENT_CHANNEL_CAPACITY: usize = 16;

struct Inner {
    wallet: WalletSession,
    phase: ConnectionState,
    // Bumped by every connect attempt and every teardown. Work started under
    // an older value (a connect, an authenticated request) must not change
    // the session when it completes.
    generation: u64,
}

pub struct SessionState {
    store: Arc<dyn KeyValueStore>,
    inner: Mutex<Inner>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionState {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            store,
            inner: Mutex::new(Inner {
                wallet: WalletSession::default(),
                phase: ConnectionState::Disconnected,
                generation: 0,
            }),
            events,
        }
    }

    /// Token to present on outgoing requests, read fresh from the store.
    pub fn bearer_token(&self) -> Option<String> {
        self.store
            .get(ACCESS_TOKEN_KEY)
            .filter(|token| !token.trim().is_empty())
    }

    pub fn phase(&self) -> ConnectionState {
        self.lock().phase
    }

    pub fn wallet(&self) -> WalletSession {
        self.lock().wallet.clone()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Current generation, captured by callers before starting work whose
    /// outcome depends on the session staying the same.
    pub(crate) fn generation(&self) -> u64 {
        self.lock().generation
    }

    /// Move `Disconnected → Connecting`, returning the attempt's generation.
    pub(crate) fn begin_connect(&self) -> ClientResult<u64> {
        let mut inner = self.lock();
        match inner.phase {
            ConnectionState::Connecting => Err(ClientError::ConnectInProgress),
            ConnectionState::Connected => Err(ClientError::AlreadyConnected),
            ConnectionState::Disconnected => {
                inner.phase = ConnectionState::Connecting;
                inner.generation += 1;
                Ok(inner.generation)
            }
        }
    }

    /// Persist a successful exchange and move `Connecting → Connected`.
    ///
    /// If the store rejects the write the attempt ends `Disconnected` and
    /// the storage error is returned.
    pub(crate) fn complete_connect(
        &self,
        generation: u64,
        wallet: WalletSession,
        auth: &AuthSession,
    ) -> ClientResult<WalletSession> {
        let wallet_json = serde_json::to_string(&wallet)?;
        let user_json = serde_json::to_string(&auth.user)?;

        let mut inner = self.lock();
        if inner.generation != generation || inner.phase != ConnectionState::Connecting {
            return Err(ClientError::ConnectAborted);
        }

        let persisted = self.store.set_many(&[
            (WALLET_KEY, wallet_json.as_str()),
            (ACCESS_TOKEN_KEY, auth.token.as_str()),
            (USER_KEY, user_json.as_str()),
        ]);
        if let Err(e) = persisted {
            self.clear_store();
            inner.wallet = WalletSession::default();
            inner.phase = ConnectionState::Disconnected;
            return Err(e.into());
        }

        inner.wallet = wallet.clone();
        inner.phase = ConnectionState::Connected;
        drop(inner);

        info!(address = %wallet.address, wallet_type = %wallet.wallet_type, "Wallet connected");
        self.emit(SessionEvent::Connected {
            address: wallet.address.clone(),
        });
        Ok(wallet)
    }

    /// Roll a failed attempt back to `Disconnected`.
    ///
    /// No-op if the attempt was already superseded by a teardown or a newer
    /// connect.
    pub(crate) fn abort_connect(&self, generation: u64) {
        let mut inner = self.lock();
        if inner.generation != generation || inner.phase != ConnectionState::Connecting {
            return;
        }

        self.clear_store();
        inner.wallet = WalletSession::default();
        inner.phase = ConnectionState::Disconnected;
        debug!(generation, "Connect attempt rolled back");
    }

    /// Restore the session from the store, or clear whatever partial or
    /// unreadable state is there.
    pub(crate) fn rehydrate(&self) -> ConnectionState {
        let mut inner = self.lock();
        if inner.phase == ConnectionState::Connecting {
            debug!("Skipping rehydrate while a connect is in flight");
            return inner.phase;
        }

        let token = self.store.get(ACCESS_TOKEN_KEY);
        let user = self.store.get(USER_KEY);
        let wallet = self.store.get(WALLET_KEY);
        let nothing_persisted = token.is_none() && user.is_none() && wallet.is_none();
        let was = inner.phase;

        match WalletSession::from_persisted(token.as_deref(), user.as_deref(), wallet.as_deref()) {
            Ok(session) => {
                let address = session.address.clone();
                let changed = was != ConnectionState::Connected || inner.wallet != session;
                inner.wallet = session;
                inner.phase = ConnectionState::Connected;
                drop(inner);

                if changed {
                    info!(%address, "Wallet session restored");
                    self.emit(SessionEvent::Connected { address });
                }
                ConnectionState::Connected
            }
            Err(reason) => {
                if nothing_persisted {
                    debug!("No persisted wallet session");
                } else {
                    warn!(%reason, "Discarding persisted wallet session");
                }
                // Also drops a store file that no longer parses.
                self.clear_store();
                inner.wallet = WalletSession::default();
                inner.phase = ConnectionState::Disconnected;
                drop(inner);

                if was == ConnectionState::Connected {
                    self.emit(SessionEvent::Disconnected);
                }
                ConnectionState::Disconnected
            }
        }
    }

    /// User-initiated teardown. Also cancels any in-flight connect.
    pub(crate) fn disconnect(&self) {
        let inner = self.lock();
        self.teardown(inner, TeardownCause::Disconnect);
    }

    /// Teardown after the backend rejected the token of a request started
    /// at `generation`. Ignored if the session has moved on since, so a
    /// late 401 for an old token cannot end a newer session.
    pub(crate) fn expire(&self, generation: u64) -> bool {
        let inner = self.lock();
        if inner.generation != generation {
            debug!(
                generation,
                current = inner.generation,
                "Ignoring unauthorized response for a superseded session"
            );
            return false;
        }
        self.teardown(inner, TeardownCause::Expired);
        true
    }

    /// Clear the persisted keys and the in-memory session.
    ///
    /// An expiry during `Connecting` only clears the store, since there is
    /// no session yet to expire; the attempt itself fails on its own.
    fn teardown(&self, mut inner: MutexGuard<'_, Inner>, cause: TeardownCause) {
        self.clear_store();

        if cause == TeardownCause::Expired && inner.phase == ConnectionState::Connecting {
            debug!("Unauthorized response during connect; stored keys cleared");
            return;
        }

        let was = inner.phase;
        inner.wallet = WalletSession::default();
        inner.phase = ConnectionState::Disconnected;
        inner.generation += 1;
        drop(inner);

        match cause {
            TeardownCause::Disconnect => {
                if was != ConnectionState::Disconnected {
                    info!("Wallet disconnected");
                }
                self.emit(SessionEvent::Disconnected);
            }
            TeardownCause::Expired => {
                warn!("Session expired, local session cleared");
                self.emit(SessionEvent::Expired);
            }
        }
    }

    fn clear_store(&self) {
        match self.store.remove_many(&SESSION_KEYS) {
            Ok(()) => {}
            Err(StorageError::Unavailable(_)) => debug!("No session storage to clear"),
            Err(e) => warn!(error = %e, "Failed to clear persisted session"),
        }
    }

    fn emit(&self, event: SessionEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// What triggered a teardown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TeardownCause {
    Disconnect,
    Expired,
}
