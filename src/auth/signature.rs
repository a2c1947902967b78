// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Placeholder login signature.
//!
//! **Not a cryptographic proof.** The backend's login endpoint expects a
//! wallet signature, but no wallet integration exists yet, so the client
//! sends an opaque nonce instead: `auth_<unix millis>_<9 base-36 chars>`.

use std::fmt;

use chrono::Utc;
use rand::Rng;

const NONCE_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const NONCE_LEN: usize = 9;

/// Locally generated stand-in for a wallet signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockSignature(String);

impl MockSignature {
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let suffix: String = (0..NONCE_LEN)
            .map(|_| NONCE_ALPHABET[rng.gen_range(0..NONCE_ALPHABET.len())] as char)
            .collect();
        Self(format!("auth_{}_{}", Utc::now().timestamp_millis(), suffix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MockSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
