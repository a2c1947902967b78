// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Wallet-address authentication against the NFTix backend.
//!
//! ## Auth Flow
//!
//! 1. `POST /users {walletAddress}`: create the user; a conflict means the
//!    wallet is already known and is ignored
//! 2. `POST /auth/login {walletAddress, signature}`: obtain a bearer token
//!    and the user snapshot
//!
//! The signature is a [`MockSignature`], a local nonce standing in for a
//! real wallet signature.

pub mod client;
pub mod signature;

pub use client::AuthClient;
pub use signature::MockSignature;
