// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Mock wallet address generation.
//!
//! There is no wallet integration: "connecting" invents an address locally.
//! The value looks like an EVM address but is not derived from any key.

use rand::Rng;

use crate::models::WalletAddress;

/// Number of random bytes in a generated address.
const ADDRESS_BYTES: usize = 20;

impl WalletAddress {
    /// Generate a random `0x`-prefixed, 40 hex character address.
    pub fn generate_mock() -> Self {
        let bytes: [u8; ADDRESS_BYTES] = rand::thread_rng().gen();
        let mut address = String::with_capacity(2 + ADDRESS_BYTES * 2);
        address.push_str("0x");
        for byte in bytes {
            address.push_str(&format!("{byte:02x}"));
        }
        WalletAddress(address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_address_shape() {
        let address = WalletAddress::generate_mock();
        let s = address.as_str();
        assert_eq!(s.len(), 42);
        assert!(s.starts_with("0x"));
        assert!(s[2..].chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn generated_addresses_differ() {
        assert_ne!(WalletAddress::generate_mock(), WalletAddress::generate_mock());
    }
}
