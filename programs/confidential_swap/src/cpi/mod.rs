//! Cross-Program Invocation modules for external integrations
//!
//! This module contains clients for:
//! - Entropy oracle (request / fulfillment polling)
//! - Ciphertext coprocessor (homomorphic algebra on encrypted balances)
//! - Reserve asset vault (SPL token balance and payout)
//! - Swap authorization PDAs (created and closed inside instructions)

pub mod authorization;
pub mod coprocessor;
pub mod entropy;
pub mod reserve;

pub use authorization::*;
pub use coprocessor::*;
pub use entropy::*;
pub use reserve::*;

use solana_sha256_hasher::hashv;

/// Anchor instruction discriminator: sha256("global:<name>")[0..8]
pub fn instruction_discriminator(name: &str) -> [u8; 8] {
    discriminator(b"global:", name)
}

/// Anchor account discriminator: sha256("account:<Name>")[0..8]
pub fn account_discriminator(name: &str) -> [u8; 8] {
    discriminator(b"account:", name)
}

fn discriminator(namespace: &[u8], name: &str) -> [u8; 8] {
    let digest = hashv(&[namespace, name.as_bytes()]).to_bytes();
    let mut out = [0u8; 8];
    out.copy_from_slice(&digest[..8]);
    out
}
