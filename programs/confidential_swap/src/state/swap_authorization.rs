//! Swap Authorization State
//!
//! Single-use right to execute one swap, created together with an entropy
//! request and closed when the swap consumes it.

use anchor_lang::prelude::*;

/// Live authorization for the swap gated by oracle request `request_id`
///
/// Seeds: ["swap_authorization", request_id.to_le_bytes()]
#[account]
pub struct SwapAuthorization {
    /// Oracle-assigned request id
    pub request_id: u64,
    /// Only identity allowed to consume this authorization
    pub requester: Pubkey,
    /// Oracle request account whose fulfillment gates this authorization
    pub entropy_request: Pubkey,
    /// Unix timestamp of the entropy request
    pub created_at: i64,
    /// PDA bump
    pub bump: u8,
}

impl SwapAuthorization {
    pub const SIZE: usize = 8 + // discriminator
        8 +  // request_id
        32 + // requester
        32 + // entropy_request
        8 +  // created_at
        1;   // bump

    pub const SEED: &'static [u8] = b"swap_authorization";

    pub fn address(request_id: u64) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[Self::SEED, &request_id.to_le_bytes()], &crate::ID)
    }
}
