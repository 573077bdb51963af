use anchor_lang::prelude::*;

/// Exchange rate used when `initialize` is called without one
pub const DEFAULT_EXCHANGE_RATE: u64 = 1;

/// Global swap configuration account
/// Written once by `initialize`; only `request_count` changes afterwards
#[account]
#[derive(Default)]
pub struct SwapConfig {
    /// Deployer of this swap instance
    pub authority: Pubkey,

    /// Entropy oracle program (request/fulfillment service)
    pub entropy_oracle: Pubkey,

    /// Oracle provider account holding the current fee and sequence
    pub entropy_provider: Pubkey,

    /// Ciphertext coprocessor program (homomorphic algebra)
    pub coprocessor: Pubkey,

    /// Mint of the public reserve asset paid out by swaps
    pub reserve_mint: Pubkey,

    /// Reserve vault token account (authority = this config PDA)
    pub reserve_vault: Pubkey,

    /// Reserve-asset units per confidential unit, fixed at initialization
    pub exchange_rate: u64,

    /// Total swap authorizations ever issued
    pub request_count: u64,

    /// PDA bump seed
    pub bump: u8,

    /// Reserve vault PDA bump seed
    pub vault_bump: u8,
}

impl SwapConfig {
    pub const SIZE: usize = 8 + // discriminator
        32 + // authority
        32 + // entropy_oracle
        32 + // entropy_provider
        32 + // coprocessor
        32 + // reserve_mint
        32 + // reserve_vault
        8 +  // exchange_rate
        8 +  // request_count
        1 +  // bump
        1;   // vault_bump
    // Total: 218 bytes

    pub const SEED: &'static [u8] = b"swap_config";
    pub const VAULT_SEED: &'static [u8] = b"reserve_vault";

    pub fn validate_exchange_rate(exchange_rate: u64) -> bool {
        exchange_rate > 0
    }
}
