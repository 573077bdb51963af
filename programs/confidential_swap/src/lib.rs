//! Confidential swap program
//!
//! Users hold encrypted balances in a confidential ledger and swap them for a
//! public reserve token. Every swap is gated by a single-use authorization
//! that only becomes spendable once an external entropy oracle has fulfilled
//! the request backing it.
//!
//! Flow:
//! 1. `deposit` credits a client-encrypted amount to the user's balance
//! 2. `request_swap` pays the oracle fee and records the authorization
//! 3. the oracle fulfils the request (out of band)
//! 4. `swap` consumes the authorization, debits the balance and pays out

use anchor_lang::prelude::*;

pub mod cipher;
pub mod cpi;
pub mod error;
pub mod instructions;
pub mod state;
pub mod swap;

use cipher::{ConfidentialAmount, EncryptedInput};
use instructions::*;

declare_id!("6VPeyDE95fURPNyagFuSJCY9ws1QFATUCtzux4JX7xiT");

#[program]
pub mod confidential_swap {
    use super::*;

    /// Create the swap config and reserve vault
    pub fn initialize(ctx: Context<Initialize>, exchange_rate: Option<u64>) -> Result<()> {
        instructions::initialize::handler(ctx, exchange_rate)
    }

    /// Credit an encrypted amount to the caller's confidential balance
    pub fn deposit(ctx: Context<Deposit>, input: EncryptedInput) -> Result<()> {
        instructions::deposit::handler(ctx, input)
    }

    /// Pay for an entropy request and obtain a swap authorization
    pub fn request_swap(ctx: Context<RequestSwap>, request_id: u64, payment: u64) -> Result<()> {
        instructions::request_swap::handler(ctx, request_id, payment)
    }

    /// Swap an encrypted amount for reserve tokens once the request is fulfilled
    pub fn swap(ctx: Context<Swap>, request_id: u64, input: EncryptedInput) -> Result<()> {
        instructions::swap::handler(ctx, request_id, input)
    }

    /// Give up an unused swap authorization
    pub fn cancel_swap_request(ctx: Context<CancelSwapRequest>, request_id: u64) -> Result<()> {
        instructions::cancel_swap_request::handler(ctx, request_id)
    }

    /// Stored ciphertext for `owner` (no decryption)
    pub fn get_encrypted_balance(
        ctx: Context<GetEncryptedBalance>,
        owner: Pubkey,
    ) -> Result<ConfidentialAmount> {
        instructions::views::get_encrypted_balance(ctx, owner)
    }

    /// Configured entropy oracle program
    pub fn get_entropy_oracle(ctx: Context<GetEntropyOracle>) -> Result<Pubkey> {
        instructions::views::get_entropy_oracle(ctx)
    }
}
