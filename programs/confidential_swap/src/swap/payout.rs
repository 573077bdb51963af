//! Swap payout quote
//!
//! The payout does not depend on the swapped ciphertext: every swap pays a
//! fixed number of reserve units scaled by the configured exchange rate. A
//! conversion of the actual encrypted magnitude would replace `quote_payout`.

use anchor_lang::prelude::*;

use crate::error::SwapError;
use crate::state::SwapConfig;

/// Reserve base units paid per swap at an exchange rate of 1
pub const PLACEHOLDER_PAYOUT_UNITS: u64 = 100;

/// Reserve-asset units owed for one swap
pub fn quote_payout(config: &SwapConfig) -> Result<u64> {
    PLACEHOLDER_PAYOUT_UNITS
        .checked_mul(config.exchange_rate)
        .ok_or_else(|| error!(SwapError::ArithmeticOverflow))
}
