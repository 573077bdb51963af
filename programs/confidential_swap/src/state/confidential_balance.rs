use anchor_lang::prelude::*;

use crate::cipher::ConfidentialAmount;

/// Encrypted balance of one account in the confidential ledger
///
/// Created on first use and never closed. An unset handle is an implicit
/// zero balance.
#[account]
#[derive(Default)]
pub struct ConfidentialBalance {
    /// Account this balance belongs to
    pub owner: Pubkey,
    /// Encrypted balance (readable by the executor and the owner)
    pub balance: ConfidentialAmount,
    /// PDA bump
    pub bump: u8,
}

impl ConfidentialBalance {
    pub const SIZE: usize = 8 +  // discriminator
        32 + // owner
        ConfidentialAmount::SIZE + // balance
        1;   // bump
    // Total: 205 bytes

    pub const SEED: &'static [u8] = b"confidential_balance";

    /// Fill in identity fields the first time the account is touched
    pub fn open_if_needed(&mut self, owner: Pubkey, bump: u8) {
        if self.owner == Pubkey::default() {
            self.owner = owner;
            self.bump = bump;
        }
    }
}
