//! Reserve asset integration
//!
//! The public reserve is a plain SPL token vault whose authority is the swap
//! config PDA. Anyone can fund it with an ordinary transfer; only swaps draw
//! it down.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, TokenAccount, Transfer};

use crate::error::SwapError;
use crate::state::SwapConfig;

/// Client view of the public reserve asset
pub trait ReserveAsset {
    fn balance_of(&self, holder: &Pubkey) -> Result<u64>;

    fn transfer(&mut self, to: &Pubkey, amount: u64) -> Result<()>;
}

/// Reserve vault owned by the config PDA
pub struct VaultReserve<'a, 'info> {
    /// Reserve vault token account
    pub vault: &'a Account<'info, TokenAccount>,
    /// Payout destination token account (same mint as the vault)
    pub recipient: &'a Account<'info, TokenAccount>,
    /// Config PDA, vault authority
    pub vault_authority: &'a AccountInfo<'info>,
    /// Config PDA bump
    pub authority_bump: u8,
    /// SPL token program (checked by the instruction accounts)
    pub token_program: &'a AccountInfo<'info>,
}

impl ReserveAsset for VaultReserve<'_, '_> {
    fn balance_of(&self, holder: &Pubkey) -> Result<u64> {
        require_keys_eq!(self.vault.owner, *holder, SwapError::InvalidVault);
        Ok(self.vault.amount)
    }

    fn transfer(&mut self, to: &Pubkey, amount: u64) -> Result<()> {
        require_keys_eq!(self.recipient.owner, *to, SwapError::Unauthorized);
        require_keys_eq!(self.recipient.mint, self.vault.mint, SwapError::InvalidVault);

        let seeds = &[SwapConfig::SEED, &[self.authority_bump]];
        let signer_seeds = &[&seeds[..]];

        let cpi_accounts = Transfer {
            from: self.vault.to_account_info(),
            to: self.recipient.to_account_info(),
            authority: self.vault_authority.clone(),
        };
        let cpi_program = self.token_program.clone();
        let cpi_ctx = CpiContext::new_with_signer(cpi_program, cpi_accounts, signer_seeds);
        token::transfer(cpi_ctx, amount)
    }
}
