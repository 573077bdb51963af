use anchor_lang::prelude::*;

use crate::cipher::EncryptedInput;
use crate::cpi::CoprocessorAlgebra;
use crate::error::SwapError;
use crate::state::{ConfidentialBalance, SwapConfig};
use crate::swap;

/// Credit an externally encrypted amount to the signer's confidential balance
#[derive(Accounts)]
pub struct Deposit<'info> {
    #[account(
        seeds = [SwapConfig::SEED],
        bump = config.bump
    )]
    pub config: Account<'info, SwapConfig>,

    #[account(
        init_if_needed,
        payer = user,
        space = ConfidentialBalance::SIZE,
        seeds = [ConfidentialBalance::SEED, user.key().as_ref()],
        bump
    )]
    pub balance: Account<'info, ConfidentialBalance>,

    /// CHECK: Ciphertext coprocessor program from config
    #[account(address = config.coprocessor @ SwapError::InvalidProgram)]
    pub coprocessor: UncheckedAccount<'info>,

    #[account(mut)]
    pub user: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<Deposit>, input: EncryptedInput) -> Result<()> {
    let user = ctx.accounts.user.key();
    let config_info = ctx.accounts.config.to_account_info();
    let coprocessor_info = ctx.accounts.coprocessor.to_account_info();

    let balance = &mut ctx.accounts.balance;
    balance.open_if_needed(user, ctx.bumps.balance);

    let mut algebra = CoprocessorAlgebra {
        coprocessor_program: &coprocessor_info,
        executor: &config_info,
        executor_bump: ctx.accounts.config.bump,
    };
    swap::deposit(&mut algebra, balance, &input, &user)?;

    msg!("Confidential deposit for {}", user);

    #[cfg(feature = "debug")]
    msg!("Balance handle: {:?}", balance.read().handle);

    Ok(())
}
