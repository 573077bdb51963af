use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::cpi::{parse_oracle_account, EntropyProviderData};
use crate::error::SwapError;
use crate::state::{SwapConfig, DEFAULT_EXCHANGE_RATE};

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(
        init,
        payer = authority,
        space = SwapConfig::SIZE,
        seeds = [SwapConfig::SEED],
        bump
    )]
    pub config: Account<'info, SwapConfig>,

    /// Mint of the public reserve asset
    pub reserve_mint: Account<'info, Mint>,

    /// Reserve vault, owned by the config PDA
    #[account(
        init,
        payer = authority,
        seeds = [SwapConfig::VAULT_SEED, reserve_mint.key().as_ref()],
        bump,
        token::mint = reserve_mint,
        token::authority = config
    )]
    pub reserve_vault: Account<'info, TokenAccount>,

    /// CHECK: Entropy oracle program, must be executable
    #[account(constraint = entropy_oracle.executable @ SwapError::InvalidProgram)]
    pub entropy_oracle: UncheckedAccount<'info>,

    /// CHECK: Oracle provider account, owner and layout checked in handler
    #[account(
        constraint = entropy_provider.owner == &entropy_oracle.key() @ SwapError::InvalidEntropyAccount
    )]
    pub entropy_provider: UncheckedAccount<'info>,

    /// CHECK: Ciphertext coprocessor program, must be executable
    #[account(constraint = coprocessor.executable @ SwapError::InvalidProgram)]
    pub coprocessor: UncheckedAccount<'info>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<Initialize>, exchange_rate: Option<u64>) -> Result<()> {
    let exchange_rate = exchange_rate.unwrap_or(DEFAULT_EXCHANGE_RATE);
    require!(
        SwapConfig::validate_exchange_rate(exchange_rate),
        SwapError::InvalidExchangeRate
    );

    // Fail early on a provider account the oracle client could not read
    let provider: EntropyProviderData = parse_oracle_account(
        &ctx.accounts.entropy_provider.try_borrow_data()?,
        EntropyProviderData::ACCOUNT_NAME,
    )?;

    let config = &mut ctx.accounts.config;
    config.authority = ctx.accounts.authority.key();
    config.entropy_oracle = ctx.accounts.entropy_oracle.key();
    config.entropy_provider = ctx.accounts.entropy_provider.key();
    config.coprocessor = ctx.accounts.coprocessor.key();
    config.reserve_mint = ctx.accounts.reserve_mint.key();
    config.reserve_vault = ctx.accounts.reserve_vault.key();
    config.exchange_rate = exchange_rate;
    config.request_count = 0;
    config.bump = ctx.bumps.config;
    config.vault_bump = ctx.bumps.reserve_vault;

    msg!(
        "Swap initialized: exchange rate {}, reserve mint {}",
        exchange_rate,
        config.reserve_mint
    );
    msg!(
        "Entropy oracle {} (fee {} lamports), coprocessor {}",
        config.entropy_oracle,
        provider.fee_lamports,
        config.coprocessor
    );

    Ok(())
}
