use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::cipher::EncryptedInput;
use crate::cpi::{CoprocessorAlgebra, EntropyOracleClient, PdaAuthorizations, VaultReserve};
use crate::error::SwapError;
use crate::state::{ConfidentialBalance, SwapAuthorization, SwapConfig};
use crate::swap::SwapExecution;

/// Spend a fulfilled authorization: debit the confidential balance by
/// `input` and pay out reserve tokens
#[derive(Accounts)]
#[instruction(request_id: u64)]
pub struct Swap<'info> {
    #[account(
        seeds = [SwapConfig::SEED],
        bump = config.bump
    )]
    pub config: Account<'info, SwapConfig>,

    /// Created on first use; swapping from an empty balance wraps it
    #[account(
        init_if_needed,
        payer = user,
        space = ConfidentialBalance::SIZE,
        seeds = [ConfidentialBalance::SEED, user.key().as_ref()],
        bump
    )]
    pub balance: Account<'info, ConfidentialBalance>,

    /// CHECK: Authorization PDA, may be absent (then the swap is rejected)
    #[account(
        mut,
        seeds = [SwapAuthorization::SEED, &request_id.to_le_bytes()],
        bump
    )]
    pub authorization: UncheckedAccount<'info>,

    /// CHECK: Entropy oracle program from config
    #[account(address = config.entropy_oracle @ SwapError::InvalidProgram)]
    pub entropy_oracle: UncheckedAccount<'info>,

    /// CHECK: Oracle request account; owner, provider and sequence checked by the
    /// oracle client, and it must be the one the authorization was issued with
    pub entropy_request: UncheckedAccount<'info>,

    /// CHECK: Ciphertext coprocessor program from config
    #[account(address = config.coprocessor @ SwapError::InvalidProgram)]
    pub coprocessor: UncheckedAccount<'info>,

    #[account(
        mut,
        address = config.reserve_vault @ SwapError::InvalidVault
    )]
    pub reserve_vault: Account<'info, TokenAccount>,

    /// User's reserve asset token account, receives the payout
    #[account(
        mut,
        constraint = user_token_account.mint == config.reserve_mint @ SwapError::InvalidVault,
        constraint = user_token_account.owner == user.key() @ SwapError::Unauthorized
    )]
    pub user_token_account: Account<'info, TokenAccount>,

    #[account(mut)]
    pub user: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<Swap>, request_id: u64, input: EncryptedInput) -> Result<()> {
    let user = ctx.accounts.user.key();
    let config_key = ctx.accounts.config.key();
    let config_bump = ctx.accounts.config.bump;
    let config_info = ctx.accounts.config.to_account_info();
    let coprocessor_info = ctx.accounts.coprocessor.to_account_info();
    let oracle_info = ctx.accounts.entropy_oracle.to_account_info();
    let request_info = ctx.accounts.entropy_request.to_account_info();
    let authorization_info = ctx.accounts.authorization.to_account_info();
    let user_info = ctx.accounts.user.to_account_info();
    let token_program_info = ctx.accounts.token_program.to_account_info();

    let mut algebra = CoprocessorAlgebra {
        coprocessor_program: &coprocessor_info,
        executor: &config_info,
        executor_bump: config_bump,
    };
    let oracle = EntropyOracleClient {
        oracle_program: &oracle_info,
        provider: ctx.accounts.config.entropy_provider,
        request: &request_info,
        submit: None,
    };
    let mut authorizations = PdaAuthorizations {
        authorization: &authorization_info,
        payer: &user_info,
        entropy_request: Some(request_info.key()),
        creation: None,
    };
    let mut reserve = VaultReserve {
        vault: &ctx.accounts.reserve_vault,
        recipient: &ctx.accounts.user_token_account,
        vault_authority: &config_info,
        authority_bump: config_bump,
        token_program: &token_program_info,
    };

    let balance = &mut ctx.accounts.balance;
    balance.open_if_needed(user, ctx.bumps.balance);

    let receipt = SwapExecution {
        config: &ctx.accounts.config,
        algebra: &mut algebra,
        oracle: &oracle,
        authorizations: &mut authorizations,
        reserve: &mut reserve,
        reserve_holder: config_key,
    }
    .execute(balance, request_id, &input, &user)?;

    msg!(
        "Swap {} executed for {}: payout {}",
        receipt.request_id,
        user,
        receipt.payout
    );

    Ok(())
}
