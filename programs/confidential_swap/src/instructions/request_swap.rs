use anchor_lang::prelude::*;

use crate::cpi::{
    AuthorizationCreation, EntropyOracleClient, EntropySubmitAccounts, PdaAuthorizations,
};
use crate::error::SwapError;
use crate::state::{SwapAuthorization, SwapConfig};
use crate::swap;

/// Pay for an entropy request and receive a single-use swap authorization
///
/// `request_id` is the id the client expects the oracle to assign (provider
/// sequence + 1). It only locates the authorization PDA; the id actually
/// recorded is the one the oracle returns.
#[derive(Accounts)]
#[instruction(request_id: u64)]
pub struct RequestSwap<'info> {
    #[account(
        mut,
        seeds = [SwapConfig::SEED],
        bump = config.bump
    )]
    pub config: Account<'info, SwapConfig>,

    /// CHECK: Entropy oracle program from config
    #[account(address = config.entropy_oracle @ SwapError::InvalidProgram)]
    pub entropy_oracle: UncheckedAccount<'info>,

    /// CHECK: Oracle provider account from config, parsed by the oracle client
    #[account(
        mut,
        address = config.entropy_provider @ SwapError::InvalidEntropyAccount
    )]
    pub entropy_provider: UncheckedAccount<'info>,

    /// CHECK: Oracle request account, created by the oracle program
    #[account(mut)]
    pub entropy_request: UncheckedAccount<'info>,

    /// CHECK: Authorization PDA, created in the handler once the oracle id is known
    #[account(
        mut,
        seeds = [SwapAuthorization::SEED, &request_id.to_le_bytes()],
        bump
    )]
    pub authorization: UncheckedAccount<'info>,

    #[account(mut)]
    pub user: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<RequestSwap>, request_id: u64, payment: u64) -> Result<()> {
    let user = ctx.accounts.user.key();
    let oracle_info = ctx.accounts.entropy_oracle.to_account_info();
    let provider_info = ctx.accounts.entropy_provider.to_account_info();
    let request_info = ctx.accounts.entropy_request.to_account_info();
    let authorization_info = ctx.accounts.authorization.to_account_info();
    let user_info = ctx.accounts.user.to_account_info();
    let system_info = ctx.accounts.system_program.to_account_info();

    let mut oracle = EntropyOracleClient {
        oracle_program: &oracle_info,
        provider: ctx.accounts.config.entropy_provider,
        request: &request_info,
        submit: Some(EntropySubmitAccounts {
            provider: &provider_info,
            payer: &user_info,
            system_program: &system_info,
        }),
    };
    let mut authorizations = PdaAuthorizations {
        authorization: &authorization_info,
        payer: &user_info,
        entropy_request: Some(request_info.key()),
        creation: Some(AuthorizationCreation {
            system_program: &system_info,
            rent_exempt_minimum: Rent::get()?.minimum_balance(SwapAuthorization::SIZE),
            now: Clock::get()?.unix_timestamp,
        }),
    };

    let assigned = swap::create_request(
        &mut ctx.accounts.config,
        &mut oracle,
        &mut authorizations,
        &user,
        payment,
    )?;
    require!(assigned == request_id, SwapError::RequestIdMismatch);

    msg!("Swap requested by {}: request id {}", user, assigned);

    Ok(())
}
