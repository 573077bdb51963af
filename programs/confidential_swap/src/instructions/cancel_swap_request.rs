use anchor_lang::prelude::*;

use crate::cpi::PdaAuthorizations;
use crate::state::SwapAuthorization;
use crate::swap;

/// Close an unused swap authorization. Rent goes back to the requester; the
/// oracle fee does not.
#[derive(Accounts)]
#[instruction(request_id: u64)]
pub struct CancelSwapRequest<'info> {
    /// CHECK: Authorization PDA, holder checked by the lifecycle
    #[account(
        mut,
        seeds = [SwapAuthorization::SEED, &request_id.to_le_bytes()],
        bump
    )]
    pub authorization: UncheckedAccount<'info>,

    #[account(mut)]
    pub user: Signer<'info>,
}

pub fn handler(ctx: Context<CancelSwapRequest>, request_id: u64) -> Result<()> {
    let user = ctx.accounts.user.key();
    let authorization_info = ctx.accounts.authorization.to_account_info();
    let user_info = ctx.accounts.user.to_account_info();

    let mut authorizations = PdaAuthorizations {
        authorization: &authorization_info,
        payer: &user_info,
        entropy_request: None,
        creation: None,
    };
    swap::cancel_request(&mut authorizations, request_id, &user)?;

    msg!("Swap request {} cancelled by {}", request_id, user);

    Ok(())
}
