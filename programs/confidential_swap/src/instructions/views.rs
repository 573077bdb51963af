use anchor_lang::prelude::*;

use crate::cipher::ConfidentialAmount;
use crate::state::{ConfidentialBalance, SwapConfig};

#[derive(Accounts)]
#[instruction(owner: Pubkey)]
pub struct GetEncryptedBalance<'info> {
    /// CHECK: Balance PDA of `owner`, may not exist yet
    #[account(
        seeds = [ConfidentialBalance::SEED, owner.as_ref()],
        bump
    )]
    pub balance: UncheckedAccount<'info>,
}

/// Stored ciphertext of `owner`, or the unset (zero) amount
pub fn get_encrypted_balance(
    ctx: Context<GetEncryptedBalance>,
    _owner: Pubkey,
) -> Result<ConfidentialAmount> {
    let info = ctx.accounts.balance.to_account_info();
    if info.data_is_empty() || info.owner != &crate::ID {
        return Ok(ConfidentialAmount::default());
    }

    let data = info.try_borrow_data()?;
    let balance = ConfidentialBalance::try_deserialize(&mut &data[..])?;
    Ok(balance.read().clone())
}

#[derive(Accounts)]
pub struct GetEntropyOracle<'info> {
    #[account(
        seeds = [SwapConfig::SEED],
        bump = config.bump
    )]
    pub config: Account<'info, SwapConfig>,
}

pub fn get_entropy_oracle(ctx: Context<GetEntropyOracle>) -> Result<Pubkey> {
    Ok(ctx.accounts.config.entropy_oracle)
}
