//! Swap Orchestrator
//!
//! Composes the ledger, the request lifecycle and the reserve asset into the
//! two public operations:
//! - `deposit`: ingest a user ciphertext and credit it
//! - `SwapExecution::execute`: consume an authorization, debit, pay out
//!
//! Swap ordering is: authorization -> ingest -> debit -> quote -> liquidity
//! check -> transfer. The liquidity check comes after the debit, so a swap
//! rejected for liquidity has already debited the ledger and spent the
//! authorization by the time it fails. On-chain the failed transaction is
//! rolled back as a whole; callers running this engine elsewhere must roll
//! back themselves.

use anchor_lang::prelude::*;

use super::lifecycle::{consume_request, AuthorizationRegistry};
use super::payout::quote_payout;
use crate::cipher::{CiphertextAlgebra, CiphertextHandle, ConfidentialAmount, EncryptedInput};
use crate::cpi::{EntropyOracle, ReserveAsset};
use crate::error::SwapError;
use crate::state::{ConfidentialBalance, SwapConfig};

/// Event emitted when a ciphertext is credited to a confidential balance
#[event]
pub struct ConfidentialDeposit {
    pub user: Pubkey,
    /// Handle only - the amount stays encrypted
    pub encrypted_amount: CiphertextHandle,
}

/// Event emitted when a swap pays out
#[event]
pub struct SwapCompleted {
    pub user: Pubkey,
    /// Handle of the debited ciphertext
    pub encrypted_amount: CiphertextHandle,
    /// Public reserve units transferred
    pub payout: u64,
}

/// Outcome of a successful swap
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SwapReceipt {
    pub request_id: u64,
    pub encrypted_amount: ConfidentialAmount,
    pub payout: u64,
}

/// Import a user ciphertext and share it with the executor
fn ingest<A: CiphertextAlgebra>(
    algebra: &mut A,
    input: &EncryptedInput,
    caller: &Pubkey,
) -> Result<ConfidentialAmount> {
    let imported = algebra.import_external(input, caller)?;
    let executor = algebra.executor();
    algebra.allow(&imported, &executor)
}

/// Credit an externally encrypted amount to the caller's balance
pub fn deposit<A: CiphertextAlgebra>(
    algebra: &mut A,
    balance: &mut ConfidentialBalance,
    input: &EncryptedInput,
    caller: &Pubkey,
) -> Result<ConfidentialAmount> {
    require_keys_eq!(balance.owner, *caller, SwapError::Unauthorized);

    let amount = ingest(algebra, input, caller)?;
    balance.credit(algebra, &amount)?;

    emit!(ConfidentialDeposit {
        user: *caller,
        encrypted_amount: amount.handle,
    });

    Ok(amount)
}

/// Collaborators for one swap
pub struct SwapExecution<'a, A, O, R, V> {
    pub config: &'a SwapConfig,
    pub algebra: &'a mut A,
    pub oracle: &'a O,
    pub authorizations: &'a mut R,
    pub reserve: &'a mut V,
    /// Holder of the reserve liquidity (the swap config PDA)
    pub reserve_holder: Pubkey,
}

impl<A, O, R, V> SwapExecution<'_, A, O, R, V>
where
    A: CiphertextAlgebra,
    O: EntropyOracle,
    R: AuthorizationRegistry,
    V: ReserveAsset,
{
    pub fn execute(
        self,
        balance: &mut ConfidentialBalance,
        request_id: u64,
        input: &EncryptedInput,
        caller: &Pubkey,
    ) -> Result<SwapReceipt> {
        require_keys_eq!(balance.owner, *caller, SwapError::Unauthorized);

        consume_request(self.oracle, self.authorizations, request_id, caller)?;

        let amount = ingest(self.algebra, input, caller)?;
        balance.debit(self.algebra, &amount)?;

        let payout = quote_payout(self.config)?;
        let available = self.reserve.balance_of(&self.reserve_holder)?;
        require!(available >= payout, SwapError::InsufficientLiquidity);

        self.reserve.transfer(caller, payout)?;

        emit!(SwapCompleted {
            user: *caller,
            encrypted_amount: amount.handle,
            payout,
        });

        Ok(SwapReceipt {
            request_id,
            encrypted_amount: amount,
            payout,
        })
    }
}
