//! Swap authorization PDAs
//!
//! The request id is only known once the oracle answers, so the
//! authorization account cannot be an Anchor `init` account. The client
//! derives the PDA from the id it expects; we create it by hand after the
//! oracle CPI and refuse to proceed if the ids disagree.
//!
//! The address is predictable, so anyone can send lamports to it before the
//! request lands. Creation therefore mirrors Anchor's `init`: an untouched
//! address gets `create_account`, a pre-funded one is topped up, allocated
//! and assigned.
//!
//! Each authorization is bound to the oracle request account it was issued
//! with. Fulfillment of any other request account does not unlock it.

use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Allocate, Assign, CreateAccount, Transfer};

use crate::error::SwapError;
use crate::state::SwapAuthorization;
use crate::swap::AuthorizationRegistry;

/// System program steps needed to bring the authorization address to a
/// rent-exempt, program-owned account
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthorizationFunding {
    /// Address holds no lamports: plain `create_account`
    Create { lamports: u64 },
    /// Address was pre-funded: transfer the shortfall, then allocate and assign
    TopUp { shortfall: u64 },
}

pub fn plan_funding(current_lamports: u64, rent_exempt_minimum: u64) -> AuthorizationFunding {
    if current_lamports == 0 {
        AuthorizationFunding::Create {
            lamports: rent_exempt_minimum,
        }
    } else {
        AuthorizationFunding::TopUp {
            shortfall: rent_exempt_minimum.saturating_sub(current_lamports),
        }
    }
}

/// Inputs only `record` needs
pub struct AuthorizationCreation<'a, 'info> {
    pub system_program: &'a AccountInfo<'info>,
    /// Rent-exempt minimum for `SwapAuthorization::SIZE`
    pub rent_exempt_minimum: u64,
    /// Unix timestamp stored as `created_at`
    pub now: i64,
}

/// Registry view over a single authorization PDA
pub struct PdaAuthorizations<'a, 'info> {
    /// Authorization PDA for the request id used in this instruction
    pub authorization: &'a AccountInfo<'info>,
    /// Funds creation, receives rent on close
    pub payer: &'a AccountInfo<'info>,
    /// Oracle request account the authorization must be bound to.
    /// `None` skips the binding (cancellation never looks at the oracle).
    pub entropy_request: Option<Pubkey>,
    /// Only required for `record`
    pub creation: Option<AuthorizationCreation<'a, 'info>>,
}

impl<'a, 'info> PdaAuthorizations<'a, 'info> {
    fn is_address_of(&self, request_id: u64) -> bool {
        SwapAuthorization::address(request_id).0 == self.authorization.key()
    }

    fn is_live(&self) -> bool {
        self.authorization.lamports() > 0
            && !self.authorization.data_is_empty()
            && self.authorization.owner == &crate::ID
    }

    fn fund(
        &self,
        creation: &AuthorizationCreation<'a, 'info>,
        signer_seeds: &[&[&[u8]]],
    ) -> Result<()> {
        let system = creation.system_program.clone();
        let target = self.authorization.clone();
        let space = SwapAuthorization::SIZE as u64;

        match plan_funding(target.lamports(), creation.rent_exempt_minimum) {
            AuthorizationFunding::Create { lamports } => {
                let cpi_ctx = CpiContext::new_with_signer(
                    system,
                    CreateAccount {
                        from: self.payer.clone(),
                        to: target,
                    },
                    signer_seeds,
                );
                system_program::create_account(cpi_ctx, lamports, space, &crate::ID)
            }
            AuthorizationFunding::TopUp { shortfall } => {
                msg!("Authorization address pre-funded, topping up {}", shortfall);
                if shortfall > 0 {
                    let cpi_ctx = CpiContext::new(
                        system.clone(),
                        Transfer {
                            from: self.payer.clone(),
                            to: target.clone(),
                        },
                    );
                    system_program::transfer(cpi_ctx, shortfall)?;
                }

                let cpi_ctx = CpiContext::new_with_signer(
                    system.clone(),
                    Allocate {
                        account_to_allocate: target.clone(),
                    },
                    signer_seeds,
                );
                system_program::allocate(cpi_ctx, space)?;

                let cpi_ctx = CpiContext::new_with_signer(
                    system,
                    Assign {
                        account_to_assign: target,
                    },
                    signer_seeds,
                );
                system_program::assign(cpi_ctx, &crate::ID)
            }
        }
    }
}

impl<'a, 'info> AuthorizationRegistry for PdaAuthorizations<'a, 'info> {
    fn requester_of(&self, request_id: u64) -> Result<Option<Pubkey>> {
        if !self.is_address_of(request_id) || !self.is_live() {
            return Ok(None);
        }

        let data = self.authorization.try_borrow_data()?;
        let authorization = SwapAuthorization::try_deserialize(&mut &data[..])?;
        if authorization.request_id != request_id {
            return Ok(None);
        }
        if let Some(entropy_request) = self.entropy_request {
            if authorization.entropy_request != entropy_request {
                return Ok(None);
            }
        }

        Ok(Some(authorization.requester))
    }

    fn record(&mut self, request_id: u64, requester: &Pubkey) -> Result<()> {
        let creation = self
            .creation
            .as_ref()
            .ok_or_else(|| error!(SwapError::InvalidRequest))?;
        let entropy_request = self
            .entropy_request
            .ok_or_else(|| error!(SwapError::InvalidEntropyAccount))?;

        let (address, bump) = SwapAuthorization::address(request_id);
        require_keys_eq!(
            address,
            self.authorization.key(),
            SwapError::RequestIdMismatch
        );
        require!(!self.is_live(), SwapError::AuthorizationExists);

        let request_id_bytes = request_id.to_le_bytes();
        let seeds = &[SwapAuthorization::SEED, &request_id_bytes[..], &[bump]];
        let signer_seeds = &[&seeds[..]];
        self.fund(creation, signer_seeds)?;

        let authorization = SwapAuthorization {
            request_id,
            requester: *requester,
            entropy_request,
            created_at: creation.now,
            bump,
        };
        let mut data = self.authorization.try_borrow_mut_data()?;
        let mut writer: &mut [u8] = &mut data[..];
        authorization.try_serialize(&mut writer)?;

        Ok(())
    }

    fn revoke(&mut self, request_id: u64) -> Result<()> {
        require!(
            self.is_address_of(request_id) && self.is_live(),
            SwapError::InvalidRequest
        );

        let rent = self.authorization.lamports();
        let refunded = self
            .payer
            .lamports()
            .checked_add(rent)
            .ok_or(SwapError::ArithmeticOverflow)?;
        **self.payer.try_borrow_mut_lamports()? = refunded;
        **self.authorization.try_borrow_mut_lamports()? = 0;

        // Zeroed data lets the runtime accept the owner change
        self.authorization.try_borrow_mut_data()?.fill(0);
        self.authorization.assign(&system_program::ID);
        Ok(())
    }
}
