//! Entropy oracle CPI integration
//!
//! The oracle is an external program that produces unpredictable values in
//! two phases:
//! 1. A requester pays the provider fee and submits a tag; the oracle returns
//!    a sequence number (our request id) and creates a request account
//! 2. Later, out of band, the provider fulfils the request and flips the
//!    request account's `fulfilled` flag
//!
//! We only ever submit (CPI) and poll (read the request account). The oracle
//! itself is not part of this program.
//!
//! Sequences are per provider, so a request account only counts when it was
//! issued by the provider stored in the swap config.
//!
//! Instruction layout (Anchor style, raw invoke):
//!   request_entropy: sha256("global:request_entropy")[0..8] || tag[32] || payment u64 LE
//!   accounts: provider (w), request (w), payer (s, w), system_program
//!   return data: request id as u64 LE

use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};
use anchor_lang::solana_program::program::{get_return_data, invoke};

use super::{account_discriminator, instruction_discriminator};
use crate::error::SwapError;

/// Client view of the entropy oracle
pub trait EntropyOracle {
    /// Current fee in lamports for one request
    fn fee(&self) -> Result<u64>;

    /// Submit a paid request; returns the oracle-assigned request id
    fn request_entropy(&mut self, payment: u64, tag: [u8; 32]) -> Result<u64>;

    fn is_request_fulfilled(&self, request_id: u64) -> Result<bool>;
}

/// Oracle provider account layout (after the 8-byte discriminator)
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct EntropyProviderData {
    /// Provider authority that fulfils requests
    pub authority: Pubkey,
    /// Fee charged per request
    pub fee_lamports: u64,
    /// Last assigned sequence number
    pub sequence: u64,
}

impl EntropyProviderData {
    pub const ACCOUNT_NAME: &'static str = "EntropyProvider";
}

/// Oracle request account layout (after the 8-byte discriminator)
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct EntropyRequestData {
    /// Provider account that assigned `sequence`
    pub provider: Pubkey,
    /// Sequence number, equal to the request id handed back on submit
    pub sequence: u64,
    /// Payer of the request
    pub requester: Pubkey,
    /// Opaque tag supplied by the requester
    pub tag: [u8; 32],
    /// Set by the provider once entropy is revealed
    pub fulfilled: bool,
    /// Revealed entropy (zero until fulfilled)
    pub randomness: [u8; 32],
}

impl EntropyRequestData {
    pub const ACCOUNT_NAME: &'static str = "EntropyRequest";
}

/// Decode an oracle-owned account, checking its discriminator
pub fn parse_oracle_account<T: AnchorDeserialize>(data: &[u8], account_name: &str) -> Result<T> {
    require!(data.len() >= 8, SwapError::InvalidEntropyAccount);
    require!(
        data[..8] == account_discriminator(account_name),
        SwapError::InvalidEntropyAccount
    );
    T::deserialize(&mut &data[8..]).map_err(|_| error!(SwapError::InvalidEntropyAccount))
}

/// Extract the request id from `request_entropy` return data
pub fn decode_request_id(
    return_data: Option<(Pubkey, Vec<u8>)>,
    oracle_program: &Pubkey,
) -> Result<u64> {
    let (program_id, data) = return_data.ok_or(SwapError::InvalidOracleResponse)?;
    require_keys_eq!(program_id, *oracle_program, SwapError::InvalidOracleResponse);
    let bytes: [u8; 8] = data
        .as_slice()
        .try_into()
        .map_err(|_| error!(SwapError::InvalidOracleResponse))?;
    Ok(u64::from_le_bytes(bytes))
}

/// Accounts needed to submit a new request
pub struct EntropySubmitAccounts<'a, 'info> {
    /// Oracle provider account (fee, sequence)
    pub provider: &'a AccountInfo<'info>,
    /// Payer of the oracle fee (the swap requester)
    pub payer: &'a AccountInfo<'info>,
    /// System program
    pub system_program: &'a AccountInfo<'info>,
}

/// On-chain oracle client backed by raw CPI and account reads
pub struct EntropyOracleClient<'a, 'info> {
    /// Oracle program
    pub oracle_program: &'a AccountInfo<'info>,
    /// Configured provider; requests from other providers are rejected
    pub provider: Pubkey,
    /// Oracle request account for the request being created or polled
    pub request: &'a AccountInfo<'info>,
    /// Only required for `fee` and `request_entropy`
    pub submit: Option<EntropySubmitAccounts<'a, 'info>>,
}

impl<'a, 'info> EntropyOracleClient<'a, 'info> {
    fn submit_accounts(&self) -> Result<&EntropySubmitAccounts<'a, 'info>> {
        self.submit
            .as_ref()
            .ok_or_else(|| error!(SwapError::InvalidEntropyAccount))
    }

    fn read_provider(&self) -> Result<EntropyProviderData> {
        let provider = self.submit_accounts()?.provider;
        require_keys_eq!(provider.key(), self.provider, SwapError::InvalidEntropyAccount);
        require_keys_eq!(
            *provider.owner,
            self.oracle_program.key(),
            SwapError::InvalidEntropyAccount
        );
        let data = provider.try_borrow_data()?;
        parse_oracle_account(&data, EntropyProviderData::ACCOUNT_NAME)
    }
}

impl EntropyOracle for EntropyOracleClient<'_, '_> {
    fn fee(&self) -> Result<u64> {
        Ok(self.read_provider()?.fee_lamports)
    }

    fn request_entropy(&mut self, payment: u64, tag: [u8; 32]) -> Result<u64> {
        let accounts = self.submit_accounts()?;

        let mut ix_data = Vec::with_capacity(8 + 32 + 8);
        ix_data.extend_from_slice(&instruction_discriminator("request_entropy"));
        ix_data.extend_from_slice(&tag);
        ix_data.extend_from_slice(&payment.to_le_bytes());

        let ix = Instruction {
            program_id: self.oracle_program.key(),
            accounts: vec![
                AccountMeta::new(accounts.provider.key(), false),
                AccountMeta::new(self.request.key(), false),
                AccountMeta::new(accounts.payer.key(), true),
                AccountMeta::new_readonly(accounts.system_program.key(), false),
            ],
            data: ix_data,
        };

        invoke(
            &ix,
            &[
                accounts.provider.clone(),
                self.request.clone(),
                accounts.payer.clone(),
                accounts.system_program.clone(),
                self.oracle_program.clone(),
            ],
        )?;

        decode_request_id(get_return_data(), &self.oracle_program.key())
    }

    fn is_request_fulfilled(&self, request_id: u64) -> Result<bool> {
        // Not created yet: nothing to fulfil
        if self.request.data_is_empty() {
            return Ok(false);
        }
        require_keys_eq!(
            *self.request.owner,
            self.oracle_program.key(),
            SwapError::InvalidEntropyAccount
        );

        let data = self.request.try_borrow_data()?;
        let request: EntropyRequestData =
            parse_oracle_account(&data, EntropyRequestData::ACCOUNT_NAME)?;
        require_keys_eq!(request.provider, self.provider, SwapError::InvalidEntropyAccount);
        require!(
            request.sequence == request_id,
            SwapError::InvalidEntropyAccount
        );

        Ok(request.fulfilled)
    }
}
