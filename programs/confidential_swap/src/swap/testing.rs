//! In-memory collaborators for engine tests
//!
//! `PlainAlgebra` keeps the plaintext behind every handle so tests can check
//! decrypted magnitudes; nothing here is reachable from the program.

use std::collections::{BTreeMap, BTreeSet};

use anchor_lang::prelude::*;
use solana_sha256_hasher::hashv;

use crate::cipher::{CiphertextAlgebra, CiphertextHandle, ConfidentialAmount, EncryptedInput};
use crate::cpi::{EntropyOracle, ReserveAsset};
use crate::error::SwapError;
use crate::state::{ConfidentialBalance, SwapConfig};
use crate::swap::AuthorizationRegistry;

/// Compare an engine error against the expected `SwapError`
pub fn assert_swap_error<T: std::fmt::Debug>(result: Result<T>, expected: SwapError) {
    let expected: anchor_lang::error::Error = expected.into();
    assert_eq!(result.unwrap_err(), expected);
}

// =============================================================================
// CIPHERTEXT ALGEBRA
// =============================================================================

pub struct PlainAlgebra {
    executor: Pubkey,
    next_handle: u64,
    /// Internal handles and their plaintexts
    plaintexts: BTreeMap<CiphertextHandle, u64>,
    /// External (client-encrypted) handles and their plaintexts
    external: BTreeMap<CiphertextHandle, u64>,
}

impl PlainAlgebra {
    pub fn new(executor: Pubkey) -> Self {
        Self {
            executor,
            next_handle: 0,
            plaintexts: BTreeMap::new(),
            external: BTreeMap::new(),
        }
    }

    fn fresh_handle(&mut self, tag: u8) -> CiphertextHandle {
        self.next_handle += 1;
        let mut handle = [0u8; 32];
        handle[0] = tag;
        handle[24..].copy_from_slice(&self.next_handle.to_le_bytes());
        handle
    }

    fn mint(&mut self, value: u64) -> ConfidentialAmount {
        let handle = self.fresh_handle(0x01);
        self.plaintexts.insert(handle, value);
        ConfidentialAmount::new(handle)
    }

    /// Proof the client would attach for `handle` when sent by `caller`
    pub fn proof_for(&self, handle: &CiphertextHandle, caller: &Pubkey) -> Vec<u8> {
        hashv(&[&handle[..], caller.as_ref(), self.executor.as_ref()])
            .to_bytes()
            .to_vec()
    }

    /// Client-side encryption of `value` for submission by `owner`
    pub fn encrypt_input(&mut self, value: u64, owner: &Pubkey) -> EncryptedInput {
        let handle = self.fresh_handle(0xE0);
        self.external.insert(handle, value);
        EncryptedInput {
            handle,
            proof: self.proof_for(&handle, owner),
        }
    }

    /// Off-chain decryption by an authorized reader
    pub fn decrypt(&self, amount: &ConfidentialAmount, reader: &Pubkey) -> u64 {
        assert!(amount.can_read(reader), "reader not on ACL");
        *self
            .plaintexts
            .get(&amount.handle)
            .expect("unknown ciphertext handle")
    }
}

impl CiphertextAlgebra for PlainAlgebra {
    fn executor(&self) -> Pubkey {
        self.executor
    }

    fn import_external(
        &mut self,
        input: &EncryptedInput,
        caller: &Pubkey,
    ) -> Result<ConfidentialAmount> {
        let value = *self
            .external
            .get(&input.handle)
            .ok_or(SwapError::InvalidProof)?;
        require!(
            input.proof == self.proof_for(&input.handle, caller),
            SwapError::InvalidProof
        );
        Ok(self.mint(value))
    }

    fn trivial_encrypt(&mut self, value: u64) -> Result<ConfidentialAmount> {
        let executor = self.executor;
        self.mint(value).with_reader(&executor)
    }

    fn add(
        &mut self,
        lhs: &ConfidentialAmount,
        rhs: &ConfidentialAmount,
    ) -> Result<ConfidentialAmount> {
        let executor = self.executor;
        lhs.ensure_readable_by(&executor)?;
        rhs.ensure_readable_by(&executor)?;
        let value = self.plaintexts[&lhs.handle].wrapping_add(self.plaintexts[&rhs.handle]);
        self.mint(value).with_reader(&executor)
    }

    fn sub(
        &mut self,
        lhs: &ConfidentialAmount,
        rhs: &ConfidentialAmount,
    ) -> Result<ConfidentialAmount> {
        let executor = self.executor;
        lhs.ensure_readable_by(&executor)?;
        rhs.ensure_readable_by(&executor)?;
        let value = self.plaintexts[&lhs.handle].wrapping_sub(self.plaintexts[&rhs.handle]);
        self.mint(value).with_reader(&executor)
    }

    fn allow(
        &mut self,
        amount: &ConfidentialAmount,
        reader: &Pubkey,
    ) -> Result<ConfidentialAmount> {
        amount.clone().with_reader(reader)
    }
}

// =============================================================================
// ENTROPY ORACLE
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submission {
    pub request_id: u64,
    pub payment: u64,
    pub tag: [u8; 32],
}

/// Oracle double that only fulfils when told to
pub struct ScriptedOracle {
    pub fee: u64,
    pub sequence: u64,
    pub fulfilled: BTreeSet<u64>,
    pub submissions: Vec<Submission>,
}

impl ScriptedOracle {
    pub fn new(fee: u64) -> Self {
        Self {
            fee,
            sequence: 0,
            fulfilled: BTreeSet::new(),
            submissions: Vec::new(),
        }
    }

    pub fn fulfill(&mut self, request_id: u64) {
        assert!(
            self.submissions.iter().any(|s| s.request_id == request_id),
            "fulfilling a request that was never submitted"
        );
        self.fulfilled.insert(request_id);
    }
}

impl EntropyOracle for ScriptedOracle {
    fn fee(&self) -> Result<u64> {
        Ok(self.fee)
    }

    fn request_entropy(&mut self, payment: u64, tag: [u8; 32]) -> Result<u64> {
        self.sequence += 1;
        self.submissions.push(Submission {
            request_id: self.sequence,
            payment,
            tag,
        });
        Ok(self.sequence)
    }

    fn is_request_fulfilled(&self, request_id: u64) -> Result<bool> {
        Ok(self.fulfilled.contains(&request_id))
    }
}

// =============================================================================
// AUTHORIZATIONS
// =============================================================================

impl AuthorizationRegistry for BTreeMap<u64, Pubkey> {
    fn requester_of(&self, request_id: u64) -> Result<Option<Pubkey>> {
        Ok(self.get(&request_id).copied())
    }

    fn record(&mut self, request_id: u64, requester: &Pubkey) -> Result<()> {
        require!(
            self.insert(request_id, *requester).is_none(),
            SwapError::AuthorizationExists
        );
        Ok(())
    }

    fn revoke(&mut self, request_id: u64) -> Result<()> {
        self.remove(&request_id).ok_or(SwapError::InvalidRequest)?;
        Ok(())
    }
}

// =============================================================================
// RESERVE ASSET
// =============================================================================

/// Token balances keyed by holder
#[derive(Default)]
pub struct MemoryReserve {
    pub balances: BTreeMap<Pubkey, u64>,
    /// Holder that transfers are drawn from
    pub source: Pubkey,
}

impl MemoryReserve {
    pub fn funded(source: Pubkey, amount: u64) -> Self {
        let mut balances = BTreeMap::new();
        balances.insert(source, amount);
        Self { balances, source }
    }

    pub fn balance(&self, holder: &Pubkey) -> u64 {
        self.balances.get(holder).copied().unwrap_or(0)
    }
}

impl ReserveAsset for MemoryReserve {
    fn balance_of(&self, holder: &Pubkey) -> Result<u64> {
        Ok(self.balance(holder))
    }

    fn transfer(&mut self, to: &Pubkey, amount: u64) -> Result<()> {
        let source = self.source;
        let remaining = self
            .balance(&source)
            .checked_sub(amount)
            .ok_or(SwapError::ArithmeticOverflow)?;
        self.balances.insert(source, remaining);
        let credited = self
            .balance(to)
            .checked_add(amount)
            .ok_or(SwapError::ArithmeticOverflow)?;
        self.balances.insert(*to, credited);
        Ok(())
    }
}

// =============================================================================
// RAW ACCOUNTS
// =============================================================================

/// Owned backing storage for a hand-built `AccountInfo`
pub struct TestAccount {
    pub key: Pubkey,
    pub owner: Pubkey,
    pub lamports: u64,
    pub data: Vec<u8>,
    pub is_signer: bool,
    pub is_writable: bool,
}

impl TestAccount {
    pub fn new(key: Pubkey, owner: Pubkey, lamports: u64, data: Vec<u8>) -> Self {
        Self {
            key,
            owner,
            lamports,
            data,
            is_signer: false,
            is_writable: false,
        }
    }

    pub fn writable(mut self) -> Self {
        self.is_writable = true;
        self
    }

    pub fn to_info(&mut self) -> AccountInfo<'_> {
        AccountInfo::new(
            &self.key,
            self.is_signer,
            self.is_writable,
            &mut self.lamports,
            &mut self.data,
            &self.owner,
            false,
            0,
        )
    }
}

/// Packed SPL token account (165 bytes, initialized, no delegate)
pub fn token_account_data(mint: &Pubkey, owner: &Pubkey, amount: u64) -> Vec<u8> {
    let mut data = vec![0u8; 165];
    data[0..32].copy_from_slice(mint.as_ref());
    data[32..64].copy_from_slice(owner.as_ref());
    data[64..72].copy_from_slice(&amount.to_le_bytes());
    // state: Initialized
    data[108] = 1;
    data
}

// =============================================================================
// STATE
// =============================================================================

pub fn config_with_rate(exchange_rate: u64) -> SwapConfig {
    SwapConfig {
        authority: Pubkey::new_unique(),
        entropy_oracle: Pubkey::new_unique(),
        entropy_provider: Pubkey::new_unique(),
        coprocessor: Pubkey::new_unique(),
        reserve_mint: Pubkey::new_unique(),
        reserve_vault: Pubkey::new_unique(),
        exchange_rate,
        request_count: 0,
        bump: 255,
        vault_bump: 254,
    }
}

pub fn empty_balance(owner: Pubkey) -> ConfidentialBalance {
    let mut balance = ConfidentialBalance::default();
    balance.open_if_needed(owner, 253);
    balance
}
