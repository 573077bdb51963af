//! Confidential amounts and the homomorphic algebra contract
//!
//! A `ConfidentialAmount` is an opaque handle to an encrypted u64 held by the
//! ciphertext coprocessor, tagged with the principals allowed to use or
//! decrypt it. This program never sees a plaintext magnitude: values are only
//! combined through `CiphertextAlgebra`, which hands back fresh handles.
//!
//! Reader rules:
//! - values freshly imported from a user carry no readers
//! - add/sub require the executor (our config PDA) to read both operands
//! - results are readable by the executor only, until shared with `allow`

use anchor_lang::prelude::*;

use crate::error::SwapError;

/// Length of a coprocessor ciphertext handle
pub const HANDLE_LEN: usize = 32;

/// Maximum principals on a single ciphertext ACL
pub const MAX_READERS: usize = 4;

/// Opaque handle to an encrypted u64
pub type CiphertextHandle = [u8; HANDLE_LEN];

/// Handle value reserved for "no ciphertext yet" (implicit zero)
pub const UNSET_HANDLE: CiphertextHandle = [0u8; HANDLE_LEN];

/// Encrypted magnitude plus the set of principals allowed to use it
#[derive(AnchorSerialize, AnchorDeserialize, Clone, PartialEq, Eq, Default, Debug)]
pub struct ConfidentialAmount {
    /// Coprocessor handle
    pub handle: CiphertextHandle,
    /// Principals authorized to compute on / decrypt this value
    pub readers: Vec<Pubkey>,
}

impl ConfidentialAmount {
    pub const SIZE: usize = HANDLE_LEN + // handle
        4 + // readers vec length prefix
        32 * MAX_READERS; // readers

    pub fn new(handle: CiphertextHandle) -> Self {
        Self {
            handle,
            readers: Vec::new(),
        }
    }

    pub fn is_unset(&self) -> bool {
        self.handle == UNSET_HANDLE
    }

    pub fn can_read(&self, principal: &Pubkey) -> bool {
        self.readers.contains(principal)
    }

    /// Same handle with `reader` added to the ACL
    pub fn with_reader(mut self, reader: &Pubkey) -> Result<Self> {
        if !self.can_read(reader) {
            require!(self.readers.len() < MAX_READERS, SwapError::ReaderListFull);
            self.readers.push(*reader);
        }
        Ok(self)
    }

    pub fn ensure_readable_by(&self, principal: &Pubkey) -> Result<()> {
        require!(self.can_read(principal), SwapError::NotAuthorizedReader);
        Ok(())
    }
}

/// Ciphertext supplied by a user, bound to them by a validity proof
#[derive(AnchorSerialize, AnchorDeserialize, Clone, PartialEq, Eq, Debug)]
pub struct EncryptedInput {
    /// Raw external handle produced by client-side encryption
    pub handle: CiphertextHandle,
    /// Proof binding the handle to the caller and this program
    pub proof: Vec<u8>,
}

/// Homomorphic operations over encrypted u64 values
///
/// Arithmetic wraps modulo 2^64. Implementations must refuse to combine
/// operands the executor cannot read.
pub trait CiphertextAlgebra {
    /// Principal that performs the computations (the ledger's process)
    fn executor(&self) -> Pubkey;

    /// Verify and convert an external ciphertext into an internal one.
    /// The result has no readers yet.
    fn import_external(
        &mut self,
        input: &EncryptedInput,
        caller: &Pubkey,
    ) -> Result<ConfidentialAmount>;

    /// Publicly known constant as a ciphertext readable by the executor
    fn trivial_encrypt(&mut self, value: u64) -> Result<ConfidentialAmount>;

    fn add(
        &mut self,
        lhs: &ConfidentialAmount,
        rhs: &ConfidentialAmount,
    ) -> Result<ConfidentialAmount>;

    fn sub(
        &mut self,
        lhs: &ConfidentialAmount,
        rhs: &ConfidentialAmount,
    ) -> Result<ConfidentialAmount>;

    /// Grant `reader` access to `amount`, returning the updated value
    fn allow(
        &mut self,
        amount: &ConfidentialAmount,
        reader: &Pubkey,
    ) -> Result<ConfidentialAmount>;
}
