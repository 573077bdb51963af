//! Ciphertext coprocessor CPI integration
//!
//! Encrypted values live in an external coprocessor program; we only hold
//! 32-byte handles. Every operation is a raw CPI signed by the swap config
//! PDA (the executor), and every new handle comes back as return data.
//!
//! Instruction layouts (Anchor style, raw invoke, single signer account):
//!   import_external: disc || handle[32] || caller[32] || proof (u32 LE len + bytes)
//!   trivial_encrypt: disc || value u64 LE
//!   add / sub:       disc || lhs[32] || rhs[32]
//!   allow:           disc || handle[32] || reader[32]
//!
//! A missing or all-zero handle from import_external means the proof was
//! rejected.

use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};
use anchor_lang::solana_program::program::{get_return_data, invoke_signed};

use super::instruction_discriminator;
use crate::cipher::{
    CiphertextAlgebra, CiphertextHandle, ConfidentialAmount, EncryptedInput, HANDLE_LEN,
    UNSET_HANDLE,
};
use crate::error::SwapError;

/// Decode a handle from coprocessor return data
///
/// `Ok(None)` when the coprocessor returned nothing.
pub fn decode_handle(
    return_data: Option<(Pubkey, Vec<u8>)>,
    coprocessor: &Pubkey,
) -> Result<Option<CiphertextHandle>> {
    let Some((program_id, data)) = return_data else {
        return Ok(None);
    };
    require_keys_eq!(program_id, *coprocessor, SwapError::InvalidCoprocessorResponse);
    if data.is_empty() {
        return Ok(None);
    }
    let handle: CiphertextHandle = data
        .as_slice()
        .try_into()
        .map_err(|_| error!(SwapError::InvalidCoprocessorResponse))?;
    Ok(Some(handle))
}

/// On-chain algebra backed by the coprocessor program
pub struct CoprocessorAlgebra<'a, 'info> {
    /// Coprocessor program
    pub coprocessor_program: &'a AccountInfo<'info>,
    /// Swap config PDA, signs every call as the executor
    pub executor: &'a AccountInfo<'info>,
    /// Swap config PDA bump
    pub executor_bump: u8,
}

impl CoprocessorAlgebra<'_, '_> {
    fn call(&self, name: &str, args: &[u8]) -> Result<()> {
        let mut ix_data = Vec::with_capacity(8 + args.len());
        ix_data.extend_from_slice(&instruction_discriminator(name));
        ix_data.extend_from_slice(args);

        let ix = Instruction {
            program_id: self.coprocessor_program.key(),
            accounts: vec![AccountMeta::new_readonly(self.executor.key(), true)],
            data: ix_data,
        };

        let seeds = &[crate::state::SwapConfig::SEED, &[self.executor_bump]];
        let signer_seeds = &[&seeds[..]];

        invoke_signed(
            &ix,
            &[self.executor.clone(), self.coprocessor_program.clone()],
            signer_seeds,
        )?;

        #[cfg(feature = "debug")]
        msg!("Coprocessor CPI: {}", name);

        Ok(())
    }

    fn call_for_handle(&self, name: &str, args: &[u8]) -> Result<ConfidentialAmount> {
        self.call(name, args)?;
        let handle = decode_handle(get_return_data(), &self.coprocessor_program.key())?
            .filter(|handle| *handle != UNSET_HANDLE)
            .ok_or(SwapError::InvalidCoprocessorResponse)?;
        ConfidentialAmount::new(handle).with_reader(&self.executor.key())
    }

    fn binary_op(
        &self,
        name: &str,
        lhs: &ConfidentialAmount,
        rhs: &ConfidentialAmount,
    ) -> Result<ConfidentialAmount> {
        let executor = self.executor.key();
        lhs.ensure_readable_by(&executor)?;
        rhs.ensure_readable_by(&executor)?;

        let mut args = Vec::with_capacity(2 * HANDLE_LEN);
        args.extend_from_slice(&lhs.handle);
        args.extend_from_slice(&rhs.handle);
        self.call_for_handle(name, &args)
    }
}

impl CiphertextAlgebra for CoprocessorAlgebra<'_, '_> {
    fn executor(&self) -> Pubkey {
        self.executor.key()
    }

    fn import_external(
        &mut self,
        input: &EncryptedInput,
        caller: &Pubkey,
    ) -> Result<ConfidentialAmount> {
        require!(!input.proof.is_empty(), SwapError::InvalidProof);
        let proof_len =
            u32::try_from(input.proof.len()).map_err(|_| error!(SwapError::InvalidProof))?;

        let mut args = Vec::with_capacity(HANDLE_LEN + 32 + 4 + input.proof.len());
        args.extend_from_slice(&input.handle);
        args.extend_from_slice(&caller.to_bytes());
        args.extend_from_slice(&proof_len.to_le_bytes());
        args.extend_from_slice(&input.proof);
        self.call("import_external", &args)?;

        let handle = decode_handle(get_return_data(), &self.coprocessor_program.key())?
            .filter(|handle| *handle != UNSET_HANDLE)
            .ok_or(SwapError::InvalidProof)?;

        Ok(ConfidentialAmount::new(handle))
    }

    fn trivial_encrypt(&mut self, value: u64) -> Result<ConfidentialAmount> {
        self.call_for_handle("trivial_encrypt", &value.to_le_bytes())
    }

    fn add(
        &mut self,
        lhs: &ConfidentialAmount,
        rhs: &ConfidentialAmount,
    ) -> Result<ConfidentialAmount> {
        self.binary_op("add", lhs, rhs)
    }

    fn sub(
        &mut self,
        lhs: &ConfidentialAmount,
        rhs: &ConfidentialAmount,
    ) -> Result<ConfidentialAmount> {
        self.binary_op("sub", lhs, rhs)
    }

    fn allow(
        &mut self,
        amount: &ConfidentialAmount,
        reader: &Pubkey,
    ) -> Result<ConfidentialAmount> {
        let mut args = Vec::with_capacity(HANDLE_LEN + 32);
        args.extend_from_slice(&amount.handle);
        args.extend_from_slice(&reader.to_bytes());
        self.call("allow", &args)?;

        amount.clone().with_reader(reader)
    }
}
