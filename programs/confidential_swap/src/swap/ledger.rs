//! Confidential Balance Ledger
//!
//! Blind credit and debit of per-account encrypted balances. Magnitudes are
//! never inspected: there is no overflow check on credit and no solvency
//! check on debit, so an overdraft wraps inside the ciphertext.

use anchor_lang::prelude::*;

use crate::cipher::{CiphertextAlgebra, ConfidentialAmount};
use crate::state::ConfidentialBalance;

impl ConfidentialBalance {
    /// balance += delta
    pub fn credit<A: CiphertextAlgebra>(
        &mut self,
        algebra: &mut A,
        delta: &ConfidentialAmount,
    ) -> Result<()> {
        delta.ensure_readable_by(&algebra.executor())?;
        let current = self.current(algebra)?;
        let updated = algebra.add(&current, delta)?;
        self.store(algebra, updated)
    }

    /// balance -= delta, wrapping on underflow
    pub fn debit<A: CiphertextAlgebra>(
        &mut self,
        algebra: &mut A,
        delta: &ConfidentialAmount,
    ) -> Result<()> {
        delta.ensure_readable_by(&algebra.executor())?;
        let current = self.current(algebra)?;
        let updated = algebra.sub(&current, delta)?;
        self.store(algebra, updated)
    }

    /// Stored handle, verbatim
    pub fn read(&self) -> &ConfidentialAmount {
        &self.balance
    }

    fn current<A: CiphertextAlgebra>(&self, algebra: &mut A) -> Result<ConfidentialAmount> {
        if self.balance.is_unset() {
            algebra.trivial_encrypt(0)
        } else {
            Ok(self.balance.clone())
        }
    }

    // Owner gets read access so the balance can be decrypted off-chain
    fn store<A: CiphertextAlgebra>(
        &mut self,
        algebra: &mut A,
        updated: ConfidentialAmount,
    ) -> Result<()> {
        self.balance = algebra.allow(&updated, &self.owner)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SwapError;
    use crate::swap::testing::{assert_swap_error, empty_balance, PlainAlgebra};

    fn readable(algebra: &mut PlainAlgebra, value: u64, owner: &Pubkey) -> ConfidentialAmount {
        let input = algebra.encrypt_input(value, owner);
        let imported = algebra.import_external(&input, owner).unwrap();
        let executor = algebra.executor();
        algebra.allow(&imported, &executor).unwrap()
    }

    #[test]
    fn test_absent_balance_reads_as_unset() {
        let balance = empty_balance(Pubkey::new_unique());
        assert!(balance.read().is_unset());
    }

    #[test]
    fn test_stored_balance_is_shared_with_executor_and_owner() {
        let executor = Pubkey::new_unique();
        let owner = Pubkey::new_unique();
        let mut algebra = PlainAlgebra::new(executor);
        let mut balance = empty_balance(owner);

        let ten = readable(&mut algebra, 10, &owner);
        balance.credit(&mut algebra, &ten).unwrap();

        assert!(balance.read().can_read(&executor));
        assert!(balance.read().can_read(&owner));
        assert_eq!(balance.read().readers.len(), 2);
    }

    #[test]
    fn test_debit_has_no_solvency_check() {
        let executor = Pubkey::new_unique();
        let owner = Pubkey::new_unique();
        let mut algebra = PlainAlgebra::new(executor);
        let mut balance = empty_balance(owner);

        let five = readable(&mut algebra, 5, &owner);
        let eight = readable(&mut algebra, 8, &owner);
        balance.credit(&mut algebra, &five).unwrap();
        balance.debit(&mut algebra, &eight).unwrap();

        assert_eq!(algebra.decrypt(balance.read(), &owner), 5u64.wrapping_sub(8));
    }

    #[test]
    fn test_credit_requires_executor_read_access() {
        let executor = Pubkey::new_unique();
        let owner = Pubkey::new_unique();
        let mut algebra = PlainAlgebra::new(executor);
        let mut balance = empty_balance(owner);

        let input = algebra.encrypt_input(7, &owner);
        let not_shared = algebra.import_external(&input, &owner).unwrap();

        assert_swap_error(
            balance.credit(&mut algebra, &not_shared),
            SwapError::NotAuthorizedReader,
        );
        assert!(balance.read().is_unset());
    }
}
