//! Swap engine
//!
//! Platform-independent core of the program. Every collaborator (ciphertext
//! algebra, entropy oracle, authorization storage, reserve asset) is reached
//! through a trait, so the instruction handlers plug in CPI-backed clients
//! and the tests plug in deterministic in-memory ones.
//!
//! - `ledger`: blind credit/debit of encrypted balances
//! - `lifecycle`: entropy request -> single-use swap authorization
//! - `orchestrator`: deposit and swap execution
//! - `payout`: reserve-asset quote for a swap

pub mod ledger;
pub mod lifecycle;
pub mod orchestrator;
pub mod payout;

#[cfg(test)]
pub mod testing;

pub use lifecycle::*;
pub use orchestrator::*;
pub use payout::*;
