use anchor_lang::prelude::*;

#[error_code]
pub enum SwapError {
    #[msg("Payment is below the entropy oracle fee")]
    InsufficientFee,

    #[msg("Entropy for this request has not been fulfilled yet")]
    EntropyNotReady,

    #[msg("No live swap authorization for this request and caller")]
    InvalidRequest,

    #[msg("Reserve balance is below the swap payout")]
    InsufficientLiquidity,

    #[msg("Ciphertext validity proof was rejected")]
    InvalidProof,

    #[msg("Executor is not an authorized reader of the ciphertext")]
    NotAuthorizedReader,

    #[msg("Ciphertext reader list is full")]
    ReaderListFull,

    #[msg("Oracle request id does not match the authorization account")]
    RequestIdMismatch,

    #[msg("Swap authorization already exists for this request")]
    AuthorizationExists,

    #[msg("Exchange rate must be non-zero")]
    InvalidExchangeRate,

    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,

    #[msg("Invalid entropy oracle account")]
    InvalidEntropyAccount,

    #[msg("Invalid entropy oracle response")]
    InvalidOracleResponse,

    #[msg("Invalid ciphertext coprocessor response")]
    InvalidCoprocessorResponse,

    #[msg("Invalid reserve vault account")]
    InvalidVault,

    #[msg("Program account is not executable or not configured")]
    InvalidProgram,

    #[msg("Unauthorized access")]
    Unauthorized,
}
