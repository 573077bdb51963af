//! Request Lifecycle
//!
//! Turns an asynchronous entropy fulfillment into a single-use swap
//! authorization. Per request id:
//!
//! ```text
//! Unissued --create--> Pending --(oracle fulfils)--> Fulfilled
//!                         |                              |
//!                         +--cancel--+        +--consume-+--cancel
//!                                    v        v
//!                                   Consumed (authorization gone)
//! ```
//!
//! There is no expiry: a request the oracle never fulfils stays Pending
//! until its requester cancels it.

use anchor_lang::prelude::*;
use solana_sha256_hasher::hashv;

use crate::cpi::EntropyOracle;
use crate::error::SwapError;
use crate::state::SwapConfig;

/// Domain separator for the tag sent along with each entropy request
pub const REQUEST_TAG_DOMAIN: &[u8] = b"swap-request";

/// Storage of live authorizations, request id -> requester
pub trait AuthorizationRegistry {
    fn requester_of(&self, request_id: u64) -> Result<Option<Pubkey>>;

    fn record(&mut self, request_id: u64, requester: &Pubkey) -> Result<()>;

    /// Delete a live authorization
    fn revoke(&mut self, request_id: u64) -> Result<()>;
}

/// Event emitted when an entropy request backs a new swap authorization
#[event]
pub struct SwapRequested {
    pub user: Pubkey,
    pub request_id: u64,
}

/// Event emitted when a requester gives up an unused authorization
#[event]
pub struct SwapRequestCancelled {
    pub user: Pubkey,
    pub request_id: u64,
}

/// Opaque tag for the oracle, unique per requester and issue count
pub fn request_tag(requester: &Pubkey, request_count: u64) -> [u8; 32] {
    hashv(&[
        REQUEST_TAG_DOMAIN,
        requester.as_ref(),
        &request_count.to_le_bytes(),
    ])
    .to_bytes()
}

/// Pay for an entropy request and record `requester` as the only identity
/// allowed to swap with it
pub fn create_request<O, R>(
    config: &mut SwapConfig,
    oracle: &mut O,
    registry: &mut R,
    requester: &Pubkey,
    payment: u64,
) -> Result<u64>
where
    O: EntropyOracle,
    R: AuthorizationRegistry,
{
    let fee = oracle.fee()?;
    require!(payment >= fee, SwapError::InsufficientFee);

    let next_count = config
        .request_count
        .checked_add(1)
        .ok_or(SwapError::ArithmeticOverflow)?;

    let tag = request_tag(requester, config.request_count);
    let request_id = oracle.request_entropy(payment, tag)?;

    require!(
        registry.requester_of(request_id)?.is_none(),
        SwapError::AuthorizationExists
    );
    registry.record(request_id, requester)?;
    config.request_count = next_count;

    emit!(SwapRequested {
        user: *requester,
        request_id,
    });

    Ok(request_id)
}

/// Spend the authorization for `request_id`
///
/// Fails with `EntropyNotReady` until the oracle has fulfilled the request,
/// then with `InvalidRequest` unless `caller` holds the live authorization.
/// On failure nothing changes.
pub fn consume_request<O, R>(
    oracle: &O,
    registry: &mut R,
    request_id: u64,
    caller: &Pubkey,
) -> Result<()>
where
    O: EntropyOracle,
    R: AuthorizationRegistry,
{
    require!(
        oracle.is_request_fulfilled(request_id)?,
        SwapError::EntropyNotReady
    );
    ensure_holder(registry, request_id, caller)?;
    registry.revoke(request_id)
}

/// Close an unused authorization on behalf of its requester
///
/// Works in both Pending and Fulfilled states. The oracle fee is not
/// refunded.
pub fn cancel_request<R: AuthorizationRegistry>(
    registry: &mut R,
    request_id: u64,
    caller: &Pubkey,
) -> Result<()> {
    ensure_holder(registry, request_id, caller)?;
    registry.revoke(request_id)?;

    emit!(SwapRequestCancelled {
        user: *caller,
        request_id,
    });

    Ok(())
}

fn ensure_holder<R: AuthorizationRegistry>(
    registry: &R,
    request_id: u64,
    caller: &Pubkey,
) -> Result<()> {
    require!(
        registry.requester_of(request_id)? == Some(*caller),
        SwapError::InvalidRequest
    );
    Ok(())
}
