//! Counterfactual sub-account addresses.
//!
//! The factory deploys every sub-account with CREATE2 (EIP-1014):
//!
//!   salt    = keccak256(owner ‖ uint256(index))
//!   address = keccak256(0xff ‖ factory ‖ salt ‖ keccak256(init_code))[12..]
//!
//! so an owner's sub-accounts can be enumerated before any of them exist.

use alloy_primitives::keccak256;
use xenbatch_core::config::{DeploymentConfig, SubAccountCode};
use xenbatch_core::constants::{MINIMAL_PROXY_INIT_PREFIX, MINIMAL_PROXY_INIT_SUFFIX};
use xenbatch_core::error::PlanError;
use xenbatch_core::types::{Address, SubAccountIndex, B256, U256};

/// Salt for the `index`-th sub-account of `owner`: `abi.encodePacked(owner, uint256(index))`.
pub fn sub_account_salt(owner: &Address, index: SubAccountIndex) -> B256 {
    let mut packed = [0u8; 52];
    packed[..20].copy_from_slice(owner.as_slice());
    packed[20..].copy_from_slice(&U256::from(index).to_be_bytes::<32>());
    keccak256(packed)
}

/// Hash of the init code the factory deploys.
pub fn init_code_hash(code: &SubAccountCode) -> B256 {
    match code {
        SubAccountCode::InitCodeHash { hash } => *hash,
        SubAccountCode::MinimalProxy { implementation } => {
            let mut init = Vec::with_capacity(55);
            init.extend_from_slice(&MINIMAL_PROXY_INIT_PREFIX);
            init.extend_from_slice(implementation.as_slice());
            init.extend_from_slice(&MINIMAL_PROXY_INIT_SUFFIX);
            keccak256(&init)
        }
    }
}

/// Address the factory will (or did) deploy for `owner`'s `index`-th sub-account.
pub fn derive_sub_account(
    config: &DeploymentConfig,
    owner: &Address,
    index: SubAccountIndex,
) -> Address {
    let salt = sub_account_salt(owner, index);
    config.factory.create2(salt.0, init_code_hash(&config.sub_account_code).0)
}

/// Addresses for indices `start..start + count`, in index order.
///
/// Fails with `InvalidIndex` if the range would run past `u64::MAX`.
pub fn derive_sub_accounts(
    config: &DeploymentConfig,
    owner: &Address,
    start: SubAccountIndex,
    count: u64,
) -> Result<Vec<(SubAccountIndex, Address)>, PlanError> {
    let end = start.checked_add(count).ok_or_else(|| {
        PlanError::InvalidIndex(format!("range {start} + {count} overflows"))
    })?;
    let code_hash = init_code_hash(&config.sub_account_code);
    Ok((start..end)
        .map(|i| (i, config.factory.create2(sub_account_salt(owner, i).0, code_hash.0)))
        .collect())
}

/// Parse a user-entered sub-account index. Negative or non-integer input is
/// `InvalidIndex`.
pub fn parse_index(raw: &str) -> Result<SubAccountIndex, PlanError> {
    let raw = raw.trim();
    if raw.starts_with('-') {
        return Err(PlanError::InvalidIndex(format!("{raw} is negative")));
    }
    raw.parse::<SubAccountIndex>()
        .map_err(|e| PlanError::InvalidIndex(format!("{raw}: {e}")))
}
