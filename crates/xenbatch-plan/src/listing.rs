//! Known sub-accounts and their mint records.
//!
//! An owner's sub-accounts are the derived addresses for indices
//! `0..=create_count`. Each one is looked up independently; failed or empty
//! lookups are dropped without affecting the rest.

use std::fmt::Display;
use std::ops::RangeInclusive;

use alloy_sol_types::SolCall;
use serde::Serialize;
use tracing::warn;

use xenbatch_core::error::PlanError;
use xenbatch_core::types::{Address, SubAccountIndex, Timestamp, U256};

use crate::contracts::userMintsCall;

/// XEN `userMints(address)` record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UserMint {
    pub user: Address,
    /// Lock term in days.
    pub term: U256,
    pub maturity_ts: Timestamp,
    pub rank: U256,
    pub amplifier: U256,
    pub eaa_rate: U256,
}

impl UserMint {
    /// Decode `(address,uint256,uint256,uint256,uint256,uint256)` return data.
    pub fn decode(data: &[u8]) -> Result<Self, PlanError> {
        let r = userMintsCall::abi_decode_returns(data, true)
            .map_err(|e| PlanError::Abi(e.to_string()))?;
        if r.maturityTs > U256::from(Timestamp::MAX as u64) {
            return Err(PlanError::Abi(format!("maturity {} out of range", r.maturityTs)));
        }
        Ok(Self {
            user: r.user,
            term: r.term,
            maturity_ts: r.maturityTs.to::<u64>() as Timestamp,
            rank: r.rank,
            amplifier: r.amplifier,
            eaa_rate: r.eaaRate,
        })
    }

    /// A zero `user` means no mint is recorded for the address.
    pub fn exists(&self) -> bool {
        !self.user.is_zero()
    }

    pub fn is_matured(&self, now: Timestamp) -> bool {
        now >= self.maturity_ts
    }
}

/// A sub-account that has a live mint record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct KnownMint {
    pub index: SubAccountIndex,
    pub address: Address,
    pub mint: UserMint,
}

/// Indices to enumerate for an owner whose factory create-count is `create_count`.
pub fn known_indices(create_count: u64) -> RangeInclusive<SubAccountIndex> {
    0..=create_count
}

/// First unused sub-account index after `create_count` creations.
pub fn next_start_index(create_count: u64) -> Result<SubAccountIndex, PlanError> {
    create_count
        .checked_add(1)
        .ok_or_else(|| PlanError::InvalidIndex(format!("create count {create_count} is saturated")))
}

/// Keep the lookups that returned a live record, in their original order.
pub fn collect_known_mints<E: Display>(
    lookups: Vec<(SubAccountIndex, Address, Result<Option<UserMint>, E>)>,
) -> Vec<KnownMint> {
    lookups
        .into_iter()
        .filter_map(|(index, address, result)| match result {
            Ok(Some(mint)) if mint.exists() => Some(KnownMint { index, address, mint }),
            Ok(_) => None,
            Err(e) => {
                warn!(index, %address, error = %e, "sub-account lookup failed; skipping");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_sol_types::SolValue;

    fn record(user: Address, maturity: U256) -> Vec<u8> {
        (
            user,
            U256::from(30),
            maturity,
            U256::from(12_345),
            U256::from(3_000),
            U256::from(100),
        )
            .abi_encode_params()
    }

    fn addr(b: u8) -> Address {
        Address::repeat_byte(b)
    }

    #[test]
    fn decode_user_mint() {
        let m = UserMint::decode(&record(addr(9), U256::from(1_700_000_000u64))).unwrap();
        assert_eq!(m.user, addr(9));
        assert_eq!(m.term, U256::from(30));
        assert_eq!(m.maturity_ts, 1_700_000_000);
        assert_eq!(m.rank, U256::from(12_345));
        assert_eq!(m.amplifier, U256::from(3_000));
        assert_eq!(m.eaa_rate, U256::from(100));
        assert!(m.exists());
    }

    #[test]
    fn truncated_return_data_is_abi_error() {
        let data = record(addr(9), U256::from(1));
        assert!(matches!(UserMint::decode(&data[..160]), Err(PlanError::Abi(_))));
        assert!(matches!(UserMint::decode(&[]), Err(PlanError::Abi(_))));
    }

    #[test]
    fn maturity_past_timestamp_range_is_abi_error() {
        let data = record(addr(9), U256::from(u64::MAX));
        assert!(matches!(UserMint::decode(&data), Err(PlanError::Abi(_))));
    }

    #[test]
    fn maturity_boundary() {
        let m = UserMint::decode(&record(addr(9), U256::from(1_000))).unwrap();
        assert!(!m.is_matured(999));
        assert!(m.is_matured(1_000));
    }

    #[test]
    fn index_helpers_follow_create_count() {
        assert_eq!(known_indices(3).collect::<Vec<_>>(), vec![0, 1, 2, 3]);
        assert_eq!(next_start_index(3).unwrap(), 4);
        assert!(matches!(next_start_index(u64::MAX), Err(PlanError::InvalidIndex(_))));
    }

    #[test]
    fn partial_failures_are_skipped() {
        let live = UserMint::decode(&record(addr(1), U256::from(10))).unwrap();
        let empty = UserMint::decode(&record(Address::ZERO, U256::ZERO)).unwrap();
        let lookups: Vec<(u64, Address, Result<Option<UserMint>, String>)> = vec![
            (0, addr(0xa0), Ok(Some(empty))),
            (1, addr(0xa1), Err("rpc timeout".into())),
            (2, addr(0xa2), Ok(Some(live.clone()))),
            (3, addr(0xa3), Ok(None)),
            (4, addr(0xa4), Ok(Some(live.clone()))),
        ];
        let known = collect_known_mints(lookups);
        assert_eq!(known.iter().map(|k| k.index).collect::<Vec<_>>(), vec![2, 4]);
        assert_eq!(known[0].address, addr(0xa2));
        assert_eq!(known[1].mint, live);
    }
}
