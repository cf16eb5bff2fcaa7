pub use alloy_primitives::{Address, Bytes, B256, U256};

/// Native currency amount in wei.
pub type Balance = U256;

/// Lock duration in days.
pub type Term = u32;

/// Position of a sub-account in its owner's creation sequence.
pub type SubAccountIndex = u64;

/// Unix timestamp (seconds, UTC).
pub type Timestamp = i64;
