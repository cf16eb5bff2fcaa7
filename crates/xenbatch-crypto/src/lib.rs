pub mod checksum;
pub mod create2;

pub use checksum::{parse_checksummed, parse_owner};
pub use create2::{
    derive_sub_account, derive_sub_accounts, init_code_hash, parse_index, sub_account_salt,
};
