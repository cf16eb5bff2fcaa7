//! xenbatch-plan
//!
//! Pure batch-mint plan generation: term assignment, call-data encoding and
//! the ordered list of sub-operations a single `callAll` transaction carries.
//! Nothing in this crate performs I/O; chain state arrives as plain values.

pub mod builder;
pub mod contracts;
pub mod listing;
pub mod terms;

pub use builder::{build_plan, encode_mint_call, MintPlan, MintRequest, OuterCall, SubOperation};
pub use listing::{collect_known_mints, known_indices, next_start_index, KnownMint, UserMint};
pub use terms::{assign_terms, parse_amount};
