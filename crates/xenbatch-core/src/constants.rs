/// ─── XEN batch-mint constants ───────────────────────────────────────────────
///
/// Protocol limits and defaults shared by every crate. Contract entry points
/// are declared with `sol!` in `xenbatch_plan::contracts`.
use alloy_primitives::{address, Address};

// ── Batch limits ─────────────────────────────────────────────────────────────

/// Largest batch allowed when the caller does not donate.
pub const NON_DONATION_MAX_BATCH: u32 = 3;

// ── Well-known addresses ─────────────────────────────────────────────────────

/// XEN Crypto token on Ethereum mainnet (the contract sub-accounts mint from).
pub const XEN_MAINNET_ADDRESS: Address = address!("0x06450dEe7FD2Fb8E39061434BAbCFC05599a6Fb8");

/// Referral used when the caller does not supply one.
pub const DEFAULT_REFERRAL_ADDRESS: Address =
    address!("0x6E12A28086548B11dfcc20c75440E0B3c10721f5");

/// Query-string key carrying the referrer in shared invite links.
pub const REFERRAL_QUERY_KEY: &str = "a";

// ── Sub-account init code ────────────────────────────────────────────────────

/// EIP-1167 minimal proxy init code, before the 20-byte implementation address.
pub const MINIMAL_PROXY_INIT_PREFIX: [u8; 20] = [
    0x3d, 0x60, 0x2d, 0x80, 0x60, 0x0a, 0x3d, 0x39, 0x81, 0xf3, 0x36, 0x3d, 0x3d, 0x37, 0x3d,
    0x3d, 0x3d, 0x36, 0x3d, 0x73,
];

/// EIP-1167 minimal proxy init code, after the implementation address.
pub const MINIMAL_PROXY_INIT_SUFFIX: [u8; 15] = [
    0x5a, 0xf4, 0x3d, 0x82, 0x80, 0x3e, 0x90, 0x3d, 0x91, 0x60, 0x2b, 0x57, 0xfd, 0x5b, 0xf3,
];
