use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlanError {
    // ── Input validation ─────────────────────────────────────────────────────
    #[error("invalid amount: {0} (must be a positive integer)")]
    InvalidAmount(String),

    #[error("invalid sub-account index: {0}")]
    InvalidIndex(String),

    #[error("invalid owner address: {0}")]
    InvalidOwner(String),

    #[error("batch of {amount} exceeds the non-donation cap of {max}")]
    ExceedsNonDonationCap { amount: u32, max: u32 },

    // ── Encoding ─────────────────────────────────────────────────────────────
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("ABI decode error: {0}")]
    Abi(String),

    // ── Configuration ────────────────────────────────────────────────────────
    #[error("deployment config error: {0}")]
    Config(String),
}
