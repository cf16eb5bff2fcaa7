use std::str::FromStr;

use xenbatch_core::error::PlanError;
use xenbatch_core::types::Address;

/// Parse an address, enforcing EIP-55 when the input is mixed-case.
/// All-lowercase and all-uppercase inputs carry no checksum and are accepted.
pub fn parse_checksummed(s: &str) -> Result<Address, PlanError> {
    let s = s.trim();
    let digits = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);

    let has_lower = digits.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = digits.chars().any(|c| c.is_ascii_uppercase());
    let invalid = |e: &dyn std::fmt::Display| PlanError::InvalidHex(format!("{s}: {e}"));
    if has_lower && has_upper {
        Address::parse_checksummed(format!("0x{digits}"), None).map_err(|e| invalid(&e))
    } else {
        Address::from_str(digits).map_err(|e| invalid(&e))
    }
}

/// Parse the address of the account that owns the sub-accounts.
///
/// Anything that is not a well-formed, non-zero account identifier is
/// reported as `InvalidOwner`.
pub fn parse_owner(s: &str) -> Result<Address, PlanError> {
    let owner = parse_checksummed(s).map_err(|e| PlanError::InvalidOwner(e.to_string()))?;
    if owner.is_zero() {
        return Err(PlanError::InvalidOwner("zero address cannot own sub-accounts".into()));
    }
    Ok(owner)
}
