//! Input policy applied before anything reaches the plan builder.
//!
//! The builder rejects bad input; this layer is where user-entered values are
//! coerced into range, matching how the interactive form behaves. Numbers are
//! read the way the form reads them: leading whitespace and sign, then as many
//! digits as are present, ignoring whatever follows.

use tracing::info;

use xenbatch_core::constants::{NON_DONATION_MAX_BATCH, REFERRAL_QUERY_KEY};
use xenbatch_core::error::PlanError;
use xenbatch_core::types::{Address, Term};
use xenbatch_crypto::parse_checksummed;

/// Leading integer of `raw`, or `None` when it has no leading digits.
/// Saturates instead of overflowing.
fn leading_integer(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return None;
    }
    let magnitude = rest[..digits].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// Coerce a raw batch size: no leading digits or < 1 becomes 1, and without
/// a donation anything above the cap becomes the cap.
pub fn clamp_amount(raw: &str, donate: bool) -> u32 {
    let parsed = match leading_integer(raw) {
        Some(n) if n >= 1 => u32::try_from(n).unwrap_or(u32::MAX),
        _ => 1,
    };
    let amount = if !donate && parsed > NON_DONATION_MAX_BATCH {
        NON_DONATION_MAX_BATCH
    } else {
        parsed
    };
    if raw.trim() != amount.to_string() {
        info!(raw, amount, donate, "batch size adjusted");
    }
    amount
}

/// Terms without leading digits select incremental mode, as do negative ones.
pub fn parse_term(raw: &str) -> Term {
    match leading_integer(raw) {
        Some(n) if n > 0 => Term::try_from(n).unwrap_or(Term::MAX),
        _ => 0,
    }
}

/// The explicit referral if given, else the deployment default.
pub fn resolve_referral(flag: Option<&str>, default: Address) -> Result<Address, PlanError> {
    match flag {
        Some(s) => parse_checksummed(s),
        None => Ok(default),
    }
}

/// Invite link crediting `owner` as referrer.
pub fn referral_link(base_url: &str, owner: &Address) -> String {
    let sep = if base_url.contains('?') { '&' } else { '?' };
    format!("{base_url}{sep}{REFERRAL_QUERY_KEY}={}", owner.to_checksum(None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn amount_clamping() {
        assert_eq!(clamp_amount("10", true), 10);
        assert_eq!(clamp_amount("10", false), 3);
        assert_eq!(clamp_amount("3", false), 3);
        assert_eq!(clamp_amount("0", true), 1);
        assert_eq!(clamp_amount("-5", false), 1);
        assert_eq!(clamp_amount("lots", true), 1);
        assert_eq!(clamp_amount("", true), 1);
    }

    #[test]
    fn amount_keeps_leading_digits() {
        assert_eq!(clamp_amount("3abc", true), 3);
        assert_eq!(clamp_amount("15.7", true), 15);
        assert_eq!(clamp_amount("  +8 sub-accounts", true), 8);
        assert_eq!(clamp_amount("15.7", false), 3);
        assert_eq!(clamp_amount("99999999999999999999999", true), u32::MAX);
    }

    #[test]
    fn term_defaults_to_incremental() {
        assert_eq!(parse_term("30"), 30);
        assert_eq!(parse_term(""), 0);
        assert_eq!(parse_term("soon"), 0);
        assert_eq!(parse_term("-4"), 0);
    }

    #[test]
    fn term_keeps_leading_digits() {
        assert_eq!(parse_term("30days"), 30);
        assert_eq!(parse_term("7.5"), 7);
        assert_eq!(parse_term(" 12 "), 12);
    }

    #[test]
    fn referral_defaults_and_overrides() {
        let default = Address::repeat_byte(0x66);
        assert_eq!(resolve_referral(None, default).unwrap(), default);
        let given = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";
        assert_eq!(
            resolve_referral(Some(given), default).unwrap(),
            address!("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed")
        );
        assert!(resolve_referral(Some("0xnope"), default).is_err());
    }

    #[test]
    fn invite_link_appends_query() {
        let owner = address!("0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed");
        assert_eq!(
            referral_link("https://mint.example", &owner),
            "https://mint.example?a=0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"
        );
        assert_eq!(
            referral_link("https://mint.example/?lang=en", &owner),
            "https://mint.example/?lang=en&a=0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"
        );
    }
}
