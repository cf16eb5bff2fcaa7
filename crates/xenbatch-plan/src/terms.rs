use xenbatch_core::error::PlanError;
use xenbatch_core::types::Term;

/// Per-operation lock terms for a batch of `amount` sub-accounts.
///
/// A positive `term` is applied uniformly. `term == 0` selects incremental
/// mode: operation `i` (1-based) locks for `i` days, spreading maturities
/// over consecutive days.
pub fn assign_terms(amount: u32, term: Term) -> Result<Vec<Term>, PlanError> {
    if amount == 0 {
        return Err(PlanError::InvalidAmount("0".into()));
    }
    let terms = if term > 0 {
        vec![term; amount as usize]
    } else {
        (1..=amount).collect()
    };
    Ok(terms)
}

/// Parse a user-entered batch size. Rejects non-numeric and non-positive input.
pub fn parse_amount(raw: &str) -> Result<u32, PlanError> {
    let trimmed = raw.trim();
    match trimmed.parse::<u32>() {
        Ok(0) | Err(_) => Err(PlanError::InvalidAmount(trimmed.to_string())),
        Ok(n) => Ok(n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_term_repeats() {
        for amount in 1..=20 {
            let terms = assign_terms(amount, 7).unwrap();
            assert_eq!(terms.len(), amount as usize);
            assert!(terms.iter().all(|t| *t == 7));
        }
    }

    #[test]
    fn incremental_mode_counts_up_from_one() {
        assert_eq!(assign_terms(4, 0).unwrap(), vec![1, 2, 3, 4]);
        assert_eq!(assign_terms(1, 0).unwrap(), vec![1]);
        let long = assign_terms(100, 0).unwrap();
        assert_eq!(long, (1..=100).collect::<Vec<_>>());
    }

    #[test]
    fn zero_amount_is_rejected() {
        assert!(matches!(assign_terms(0, 5), Err(PlanError::InvalidAmount(_))));
        assert!(matches!(assign_terms(0, 0), Err(PlanError::InvalidAmount(_))));
    }

    #[test]
    fn parse_amount_cases() {
        assert_eq!(parse_amount(" 10 ").unwrap(), 10);
        for bad in ["", "0", "-3", "abc", "2.5"] {
            assert!(
                matches!(parse_amount(bad), Err(PlanError::InvalidAmount(_))),
                "{bad:?} should be rejected"
            );
        }
    }
}
