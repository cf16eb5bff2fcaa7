//! Batch-mint plan construction.
//!
//! A plan is the ordered list of sub-operations one `callAll` transaction
//! carries. Operation `i` consumes sub-account index `start_index + i`, so the
//! order here must match the factory's on-chain index consumption exactly.

use alloy_sol_types::SolCall;
use serde::Serialize;
use tracing::debug;

use xenbatch_core::config::DeploymentConfig;
use xenbatch_core::constants::NON_DONATION_MAX_BATCH;
use xenbatch_core::error::PlanError;
use xenbatch_core::types::{Address, Balance, Bytes, SubAccountIndex, Term, U256};
use xenbatch_crypto::derive_sub_accounts;

use crate::contracts::{callAllCall, callTargetCall, claimRankCall};
use crate::terms::assign_terms;

// ── MintRequest ───────────────────────────────────────────────────────────────

/// What the user asked for, plus the first unused sub-account index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MintRequest {
    /// Number of sub-accounts to create.
    pub amount: u32,
    /// Lock term in days; 0 selects incremental mode.
    pub term: Term,
    /// First unused sub-account index.
    pub start_index: SubAccountIndex,
}

impl MintRequest {
    pub fn new(amount: u32, term: Term, start_index: SubAccountIndex) -> Self {
        Self { amount, term, start_index }
    }

    /// Checks that do not depend on the derived addresses.
    pub fn validate(&self, donate: bool) -> Result<(), PlanError> {
        if self.amount == 0 {
            return Err(PlanError::InvalidAmount("0".into()));
        }
        if !donate && self.amount > NON_DONATION_MAX_BATCH {
            return Err(PlanError::ExceedsNonDonationCap {
                amount: self.amount,
                max: NON_DONATION_MAX_BATCH,
            });
        }
        Ok(())
    }
}

// ── SubOperation / MintPlan ───────────────────────────────────────────────────

/// "Deploy sub-account `index` and mint from it with `assigned_term`."
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SubOperation {
    pub index: SubAccountIndex,
    /// Counterfactual address of the sub-account this operation deploys.
    pub target: Address,
    /// Donation attributed to this operation (wei).
    pub value: Balance,
    /// Payload the factory forwards to the freshly deployed sub-account.
    pub call_data: Bytes,
    pub assigned_term: Term,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MintPlan {
    pub operations: Vec<SubOperation>,
    pub donate: bool,
    pub referral: Address,
    /// Native value of the outer transaction: one minimum donation for the
    /// whole batch when donating, otherwise zero.
    pub value: Balance,
}

/// The single transaction a plan is submitted as.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OuterCall {
    pub to: Address,
    pub value: Balance,
    pub data: Bytes,
}

impl MintPlan {
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn assigned_terms(&self) -> Vec<Term> {
        self.operations.iter().map(|op| op.assigned_term).collect()
    }

    /// `factory.callAll(data, ref)` with one element per operation, in order.
    pub fn outer_call(&self, factory: &Address) -> OuterCall {
        let call = callAllCall {
            data: self.operations.iter().map(|op| op.call_data.clone()).collect(),
            referral: self.referral,
        };
        OuterCall {
            to: *factory,
            value: self.value,
            data: call.abi_encode().into(),
        }
    }
}

/// Sub-account payload: `callTarget(mintContract, 0, claimRank(term))`.
pub fn encode_mint_call(mint_contract: &Address, term: Term) -> Bytes {
    let claim_rank = claimRankCall { term: U256::from(term) };
    callTargetCall {
        target: *mint_contract,
        value: U256::ZERO,
        data: claim_rank.abi_encode().into(),
    }
    .abi_encode()
    .into()
}

/// Build the plan for `request` on behalf of `owner`.
///
/// When `donate` is set, `min_donation` is recorded on every operation and
/// sent once as the value of the outer call. `referral` is passed through to
/// the factory untouched.
pub fn build_plan(
    config: &DeploymentConfig,
    owner: &Address,
    request: &MintRequest,
    donate: bool,
    min_donation: Balance,
    referral: &Address,
) -> Result<MintPlan, PlanError> {
    request.validate(donate)?;
    if owner.is_zero() {
        return Err(PlanError::InvalidOwner("zero address cannot own sub-accounts".into()));
    }

    let terms = assign_terms(request.amount, request.term)?;
    let targets = derive_sub_accounts(config, owner, request.start_index, u64::from(request.amount))?;
    let value = if donate { min_donation } else { U256::ZERO };

    let operations: Vec<SubOperation> = targets
        .into_iter()
        .zip(terms)
        .map(|((index, target), assigned_term)| SubOperation {
            index,
            target,
            value,
            call_data: encode_mint_call(&config.mint_contract, assigned_term),
            assigned_term,
        })
        .collect();

    debug!(
        amount = request.amount,
        term = request.term,
        start_index = request.start_index,
        donate,
        %value,
        "built mint plan"
    );

    Ok(MintPlan {
        operations,
        donate,
        referral: *referral,
        value,
    })
}
