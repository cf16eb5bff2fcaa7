use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_REFERRAL_ADDRESS, XEN_MAINNET_ADDRESS};
use crate::error::PlanError;
use crate::types::{Address, B256};

/// How the factory's sub-account init code is described.
///
/// Factories that clone a fixed implementation are described by that
/// implementation's address; anything else by the Keccak-256 of its init code.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SubAccountCode {
    /// EIP-1167 minimal proxy delegating to `implementation`.
    MinimalProxy { implementation: Address },
    /// Precomputed init-code hash.
    InitCodeHash { hash: B256 },
}

/// Addresses of the deployed contracts a plan is built against.
///
/// Stored as `deployment.json`; every address is a hex string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentConfig {
    /// Proxy factory that deploys sub-accounts and receives `callAll`.
    pub factory: Address,
    /// Init code the factory deploys for each sub-account.
    pub sub_account_code: SubAccountCode,
    /// Contract each sub-account mints from.
    #[serde(default = "default_mint_contract")]
    pub mint_contract: Address,
    /// Referral used when none is given.
    #[serde(default = "default_referral")]
    pub default_referral: Address,
}

fn default_mint_contract() -> Address {
    XEN_MAINNET_ADDRESS
}

fn default_referral() -> Address {
    DEFAULT_REFERRAL_ADDRESS
}

impl DeploymentConfig {
    /// Config for `factory` with the mainnet mint contract and default referral.
    pub fn new(factory: Address, sub_account_code: SubAccountCode) -> Self {
        Self {
            factory,
            sub_account_code,
            mint_contract: default_mint_contract(),
            default_referral: default_referral(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, PlanError> {
        let cfg: Self = serde_json::from_str(json).map_err(|e| PlanError::Config(e.to_string()))?;
        if cfg.factory.is_zero() {
            return Err(PlanError::Config("factory address must not be zero".into()));
        }
        Ok(cfg)
    }

    pub fn to_json_pretty(&self) -> Result<String, PlanError> {
        serde_json::to_string_pretty(self).map_err(|e| PlanError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_optional_fields_use_defaults() {
        let json = r#"{
            "factory": "0x1111111111111111111111111111111111111111",
            "sub_account_code": {
                "kind": "minimal_proxy",
                "implementation": "0x2222222222222222222222222222222222222222"
            }
        }"#;
        let cfg = DeploymentConfig::from_json(json).unwrap();
        assert_eq!(cfg.mint_contract, XEN_MAINNET_ADDRESS);
        assert_eq!(cfg.default_referral, DEFAULT_REFERRAL_ADDRESS);
        assert_eq!(
            cfg.sub_account_code,
            SubAccountCode::MinimalProxy { implementation: Address::repeat_byte(0x22) }
        );
    }

    #[test]
    fn json_round_trip_preserves_init_code_hash() {
        let cfg = DeploymentConfig::new(
            Address::repeat_byte(0x11),
            SubAccountCode::InitCodeHash { hash: B256::repeat_byte(0xab) },
        );
        let json = cfg.to_json_pretty().unwrap();
        assert!(json.contains("\"kind\": \"init_code_hash\""));
        assert_eq!(DeploymentConfig::from_json(&json).unwrap(), cfg);
    }

    #[test]
    fn zero_factory_is_rejected() {
        let json = r#"{
            "factory": "0x0000000000000000000000000000000000000000",
            "sub_account_code": { "kind": "init_code_hash",
              "hash": "0x0000000000000000000000000000000000000000000000000000000000000000" }
        }"#;
        assert!(matches!(DeploymentConfig::from_json(json), Err(PlanError::Config(_))));
    }

    #[test]
    fn malformed_address_is_config_error() {
        let json = r#"{ "factory": "0x12", "sub_account_code": { "kind": "minimal_proxy",
            "implementation": "0x2222222222222222222222222222222222222222" } }"#;
        assert!(matches!(DeploymentConfig::from_json(json), Err(PlanError::Config(_))));
    }
}
