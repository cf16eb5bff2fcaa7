pub mod config;
pub mod constants;
pub mod error;
pub mod types;

pub use config::{DeploymentConfig, SubAccountCode};
pub use constants::*;
pub use error::PlanError;
pub use types::*;
