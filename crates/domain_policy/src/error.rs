//! Policy domain errors

use thiserror::Error;

use core_kernel::PortError;

/// Errors that can occur in the policy domain
#[derive(Debug, Error)]
pub enum PolicyError {
    /// Another policy already uses this number
    #[error("Policy with policy_number '{0}' already exists")]
    DuplicatePolicyNumber(String),
}

impl From<PolicyError> for PortError {
    fn from(err: PolicyError) -> Self {
        match err {
            PolicyError::DuplicatePolicyNumber(_) => PortError::conflict(err.to_string()),
        }
    }
}
