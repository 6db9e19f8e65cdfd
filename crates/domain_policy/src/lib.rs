//! Policy Domain
//!
//! A policy is an insurance contract owned by a single user. It carries a
//! unique human-readable policy number, structured coverage and exclusion
//! terms, and a validity window.
//!
//! Policies are caller-scoped: storage goes through [`PolicyPort`], which is
//! the generic owned-resource port bound to [`Policy`]. Deleting a policy
//! deletes every claim filed against it.

pub mod coverage;
pub mod policy;
pub mod error;
pub mod ports;

pub use coverage::{CoverageDetails, Exclusions};
pub use policy::{Policy, PolicyDraft};
pub use error::PolicyError;
pub use ports::PolicyPort;
