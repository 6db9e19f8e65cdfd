//! Policy storage port

use core_kernel::OwnedResourcePort;

use crate::policy::{Policy, PolicyDraft};

/// Caller-scoped policy storage
///
/// Implementations must enforce policy number uniqueness across all users
/// and cascade deletes to the policy's claims and their documents.
pub trait PolicyPort: OwnedResourcePort<Policy, Create = PolicyDraft, Update = PolicyDraft> {}
