//! Party Domain Ports
//!
//! `UserPort` covers account storage. It is not caller-scoped: a user can
//! only ever reach their own account because handlers look it up by the
//! authenticated caller's id. `MedicalHistoryPort` is the generic
//! owned-resource port bound to [`MedicalRecord`].

use async_trait::async_trait;

use core_kernel::{DomainPort, OwnedResourcePort, PortError, UserId};

use crate::medical::{MedicalRecord, MedicalRecordDraft};
use crate::user::{NewAccount, StoredCredentials, User, UserChanges};

/// Account storage
#[async_trait]
pub trait UserPort: DomainPort {
    /// Persists a user together with an empty profile
    ///
    /// Fails with `Conflict` if the username is taken.
    async fn insert_user(&self, account: NewAccount) -> Result<User, PortError>;

    async fn get_user(&self, id: UserId) -> Result<User, PortError>;

    /// Looks up the stored hash for a username, if the user exists
    async fn find_credentials(&self, username: &str) -> Result<Option<StoredCredentials>, PortError>;

    /// Applies a partial update to the user and their profile
    ///
    /// Fails with `Conflict` if the new username is taken by someone else.
    async fn update_user(&self, id: UserId, changes: UserChanges) -> Result<User, PortError>;
}

/// Caller-scoped medical history storage
pub trait MedicalHistoryPort:
    OwnedResourcePort<MedicalRecord, Create = MedicalRecordDraft, Update = MedicalRecordDraft>
{
}
