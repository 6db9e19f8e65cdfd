//! Owner-scoped access to records
//!
//! Policies, claims and medical history entries each belong to exactly one
//! user. Rather than every port re-implementing "filter by caller", record
//! types implement [`OwnedResource`] and storage goes through
//! [`OwnedResourcePort`], whose every operation takes the authenticated
//! [`Caller`].
//!
//! A record owned by somebody else is indistinguishable from a record that
//! does not exist: both surface as [`PortError::NotFound`]. The owner of a
//! new record always comes from the caller, never from client input.

use std::fmt;
use std::hash::Hash;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::identifiers::UserId;
use crate::ports::{DomainPort, PortError};

/// The authenticated identity on whose behalf an operation runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Caller {
    user_id: UserId,
}

impl Caller {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Whether the given owner is this caller
    pub fn owns(&self, owner: UserId) -> bool {
        self.user_id == owner
    }
}

impl fmt::Display for Caller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.user_id.fmt(f)
    }
}

/// A record exclusively owned by one user
pub trait OwnedResource: Clone + Send + Sync + 'static {
    /// Identifier type of the record
    type Id: Copy + Eq + Ord + Hash + fmt::Display + Send + Sync + 'static;

    /// Human readable resource name used in not-found errors
    const RESOURCE: &'static str;

    fn id(&self) -> Self::Id;

    fn owner(&self) -> UserId;

    fn is_visible_to(&self, caller: &Caller) -> bool {
        caller.owns(self.owner())
    }
}

/// Returns the record only if the caller owns it
///
/// Both "absent" and "owned by another user" yield the same `NotFound`.
pub fn reveal<T: OwnedResource>(
    caller: &Caller,
    id: T::Id,
    found: Option<T>,
) -> Result<T, PortError> {
    match found {
        Some(record) if record.is_visible_to(caller) => Ok(record),
        _ => Err(PortError::not_found(T::RESOURCE, id)),
    }
}

/// CRUD over a caller-scoped record type
///
/// `Create` and `Update` are the inputs accepted by the respective
/// operations; neither carries an owner.
#[async_trait]
pub trait OwnedResourcePort<T: OwnedResource>: DomainPort {
    type Create: Send + 'static;
    type Update: Send + 'static;

    /// Lists every record owned by the caller
    async fn list(&self, caller: &Caller) -> Result<Vec<T>, PortError>;

    /// Retrieves one of the caller's records
    async fn get(&self, caller: &Caller, id: T::Id) -> Result<T, PortError>;

    /// Creates a record owned by the caller
    async fn create(&self, caller: &Caller, input: Self::Create) -> Result<T, PortError>;

    /// Replaces the mutable fields of one of the caller's records
    async fn update(&self, caller: &Caller, id: T::Id, input: Self::Update) -> Result<T, PortError>;

    /// Deletes one of the caller's records along with its dependents
    async fn delete(&self, caller: &Caller, id: T::Id) -> Result<(), PortError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifiers::ItemId;

    #[derive(Debug, Clone)]
    struct Note {
        id: ItemId,
        owner: UserId,
    }

    impl OwnedResource for Note {
        type Id = ItemId;
        const RESOURCE: &'static str = "Note";

        fn id(&self) -> ItemId {
            self.id
        }

        fn owner(&self) -> UserId {
            self.owner
        }
    }

    #[test]
    fn test_reveal_own_record() {
        let owner = UserId::new_v7();
        let note = Note { id: ItemId::new_v7(), owner };
        let caller = Caller::new(owner);

        let revealed = reveal(&caller, note.id, Some(note.clone())).unwrap();
        assert_eq!(revealed.id, note.id);
    }

    #[test]
    fn test_foreign_record_looks_missing() {
        let note = Note { id: ItemId::new_v7(), owner: UserId::new_v7() };
        let stranger = Caller::new(UserId::new_v7());

        let foreign = reveal(&stranger, note.id, Some(note.clone())).unwrap_err();
        let missing = reveal::<Note>(&stranger, note.id, None).unwrap_err();

        assert!(foreign.is_not_found());
        assert_eq!(foreign.to_string(), missing.to_string());
    }
}
