use async_trait::async_trait;
use tracing::{debug, instrument};

use core_kernel::{PortError, UserId};
use domain_party::{
    NewAccount, PartyError, Profile, StoredCredentials, User, UserChanges, UserPort,
};

use super::{InMemoryStore, UserRecord};

#[async_trait]
impl UserPort for InMemoryStore {
    #[instrument(skip(self, account), fields(username = %account.username))]
    async fn insert_user(&self, account: NewAccount) -> Result<User, PortError> {
        let now = self.clock.now();
        let mut state = self.state.write().await;

        if state.users.iter().any(|r| r.user.username == account.username) {
            return Err(PartyError::DuplicateUsername(account.username).into());
        }

        let user = User {
            id: UserId::new_v7(),
            username: account.username,
            email: account.email,
            first_name: account.first_name,
            last_name: account.last_name,
            profile: Profile {
                bio: None,
                profile_picture: None,
                created_at: now,
            },
            date_joined: now,
        };
        state.users.push(UserRecord {
            user: user.clone(),
            password_hash: account.password_hash,
        });

        debug!(user_id = %user.id, "User stored");
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn get_user(&self, id: UserId) -> Result<User, PortError> {
        let state = self.state.read().await;
        state
            .users
            .iter()
            .find(|r| r.user.id == id)
            .map(|r| r.user.clone())
            .ok_or_else(|| PartyError::UserNotFound(id).into())
    }

    #[instrument(skip(self))]
    async fn find_credentials(&self, username: &str) -> Result<Option<StoredCredentials>, PortError> {
        let state = self.state.read().await;
        Ok(state
            .users
            .iter()
            .find(|r| r.user.username == username)
            .map(|r| StoredCredentials {
                user_id: r.user.id,
                password_hash: r.password_hash.clone(),
            }))
    }

    #[instrument(skip(self, changes))]
    async fn update_user(&self, id: UserId, changes: UserChanges) -> Result<User, PortError> {
        changes.check()?;
        let mut state = self.state.write().await;

        if let Some(username) = &changes.username {
            if state.users.iter().any(|r| r.user.id != id && &r.user.username == username) {
                return Err(PartyError::DuplicateUsername(username.clone()).into());
            }
        }

        let record = state
            .users
            .iter_mut()
            .find(|r| r.user.id == id)
            .ok_or(PartyError::UserNotFound(id))?;
        changes.apply_to(&mut record.user);

        debug!("User updated");
        Ok(record.user.clone())
    }
}
