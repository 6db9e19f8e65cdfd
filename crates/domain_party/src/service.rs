//! Account workflows
//!
//! Registration and login combine validation, hashing and storage. Hashing is
//! CPU bound and runs on the blocking pool.

use std::sync::Arc;

use tracing::{info, warn};

use core_kernel::{PortError, UserId};

use crate::error::PartyError;
use crate::password::{CredentialHasher, DefaultPasswordPolicy, PasswordPolicy};
use crate::ports::UserPort;
use crate::registration::{RegistrationRequest, MAX_PASSWORD_LENGTH};
use crate::user::{NewAccount, User};

/// Registers and authenticates users on top of a [`UserPort`]
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserPort>,
    policy: Arc<dyn PasswordPolicy>,
    hasher: CredentialHasher,
}

impl AccountService {
    pub fn new(users: Arc<dyn UserPort>) -> Self {
        Self {
            users,
            policy: Arc::new(DefaultPasswordPolicy::default()),
            hasher: CredentialHasher::default(),
        }
    }

    pub fn with_policy(mut self, policy: Arc<dyn PasswordPolicy>) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_hasher(mut self, hasher: CredentialHasher) -> Self {
        self.hasher = hasher;
        self
    }

    /// Registers a new user
    ///
    /// # Errors
    ///
    /// - `Validation` if any field is invalid, the passwords differ or the
    ///   password is too weak; nothing is stored
    /// - `Conflict` if the username is already taken
    pub async fn register(&self, request: RegistrationRequest) -> Result<User, PortError> {
        request.check(self.policy.as_ref())?;

        let hasher = self.hasher;
        let password = request.password;
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| PartyError::Hashing(e.to_string()))??;

        let user = self
            .users
            .insert_user(NewAccount {
                username: request.username,
                email: request.email,
                first_name: request.first_name,
                last_name: request.last_name,
                password_hash,
            })
            .await?;

        info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Checks a username and password, returning the user's id
    ///
    /// Unknown usernames and wrong passwords fail identically.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<UserId, PortError> {
        // No stored password can be this long.
        if password.chars().count() > MAX_PASSWORD_LENGTH {
            warn!(username = %username, "Login attempt with oversized password");
            return Err(PartyError::InvalidCredentials.into());
        }

        let Some(credentials) = self.users.find_credentials(username).await? else {
            warn!(username = %username, "Login attempt for unknown user");
            return Err(PartyError::InvalidCredentials.into());
        };

        let hasher = self.hasher;
        let password = password.to_string();
        let stored = credentials.password_hash;
        let matches = tokio::task::spawn_blocking(move || hasher.verify(&password, &stored))
            .await
            .map_err(|e| PartyError::Hashing(e.to_string()))?;

        if matches {
            Ok(credentials.user_id)
        } else {
            warn!(username = %username, "Login attempt with wrong password");
            Err(PartyError::InvalidCredentials.into())
        }
    }
}
