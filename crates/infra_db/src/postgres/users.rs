use async_trait::async_trait;
use tracing::{debug, instrument};

use core_kernel::{PortError, UserId};
use domain_party::{NewAccount, PartyError, StoredCredentials, User, UserChanges, UserPort};

use super::rows::{CredentialsRow, UserRow, USER_COLUMNS};
use super::PostgresStore;
use crate::error::DatabaseError;

const USERNAME_CONSTRAINT: &str = "users_username_key";

fn select_user_sql() -> String {
    format!("SELECT {USER_COLUMNS} FROM users u JOIN profiles p ON p.user_id = u.id WHERE u.id = $1")
}

fn username_conflict(error: DatabaseError, username: &str) -> PortError {
    if error.is_unique_violation(USERNAME_CONSTRAINT) {
        PartyError::DuplicateUsername(username.to_string()).into()
    } else {
        error.into()
    }
}

#[async_trait]
impl UserPort for PostgresStore {
    #[instrument(skip(self, account), fields(username = %account.username))]
    async fn insert_user(&self, account: NewAccount) -> Result<User, PortError> {
        let id = UserId::new_v7();
        let now = self.clock.now();
        let mut tx = self.pool.begin().await.map_err(DatabaseError::from)?;

        sqlx::query(
            "INSERT INTO users (id, username, email, first_name, last_name, password_hash, date_joined) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(id.as_uuid())
        .bind(&account.username)
        .bind(&account.email)
        .bind(&account.first_name)
        .bind(&account.last_name)
        .bind(&account.password_hash)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(|e| username_conflict(e.into(), &account.username))?;

        sqlx::query("INSERT INTO profiles (user_id, created_at) VALUES ($1, $2)")
            .bind(id.as_uuid())
            .bind(now)
            .execute(&mut *tx)
            .await
            .map_err(DatabaseError::from)?;

        let row = sqlx::query_as::<_, UserRow>(&select_user_sql())
            .bind(id.as_uuid())
            .fetch_one(&mut *tx)
            .await
            .map_err(DatabaseError::from)?;

        tx.commit().await.map_err(DatabaseError::from)?;

        debug!(user_id = %id, "User stored");
        Ok(row.into())
    }

    #[instrument(skip(self))]
    async fn get_user(&self, id: UserId) -> Result<User, PortError> {
        let row = sqlx::query_as::<_, UserRow>(&select_user_sql())
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::from)?;

        row.map(User::from).ok_or_else(|| PartyError::UserNotFound(id).into())
    }

    #[instrument(skip(self))]
    async fn find_credentials(&self, username: &str) -> Result<Option<StoredCredentials>, PortError> {
        let row = sqlx::query_as::<_, CredentialsRow>(
            "SELECT id, password_hash FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        Ok(row.map(|r| StoredCredentials {
            user_id: r.id.into(),
            password_hash: r.password_hash,
        }))
    }

    #[instrument(skip(self, changes))]
    async fn update_user(&self, id: UserId, changes: UserChanges) -> Result<User, PortError> {
        changes.check()?;
        let mut tx = self.pool.begin().await.map_err(DatabaseError::from)?;

        let updated = sqlx::query(
            "UPDATE users SET \
                username = COALESCE($2, username), \
                email = COALESCE($3, email), \
                first_name = COALESCE($4, first_name), \
                last_name = COALESCE($5, last_name) \
             WHERE id = $1",
        )
        .bind(id.as_uuid())
        .bind(&changes.username)
        .bind(&changes.email)
        .bind(&changes.first_name)
        .bind(&changes.last_name)
        .execute(&mut *tx)
        .await
        .map_err(|e| username_conflict(e.into(), changes.username.as_deref().unwrap_or_default()))?;

        if updated.rows_affected() == 0 {
            return Err(PartyError::UserNotFound(id).into());
        }

        // $2/$4 say whether the field was sent; a sent NULL clears it.
        sqlx::query(
            "UPDATE profiles SET \
                bio = CASE WHEN $2 THEN $3 ELSE bio END, \
                profile_picture = CASE WHEN $4 THEN $5 ELSE profile_picture END \
             WHERE user_id = $1",
        )
        .bind(id.as_uuid())
        .bind(changes.bio.is_some())
        .bind(changes.bio.clone().flatten())
        .bind(changes.profile_picture.is_some())
        .bind(changes.profile_picture.clone().flatten())
        .execute(&mut *tx)
        .await
        .map_err(DatabaseError::from)?;

        let row = sqlx::query_as::<_, UserRow>(&select_user_sql())
            .bind(id.as_uuid())
            .fetch_one(&mut *tx)
            .await
            .map_err(DatabaseError::from)?;

        tx.commit().await.map_err(DatabaseError::from)?;

        debug!("User updated");
        Ok(row.into())
    }
}
