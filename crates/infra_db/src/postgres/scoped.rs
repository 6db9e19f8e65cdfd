//! Owner-scoped statements
//!
//! Every read and delete of an owned table goes through a [`ScopedTable`],
//! which always constrains the owner column to the caller. A row owned by
//! somebody else is simply not matched.

use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgExecutor};
use uuid::Uuid;

use core_kernel::Caller;

use crate::error::DatabaseError;
use crate::postgres::rows::{CLAIM_COLUMNS, MEDICAL_COLUMNS, POLICY_COLUMNS};

/// An owned table: its name, owner column and selected columns
#[derive(Debug, Clone, Copy)]
pub(crate) struct ScopedTable {
    pub table: &'static str,
    pub owner_column: &'static str,
    pub columns: &'static str,
}

pub(crate) const POLICIES: ScopedTable = ScopedTable {
    table: "policies",
    owner_column: "user_id",
    columns: POLICY_COLUMNS,
};

pub(crate) const CLAIMS: ScopedTable = ScopedTable {
    table: "claims",
    owner_column: "user_id",
    columns: CLAIM_COLUMNS,
};

pub(crate) const MEDICAL_HISTORY: ScopedTable = ScopedTable {
    table: "medical_history",
    owner_column: "user_id",
    columns: MEDICAL_COLUMNS,
};

fn owner(caller: &Caller) -> Uuid {
    *caller.user_id().as_uuid()
}

impl ScopedTable {
    /// The caller's rows matching an optional extra equality, oldest first
    fn select_sql(&self, filter: Option<&str>) -> String {
        let extra = filter
            .map(|column| format!(" AND {column} = $2"))
            .unwrap_or_default();
        format!(
            "SELECT {} FROM {} WHERE {} = $1{} ORDER BY created_at, id",
            self.columns, self.table, self.owner_column, extra
        )
    }

    pub async fn list<'e, R>(
        &self,
        executor: impl PgExecutor<'e>,
        caller: &Caller,
    ) -> Result<Vec<R>, DatabaseError>
    where
        R: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let sql = self.select_sql(None);
        let rows = sqlx::query_as::<_, R>(&sql)
            .bind(owner(caller))
            .fetch_all(executor)
            .await?;
        Ok(rows)
    }

    /// The caller's rows whose `column` equals `value`
    pub async fn list_where<'e, R>(
        &self,
        executor: impl PgExecutor<'e>,
        caller: &Caller,
        column: &str,
        value: Uuid,
    ) -> Result<Vec<R>, DatabaseError>
    where
        R: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let sql = self.select_sql(Some(column));
        let rows = sqlx::query_as::<_, R>(&sql)
            .bind(owner(caller))
            .bind(value)
            .fetch_all(executor)
            .await?;
        Ok(rows)
    }

    /// One of the caller's rows, `None` if absent or foreign
    pub async fn get<'e, R>(
        &self,
        executor: impl PgExecutor<'e>,
        caller: &Caller,
        id: Uuid,
    ) -> Result<Option<R>, DatabaseError>
    where
        R: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let sql = format!(
            "SELECT {} FROM {} WHERE id = $1 AND {} = $2",
            self.columns, self.table, self.owner_column
        );
        let row = sqlx::query_as::<_, R>(&sql)
            .bind(id)
            .bind(owner(caller))
            .fetch_optional(executor)
            .await?;
        Ok(row)
    }

    /// Like [`ScopedTable::get`] but also locks the row until the
    /// surrounding transaction ends
    pub async fn get_for_update<'e, R>(
        &self,
        executor: impl PgExecutor<'e>,
        caller: &Caller,
        id: Uuid,
    ) -> Result<Option<R>, DatabaseError>
    where
        R: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let sql = format!(
            "SELECT {} FROM {} WHERE id = $1 AND {} = $2 FOR UPDATE",
            self.columns, self.table, self.owner_column
        );
        let row = sqlx::query_as::<_, R>(&sql)
            .bind(id)
            .bind(owner(caller))
            .fetch_optional(executor)
            .await?;
        Ok(row)
    }

    /// Whether the caller owns a row with this id
    pub async fn exists<'e>(
        &self,
        executor: impl PgExecutor<'e>,
        caller: &Caller,
        id: Uuid,
    ) -> Result<bool, DatabaseError> {
        let sql = format!(
            "SELECT EXISTS (SELECT 1 FROM {} WHERE id = $1 AND {} = $2)",
            self.table, self.owner_column
        );
        let found = sqlx::query_scalar::<_, bool>(&sql)
            .bind(id)
            .bind(owner(caller))
            .fetch_one(executor)
            .await?;
        Ok(found)
    }

    /// Deletes one of the caller's rows; dependents go with it through
    /// `ON DELETE CASCADE`. Returns whether a row was deleted.
    pub async fn delete<'e>(
        &self,
        executor: impl PgExecutor<'e>,
        caller: &Caller,
        id: Uuid,
    ) -> Result<bool, DatabaseError> {
        let sql = format!(
            "DELETE FROM {} WHERE id = $1 AND {} = $2",
            self.table, self.owner_column
        );
        let result = sqlx::query(&sql)
            .bind(id)
            .bind(owner(caller))
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_is_scoped_and_ordered() {
        let sql = POLICIES.select_sql(None);
        assert!(sql.starts_with("SELECT id, policy_number"));
        assert!(sql.contains("FROM policies WHERE user_id = $1 ORDER BY created_at, id"));
    }

    #[test]
    fn test_select_with_filter() {
        let sql = CLAIMS.select_sql(Some("policy_id"));
        assert!(sql.contains("WHERE user_id = $1 AND policy_id = $2 ORDER BY"));
    }
}
