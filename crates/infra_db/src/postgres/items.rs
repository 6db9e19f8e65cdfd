use async_trait::async_trait;
use tracing::{debug, instrument};

use core_kernel::{ItemId, PortError};
use domain_catalog::{Item, ItemDraft, ItemPort};

use super::rows::{ItemRow, ITEM_COLUMNS};
use super::PostgresStore;
use crate::error::DatabaseError;

#[async_trait]
impl ItemPort for PostgresStore {
    #[instrument(skip(self))]
    async fn list_items(&self) -> Result<Vec<Item>, PortError> {
        let sql = format!("SELECT {ITEM_COLUMNS} FROM items ORDER BY created_at, id");
        let rows = sqlx::query_as::<_, ItemRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(DatabaseError::from)?;
        Ok(rows.into_iter().map(Item::from).collect())
    }

    #[instrument(skip(self))]
    async fn get_item(&self, id: ItemId) -> Result<Item, PortError> {
        let sql = format!("SELECT {ITEM_COLUMNS} FROM items WHERE id = $1");
        let row = sqlx::query_as::<_, ItemRow>(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::from)?;
        row.map(Item::from).ok_or_else(|| PortError::not_found("Item", id))
    }

    #[instrument(skip(self, draft))]
    async fn create_item(&self, draft: ItemDraft) -> Result<Item, PortError> {
        draft.check()?;
        let item = Item::from_draft(draft, self.clock.now());

        let sql = format!("INSERT INTO items ({ITEM_COLUMNS}) VALUES ($1, $2, $3, $4)");
        sqlx::query(&sql)
            .bind(item.id.as_uuid())
            .bind(&item.name)
            .bind(&item.description)
            .bind(item.created_at)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::from)?;

        debug!(item_id = %item.id, "Item stored");
        Ok(item)
    }

    #[instrument(skip(self, draft))]
    async fn update_item(&self, id: ItemId, draft: ItemDraft) -> Result<Item, PortError> {
        draft.check()?;
        let sql = format!(
            "UPDATE items SET name = $2, description = $3 WHERE id = $1 RETURNING {ITEM_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ItemRow>(&sql)
            .bind(id.as_uuid())
            .bind(&draft.name)
            .bind(&draft.description)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::from)?;
        row.map(Item::from).ok_or_else(|| PortError::not_found("Item", id))
    }

    #[instrument(skip(self))]
    async fn delete_item(&self, id: ItemId) -> Result<(), PortError> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::from)?;
        if result.rows_affected() == 0 {
            return Err(PortError::not_found("Item", id));
        }
        Ok(())
    }
}
