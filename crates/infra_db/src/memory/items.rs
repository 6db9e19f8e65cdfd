use async_trait::async_trait;
use tracing::{debug, instrument};

use core_kernel::{ItemId, PortError};
use domain_catalog::{Item, ItemDraft, ItemPort};

use super::InMemoryStore;

#[async_trait]
impl ItemPort for InMemoryStore {
    #[instrument(skip(self))]
    async fn list_items(&self) -> Result<Vec<Item>, PortError> {
        Ok(self.state.read().await.items.clone())
    }

    #[instrument(skip(self))]
    async fn get_item(&self, id: ItemId) -> Result<Item, PortError> {
        self.state
            .read()
            .await
            .items
            .iter()
            .find(|i| i.id == id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Item", id))
    }

    #[instrument(skip(self, draft))]
    async fn create_item(&self, draft: ItemDraft) -> Result<Item, PortError> {
        draft.check()?;
        let item = Item::from_draft(draft, self.clock.now());
        self.state.write().await.items.push(item.clone());

        debug!(item_id = %item.id, "Item stored");
        Ok(item)
    }

    #[instrument(skip(self, draft))]
    async fn update_item(&self, id: ItemId, draft: ItemDraft) -> Result<Item, PortError> {
        draft.check()?;
        let mut state = self.state.write().await;
        let item = state
            .items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| PortError::not_found("Item", id))?;
        item.apply(draft);
        Ok(item.clone())
    }

    #[instrument(skip(self))]
    async fn delete_item(&self, id: ItemId) -> Result<(), PortError> {
        let mut state = self.state.write().await;
        let index = state
            .items
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| PortError::not_found("Item", id))?;
        state.items.remove(index);
        Ok(())
    }
}
