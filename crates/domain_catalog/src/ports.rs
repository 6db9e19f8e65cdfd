//! Item storage port

use async_trait::async_trait;

use core_kernel::{DomainPort, ItemId, PortError};

use crate::item::{Item, ItemDraft};

/// Unscoped item storage
#[async_trait]
pub trait ItemPort: DomainPort {
    async fn list_items(&self) -> Result<Vec<Item>, PortError>;

    async fn get_item(&self, id: ItemId) -> Result<Item, PortError>;

    async fn create_item(&self, draft: ItemDraft) -> Result<Item, PortError>;

    async fn update_item(&self, id: ItemId, draft: ItemDraft) -> Result<Item, PortError>;

    async fn delete_item(&self, id: ItemId) -> Result<(), PortError>;
}
