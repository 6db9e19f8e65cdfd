//! Catalog Domain
//!
//! Items are a public demonstration resource: they have no owner and every
//! client, authenticated or not, sees the same set.

pub mod item;
pub mod ports;

pub use item::{Item, ItemDraft};
pub use ports::ItemPort;
