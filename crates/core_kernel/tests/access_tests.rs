//! Owner scoping through `OwnedResourcePort`

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use proptest::prelude::*;

use core_kernel::{
    reveal, Caller, DomainPort, ItemId, OwnedResource, OwnedResourcePort, PortError, UserId,
};

#[derive(Debug, Clone, PartialEq)]
struct Note {
    id: ItemId,
    owner: UserId,
    text: String,
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

#[derive(Default)]
struct NoteBook {
    notes: Mutex<BTreeMap<ItemId, Note>>,
}

impl DomainPort for NoteBook {}

#[async_trait]
impl OwnedResourcePort<Note> for NoteBook {
    type Create = String;
    type Update = String;

    async fn list(&self, caller: &Caller) -> Result<Vec<Note>, PortError> {
        let notes = self.notes.lock().unwrap();
        Ok(notes.values().filter(|n| n.is_visible_to(caller)).cloned().collect())
    }

    async fn get(&self, caller: &Caller, id: ItemId) -> Result<Note, PortError> {
        let notes = self.notes.lock().unwrap();
        reveal(caller, id, notes.get(&id).cloned())
    }

    async fn create(&self, caller: &Caller, text: String) -> Result<Note, PortError> {
        let note = Note { id: ItemId::new_v7(), owner: caller.user_id(), text };
        self.notes.lock().unwrap().insert(note.id, note.clone());
        Ok(note)
    }

    async fn update(&self, caller: &Caller, id: ItemId, text: String) -> Result<Note, PortError> {
        let mut notes = self.notes.lock().unwrap();
        let mut note = reveal(caller, id, notes.get(&id).cloned())?;
        note.text = text;
        notes.insert(id, note.clone());
        Ok(note)
    }

    async fn delete(&self, caller: &Caller, id: ItemId) -> Result<(), PortError> {
        let mut notes = self.notes.lock().unwrap();
        reveal(caller, id, notes.get(&id).cloned())?;
        notes.remove(&id);
        Ok(())
    }
}

#[tokio::test]
async fn test_owner_comes_from_caller() {
    let book = NoteBook::default();
    let caller = Caller::new(UserId::new_v7());

    let note = book.create(&caller, "first".into()).await.unwrap();

    assert_eq!(note.owner, caller.user_id());
}

#[tokio::test]
async fn test_strangers_cannot_see_or_touch_notes() {
    let book = NoteBook::default();
    let alice = Caller::new(UserId::new_v7());
    let bob = Caller::new(UserId::new_v7());
    let note = book.create(&alice, "private".into()).await.unwrap();

    assert!(book.list(&bob).await.unwrap().is_empty());
    assert!(book.get(&bob, note.id).await.unwrap_err().is_not_found());
    assert!(book.update(&bob, note.id, "edited".into()).await.unwrap_err().is_not_found());
    assert!(book.delete(&bob, note.id).await.unwrap_err().is_not_found());

    let untouched = book.get(&alice, note.id).await.unwrap();
    assert_eq!(untouched.text, "private");
}

#[tokio::test]
async fn test_delete_then_get_is_not_found() {
    let book = NoteBook::default();
    let caller = Caller::new(UserId::new_v7());
    let note = book.create(&caller, "short lived".into()).await.unwrap();

    book.delete(&caller, note.id).await.unwrap();

    assert!(book.get(&caller, note.id).await.unwrap_err().is_not_found());
}

proptest! {
    #[test]
    fn prop_reveal_only_to_owner(owner_bits in any::<u128>(), caller_bits in any::<u128>()) {
        let owner = UserId::from_uuid(uuid_from(owner_bits));
        let caller = Caller::new(UserId::from_uuid(uuid_from(caller_bits)));
        let note = Note { id: ItemId::new_v7(), owner, text: String::new() };

        let revealed = reveal(&caller, note.id, Some(note.clone()));

        prop_assert_eq!(revealed.is_ok(), caller.owns(owner));
    }
}

fn uuid_from(bits: u128) -> uuid::Uuid {
    uuid::Uuid::from_u128(bits)
}
