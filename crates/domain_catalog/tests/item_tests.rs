//! Tests for the item resource

use chrono::Utc;

use domain_catalog::{Item, ItemDraft};

#[test]
fn test_name_is_required_and_bounded() {
    let ok = ItemDraft {
        name: "Widget".to_string(),
        description: None,
    };
    assert!(ok.check().is_ok());

    let blank = ItemDraft {
        name: String::new(),
        description: None,
    };
    assert_eq!(blank.check().unwrap_err().field_errors()[0].field, "name");

    let long = ItemDraft {
        name: "n".repeat(101),
        description: None,
    };
    assert!(long.check().is_err());
}

#[test]
fn test_description_is_optional_in_json() {
    let draft: ItemDraft = serde_json::from_str(r#"{"name": "Widget"}"#).unwrap();
    assert!(draft.description.is_none());
}

#[test]
fn test_apply_keeps_identity() {
    let now = Utc::now();
    let mut item = Item::from_draft(
        ItemDraft {
            name: "Widget".to_string(),
            description: None,
        },
        now,
    );
    let id = item.id;

    item.apply(ItemDraft {
        name: "Gadget".to_string(),
        description: Some("Shiny".to_string()),
    });

    assert_eq!(item.id, id);
    assert_eq!(item.created_at, now);
    assert_eq!(item.name, "Gadget");
}
