//! Resource manager - the one object front ends talk to
//!
//! Owns the backend, the item collection and the type registry. Every
//! mutation runs to completion on `&mut self` and ends with a full write of
//! the affected document; the write outcome is reported, never raised.
//!
//! ```text
//! front end ──► ResourceManager ──► ItemStore ───┐
//!                      │                         ├──► KvBackend
//!                      └──────────► TypeRegistry ┘
//! ```

use super::codec;
use super::durability::Applied;
use super::error::ResourceError;
use super::item::{Item, ItemInput};
use super::link::normalize_url;
use super::registry::TypeRegistry;
use super::storage::KvBackend;
use super::store::ItemStore;

pub struct ResourceManager<B: KvBackend> {
    backend: B,
    store: ItemStore,
    registry: TypeRegistry,
}

impl<B: KvBackend> ResourceManager<B> {
    /// Load both documents from `backend`
    pub fn open(backend: B) -> Self {
        let store = ItemStore::load(&backend);
        let registry = TypeRegistry::load(&backend);
        Self {
            backend,
            store,
            registry,
        }
    }

    /// Items in storage (insertion) order
    pub fn items(&self) -> &[Item] {
        self.store.items()
    }

    /// Items in display order
    pub fn items_newest_first(&self) -> impl Iterator<Item = &Item> {
        self.store.newest_first()
    }

    /// Items carrying `tag`, newest first
    pub fn items_tagged<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Item> {
        self.store.newest_first().filter(move |it| it.has_type(tag))
    }

    pub fn item(&self, id: &str) -> Option<&Item> {
        self.store.get(id)
    }

    pub fn types(&self) -> &[String] {
        self.registry.as_slice()
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Create an item, or replace the fields of `existing_id` if it is stored
    ///
    /// # Errors
    /// `Validation` when the trimmed name is empty; nothing is stored.
    pub fn create_or_update(
        &mut self,
        input: ItemInput,
        existing_id: Option<&str>,
    ) -> Result<Applied<Item>, ResourceError> {
        let input = sanitize(input)?;

        let item = match existing_id.and_then(|id| self.store.get_mut(id)) {
            Some(item) => {
                item.apply(input);
                tracing::debug!(id = %item.id, "updated item");
                item.clone()
            }
            None => {
                if let Some(id) = existing_id {
                    tracing::debug!(%id, "no item with this id, creating a new one");
                }
                let mut item = Item::new(self.store.next_id(), String::new());
                item.apply(input);
                tracing::debug!(id = %item.id, "created item");
                self.store.push(item.clone());
                item
            }
        };

        let durability = self.store.save(&mut self.backend);
        Ok(Applied::new(item, durability))
    }

    /// Remove an item; unknown ids are a no-op. Returns the removed item.
    pub fn delete(&mut self, id: &str) -> Applied<Option<Item>> {
        let removed = self.store.remove(id);
        if removed.is_none() {
            tracing::debug!(%id, "delete of unknown id");
        }
        let durability = self.store.save(&mut self.backend);
        Applied::new(removed, durability)
    }

    pub fn add_type(&mut self, name: &str) -> Applied<Vec<String>> {
        self.registry.add(name, &mut self.backend)
    }

    /// Unregister a tag; items keep it
    pub fn remove_type(&mut self, name: &str) -> Applied<Vec<String>> {
        self.registry.remove(name, &mut self.backend)
    }

    pub fn export_collection(&self) -> Result<String, ResourceError> {
        codec::export_items(self.store.items())
    }

    /// Replace the whole collection with `document`
    ///
    /// On error the current collection and its stored copy are untouched.
    /// Returns the number of imported items.
    pub fn import_collection(&mut self, document: &str) -> Result<Applied<usize>, ResourceError> {
        let items = codec::import_items(document)?;
        let count = items.len();
        self.store.replace_all(items);
        tracing::info!(count, "imported collection");
        let durability = self.store.save(&mut self.backend);
        Ok(Applied::new(count, durability))
    }
}

fn sanitize(input: ItemInput) -> Result<ItemInput, ResourceError> {
    let name = input.name.trim().to_string();
    if name.is_empty() {
        return Err(ResourceError::Validation("name required".to_string()));
    }

    let mut types: Vec<String> = Vec::with_capacity(input.types.len());
    for tag in input.types.iter().map(|t| t.trim()) {
        if !tag.is_empty() && !types.iter().any(|t| t == tag) {
            types.push(tag.to_string());
        }
    }

    Ok(ItemInput {
        name,
        description: input.description.trim().to_string(),
        link: normalize_url(input.link.trim()),
        types,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crate::core::durability::Durability;
    use crate::core::storage::{MemoryBackend, ITEMS_KEY, TYPES_KEY};

    fn manager() -> (ResourceManager<MemoryBackend>, MemoryBackend) {
        let backend = MemoryBackend::new();
        (ResourceManager::open(backend.clone()), backend)
    }

    #[test]
    fn test_create_assigns_identity() {
        let (mut mgr, backend) = manager();
        let before = Utc::now().timestamp_millis();

        let applied = mgr
            .create_or_update(
                ItemInput::new("  Rust book ")
                    .with_description(" the book ")
                    .with_link("doc.rust-lang.org/book")
                    .with_types(["Article", " Tool ", "", "Article"]),
                None,
            )
            .unwrap();

        let item = applied.value;
        assert!(applied.durability.is_persisted());
        assert_eq!(item.id.len(), 7);
        assert!(item.created_at >= before);
        assert_eq!(item.name, "Rust book");
        assert_eq!(item.description, "the book");
        assert_eq!(item.link, "https://doc.rust-lang.org/book");
        assert_eq!(item.types, vec!["Article".to_string(), "Tool".to_string()]);

        assert_eq!(mgr.items(), [item]);
        assert!(backend.raw(ITEMS_KEY).unwrap().contains("Rust book"));
    }

    #[test]
    fn test_empty_name_rejected() {
        let (mut mgr, backend) = manager();
        let err = mgr.create_or_update(ItemInput::new("   "), None).unwrap_err();

        assert!(matches!(err, ResourceError::Validation(ref m) if m == "name required"));
        assert!(mgr.items().is_empty());
        assert!(backend.raw(ITEMS_KEY).is_none());
    }

    #[test]
    fn test_update_preserves_identity() {
        let (mut mgr, _backend) = manager();
        let original = mgr
            .create_or_update(ItemInput::new("Old").with_types(["Video"]), None)
            .unwrap()
            .value;

        let updated = mgr
            .create_or_update(ItemInput::new("New"), Some(&original.id))
            .unwrap()
            .value;

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.created_at, original.created_at);
        assert_eq!(updated.name, "New");
        assert!(updated.types.is_empty());
        assert_eq!(mgr.items().len(), 1);
    }

    #[test]
    fn test_update_unknown_id_appends() {
        let (mut mgr, _backend) = manager();
        let item = mgr
            .create_or_update(ItemInput::new("X"), Some("missing"))
            .unwrap()
            .value;

        assert_ne!(item.id, "missing");
        assert_eq!(mgr.items().len(), 1);
    }

    #[test]
    fn test_delete() {
        let (mut mgr, _backend) = manager();
        let id = mgr.create_or_update(ItemInput::new("A"), None).unwrap().value.id;

        let removed = mgr.delete(&id);
        assert_eq!(removed.value.map(|it| it.id), Some(id));
        assert!(mgr.items().is_empty());
    }

    #[test]
    fn test_delete_unknown_is_noop() {
        let (mut mgr, _backend) = manager();
        mgr.create_or_update(ItemInput::new("A"), None).unwrap();

        let removed = mgr.delete("nope");
        assert!(removed.value.is_none());
        assert_eq!(mgr.items().len(), 1);
    }

    #[test]
    fn test_display_order_newest_first() {
        let (mut mgr, _backend) = manager();
        mgr.create_or_update(ItemInput::new("first"), None).unwrap();
        mgr.create_or_update(ItemInput::new("second"), None).unwrap();

        let names: Vec<&str> = mgr.items_newest_first().map(|it| it.name.as_str()).collect();
        assert_eq!(names, vec!["second", "first"]);
        assert_eq!(mgr.items()[0].name, "first");
    }

    #[test]
    fn test_items_tagged() {
        let (mut mgr, _backend) = manager();
        mgr.create_or_update(ItemInput::new("a").with_types(["Tool"]), None).unwrap();
        mgr.create_or_update(ItemInput::new("b").with_types(["Video"]), None).unwrap();

        let names: Vec<&str> = mgr.items_tagged("Tool").map(|it| it.name.as_str()).collect();
        assert_eq!(names, vec!["a"]);
    }

    #[test]
    fn test_remove_type_keeps_item_tags() {
        let (mut mgr, _backend) = manager();
        mgr.add_type("Book");
        let item = mgr
            .create_or_update(ItemInput::new("Dune").with_types(["Book"]), None)
            .unwrap()
            .value;

        mgr.remove_type("Book");
        assert!(!mgr.types().contains(&"Book".to_string()));
        assert_eq!(mgr.item(&item.id).unwrap().types, vec!["Book".to_string()]);
    }

    #[test]
    fn test_add_type_twice() {
        let (mut mgr, backend) = manager();
        mgr.add_type("Book");
        mgr.add_type("Book");

        assert_eq!(mgr.types().iter().filter(|t| *t == "Book").count(), 1);
        assert!(backend.raw(TYPES_KEY).unwrap().contains("Book"));
    }

    #[test]
    fn test_export_import_round_trip() {
        let (mut mgr, _backend) = manager();
        mgr.create_or_update(ItemInput::new("a").with_types(["Tool"]), None).unwrap();
        mgr.create_or_update(ItemInput::new("b").with_link("x.dev"), None).unwrap();
        let before = mgr.items().to_vec();
        let doc = mgr.export_collection().unwrap();

        let (mut other, _) = manager();
        let applied = other.import_collection(&doc).unwrap();
        assert_eq!(applied.value, 2);
        assert_eq!(other.items(), before.as_slice());
    }

    #[test]
    fn test_unknown_fields_survive_round_trip() {
        let (mut mgr, backend) = manager();
        let doc = r#"[{"id":"s1","name":"Fav","types":["Tool"],"createdAt":3,"starred":true}]"#;
        mgr.import_collection(doc).unwrap();

        let doc = mgr.export_collection().unwrap();
        let exported: serde_json::Value = serde_json::from_str(&doc).unwrap();
        assert_eq!(exported[0]["starred"], true);
        assert!(backend.raw(ITEMS_KEY).unwrap().contains("\"starred\":true"));

        mgr.create_or_update(ItemInput::new("Fav, renamed"), Some("s1")).unwrap();
        let reopened = ResourceManager::open(backend);
        let item = reopened.item("s1").unwrap();
        assert_eq!(item.name, "Fav, renamed");
        assert_eq!(item.extra.get("starred"), Some(&serde_json::json!(true)));
    }

    #[test]
    fn test_imported_item_without_id_is_addressable() {
        let (mut mgr, backend) = manager();
        let doc = r#"[{"name":"Handwritten","type":"Video"}, {"id":"k1","name":"Kept"}]"#;
        mgr.import_collection(doc).unwrap();

        let id = mgr.items()[0].id.clone();
        assert_eq!(id.len(), 7);
        assert_eq!(mgr.items()[1].id, "k1");
        assert!(backend.raw(ITEMS_KEY).unwrap().contains(&id));

        let updated = mgr
            .create_or_update(ItemInput::new("Edited"), Some(&id))
            .unwrap()
            .value;
        assert_eq!(updated.id, id);
        assert_eq!(mgr.items().len(), 2);

        let removed = mgr.delete(&id);
        assert_eq!(removed.value.map(|it| it.name), Some("Edited".to_string()));
        assert_eq!(mgr.items().len(), 1);
    }

    #[test]
    fn test_import_odd_elements_accepted() {
        let (mut mgr, _backend) = manager();
        let doc = r#"[
            {"id": "f1", "name": "A", "createdAt": 1.5},
            "stray",
            {"id": "t1", "name": "B", "types": "Video"}
        ]"#;
        let applied = mgr.import_collection(doc).unwrap();

        assert_eq!(applied.value, 3);
        assert_eq!(mgr.item("f1").unwrap().created_at, 1);
        assert!(mgr.item("t1").unwrap().types.is_empty());
        assert_eq!(mgr.items()[1].id.len(), 7);
    }

    #[test]
    fn test_import_replaces_wholesale() {
        let (mut mgr, backend) = manager();
        mgr.create_or_update(ItemInput::new("old"), None).unwrap();

        mgr.import_collection(r#"[{"id":"n1","name":"new","type":"Video","createdAt":7}]"#)
            .unwrap();

        assert_eq!(mgr.items().len(), 1);
        assert_eq!(mgr.items()[0].id, "n1");
        assert_eq!(mgr.items()[0].types, vec!["Video".to_string()]);
        assert!(backend.raw(ITEMS_KEY).unwrap().contains("n1"));
    }

    #[test]
    fn test_import_shape_error_leaves_state() {
        let (mut mgr, backend) = manager();
        mgr.create_or_update(ItemInput::new("keep"), None).unwrap();
        let stored = backend.raw(ITEMS_KEY);
        let before = mgr.items().to_vec();

        let err = mgr.import_collection(r#"{"name":"x"}"#).unwrap_err();
        assert!(matches!(err, ResourceError::Shape(_)));
        assert_eq!(mgr.items(), before.as_slice());
        assert_eq!(backend.raw(ITEMS_KEY), stored);
    }

    #[test]
    fn test_import_parse_error_leaves_state() {
        let (mut mgr, _backend) = manager();
        mgr.create_or_update(ItemInput::new("keep"), None).unwrap();

        assert!(matches!(
            mgr.import_collection("not json"),
            Err(ResourceError::Parse(_))
        ));
        assert_eq!(mgr.items().len(), 1);
    }

    #[test]
    fn test_write_failure_is_reported_not_raised() {
        let (mut mgr, backend) = manager();
        backend.set_fail_writes(true);

        let applied = mgr.create_or_update(ItemInput::new("A"), None).unwrap();
        assert!(matches!(applied.durability, Durability::InMemoryOnly(_)));
        assert_eq!(mgr.items().len(), 1);
        assert!(backend.raw(ITEMS_KEY).is_none());
    }

    #[test]
    fn test_reopen_sees_persisted_state() {
        let (mut mgr, backend) = manager();
        mgr.create_or_update(ItemInput::new("A"), None).unwrap();
        mgr.add_type("Book");

        let reopened = ResourceManager::open(backend);
        assert_eq!(reopened.items(), mgr.items());
        assert!(reopened.types().contains(&"Book".to_string()));
    }
}
