//! Item Store - the record collection
//!
//! Storage order is insertion order. Display order (newest first) is a view
//! over it, see [`ItemStore::newest_first`].
//!
//! Migration happens once, while decoding: legacy `type` becomes `types`
//! (in [`Item`]'s deserializer) and records without an id get one here.

use super::durability::Durability;
use super::item::{generate_id, Item};
use super::storage::{KvBackend, ITEMS_KEY};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemStore {
    items: Vec<Item>,
}

impl ItemStore {
    /// Wrap an already decoded collection, backfilling missing ids
    pub fn new(mut items: Vec<Item>) -> Self {
        backfill_ids(&mut items);
        Self { items }
    }

    /// Read the persisted collection
    ///
    /// Absent, unreadable or malformed documents all yield an empty store.
    pub fn load(backend: &dyn KvBackend) -> Self {
        let raw = match backend.get(ITEMS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Self::default(),
            Err(err) => {
                tracing::warn!(error = %err, "failed to read items, starting empty");
                return Self::default();
            }
        };

        match serde_json::from_str::<Vec<Item>>(&raw) {
            Ok(items) => {
                tracing::debug!(count = items.len(), "loaded items");
                Self::new(items)
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to load items, starting empty");
                Self::default()
            }
        }
    }

    /// Overwrite the persisted collection with the in-memory one
    pub fn save(&self, backend: &mut dyn KvBackend) -> Durability {
        let result = serde_json::to_string(&self.items)
            .map_err(Into::into)
            .and_then(|doc| backend.set(ITEMS_KEY, &doc));
        Durability::from_write(result, "items")
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Display order
    pub fn newest_first(&self) -> impl Iterator<Item = &Item> {
        self.items.iter().rev()
    }

    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|it| it.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Item> {
        self.items.iter_mut().find(|it| it.id == id)
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn push(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Remove by id, `None` if absent
    pub fn remove(&mut self, id: &str) -> Option<Item> {
        let pos = self.items.iter().position(|it| it.id == id)?;
        Some(self.items.remove(pos))
    }

    /// Swap in a whole new collection
    pub fn replace_all(&mut self, items: Vec<Item>) {
        *self = Self::new(items);
    }

    /// Fresh id not used by any stored item
    pub fn next_id(&self) -> String {
        generate_id(|candidate| self.contains_id(candidate))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn backfill_ids(items: &mut [Item]) {
    for i in 0..items.len() {
        if items[i].id.is_empty() {
            let id = generate_id(|candidate| items.iter().any(|it| it.id == candidate));
            tracing::debug!(%id, name = %items[i].name, "assigned id to record without one");
            items[i].id = id;
            // a non-string id kept raw would shadow the new one on save
            items[i].extra.remove("id");
        }
    }
}
