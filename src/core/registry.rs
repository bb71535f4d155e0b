//! Type Registry - the managed set of tag names
//!
//! Ordered, unique, case-sensitive. Removing a tag here never touches the
//! items that carry it: tags are labels, not foreign keys.

use std::collections::BTreeMap;

use super::durability::{Applied, Durability};
use super::item::Item;
use super::storage::{KvBackend, TYPES_KEY};

/// Registry used when nothing has ever been persisted
pub const DEFAULT_TYPES: [&str; 3] = ["Article", "Video", "Tool"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRegistry {
    types: Vec<String>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::bootstrap()
    }
}

impl TypeRegistry {
    /// The three built-in tags
    pub fn bootstrap() -> Self {
        Self::from_types(DEFAULT_TYPES)
    }

    /// Build from any list, keeping the first occurrence of each name
    pub fn from_types<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for name in types.into_iter().map(Into::into) {
            if !unique.contains(&name) {
                unique.push(name);
            }
        }
        Self { types: unique }
    }

    /// Read the persisted registry; absent or unreadable falls back to the
    /// bootstrap default
    pub fn load(backend: &dyn KvBackend) -> Self {
        let raw = match backend.get(TYPES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Self::bootstrap(),
            Err(err) => {
                tracing::warn!(error = %err, "failed to read type registry, using defaults");
                return Self::bootstrap();
            }
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(types) => Self::from_types(types),
            Err(err) => {
                tracing::warn!(error = %err, "malformed type registry, using defaults");
                Self::bootstrap()
            }
        }
    }

    /// Write the whole registry
    pub fn save(&self, backend: &mut dyn KvBackend) -> Durability {
        let result = serde_json::to_string(&self.types)
            .map_err(Into::into)
            .and_then(|doc| backend.set(TYPES_KEY, &doc));
        Durability::from_write(result, "type registry")
    }

    /// Append a trimmed name; no-op when empty or already present
    pub fn add(&mut self, name: &str, backend: &mut dyn KvBackend) -> Applied<Vec<String>> {
        let name = name.trim();
        if name.is_empty() || self.contains(name) {
            return Applied::new(self.types.clone(), Durability::Unchanged);
        }

        self.types.push(name.to_string());
        tracing::debug!(tag = name, "registered type");
        let durability = self.save(backend);
        Applied::new(self.types.clone(), durability)
    }

    /// Drop every exact match and persist
    pub fn remove(&mut self, name: &str, backend: &mut dyn KvBackend) -> Applied<Vec<String>> {
        self.types.retain(|t| t != name);
        let durability = self.save(backend);
        Applied::new(self.types.clone(), durability)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.iter().any(|t| t == name)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.types
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Count how many items carry each tag
    pub fn usage(&self, items: &[Item]) -> TypeUsage {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for tag in items.iter().flat_map(|it| it.types.iter()) {
            *counts.entry(tag.as_str()).or_default() += 1;
        }

        let registered = self
            .types
            .iter()
            .map(|t| (t.clone(), counts.get(t.as_str()).copied().unwrap_or(0)))
            .collect();
        let unregistered = counts
            .into_iter()
            .filter(|(tag, _)| !self.contains(tag))
            .map(|(tag, n)| (tag.to_string(), n))
            .collect();

        TypeUsage {
            registered,
            unregistered,
        }
    }
}

/// Per-tag item counts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeUsage {
    /// Registry order
    pub registered: Vec<(String, usize)>,
    /// Tags found on items but missing from the registry, sorted by name
    pub unregistered: Vec<(String, usize)>,
}
