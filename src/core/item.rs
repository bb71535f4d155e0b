//! Item - Core data structure
//!
//! An item is one catalogued resource: a named link with tags.
//!
//! # Wire shape
//! ```json
//! {
//!   "id": "k3j9x0a",
//!   "name": "Rust book",
//!   "description": "",
//!   "link": "https://doc.rust-lang.org/book/",
//!   "types": ["Article", "Tool"],
//!   "type": "Article",
//!   "createdAt": 1718000000000
//! }
//! ```
//!
//! # Key Properties
//! - **types**: canonical tag list; older records only carry `type`
//! - **type**: always written as `types[0]` so older readers keep working
//! - **createdAt**: epoch millis, set once
//! - Unknown fields are carried through untouched
//! - Known fields holding an unexpected JSON type are read as absent and
//!   written back as found

use chrono::{DateTime, TimeZone, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Alphabet for generated ids
const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Length of generated ids
pub const ID_LEN: usize = 7;

/// A catalogued resource in its canonical in-memory shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "StoredItem")]
pub struct Item {
    /// Opaque identifier, immutable once assigned
    pub id: String,

    /// Title (non-empty for anything created through the manager)
    pub name: String,

    pub description: String,

    /// Normalized absolute URL, may be empty
    pub link: String,

    /// Tag names, in the order they were chosen
    pub types: Vec<String>,

    /// Creation time in epoch millis
    pub created_at: i64,

    /// Fields this version does not know about, plus known fields whose
    /// stored value had an unexpected JSON type (written back as found)
    pub extra: Map<String, Value>,
}

/// Key holding an array element that was not a JSON object
pub const WRAPPED_VALUE_KEY: &str = "value";

/// Fields replaced by [`Item::apply`]; a raw value kept for them is stale
/// once the user edits the item
const EDITABLE_FIELDS: [&str; 5] = ["name", "description", "link", "types", "type"];

/// Record as written to persisted and exported documents
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct StoredItem {
    id: Value,
    name: Value,
    description: Value,
    link: Value,
    types: Value,
    #[serde(rename = "type")]
    legacy_type: Value,
    created_at: Value,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// Decoding never fails: older, hand-edited or foreign records all become
/// an item. Values of an unexpected type are treated as absent and kept in
/// `extra` so they are written back unchanged.
impl From<Value> for Item {
    fn from(value: Value) -> Self {
        let mut extra = match value {
            Value::Object(map) => map,
            other => {
                tracing::debug!("array element is not an object, wrapping it");
                let mut map = Map::new();
                map.insert(WRAPPED_VALUE_KEY.to_string(), other);
                map
            }
        };

        let id = match extra.remove("id") {
            Some(Value::Number(n)) => n.to_string(),
            raw => take_string(&mut extra, "id", raw).unwrap_or_default(),
        };
        let name = take_field_string(&mut extra, "name");
        let description = take_field_string(&mut extra, "description");
        let link = take_field_string(&mut extra, "link");

        let types = match extra.remove("types") {
            Some(Value::Array(values)) if values.iter().all(Value::is_string) => Some(
                values
                    .into_iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect(),
            ),
            None | Some(Value::Null) => None,
            Some(other) => {
                keep_raw(&mut extra, "types", other);
                None
            }
        };
        let raw_type = extra.remove("type");
        let legacy_type = take_string(&mut extra, "type", raw_type);

        let created_at = match extra.remove("createdAt") {
            Some(Value::Number(n)) => match (n.as_i64(), n.as_f64()) {
                (Some(ms), _) => ms,
                (None, Some(ms)) if ms.is_finite() => ms as i64,
                _ => {
                    keep_raw(&mut extra, "createdAt", Value::Number(n));
                    0
                }
            },
            None | Some(Value::Null) => 0,
            Some(other) => {
                keep_raw(&mut extra, "createdAt", other);
                0
            }
        };

        Self {
            id,
            name,
            description,
            link,
            types: migrate_types(types, legacy_type),
            created_at,
            extra,
        }
    }
}

impl From<Item> for StoredItem {
    fn from(item: Item) -> Self {
        let legacy_type = Value::String(item.primary_type().to_string());
        let mut extra = item.extra;
        let mut field = |key: &str, canonical: Value| extra.remove(key).unwrap_or(canonical);

        let id = field("id", Value::String(item.id));
        let name = field("name", Value::String(item.name));
        let description = field("description", Value::String(item.description));
        let link = field("link", Value::String(item.link));
        let types = field("types", Value::from(item.types));
        let legacy_type = field("type", legacy_type);
        let created_at = field("createdAt", Value::from(item.created_at));

        Self {
            id,
            name,
            description,
            link,
            types,
            legacy_type,
            created_at,
            extra,
        }
    }
}

fn take_field_string(extra: &mut Map<String, Value>, key: &str) -> String {
    let raw = extra.remove(key);
    take_string(extra, key, raw).unwrap_or_default()
}

/// String value of a field; other JSON types are kept raw in `extra`
fn take_string(extra: &mut Map<String, Value>, key: &str, raw: Option<Value>) -> Option<String> {
    match raw {
        Some(Value::String(s)) => Some(s),
        None | Some(Value::Null) => None,
        Some(other) => {
            keep_raw(extra, key, other);
            None
        }
    }
}

fn keep_raw(extra: &mut Map<String, Value>, key: &str, raw: Value) {
    tracing::debug!(field = key, "unexpected JSON type, keeping raw value");
    extra.insert(key.to_string(), raw);
}

/// `types` wins when present; otherwise a non-empty legacy `type` becomes
/// a single-element list
pub fn migrate_types(types: Option<Vec<String>>, legacy_type: Option<String>) -> Vec<String> {
    match types {
        Some(types) => types,
        None => legacy_type
            .filter(|t| !t.is_empty())
            .map(|t| vec![t])
            .unwrap_or_default(),
    }
}

impl Item {
    /// Create an item with a fresh timestamp
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            link: String::new(),
            types: Vec::new(),
            created_at: Utc::now().timestamp_millis(),
            extra: Map::new(),
        }
    }

    /// Value written to the legacy `type` field
    pub fn primary_type(&self) -> &str {
        self.types.first().map(String::as_str).unwrap_or("")
    }

    pub fn has_type(&self, tag: &str) -> bool {
        self.types.iter().any(|t| t == tag)
    }

    /// Creation time, `None` if the stored value is out of range
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.created_at).single()
    }

    /// Replace every user-editable field, keeping id and creation time
    pub fn apply(&mut self, input: ItemInput) {
        self.name = input.name;
        self.description = input.description;
        self.link = input.link;
        self.types = input.types;
        for key in EDITABLE_FIELDS {
            self.extra.remove(key);
        }
    }
}

impl std::fmt::Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.id, self.name)?;
        if !self.types.is_empty() {
            write!(f, " ({})", self.types.join(", "))?;
        }
        Ok(())
    }
}

/// User-editable fields of an item, as collected from the front end
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemInput {
    pub name: String,
    pub description: String,
    pub link: String,
    pub types: Vec<String>,
}

impl ItemInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Pre-fill from an existing item (edit form)
    pub fn from_item(item: &Item) -> Self {
        Self {
            name: item.name.clone(),
            description: item.description.clone(),
            link: item.link.clone(),
            types: item.types.clone(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = link.into();
        self
    }

    pub fn with_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types = types.into_iter().map(Into::into).collect();
        self
    }
}

/// Generate a random id for which `taken` returns false
///
/// Tokens are `ID_LEN` characters over `[0-9a-z]`. A collision just draws
/// again.
pub fn generate_id(taken: impl Fn(&str) -> bool) -> String {
    let mut rng = rand::rng();
    loop {
        let id: String = (0..ID_LEN)
            .map(|_| ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())] as char)
            .collect();
        if !taken(&id) {
            return id;
        }
        tracing::debug!(%id, "generated id already in use, drawing again");
    }
}
