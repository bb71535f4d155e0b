//! Import/Export codec
//!
//! The export document is the items array, pretty-printed. Import accepts
//! any JSON document whose top level is an array, element by element as
//! found; replacing the live collection is the manager's job.

use serde_json::Value;

use super::error::ResourceError;
use super::item::Item;

/// Suggested file name for exports
pub const EXPORT_FILE_NAME: &str = "resources.json";

/// Serialize the collection as a pretty-printed JSON array
pub fn export_items(items: &[Item]) -> Result<String, ResourceError> {
    Ok(serde_json::to_string_pretty(items)?)
}

/// Parse an import document
///
/// Elements are not validated: each one becomes an [`Item`], with values
/// of an unexpected type kept verbatim (see `Item::extra`).
///
/// # Errors
/// - `Parse` when the text is not JSON
/// - `Shape` when the top-level value is not an array
pub fn import_items(document: &str) -> Result<Vec<Item>, ResourceError> {
    let value: Value =
        serde_json::from_str(document).map_err(|e| ResourceError::Parse(e.to_string()))?;

    let Value::Array(elements) = value else {
        return Err(ResourceError::Shape("expected array".to_string()));
    };

    Ok(elements.into_iter().map(Item::from).collect())
}
