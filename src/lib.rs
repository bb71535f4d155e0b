//! resman - personal resource manager
//!
//! A catalog of named links (title, description, URL, tags) kept in a local
//! key-value store, with JSON export and import.
//!
//! ## Key Concepts
//!
//! - **Items**: records with an opaque id, stored in insertion order and
//!   shown newest first
//! - **Types**: user-managed tag names; removing one never untags items
//! - **Migration**: older records with a single `type` read as `types`
//! - **Durability**: storage failures never fail a mutation, they are
//!   reported alongside its result

pub mod cli;
pub mod config;
pub mod core;

pub use crate::core::durability::{Applied, Durability};
pub use crate::core::error::{PersistenceError, ResourceError};
pub use crate::core::item::{Item, ItemInput};
pub use crate::core::link::normalize_url;
pub use crate::core::manager::ResourceManager;
pub use crate::core::registry::TypeRegistry;
pub use crate::core::storage::{KvBackend, MemoryBackend, SqliteBackend};
