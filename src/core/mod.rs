//! Core module - Business logic
//!
//! Items, the tag registry, persistence and the import/export codec.

pub mod codec;
pub mod durability;
pub mod error;
pub mod item;
pub mod link;
pub mod manager;
pub mod registry;
pub mod storage;
pub mod store;
