//! Storage abstractions for service layer
//!
//! Contains the keyed document collection capability, a JSON file-backed
//! collection, and the insertion-ordered table both stores are built on.

pub mod collection;
pub mod json_map_store;
pub(crate) mod ordered_map;

pub use collection::DocumentCollection;
pub use json_map_store::JsonMapStore;
