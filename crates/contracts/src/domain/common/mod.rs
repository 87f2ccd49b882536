//! Common types and traits for all entities

pub mod record_id;
pub mod select_option;

// Re-exports
pub use record_id::{deserialize_optional_id, RecordId};
pub use select_option::{find_option, SelectOption};
