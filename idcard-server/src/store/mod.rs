//! Storage abstractions for ID-card requests

pub mod memory;
pub mod models;
pub mod sqlite;

pub use memory::InMemoryRequestStore;
pub use models::*;
pub use sqlite::SqliteStore;

use crate::error::ServiceError;

/// Result type for store operations
pub type StoreResult<T> = Result<T, ServiceError>;

/// Trait for the ID-card request table
///
/// Rows are created exactly once on a valid submission and never
/// updated or deleted afterwards.
pub trait RequestStore: Send + Sync {
    /// Insert one request; the store assigns `id` and `created_at`
    fn insert(&self, request: NewIdCardRequest) -> StoreResult<IdCardRequest>;

    /// All stored requests, oldest first
    fn list_all(&self) -> StoreResult<Vec<IdCardRequest>>;

    /// Whether any stored request already carries this identifier
    fn identifier_exists(&self, identifier: &str) -> StoreResult<bool>;
}
