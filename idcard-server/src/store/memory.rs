//! In-memory storage implementation

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::RwLock;

use chrono::Utc;

use super::{IdCardRequest, NewIdCardRequest, RequestStore, StoreResult};

/// In-memory request store for tests and local development
pub struct InMemoryRequestStore {
    rows: RwLock<Vec<IdCardRequest>>,
    next_id: AtomicI64,
}

impl InMemoryRequestStore {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryRequestStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestStore for InMemoryRequestStore {
    fn insert(&self, request: NewIdCardRequest) -> StoreResult<IdCardRequest> {
        let row = IdCardRequest {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            first_name: request.first_name,
            last_name: request.last_name,
            middle_name: request.middle_name,
            department: request.department,
            identifier: request.identifier,
            role: request.role,
            passport_photo_link: request.passport_photo_link,
            created_at: Utc::now(),
        };
        self.rows.write().unwrap().push(row.clone());
        Ok(row)
    }

    fn list_all(&self) -> StoreResult<Vec<IdCardRequest>> {
        Ok(self.rows.read().unwrap().clone())
    }

    fn identifier_exists(&self, identifier: &str) -> StoreResult<bool> {
        Ok(self
            .rows
            .read()
            .unwrap()
            .iter()
            .any(|row| row.identifier == identifier))
    }
}
