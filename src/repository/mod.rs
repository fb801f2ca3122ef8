pub mod cafe_repository;
pub mod memory;

use thiserror::Error;

use crate::models::{Cafe, NewCafe};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("a cafe named {0:?} already exists")]
    DuplicateName(String),
    #[error("storage backend failure: {0}")]
    Backend(#[from] mongodb::error::Error),
}

/// Persistence contract consumed by the route handlers. Implementations own
/// id assignment and `name` uniqueness, and serialize conflicting writes —
/// handlers do no locking of their own.
#[rocket::async_trait]
pub trait CafeStore: Send + Sync {
    async fn get_by_id(&self, id: i64) -> Result<Option<Cafe>, StoreError>;

    /// All records in insertion (ascending id) order.
    async fn list_all(&self) -> Result<Vec<Cafe>, StoreError>;

    /// Exact, case-sensitive match on the `location` field.
    async fn filter_by_location(&self, location: &str) -> Result<Vec<Cafe>, StoreError>;

    /// Assigns the next id and inserts. Fails with `DuplicateName` if a cafe
    /// with the same name is already stored.
    async fn insert(&self, fields: NewCafe) -> Result<Cafe, StoreError>;

    /// Sets `coffee_price` on the given record, leaving all other fields
    /// untouched. `None` when the id is unknown.
    async fn update_price(&self, id: i64, new_price: &str) -> Result<Option<Cafe>, StoreError>;

    /// Removes the record; `false` when the id is unknown.
    async fn delete(&self, id: i64) -> Result<bool, StoreError>;
}
