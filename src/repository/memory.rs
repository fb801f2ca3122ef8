use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::models::{Cafe, NewCafe};
use crate::repository::{CafeStore, StoreError};

struct Inner {
    next_id: i64,
    cafes: BTreeMap<i64, Cafe>,
}

/// In-memory cafe store with the same contract as the Mongo repository.
/// Backs the test suite and doubles as an ephemeral backend; the map lock
/// serializes every operation.
pub struct InMemoryCafeStore {
    inner: Mutex<Inner>,
}

impl InMemoryCafeStore {
    pub fn new() -> Self {
        InMemoryCafeStore {
            inner: Mutex::new(Inner {
                next_id: 1,
                cafes: BTreeMap::new(),
            }),
        }
    }
}

impl Default for InMemoryCafeStore {
    fn default() -> Self {
        Self::new()
    }
}

#[rocket::async_trait]
impl CafeStore for InMemoryCafeStore {
    async fn get_by_id(&self, id: i64) -> Result<Option<Cafe>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.cafes.get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Cafe>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.cafes.values().cloned().collect())
    }

    async fn filter_by_location(&self, location: &str) -> Result<Vec<Cafe>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .cafes
            .values()
            .filter(|cafe| cafe.location == location)
            .cloned()
            .collect())
    }

    async fn insert(&self, fields: NewCafe) -> Result<Cafe, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.cafes.values().any(|cafe| cafe.name == fields.name) {
            return Err(StoreError::DuplicateName(fields.name));
        }
        let id = inner.next_id;
        inner.next_id += 1;
        let cafe = fields.with_id(id);
        inner.cafes.insert(id, cafe.clone());
        Ok(cafe)
    }

    async fn update_price(&self, id: i64, new_price: &str) -> Result<Option<Cafe>, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        Ok(inner.cafes.get_mut(&id).map(|cafe| {
            cafe.coffee_price = Some(new_price.to_string());
            cafe.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        Ok(inner.cafes.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(name: &str, location: &str) -> NewCafe {
        NewCafe {
            name: name.to_string(),
            map_url: "https://maps.example.com/cafe".to_string(),
            img_url: "https://img.example.com/cafe.jpg".to_string(),
            location: location.to_string(),
            seats: "20-30".to_string(),
            has_toilet: true,
            has_wifi: true,
            has_sockets: false,
            can_take_calls: false,
            coffee_price: Some("£2.50".to_string()),
        }
    }

    #[rocket::async_test]
    async fn insert_assigns_sequential_ids() {
        let store = InMemoryCafeStore::new();
        let first = store.insert(sample("One", "Soho")).await.unwrap();
        let second = store.insert(sample("Two", "Soho")).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[rocket::async_test]
    async fn insert_rejects_duplicate_name() {
        let store = InMemoryCafeStore::new();
        store.insert(sample("One", "Soho")).await.unwrap();
        let err = store.insert(sample("One", "Peckham")).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateName(name) if name == "One"));
        assert_eq!(store.list_all().await.unwrap().len(), 1);
    }

    #[rocket::async_test]
    async fn filter_is_exact_and_case_sensitive() {
        let store = InMemoryCafeStore::new();
        store.insert(sample("One", "Soho")).await.unwrap();
        store.insert(sample("Two", "soho")).await.unwrap();
        let found = store.filter_by_location("Soho").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "One");
        assert!(store.filter_by_location("Hackney").await.unwrap().is_empty());
    }

    #[rocket::async_test]
    async fn update_price_touches_only_the_price() {
        let store = InMemoryCafeStore::new();
        let created = store.insert(sample("One", "Soho")).await.unwrap();
        let updated = store.update_price(created.id, "£3.10").await.unwrap().unwrap();
        assert_eq!(updated.coffee_price.as_deref(), Some("£3.10"));
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.location, created.location);
        assert!(store.update_price(999, "£1.00").await.unwrap().is_none());
    }

    #[rocket::async_test]
    async fn delete_reports_whether_anything_was_removed() {
        let store = InMemoryCafeStore::new();
        let created = store.insert(sample("One", "Soho")).await.unwrap();
        assert!(store.delete(created.id).await.unwrap());
        assert!(!store.delete(created.id).await.unwrap());
        assert!(store.get_by_id(created.id).await.unwrap().is_none());
    }
}
