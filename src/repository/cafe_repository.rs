use futures::stream::TryStreamExt;
use mongodb::bson::doc;
use mongodb::options::{FindOneAndUpdateOptions, FindOneOptions, FindOptions, ReturnDocument};
use mongodb::{Client, Collection};
use tokio::sync::Mutex;

use crate::models::{Cafe, NewCafe};
use crate::repository::{CafeStore, StoreError};

/// MongoDB-backed cafe store. Individual Mongo operations are atomic on
/// their own; the insert path reads before it writes (uniqueness check plus
/// id assignment), so it runs under `write_lock`.
pub struct MongoCafeRepository {
    collection: Collection<Cafe>,
    write_lock: Mutex<()>,
}

impl MongoCafeRepository {
    pub fn new(client: &Client, database: &str) -> Self {
        let collection = client.database(database).collection::<Cafe>("cafes");
        MongoCafeRepository {
            collection,
            write_lock: Mutex::new(()),
        }
    }

    async fn next_id(&self) -> Result<i64, StoreError> {
        let options = FindOneOptions::builder().sort(doc! { "id": -1 }).build();
        let highest = self.collection.find_one(None, options).await?;
        Ok(highest.map(|cafe| cafe.id + 1).unwrap_or(1))
    }
}

#[rocket::async_trait]
impl CafeStore for MongoCafeRepository {
    async fn get_by_id(&self, id: i64) -> Result<Option<Cafe>, StoreError> {
        let filter = doc! { "id": id };
        Ok(self.collection.find_one(filter, None).await?)
    }

    async fn list_all(&self) -> Result<Vec<Cafe>, StoreError> {
        let options = FindOptions::builder().sort(doc! { "id": 1 }).build();
        let mut cursor = self.collection.find(None, options).await?;
        let mut cafes = Vec::new();
        while let Some(cafe) = cursor.try_next().await? {
            cafes.push(cafe);
        }
        Ok(cafes)
    }

    async fn filter_by_location(&self, location: &str) -> Result<Vec<Cafe>, StoreError> {
        let filter = doc! { "location": location };
        let mut cursor = self.collection.find(filter, None).await?;
        let mut cafes = Vec::new();
        while let Some(cafe) = cursor.try_next().await? {
            cafes.push(cafe);
        }
        Ok(cafes)
    }

    async fn insert(&self, fields: NewCafe) -> Result<Cafe, StoreError> {
        let _guard = self.write_lock.lock().await;

        let existing = self
            .collection
            .find_one(doc! { "name": &fields.name }, None)
            .await?;
        if existing.is_some() {
            return Err(StoreError::DuplicateName(fields.name));
        }

        let cafe = fields.with_id(self.next_id().await?);
        self.collection.insert_one(&cafe, None).await?;
        Ok(cafe)
    }

    async fn update_price(&self, id: i64, new_price: &str) -> Result<Option<Cafe>, StoreError> {
        let filter = doc! { "id": id };
        let update = doc! { "$set": { "coffee_price": new_price } };
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();
        Ok(self
            .collection
            .find_one_and_update(filter, update, options)
            .await?)
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let filter = doc! { "id": id };
        let result = self.collection.delete_one(filter, None).await?;
        Ok(result.deleted_count == 1)
    }
}
