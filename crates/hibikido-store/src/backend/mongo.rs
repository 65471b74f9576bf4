use mongodb::bson::{doc, spec::BinarySubtype, Binary};
use mongodb::options::ReplaceOptions;
use mongodb::sync::{Client, Collection};

use super::StoreBackend;
use crate::error::StoreError;

/// MongoDB-backed store: one collection per document type, keyed by the
/// document's own `key` field. Grounded on the sibling vector-index crate's
/// `backend-mongo` feature, which stores opaque bytes under a `value` binary
/// field the same way.
pub struct MongoBackend {
    client: Client,
    database: String,
}

impl MongoBackend {
    pub fn connect(uri: &str, database: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(uri).map_err(StoreError::backend)?;
        Ok(Self {
            client,
            database: database.to_string(),
        })
    }

    fn collection(&self, name: &str) -> Collection<mongodb::bson::Document> {
        self.client
            .database(&self.database)
            .collection::<mongodb::bson::Document>(name)
    }
}

impl StoreBackend for MongoBackend {
    fn put(&self, collection: &str, key: &str, value: &[u8]) -> Result<(), StoreError> {
        let filter = doc! { "key": key };
        let document = doc! {
            "key": key,
            "value": Binary { subtype: BinarySubtype::Generic, bytes: value.to_vec() },
        };
        let options = ReplaceOptions::builder().upsert(true).build();
        self.collection(collection)
            .replace_one(filter, document, options)
            .map_err(StoreError::backend)?;
        Ok(())
    }

    fn get(&self, collection: &str, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let filter = doc! { "key": key };
        let document = self
            .collection(collection)
            .find_one(filter, None)
            .map_err(StoreError::backend)?;
        Ok(document.and_then(|d| d.get_binary_generic("value").map(|b| b.to_vec()).ok()))
    }

    fn delete(&self, collection: &str, key: &str) -> Result<(), StoreError> {
        let filter = doc! { "key": key };
        self.collection(collection)
            .delete_one(filter, None)
            .map_err(StoreError::backend)?;
        Ok(())
    }

    fn scan(
        &self,
        collection: &str,
        visitor: &mut dyn FnMut(&[u8]) -> Result<(), StoreError>,
    ) -> Result<(), StoreError> {
        let mut cursor = self
            .collection(collection)
            .find(None, None)
            .map_err(StoreError::backend)?;
        while let Some(document) = cursor.next() {
            let document = document.map_err(StoreError::backend)?;
            if let Ok(value) = document.get_binary_generic("value") {
                visitor(value)?;
            }
        }
        Ok(())
    }
}
