use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::StoreError;

/// Storage backend for the document store, keyed by (collection, key). Same
/// shape as the vector index's pluggable backend trait: callers never see
/// the underlying bytes format, only typed documents via [`crate::DocumentStore`].
pub trait StoreBackend: Send + Sync {
    fn put(&self, collection: &str, key: &str, value: &[u8]) -> Result<(), StoreError>;
    fn get(&self, collection: &str, key: &str) -> Result<Option<Vec<u8>>, StoreError>;
    fn delete(&self, collection: &str, key: &str) -> Result<(), StoreError>;
    /// Visit every stored value in a collection, in unspecified order.
    fn scan(
        &self,
        collection: &str,
        visitor: &mut dyn FnMut(&[u8]) -> Result<(), StoreError>,
    ) -> Result<(), StoreError>;
}

fn namespaced(collection: &str, key: &str) -> String {
    format!("{collection}:{key}")
}

/// In-memory backend for tests and ephemeral/offline runs.
#[derive(Default)]
pub struct InMemoryBackend {
    records: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StoreBackend for InMemoryBackend {
    fn put(&self, collection: &str, key: &str, value: &[u8]) -> Result<(), StoreError> {
        self.records
            .write()
            .map_err(|_| StoreError::backend("poisoned lock"))?
            .insert(namespaced(collection, key), value.to_vec());
        Ok(())
    }

    fn get(&self, collection: &str, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let guard = self
            .records
            .read()
            .map_err(|_| StoreError::backend("poisoned lock"))?;
        Ok(guard.get(&namespaced(collection, key)).cloned())
    }

    fn delete(&self, collection: &str, key: &str) -> Result<(), StoreError> {
        self.records
            .write()
            .map_err(|_| StoreError::backend("poisoned lock"))?
            .remove(&namespaced(collection, key));
        Ok(())
    }

    fn scan(
        &self,
        collection: &str,
        visitor: &mut dyn FnMut(&[u8]) -> Result<(), StoreError>,
    ) -> Result<(), StoreError> {
        let guard = self
            .records
            .read()
            .map_err(|_| StoreError::backend("poisoned lock"))?;
        let prefix = format!("{collection}:");
        for (key, value) in guard.iter() {
            if key.starts_with(&prefix) {
                visitor(value)?;
            }
        }
        Ok(())
    }
}

#[cfg(feature = "mongo")]
pub mod mongo;

#[cfg(feature = "mongo")]
pub use mongo::MongoBackend;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_get_round_trips() {
        let backend = InMemoryBackend::new();
        backend.put("segments", "seg-1", b"payload").unwrap();
        assert_eq!(
            backend.get("segments", "seg-1").unwrap(),
            Some(b"payload".to_vec())
        );
    }

    #[test]
    fn collections_are_isolated() {
        let backend = InMemoryBackend::new();
        backend.put("segments", "id-1", b"a").unwrap();
        backend.put("presets", "id-1", b"b").unwrap();
        assert_eq!(backend.get("segments", "id-1").unwrap(), Some(b"a".to_vec()));
        assert_eq!(backend.get("presets", "id-1").unwrap(), Some(b"b".to_vec()));
    }

    #[test]
    fn delete_removes_entry() {
        let backend = InMemoryBackend::new();
        backend.put("segments", "id-1", b"a").unwrap();
        backend.delete("segments", "id-1").unwrap();
        assert_eq!(backend.get("segments", "id-1").unwrap(), None);
    }

    #[test]
    fn scan_visits_only_matching_collection() {
        let backend = InMemoryBackend::new();
        backend.put("segments", "a", b"1").unwrap();
        backend.put("segments", "b", b"2").unwrap();
        backend.put("presets", "c", b"3").unwrap();

        let mut seen = Vec::new();
        backend
            .scan("segments", &mut |value| {
                seen.push(value.to_vec());
                Ok(())
            })
            .unwrap();
        seen.sort();
        assert_eq!(seen, vec![b"1".to_vec(), b"2".to_vec()]);
    }
}
