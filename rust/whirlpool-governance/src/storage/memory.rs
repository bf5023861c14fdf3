// Memory - In-process record store
use super::store::{RecordStore, StoreError};
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Record store backed by an ordered map.
///
/// The write lock is held for the whole compare-and-put, which serializes
/// writers per store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<Vec<u8>, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<Vec<u8>, Vec<u8>>>, StoreError> {
        self.entries
            .read()
            .map_err(|e| StoreError::Unavailable(format!("lock poisoned: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<Vec<u8>, Vec<u8>>>, StoreError> {
        self.entries
            .write()
            .map_err(|e| StoreError::Unavailable(format!("lock poisoned: {}", e)))
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

impl RecordStore for MemoryStore {
    fn get_raw(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.read()?.get(key).cloned())
    }

    fn put_raw(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        self.write()?.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn compare_and_put_raw(
        &self,
        key: &[u8],
        expected: Option<&[u8]>,
        value: &[u8],
    ) -> Result<bool, StoreError> {
        let mut entries = self.write()?;
        if entries.get(key).map(Vec::as_slice) != expected {
            return Ok(false);
        }
        entries.insert(key.to_vec(), value.to_vec());
        Ok(true)
    }

    fn scan_raw(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, StoreError> {
        Ok(self
            .read()?
            .range(prefix.to_vec()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_memory_basic_ops() {
        let store = MemoryStore::new();
        assert!(store.is_empty().unwrap());

        store.put_raw(b"key1", b"value1").unwrap();
        assert_eq!(store.get_raw(b"key1").unwrap(), Some(b"value1".to_vec()));
        assert_eq!(store.get_raw(b"key2").unwrap(), None);
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_poisoned_lock_is_unavailable() {
        let store = Arc::new(MemoryStore::new());
        let writer = Arc::clone(&store);

        // Writer panics while holding the lock
        let _ = thread::spawn(move || {
            let _guard = writer.entries.write().unwrap();
            panic!("writer died mid-update");
        })
        .join();

        assert!(matches!(store.len(), Err(StoreError::Unavailable(_))));
        assert!(matches!(store.is_empty(), Err(StoreError::Unavailable(_))));
        assert!(matches!(store.get_raw(b"k"), Err(StoreError::Unavailable(_))));
    }

    #[test]
    fn test_memory_compare_and_put() {
        let store = MemoryStore::new();

        // Absent key
        assert!(store.compare_and_put_raw(b"k", None, b"v1").unwrap());
        assert!(!store.compare_and_put_raw(b"k", None, b"v2").unwrap());

        assert!(!store.compare_and_put_raw(b"k", Some(&b"wrong"[..]), b"v2").unwrap());
        assert!(store.compare_and_put_raw(b"k", Some(&b"v1"[..]), b"v2").unwrap());
        assert_eq!(store.get_raw(b"k").unwrap(), Some(b"v2".to_vec()));
    }

    #[test]
    fn test_memory_scan_prefix() {
        let store = MemoryStore::new();
        store.put_raw(b"pool:a", b"1").unwrap();
        store.put_raw(b"pool:b", b"2").unwrap();
        store.put_raw(b"poolz", b"3").unwrap();
        store.put_raw(b"config:a", b"4").unwrap();

        let pools = store.scan_raw(b"pool:").unwrap();
        assert_eq!(pools.len(), 2);
        assert!(pools.iter().all(|(k, _)| k.starts_with(b"pool:")));
    }

    #[test]
    fn test_memory_compare_and_put_single_winner() {
        let store = Arc::new(MemoryStore::new());
        store.put_raw(b"k", b"start").unwrap();

        let handles: Vec<_> = (0..8u8)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    store
                        .compare_and_put_raw(b"k", Some(&b"start"[..]), &[i])
                        .unwrap()
                })
            })
            .collect();

        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count();
        assert_eq!(winners, 1);
    }
}
