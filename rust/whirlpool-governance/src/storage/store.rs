// Store - Record store contract
use crate::types::{AccountId, Whirlpool, WhirlpoolsConfig};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Storage key prefixes
const PREFIX_CONFIG: &[u8] = b"config:";
const PREFIX_POOL: &[u8] = b"pool:";

/// Kind of stored record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Config,
    Pool,
}

impl RecordKind {
    pub fn prefix(&self) -> &'static [u8] {
        match self {
            RecordKind::Config => PREFIX_CONFIG,
            RecordKind::Pool => PREFIX_POOL,
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RecordKind::Config => write!(f, "config"),
            RecordKind::Pool => write!(f, "pool"),
        }
    }
}

/// A record persisted under `KIND.prefix() || key`
pub trait Record: Serialize + DeserializeOwned + Clone + PartialEq {
    const KIND: RecordKind;

    fn key(&self) -> AccountId;

    fn storage_key(key: &AccountId) -> Vec<u8> {
        let prefix = Self::KIND.prefix();
        let mut out = Vec::with_capacity(prefix.len() + 32);
        out.extend_from_slice(prefix);
        out.extend_from_slice(key.as_bytes());
        out
    }

    fn encode(&self) -> Result<Vec<u8>, StoreError> {
        bincode::serialize(self).map_err(|e| StoreError::SerializationFailed(e.to_string()))
    }

    fn decode(bytes: &[u8]) -> Result<Self, StoreError> {
        bincode::deserialize(bytes).map_err(|e| StoreError::DeserializationFailed(e.to_string()))
    }
}

impl Record for WhirlpoolsConfig {
    const KIND: RecordKind = RecordKind::Config;

    fn key(&self) -> AccountId {
        self.key
    }
}

impl Record for Whirlpool {
    const KIND: RecordKind = RecordKind::Pool;

    fn key(&self) -> AccountId {
        self.key
    }
}

/// Keyed record store.
///
/// Implementations provide byte-level access; typed access is derived. Writers
/// to the same key must be serialized so that `compare_and_put_raw` is a true
/// read-modify-write.
pub trait RecordStore: Send + Sync {
    /// Reads a value
    fn get_raw(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;

    /// Overwrites a value
    fn put_raw(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError>;

    /// Writes `value` only if the current value equals `expected`
    /// (`None` = key absent). Returns whether the write happened.
    fn compare_and_put_raw(
        &self,
        key: &[u8],
        expected: Option<&[u8]>,
        value: &[u8],
    ) -> Result<bool, StoreError>;

    /// All entries whose key starts with `prefix`
    fn scan_raw(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, StoreError>;

    fn get<R: Record>(&self, key: &AccountId) -> Result<Option<R>, StoreError>
    where
        Self: Sized,
    {
        tracing::debug!("Reading {} {}", R::KIND, key);
        match self.get_raw(&R::storage_key(key))? {
            Some(bytes) => Ok(Some(R::decode(&bytes)?)),
            None => Ok(None),
        }
    }

    fn put<R: Record>(&self, record: &R) -> Result<(), StoreError>
    where
        Self: Sized,
    {
        self.put_raw(&R::storage_key(&record.key()), &record.encode()?)
    }

    /// Replaces `expected` by `updated` unless the stored record changed since
    /// `expected` was read.
    fn compare_and_put<R: Record>(&self, expected: &R, updated: &R) -> Result<bool, StoreError>
    where
        Self: Sized,
    {
        if expected.key() != updated.key() {
            return Err(StoreError::KeyChanged);
        }
        let expected_bytes = expected.encode()?;
        self.compare_and_put_raw(
            &R::storage_key(&updated.key()),
            Some(&expected_bytes),
            &updated.encode()?,
        )
    }

    /// Writes `record` only if no record with its key exists yet
    fn insert<R: Record>(&self, record: &R) -> Result<bool, StoreError>
    where
        Self: Sized,
    {
        self.compare_and_put_raw(&R::storage_key(&record.key()), None, &record.encode()?)
    }

    fn list<R: Record>(&self) -> Result<Vec<R>, StoreError>
    where
        Self: Sized,
    {
        self.scan_raw(R::KIND.prefix())?
            .into_iter()
            .map(|(_, value)| R::decode(&value))
            .collect()
    }
}

impl<S: RecordStore + ?Sized> RecordStore for Arc<S> {
    fn get_raw(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get_raw(key)
    }

    fn put_raw(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        (**self).put_raw(key, value)
    }

    fn compare_and_put_raw(
        &self,
        key: &[u8],
        expected: Option<&[u8]>,
        value: &[u8],
    ) -> Result<bool, StoreError> {
        (**self).compare_and_put_raw(key, expected, value)
    }

    fn scan_raw(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, StoreError> {
        (**self).scan_raw(prefix)
    }
}

/// Store errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to open store: {0}")]
    OpenFailed(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    #[error("Record key cannot change on update")]
    KeyChanged,
}

impl StoreError {
    /// Transient infrastructure failure
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn id(seed: u8) -> AccountId {
        AccountId::from_bytes([seed; 32])
    }

    fn config(seed: u8) -> WhirlpoolsConfig {
        WhirlpoolsConfig::new(id(seed), id(2), id(3), id(4), 300, 300).unwrap()
    }

    #[test]
    fn test_storage_keys_are_prefixed_by_kind() {
        let config_key = WhirlpoolsConfig::storage_key(&id(1));
        let pool_key = Whirlpool::storage_key(&id(1));

        assert!(config_key.starts_with(b"config:"));
        assert!(pool_key.starts_with(b"pool:"));
        assert_ne!(config_key, pool_key);
    }

    #[test]
    fn test_typed_get_put() {
        let store = MemoryStore::new();
        let config = config(1);

        assert_eq!(store.get::<WhirlpoolsConfig>(&id(1)).unwrap(), None);
        store.put(&config).unwrap();
        assert_eq!(store.get::<WhirlpoolsConfig>(&id(1)).unwrap(), Some(config));

        // Same key, other kind
        assert_eq!(store.get::<Whirlpool>(&id(1)).unwrap(), None);
    }

    #[test]
    fn test_compare_and_put_detects_stale_expected() {
        let store = MemoryStore::new();
        let original = config(1);
        store.put(&original).unwrap();

        let first = WhirlpoolsConfig { default_fee_rate: 500, ..original.clone() };
        assert!(store.compare_and_put(&original, &first).unwrap());

        // `original` is now stale
        let second = WhirlpoolsConfig { default_fee_rate: 700, ..original.clone() };
        assert!(!store.compare_and_put(&original, &second).unwrap());
        assert_eq!(store.get::<WhirlpoolsConfig>(&id(1)).unwrap(), Some(first));
    }

    #[test]
    fn test_compare_and_put_rejects_key_change() {
        let store = MemoryStore::new();
        let original = config(1);
        store.put(&original).unwrap();

        let moved = WhirlpoolsConfig { key: id(9), ..original.clone() };
        assert!(matches!(store.compare_and_put(&original, &moved), Err(StoreError::KeyChanged)));
    }

    #[test]
    fn test_insert_never_overwrites() {
        let store = MemoryStore::new();
        let original = config(1);
        assert!(store.insert(&original).unwrap());

        let other = WhirlpoolsConfig { default_fee_rate: 900, ..original.clone() };
        assert!(!store.insert(&other).unwrap());
        assert_eq!(store.get::<WhirlpoolsConfig>(&id(1)).unwrap(), Some(original));
    }

    #[test]
    fn test_list_by_kind() {
        let store = MemoryStore::new();
        store.put(&config(1)).unwrap();
        store.put(&config(5)).unwrap();
        store.put(&Whirlpool::new(&config(1), id(10), id(11), 64, 1u128 << 64)).unwrap();

        let configs: Vec<WhirlpoolsConfig> = store.list().unwrap();
        let pools: Vec<Whirlpool> = store.list().unwrap();
        assert_eq!(configs.len(), 2);
        assert_eq!(pools.len(), 1);
    }

    #[test]
    fn test_arc_store_shares_state() {
        let store = Arc::new(MemoryStore::new());
        let clone = Arc::clone(&store);
        clone.put(&config(1)).unwrap();
        assert!(store.get::<WhirlpoolsConfig>(&id(1)).unwrap().is_some());
    }
}
