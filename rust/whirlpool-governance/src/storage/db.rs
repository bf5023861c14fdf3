// Database - Abstraction RocksDB
use super::store::{RecordStore, StoreError};
use rocksdb::{ErrorKind, Options, DB};
use std::path::Path;
use std::sync::Mutex;

/// RocksDB tuning taken from the CLI configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatabaseOptions {
    /// Maximum open file handles (-1 = unlimited)
    pub max_open_files: i32,
}

impl Default for DatabaseOptions {
    fn default() -> Self {
        Self { max_open_files: 256 }
    }
}

/// Wrapper autour de RocksDB
pub struct Database {
    db: DB,
    /// Serializes writers so compare-and-put is a true read-modify-write
    write_lock: Mutex<()>,
}

impl Database {
    /// Ouvre ou crée une base de données
    pub fn open<P: AsRef<Path>>(path: P, options: DatabaseOptions) -> Result<Self, StoreError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);

        // Limiter l'accumulation de fichiers pour éviter "Too many open files"
        opts.set_max_open_files(options.max_open_files);
        opts.set_keep_log_file_num(5);
        opts.set_max_manifest_file_size(64 * 1024 * 1024); // 64MB max par MANIFEST
        opts.set_max_background_jobs(2);

        let db = DB::open(&opts, path).map_err(|e| StoreError::OpenFailed(e.to_string()))?;

        Ok(Self {
            db,
            write_lock: Mutex::new(()),
        })
    }

    /// Lit une valeur
    pub fn get_value(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        self.db.get(key).map_err(|e| read_error(&e))
    }

    /// Écrit une valeur
    pub fn put_value(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        let _guard = self.lock()?;
        self.db.put(key, value).map_err(|e| write_error(&e))
    }

    /// Itère sur toutes les clés avec un préfixe donné
    pub fn prefix_entries(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, StoreError> {
        let mut entries = Vec::new();
        for item in self.db.prefix_iterator(prefix) {
            let (key, value) = item.map_err(|e| read_error(&e))?;
            if !key.starts_with(prefix) {
                break;
            }
            entries.push((key.to_vec(), value.to_vec()));
        }
        Ok(entries)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, ()>, StoreError> {
        self.write_lock
            .lock()
            .map_err(|e| StoreError::Unavailable(format!("write lock poisoned: {}", e)))
    }
}

/// Busy or shutting-down databases are transient
fn is_transient(e: &rocksdb::Error) -> bool {
    matches!(
        e.kind(),
        ErrorKind::Busy | ErrorKind::TimedOut | ErrorKind::TryAgain | ErrorKind::ShutdownInProgress
    )
}

fn read_error(e: &rocksdb::Error) -> StoreError {
    if is_transient(e) {
        StoreError::Unavailable(e.to_string())
    } else {
        StoreError::ReadFailed(e.to_string())
    }
}

fn write_error(e: &rocksdb::Error) -> StoreError {
    if is_transient(e) {
        StoreError::Unavailable(e.to_string())
    } else {
        StoreError::WriteFailed(e.to_string())
    }
}

impl RecordStore for Database {
    fn get_raw(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        self.get_value(key)
    }

    fn put_raw(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        self.put_value(key, value)
    }

    fn compare_and_put_raw(
        &self,
        key: &[u8],
        expected: Option<&[u8]>,
        value: &[u8],
    ) -> Result<bool, StoreError> {
        let _guard = self.lock()?;
        let current = self.get_value(key)?;
        if current.as_deref() != expected {
            return Ok(false);
        }
        self.db.put(key, value).map_err(|e| write_error(&e))?;
        Ok(true)
    }

    fn scan_raw(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, StoreError> {
        self.prefix_entries(prefix)
    }
}
