// Storage - Record persistence (RocksDB or in-memory)
// Principle: one record per key, conditional overwrite, nothing partial

pub mod db;
pub mod memory;
pub mod store;

pub use db::*;
pub use memory::*;
pub use store::*;
