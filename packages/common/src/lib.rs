pub mod config;
pub mod storage;

pub use storage::{AssetRecord, AssetStore, StorageError};
