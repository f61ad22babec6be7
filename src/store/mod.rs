pub mod blob;
pub mod json_store;
pub mod schema;

pub use blob::{BlobStore, MemoryStore, StoreError};
pub use json_store::JsonStore;
