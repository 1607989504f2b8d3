pub mod dogs_store;
pub mod sqlite_store;

pub use dogs_store::{DogStore, StoreError, StoreResult};
pub use sqlite_store::SqliteDogStore;
