use std::sync::Arc;

use kennel_core::KennelService;

pub mod adapters;
pub mod dogs;
pub mod types;

pub use types::DogsParams;

use adapters::DogStore;
use dogs::Dog;

pub struct Services {
    pub dogs: Arc<dyn KennelService<Dog, DogsParams>>,
}

/// Build every service around the injected store.
pub fn configure(store: Arc<dyn DogStore>) -> Services {
    let dogs: Arc<dyn KennelService<Dog, DogsParams>> = Arc::new(dogs::DogsService::new(store));
    Services { dogs }
}
