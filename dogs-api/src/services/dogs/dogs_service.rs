use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use kennel_core::errors::KennelError;
use kennel_core::{KennelService, ServiceCapabilities};
use serde_json::Value;

use crate::services::adapters::{DogStore, StoreError};
use crate::services::DogsParams;

use super::dogs_schema::{validate_create, validate_id, validate_patch, Dog};
use super::dogs_shared;

pub struct DogsService {
    store: Arc<dyn DogStore>,
}

impl DogsService {
    pub fn new(store: Arc<dyn DogStore>) -> Self {
        Self { store }
    }
}

/// Opaque 500 for the client; the store error stays attached for the log.
fn store_failure(message: &str, err: StoreError) -> anyhow::Error {
    KennelError::general_error(message).with_source(err).into_anyhow()
}

fn request_id(params: &DogsParams) -> &str {
    params.request_id().unwrap_or("-")
}

#[async_trait]
impl KennelService<Dog, DogsParams> for DogsService {
    fn capabilities(&self) -> ServiceCapabilities {
        dogs_shared::crud_capabilities()
    }

    fn check_id(&self, id: &str) -> Result<()> {
        validate_id(id).map(|_| ())
    }

    async fn find(&self, params: DogsParams) -> Result<Vec<Dog>> {
        let dogs = self
            .store
            .list()
            .await
            .map_err(|err| store_failure(dogs_shared::FIND_FAILED, err))?;

        tracing::debug!(request_id = request_id(&params), count = dogs.len(), "listed dogs");
        Ok(dogs)
    }

    async fn get(&self, id: &str, _params: DogsParams) -> Result<Option<Dog>> {
        let id = validate_id(id)?;

        self.store
            .find(id)
            .await
            .map_err(|err| store_failure(dogs_shared::GET_FAILED, err))
    }

    async fn create(&self, data: Value, params: DogsParams) -> Result<Dog> {
        let new_dog = validate_create(&data)?;

        let dog = self
            .store
            .create(new_dog)
            .await
            .map_err(|err| store_failure(dogs_shared::CREATE_FAILED, err))?;

        tracing::info!(request_id = request_id(&params), id = dog.id, "created dog");
        Ok(dog)
    }

    async fn patch(&self, id: &str, data: Value, params: DogsParams) -> Result<Dog> {
        let id = validate_id(id)?;
        let patch = validate_patch(&data)?;

        let dog = match self.store.update(id, patch).await {
            Ok(dog) => dog,
            Err(err) if err.is_not_found() => {
                return Err(KennelError::not_found(dogs_shared::NOT_FOUND).into_anyhow());
            }
            Err(err) => return Err(store_failure(dogs_shared::UPDATE_FAILED, err)),
        };

        tracing::info!(request_id = request_id(&params), id, "updated dog");
        Ok(dog)
    }

    async fn remove(&self, id: &str, params: DogsParams) -> Result<Option<Dog>> {
        let id = validate_id(id)?;

        let existing = self
            .store
            .find(id)
            .await
            .map_err(|err| store_failure(dogs_shared::DELETE_FAILED, err))?;
        if existing.is_none() {
            return Ok(None);
        }

        // A concurrent delete can win between the lookup and this call.
        match self.store.delete(id).await {
            Ok(dog) => {
                tracing::info!(request_id = request_id(&params), id, "deleted dog");
                Ok(Some(dog))
            }
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(store_failure(dogs_shared::DELETE_FAILED, err)),
        }
    }
}
