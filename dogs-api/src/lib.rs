mod app;
pub mod config;
pub mod services;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Json;
use kennel_axum::AxumApp;
use kennel_core::KennelApp;
use serde_json::json;

use crate::services::adapters::{DogStore, SqliteDogStore};
use crate::services::dogs::Dog;
use crate::services::DogsParams;

/// Load config, connect the store, and mount every route.
pub async fn build() -> Result<AxumApp<Dog, DogsParams>> {
    let app = app::dogs_app()?;

    let url = config::database_url(&app);
    let store = SqliteDogStore::connect(&url)
        .await
        .with_context(|| format!("failed to connect to database at {url}"))?;

    Ok(mount(app, Arc::new(store)))
}

/// Mount the routes over an already-built app and store.
pub fn mount(app: KennelApp<Dog, DogsParams>, store: Arc<dyn DogStore>) -> AxumApp<Dog, DogsParams> {
    let svcs = services::configure(store);

    kennel_axum::axum(app)
        .use_get("/", || async { Json(json!({ "message": "Hello World!" })) })
        .service("/health", || async { "ok" })
        .use_service("/dogs", svcs.dogs)
}
