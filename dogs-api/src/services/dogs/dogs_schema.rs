//! Dog records and the request-body schema they are validated against.

use anyhow::Result;
use kennel_schema::{Field, Presence, Schema};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::dogs_shared::VALIDATION_FAILED;

/// The closed field set accepted in request bodies. `id` is store-assigned.
pub const DOG_SCHEMA: Schema = Schema::new(&[
    Field::string("name"),
    Field::string("description"),
    Field::string("breed"),
    Field::integer("age"),
]);

/// A stored dog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Dog {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub breed: String,
    pub age: i64,
}

/// A validated create payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewDog {
    pub name: String,
    pub description: String,
    pub breed: String,
    pub age: i64,
}

/// A validated partial update; `None` leaves the stored value unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DogPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub breed: Option<String>,
    pub age: Option<i64>,
}

impl DogPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.breed.is_none() && self.age.is_none()
    }
}

pub fn validate_create(data: &Value) -> Result<NewDog> {
    DOG_SCHEMA.parse(data, Presence::Required, VALIDATION_FAILED)
}

pub fn validate_patch(data: &Value) -> Result<DogPatch> {
    DOG_SCHEMA.parse(data, Presence::Optional, VALIDATION_FAILED)
}

pub fn validate_id(raw: &str) -> Result<i64> {
    kennel_schema::parse_id(raw)
}
