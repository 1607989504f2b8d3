use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use super::dogs_store::{DogStore, StoreError, StoreResult};
use crate::services::dogs::{Dog, DogPatch, NewDog};

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS dogs (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT    NOT NULL,
    description TEXT    NOT NULL,
    breed       TEXT    NOT NULL,
    age         INTEGER NOT NULL
)";

const COLUMNS: &str = "id, name, description, breed, age";

/// `DogStore` over a SQLite connection pool.
#[derive(Clone)]
pub struct SqliteDogStore {
    pool: SqlitePool,
}

impl SqliteDogStore {
    /// Connect to `url` and make sure the `dogs` table exists.
    ///
    /// In-memory databases live only as long as their connection, so they get
    /// a single connection that is never recycled.
    pub async fn connect(url: &str) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        let pool_options = if url.contains(":memory:") || url.contains("mode=memory") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options.connect_with(options).await?;
        let store = Self::from_pool(pool);
        store.ensure_table().await?;

        tracing::info!("connected to dogs database");
        Ok(store)
    }

    fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn ensure_table(&self) -> StoreResult<()> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl DogStore for SqliteDogStore {
    async fn list(&self) -> StoreResult<Vec<Dog>> {
        let sql = format!("SELECT {COLUMNS} FROM dogs ORDER BY id");
        let dogs = sqlx::query_as::<_, Dog>(&sql).fetch_all(&self.pool).await?;
        Ok(dogs)
    }

    async fn find(&self, id: i64) -> StoreResult<Option<Dog>> {
        let sql = format!("SELECT {COLUMNS} FROM dogs WHERE id = ?");
        let dog = sqlx::query_as::<_, Dog>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(dog)
    }

    async fn create(&self, dog: NewDog) -> StoreResult<Dog> {
        let sql = format!(
            "INSERT INTO dogs (name, description, breed, age) VALUES (?, ?, ?, ?) RETURNING {COLUMNS}"
        );
        let created = sqlx::query_as::<_, Dog>(&sql)
            .bind(dog.name)
            .bind(dog.description)
            .bind(dog.breed)
            .bind(dog.age)
            .fetch_one(&self.pool)
            .await?;
        Ok(created)
    }

    async fn update(&self, id: i64, patch: DogPatch) -> StoreResult<Dog> {
        // NULL binds keep the stored column
        let sql = format!(
            "UPDATE dogs SET
                name = COALESCE(?, name),
                description = COALESCE(?, description),
                breed = COALESCE(?, breed),
                age = COALESCE(?, age)
             WHERE id = ?
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Dog>(&sql)
            .bind(patch.name)
            .bind(patch.description)
            .bind(patch.breed)
            .bind(patch.age)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        updated.ok_or(StoreError::NotFound { id })
    }

    async fn delete(&self, id: i64) -> StoreResult<Dog> {
        let sql = format!("DELETE FROM dogs WHERE id = ? RETURNING {COLUMNS}");
        let deleted = sqlx::query_as::<_, Dog>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        deleted.ok_or(StoreError::NotFound { id })
    }
}
