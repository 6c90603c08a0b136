use async_trait::async_trait;
use futures::stream::StreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::{Client, Collection, Database};
use std::error::Error;
use std::time::Duration;

use crate::models::{User, UserInput};
use crate::utils::AppError;

#[cfg(test)]
pub mod memory;

/// Document store operations the user handlers rely on.
///
/// Every method addresses records by `_id`. Implementations must be safe to
/// share across concurrent requests.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a new record and returns the id it was stored under.
    async fn insert_one(&self, user: &User) -> Result<ObjectId, AppError>;

    async fn find_one(&self, id: ObjectId) -> Result<Option<User>, AppError>;

    /// Replaces name, location and title; returns how many records matched.
    async fn update_one(&self, id: ObjectId, fields: &UserInput) -> Result<u64, AppError>;

    /// Returns how many records were removed.
    async fn delete_one(&self, id: ObjectId) -> Result<u64, AppError>;

    /// Full scan in store order. The first record that fails to decode aborts the scan.
    async fn find_all(&self) -> Result<Vec<User>, AppError>;

    async fn ping(&self) -> Result<(), AppError>;
}

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
    users: Collection<User>,
}

impl MongoDB {
    pub async fn new(uri: &str, db_name: &str, collection: &str) -> Result<Self, Box<dyn Error>> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        // Connection pool
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(5);
        client_options.max_idle_time = Some(Duration::from_secs(300));

        client_options.connect_timeout = Some(Duration::from_secs(5));
        client_options.server_selection_timeout = Some(Duration::from_secs(5));

        let client = Client::with_options(client_options)?;
        let db = client.database(db_name);

        // Test connection
        db.run_command(doc! { "ping": 1 }).await?;

        let users = db.collection::<User>(collection);

        log::info!("✅ Using collection {}.{}", db_name, collection);

        Ok(Self { db, users })
    }
}

#[async_trait]
impl UserStore for MongoDB {
    async fn insert_one(&self, user: &User) -> Result<ObjectId, AppError> {
        let result = self.users.insert_one(user).await?;
        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| AppError::Database(format!("unexpected inserted id: {}", result.inserted_id)))
    }

    async fn find_one(&self, id: ObjectId) -> Result<Option<User>, AppError> {
        Ok(self.users.find_one(doc! { "_id": id }).await?)
    }

    async fn update_one(&self, id: ObjectId, fields: &UserInput) -> Result<u64, AppError> {
        let update = doc! {
            "$set": {
                "name": fields.name.as_str(),
                "location": fields.location.as_str(),
                "title": fields.title.as_str(),
            }
        };
        let result = self.users.update_one(doc! { "_id": id }, update).await?;
        Ok(result.matched_count)
    }

    async fn delete_one(&self, id: ObjectId) -> Result<u64, AppError> {
        let result = self.users.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count)
    }

    async fn find_all(&self) -> Result<Vec<User>, AppError> {
        let mut cursor = self.users.find(doc! {}).await?;
        let mut users = Vec::new();
        while let Some(result) = cursor.next().await {
            users.push(result?);
        }
        Ok(users)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
