//! In-process `UserStore` implementations for tests.
//!
//! `MemoryStore` keeps raw BSON documents and decodes them on read, the same
//! way a cursor does, so a malformed document fails exactly where it would
//! against MongoDB.

use async_trait::async_trait;
use mongodb::bson::{self, doc, oid::ObjectId, Document};
use std::sync::RwLock;
use std::time::Duration;

use super::UserStore;
use crate::models::{User, UserInput};
use crate::utils::AppError;

#[derive(Default)]
pub struct MemoryStore {
    docs: RwLock<Vec<Document>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a document as-is, bypassing validation and encoding.
    pub fn insert_raw(&self, doc: Document) {
        self.write().push(doc);
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<Document>> {
        self.docs.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Vec<Document>> {
        self.docs.write().unwrap_or_else(|e| e.into_inner())
    }
}

fn has_id(doc: &Document, id: ObjectId) -> bool {
    doc.get_object_id("_id").map(|found| found == id).unwrap_or(false)
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert_one(&self, user: &User) -> Result<ObjectId, AppError> {
        let doc = bson::to_document(user)?;
        let mut docs = self.write();
        if docs.iter().any(|d| has_id(d, user.id)) {
            return Err(AppError::Database(format!("duplicate key: {}", user.id)));
        }
        docs.push(doc);
        Ok(user.id)
    }

    async fn find_one(&self, id: ObjectId) -> Result<Option<User>, AppError> {
        match self.read().iter().find(|d| has_id(d, id)) {
            Some(doc) => Ok(Some(bson::from_document(doc.clone())?)),
            None => Ok(None),
        }
    }

    async fn update_one(&self, id: ObjectId, fields: &UserInput) -> Result<u64, AppError> {
        let mut docs = self.write();
        match docs.iter_mut().find(|d| has_id(d, id)) {
            Some(doc) => {
                doc.insert("name", fields.name.as_str());
                doc.insert("location", fields.location.as_str());
                doc.insert("title", fields.title.as_str());
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_one(&self, id: ObjectId) -> Result<u64, AppError> {
        let mut docs = self.write();
        match docs.iter().position(|d| has_id(d, id)) {
            Some(index) => {
                docs.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn find_all(&self) -> Result<Vec<User>, AppError> {
        self.read()
            .iter()
            .map(|doc| bson::from_document(doc.clone()).map_err(AppError::from))
            .collect()
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// Store where the record vanishes right after a successful update, as if a
/// concurrent delete landed before the re-read.
#[derive(Default)]
pub struct VanishingStore {
    pub inner: MemoryStore,
}

#[async_trait]
impl UserStore for VanishingStore {
    async fn insert_one(&self, user: &User) -> Result<ObjectId, AppError> {
        self.inner.insert_one(user).await
    }

    async fn find_one(&self, id: ObjectId) -> Result<Option<User>, AppError> {
        self.inner.find_one(id).await
    }

    async fn update_one(&self, id: ObjectId, fields: &UserInput) -> Result<u64, AppError> {
        let matched = self.inner.update_one(id, fields).await?;
        self.inner.delete_one(id).await?;
        Ok(matched)
    }

    async fn delete_one(&self, id: ObjectId) -> Result<u64, AppError> {
        self.inner.delete_one(id).await
    }

    async fn find_all(&self) -> Result<Vec<User>, AppError> {
        self.inner.find_all().await
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.inner.ping().await
    }
}

/// Store whose every call fails with the given text.
pub struct FailingStore(pub String);

impl FailingStore {
    fn fail<T>(&self) -> Result<T, AppError> {
        Err(AppError::Database(self.0.clone()))
    }
}

#[async_trait]
impl UserStore for FailingStore {
    async fn insert_one(&self, _user: &User) -> Result<ObjectId, AppError> {
        self.fail()
    }

    async fn find_one(&self, _id: ObjectId) -> Result<Option<User>, AppError> {
        self.fail()
    }

    async fn update_one(&self, _id: ObjectId, _fields: &UserInput) -> Result<u64, AppError> {
        self.fail()
    }

    async fn delete_one(&self, _id: ObjectId) -> Result<u64, AppError> {
        self.fail()
    }

    async fn find_all(&self) -> Result<Vec<User>, AppError> {
        self.fail()
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.fail()
    }
}

/// Wraps another store and delays every call.
pub struct SlowStore<S> {
    pub inner: S,
    pub delay: Duration,
}

#[async_trait]
impl<S: UserStore> UserStore for SlowStore<S> {
    async fn insert_one(&self, user: &User) -> Result<ObjectId, AppError> {
        tokio::time::sleep(self.delay).await;
        self.inner.insert_one(user).await
    }

    async fn find_one(&self, id: ObjectId) -> Result<Option<User>, AppError> {
        tokio::time::sleep(self.delay).await;
        self.inner.find_one(id).await
    }

    async fn update_one(&self, id: ObjectId, fields: &UserInput) -> Result<u64, AppError> {
        tokio::time::sleep(self.delay).await;
        self.inner.update_one(id, fields).await
    }

    async fn delete_one(&self, id: ObjectId) -> Result<u64, AppError> {
        tokio::time::sleep(self.delay).await;
        self.inner.delete_one(id).await
    }

    async fn find_all(&self) -> Result<Vec<User>, AppError> {
        tokio::time::sleep(self.delay).await;
        self.inner.find_all().await
    }

    async fn ping(&self) -> Result<(), AppError> {
        tokio::time::sleep(self.delay).await;
        self.inner.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str) -> User {
        User::create(UserInput {
            name: name.into(),
            location: "Lisbon".into(),
            title: "Analyst".into(),
        })
    }

    #[tokio::test]
    async fn test_crud_cycle() {
        let store = MemoryStore::new();
        let first = user("first");
        let second = user("second");

        assert_eq!(store.insert_one(&first).await.unwrap(), first.id);
        store.insert_one(&second).await.unwrap();
        assert!(store.insert_one(&first).await.is_err());

        assert_eq!(store.find_one(first.id).await.unwrap(), Some(first.clone()));

        let fields = UserInput {
            name: "renamed".into(),
            location: "Porto".into(),
            title: "Lead".into(),
        };
        assert_eq!(store.update_one(first.id, &fields).await.unwrap(), 1);
        assert_eq!(store.update_one(ObjectId::new(), &fields).await.unwrap(), 0);
        assert_eq!(store.find_one(first.id).await.unwrap().unwrap().name, "renamed");

        let names: Vec<String> = store.find_all().await.unwrap().into_iter().map(|u| u.name).collect();
        assert_eq!(names, vec!["renamed", "second"]);

        assert_eq!(store.delete_one(first.id).await.unwrap(), 1);
        assert_eq!(store.delete_one(first.id).await.unwrap(), 0);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_find_all_fails_on_bad_document() {
        let store = MemoryStore::new();
        store.insert_one(&user("ok")).await.unwrap();
        store.insert_raw(doc! { "_id": ObjectId::new(), "name": "no title" });

        assert!(matches!(store.find_all().await, Err(AppError::Database(_))));
    }
}
