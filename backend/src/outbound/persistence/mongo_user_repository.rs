//! MongoDB-backed `UserRepository` adapter.
//!
//! Identifiers are the hex form of each document's `ObjectId`. Identifiers
//! in any other format match nothing and surface as `Ok(None)`.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::Collection;
use mongodb::bson::doc;
use mongodb::options::ReturnDocument;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUser, User, UserId, UserPatch};

use super::documents::{UserDocument, by_id, object_id, set_fields};
use super::mongo_error_mapping::map_mongo_error;
use super::store::{StoreConfig, StoreError, connect_collection};

/// Repository over a single MongoDB collection of user documents.
#[derive(Debug, Clone)]
pub struct MongoUserRepository {
    collection: Collection<UserDocument>,
}

impl MongoUserRepository {
    /// Connect to the configured deployment and bind the user collection.
    ///
    /// # Errors
    ///
    /// Fails when the connection string is invalid or the deployment does
    /// not answer a `ping`.
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        let collection = connect_collection(config).await?;
        Ok(Self { collection })
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn find_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        let documents: Vec<UserDocument> = self
            .collection
            .find(doc! {})
            .sort(doc! { "_id": 1 })
            .await
            .map_err(|err| map_mongo_error("find_all", err))?
            .try_collect()
            .await
            .map_err(|err| map_mongo_error("find_all", err))?;

        documents
            .into_iter()
            .map(|document| document.into_user(None))
            .collect()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let Some(object_id) = object_id(id) else {
            return Ok(None);
        };
        self.collection
            .find_one(by_id(object_id))
            .await
            .map_err(|err| map_mongo_error("find_by_id", err))?
            .map(|document| document.into_user(None))
            .transpose()
    }

    async fn insert(&self, user: NewUser) -> Result<User, UserPersistenceError> {
        let document = UserDocument::from(user);
        let result = self
            .collection
            .insert_one(&document)
            .await
            .map_err(|err| map_mongo_error("insert", err))?;
        document.into_user(result.inserted_id.as_object_id())
    }

    async fn update_by_id(
        &self,
        id: &UserId,
        patch: UserPatch,
    ) -> Result<Option<User>, UserPersistenceError> {
        let Some(object_id) = object_id(id) else {
            return Ok(None);
        };
        let fields = set_fields(&patch);
        // `$set` rejects an empty document.
        if fields.is_empty() {
            return self.find_by_id(id).await;
        }
        self.collection
            .find_one_and_update(by_id(object_id), doc! { "$set": fields })
            .return_document(ReturnDocument::After)
            .await
            .map_err(|err| map_mongo_error("update_by_id", err))?
            .map(|document| document.into_user(None))
            .transpose()
    }

    async fn delete_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let Some(object_id) = object_id(id) else {
            return Ok(None);
        };
        self.collection
            .find_one_and_delete(by_id(object_id))
            .await
            .map_err(|err| map_mongo_error("delete_by_id", err))?
            .map(|document| document.into_user(None))
            .transpose()
    }
}
