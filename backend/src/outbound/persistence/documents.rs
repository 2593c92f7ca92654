//! BSON shapes for the user collection.

use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Bson, Document, doc};
use serde::{Deserialize, Serialize};

use crate::domain::ports::UserPersistenceError;
use crate::domain::{Age, NewUser, User, UserId, UserPatch};

/// Stored user document.
///
/// Documents written by other clients may lack any profile field; absent
/// fields load as `None` and unset fields are never written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct UserDocument {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<Age>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl From<NewUser> for UserDocument {
    fn from(user: NewUser) -> Self {
        Self {
            id: None,
            name: user.name,
            age: user.age,
            email: user.email,
        }
    }
}

impl UserDocument {
    /// Convert into the domain record, using `fallback_id` when the document
    /// was built locally and never read back.
    pub(crate) fn into_user(
        self,
        fallback_id: Option<ObjectId>,
    ) -> Result<User, UserPersistenceError> {
        let object_id = self
            .id
            .or(fallback_id)
            .ok_or_else(|| UserPersistenceError::query("user document has no _id"))?;
        let id = UserId::new(object_id.to_hex())
            .map_err(|err| UserPersistenceError::query(err.to_string()))?;
        Ok(User::new(id, self.name, self.age, self.email))
    }
}

/// Parse a domain identifier into an `_id` filter value.
///
/// Identifiers that are not ObjectId hex strings match no document.
pub(crate) fn object_id(id: &UserId) -> Option<ObjectId> {
    ObjectId::parse_str(id.as_ref()).ok()
}

/// Fields of `patch` that carry a value, ready for a `$set` operator.
pub(crate) fn set_fields(patch: &UserPatch) -> Document {
    let mut fields = Document::new();
    if let Some(name) = &patch.name {
        fields.insert("name", name.as_str());
    }
    if let Some(age) = patch.age {
        fields.insert("age", age.whole().map_or(Bson::Double(age.get()), Bson::Int64));
    }
    if let Some(email) = &patch.email {
        fields.insert("email", email.as_str());
    }
    fields
}

/// Filter matching a single document by `_id`.
pub(crate) fn by_id(object_id: ObjectId) -> Document {
    doc! { "_id": object_id }
}
