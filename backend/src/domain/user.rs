//! User data model.
//!
//! A [`User`] is the only resource the service manages. All profile fields
//! are optional and unvalidated; only the store-assigned identifier is
//! guaranteed to be present.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Validation errors returned by [`UserId::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyId,
    PaddedId,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::PaddedId => write!(f, "user id must not carry surrounding whitespace"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Opaque, store-assigned user identifier.
///
/// The domain never interprets the contents; each store adapter issues and
/// parses its own format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`].
    pub fn new(id: impl Into<String>) -> Result<Self, UserValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::PaddedId);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Largest magnitude at which every whole `f64` is exactly representable.
const MAX_EXACT_WHOLE: f64 = 9_007_199_254_740_992.0;

/// A user's age as any finite number.
///
/// Stores written by other clients hold ages as 32- or 64-bit integers or as
/// doubles, negative and fractional values included, so every numeric form
/// is accepted. Whole values serialise as integers.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Age(f64);

impl Age {
    /// Wrap a numeric age.
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// The age as stored.
    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }

    /// The age as an integer when it has no fractional part.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "integral and bounded by MAX_EXACT_WHOLE"
    )]
    pub fn whole(self) -> Option<i64> {
        (self.0.fract() == 0.0 && self.0.abs() <= MAX_EXACT_WHOLE).then(|| self.0 as i64)
    }
}

impl Serialize for Age {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.whole() {
            Some(whole) => serializer.serialize_i64(whole),
            None => serializer.serialize_f64(self.0),
        }
    }
}

impl<'de> Deserialize<'de> for Age {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f64::deserialize(deserializer).map(Self)
    }
}

/// Field values for a user that has not been stored yet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewUser {
    pub name: Option<String>,
    pub age: Option<Age>,
    pub email: Option<String>,
}

impl NewUser {
    /// Attach the identifier issued by the store.
    pub fn into_user(self, id: UserId) -> User {
        let Self { name, age, email } = self;
        User {
            id,
            name,
            age,
            email,
        }
    }
}

/// Partial update: `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserPatch {
    pub name: Option<String>,
    pub age: Option<Age>,
    pub email: Option<String>,
}

impl UserPatch {
    /// True when applying the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none() && self.email.is_none()
    }
}

/// A stored user.
///
/// ## Invariants
/// - `id` is assigned by the store on insert and never changes afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    id: UserId,
    pub name: Option<String>,
    pub age: Option<Age>,
    pub email: Option<String>,
}

impl User {
    /// Rebuild a stored user from its parts.
    pub fn new(
        id: UserId,
        name: Option<String>,
        age: Option<Age>,
        email: Option<String>,
    ) -> Self {
        Self {
            id,
            name,
            age,
            email,
        }
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Merge `patch` into this record, keeping fields the patch leaves unset.
    ///
    /// # Examples
    /// ```
    /// use users_api::domain::{Age, User, UserId, UserPatch};
    ///
    /// let id = UserId::new("1").expect("id");
    /// let mut user = User::new(id, Some("A".into()), Some(Age::new(5.0)), Some("a@x.com".into()));
    /// user.apply(UserPatch { age: Some(Age::new(6.0)), ..UserPatch::default() });
    /// assert_eq!(user.name.as_deref(), Some("A"));
    /// assert_eq!(user.age, Some(Age::new(6.0)));
    /// ```
    pub fn apply(&mut self, patch: UserPatch) {
        let UserPatch { name, age, email } = patch;
        if let Some(name) = name {
            self.name = Some(name);
        }
        if let Some(age) = age {
            self.age = Some(age);
        }
        if let Some(email) = email {
            self.email = Some(email);
        }
    }
}
