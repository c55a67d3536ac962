//! Core data types for the bookshelf service.
//!
//! A book is a small record with three required business fields. The id is
//! assigned by the store on insert and never changes afterwards; callers only
//! ever compare ids for equality.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ============================================================================
// ID Types
// ============================================================================

/// Unique identifier for a book.
///
/// Wraps a UUID, providing type safety to distinguish book IDs from other
/// UUID-based identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(pub Uuid);

impl BookId {
    /// Creates a new random BookId using UUID v4.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a BookId from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

}

impl Default for BookId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BookId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

// ============================================================================
// Book
// ============================================================================

/// A persisted book.
///
/// All three business fields are always populated; the store never holds a
/// book that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub genre: String,
}

impl Book {
    /// Build a book from an id and validated fields.
    pub fn from_parts(id: BookId, fields: NewBook) -> Self {
        Self {
            id,
            title: fields.title,
            author: fields.author,
            genre: fields.genre,
        }
    }

    /// Replace the business fields, keeping the id.
    pub fn apply(&mut self, fields: &NewBook) {
        self.title.clone_from(&fields.title);
        self.author.clone_from(&fields.author);
        self.genre.clone_from(&fields.genre);
    }
}

/// Validated business fields for creating or replacing a book.
///
/// Only obtainable through [`BookInput::validate`], so holding one means every
/// field is non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub genre: String,
}

impl NewBook {
    /// Shorthand for validating three string slices.
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        genre: impl Into<String>,
    ) -> Result<Self, crate::ValidationError> {
        BookInput {
            title: Some(title.into()),
            author: Some(author.into()),
            genre: Some(genre.into()),
        }
        .validate()
    }
}

/// Unvalidated request body for create and update.
///
/// Every field may be absent; unknown fields are ignored. Scalar values are
/// taken as text (`1984` becomes `"1984"`), while `null`, `false` and `0`
/// count as absent. Arrays and objects are rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BookInput {
    #[serde(deserialize_with = "scalar_text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "scalar_text")]
    pub author: Option<String>,
    #[serde(deserialize_with = "scalar_text")]
    pub genre: Option<String>,
}

/// A JSON scalar accepted in place of a string field.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Bool(bool),
    Signed(i64),
    Unsigned(u64),
    Float(f64),
}

impl Scalar {
    fn into_text(self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text),
            Self::Bool(false) | Self::Signed(0) | Self::Unsigned(0) => None,
            Self::Float(n) if n == 0.0 || n.is_nan() => None,
            Self::Bool(true) => Some("true".to_string()),
            Self::Signed(n) => Some(n.to_string()),
            Self::Unsigned(n) => Some(n.to_string()),
            Self::Float(n) => Some(n.to_string()),
        }
    }
}

fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.and_then(Scalar::into_text))
}
