use serde::{Deserialize, Serialize};

/// A book in the `/books` collection.
///
/// # Actor Framework
/// This struct implements the [`Entity`](crate::framework::Entity) trait,
/// allowing it to be managed by a [`ResourceActor`](crate::framework::ResourceActor).
///
/// - Creation parameters: [`BookCreate`]
/// - Update parameters: [`BookUpdate`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: String,
    pub isbn: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub age: u32,
}

/// Payload for creating a new book. `id` is optional; when absent the
/// collection generates one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookCreate {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub isbn: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: Option<Author>,
}

/// Partial book. Absent and `null` fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookUpdate {
    /// Must name the target book if present; the identifier itself never changes.
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<AuthorUpdate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthorUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
}

impl Book {
    pub fn new(id: impl Into<String>, isbn: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            isbn: isbn.into(),
            title: title.into(),
            author: None,
        }
    }

    pub fn with_author(mut self, name: impl Into<String>, age: u32) -> Self {
        self.author = Some(Author {
            name: name.into(),
            age,
        });
        self
    }
}

impl BookCreate {
    pub fn new(isbn: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            isbn: isbn.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    /// Asks for a specific identifier instead of a generated one.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_author(mut self, name: impl Into<String>, age: u32) -> Self {
        self.author = Some(Author {
            name: name.into(),
            age,
        });
        self
    }
}
