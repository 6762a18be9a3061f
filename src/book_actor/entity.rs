//! Entity trait implementation for the Book domain type.

use super::BookError;
use crate::framework::Entity;
use crate::model::{Author, Book, BookCreate, BookUpdate};

fn check_isbn(isbn: &str) -> Result<(), BookError> {
    let valid = isbn
        .char_indices()
        .all(|(i, c)| c.is_ascii_digit() || c == '-' || (c == 'X' && i == isbn.len() - 1));
    if valid {
        Ok(())
    } else {
        Err(BookError::InvalidIsbn(isbn.to_string()))
    }
}

fn check_id(id: &str) -> Result<(), BookError> {
    if id.is_empty() || id.trim() != id || id.contains('/') {
        return Err(BookError::InvalidId(id.to_string()));
    }
    Ok(())
}

impl Entity for Book {
    type Id = String;
    type Create = BookCreate;
    type Update = BookUpdate;
    type Error = BookError;

    fn id(&self) -> &String {
        &self.id
    }

    fn requested_id(params: &BookCreate) -> Option<String> {
        params.id.clone()
    }

    /// Creates a new Book from creation parameters.
    fn from_create_params(id: String, params: BookCreate) -> Result<Self, BookError> {
        check_id(&id)?;
        if params.title.trim().is_empty() {
            return Err(BookError::EmptyTitle);
        }
        check_isbn(&params.isbn)?;
        Ok(Self {
            id,
            isbn: params.isbn,
            title: params.title,
            author: params.author,
        })
    }

    /// Handles updates to the Book entity.
    ///
    /// # Fields Updated
    /// - `isbn`, `title`: replaced when present
    /// - `author`: merged field by field; a book without an author gains one
    fn apply_update(&mut self, update: BookUpdate) -> Result<(), BookError> {
        if let Some(id) = update.id {
            if id != self.id {
                return Err(BookError::IdMismatch {
                    expected: self.id.clone(),
                    found: id,
                });
            }
        }
        if let Some(isbn) = update.isbn {
            check_isbn(&isbn)?;
            self.isbn = isbn;
        }
        if let Some(title) = update.title {
            if title.trim().is_empty() {
                return Err(BookError::EmptyTitle);
            }
            self.title = title;
        }
        if let Some(patch) = update.author {
            let author = self.author.get_or_insert_with(Author::default);
            if let Some(name) = patch.name {
                author.name = name;
            }
            if let Some(age) = patch.age {
                author.age = age;
            }
        }
        Ok(())
    }
}
