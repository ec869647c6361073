use serde::{Deserialize, Serialize};

use super::error::{CatalogError, FieldViolation};

/// Identifier assigned to a book by the catalog.
pub type BookId = i64;

/// A catalog entry as stored and served.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Unique identifier for the book
    pub id: BookId,
    /// Title of the book
    pub title: String,
    /// Author of the book
    pub author: String,
    /// Category, matched case-insensitively when filtering
    pub category: String,
    /// Reader rating; no range is enforced
    pub rating: i32,
}

/// Create/update payload.
///
/// Fields are optional on the wire so that a missing field is reported as a
/// validation failure naming that field, not as an opaque decode error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
    pub rating: Option<i32>,
}

/// A request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub category: String,
    pub rating: i32,
}

impl BookRequest {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        category: impl Into<String>,
        rating: i32,
    ) -> Self {
        Self {
            title: Some(title.into()),
            author: Some(author.into()),
            category: Some(category.into()),
            rating: Some(rating),
        }
    }

    /// Check field presence, collecting every violation before failing.
    pub fn validate(self) -> Result<BookDraft, CatalogError> {
        let mut violations = Vec::new();

        let title = required_text("title", self.title, &mut violations);
        let author = required_text("author", self.author, &mut violations);
        let category = required_text("category", self.category, &mut violations);
        if self.rating.is_none() {
            violations.push(FieldViolation::new("rating", "must not be null"));
        }

        match (title, author, category, self.rating) {
            (Some(title), Some(author), Some(category), Some(rating)) if violations.is_empty() => {
                Ok(BookDraft {
                    title,
                    author,
                    category,
                    rating,
                })
            }
            _ => Err(CatalogError::invalid_request(violations)),
        }
    }
}

fn required_text(
    field: &'static str,
    value: Option<String>,
    violations: &mut Vec<FieldViolation>,
) -> Option<String> {
    match value {
        Some(text) if !text.trim().is_empty() => Some(text),
        _ => {
            violations.push(FieldViolation::new(field, "must not be blank"));
            None
        }
    }
}

impl BookDraft {
    pub fn into_book(self, id: BookId) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            category: self.category,
            rating: self.rating,
        }
    }
}
