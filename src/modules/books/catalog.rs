//! In-memory book catalog.
//!
//! Books are kept in insertion order and every lookup is a linear scan. The
//! catalog itself is not synchronized; the books module shares it behind a
//! single read/write lock.

use super::error::CatalogError;
use super::models::{Book, BookId, BookRequest};

/// Ordered, in-memory collection of books.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    books: Vec<Book>,
}

impl Catalog {
    /// An empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// A catalog holding the fixed seed records
    pub fn seeded() -> Self {
        Self::from_books(seed_books())
    }

    pub fn from_books(books: Vec<Book>) -> Self {
        Self { books }
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Every book, or only those whose category matches ignoring case.
    pub fn list(&self, category: Option<&str>) -> Vec<&Book> {
        match category {
            None => self.books.iter().collect(),
            Some(category) => self
                .books
                .iter()
                .filter(|book| eq_ignore_case(&book.category, category))
                .collect(),
        }
    }

    /// First book whose title matches ignoring case. A miss is not an error.
    pub fn get_by_title(&self, title: &str) -> Option<&Book> {
        self.books
            .iter()
            .find(|book| eq_ignore_case(&book.title, title))
    }

    /// Book with the given id; ids below 1 are rejected before the lookup.
    pub fn get_by_id(&self, id: BookId) -> Result<&Book, CatalogError> {
        if id < 1 {
            return Err(CatalogError::invalid_id(id));
        }
        self.find(id)
    }

    /// Validate and append a new book, returning it with its assigned id.
    pub fn create(&mut self, request: BookRequest) -> Result<Book, CatalogError> {
        let draft = request.validate()?;
        let book = draft.into_book(self.next_id());
        self.books.push(book.clone());
        Ok(book)
    }

    /// Replace every field but the id of the first book with `id`.
    pub fn update(&mut self, id: BookId, request: BookRequest) -> Result<Book, CatalogError> {
        let draft = request.validate()?;
        let slot = self
            .books
            .iter_mut()
            .find(|book| book.id == id)
            .ok_or(CatalogError::NotFound(id))?;

        *slot = draft.into_book(id);
        Ok(slot.clone())
    }

    /// Remove the book with `id`.
    pub fn delete(&mut self, id: BookId) -> Result<(), CatalogError> {
        self.find(id)?;
        self.books.retain(|book| book.id != id);
        Ok(())
    }

    fn find(&self, id: BookId) -> Result<&Book, CatalogError> {
        self.books
            .iter()
            .find(|book| book.id == id)
            .ok_or(CatalogError::NotFound(id))
    }

    // Derived from the last book in insertion order, not the maximum id.
    fn next_id(&self) -> BookId {
        self.books.last().map_or(1, |book| book.id + 1)
    }
}

/// Character-wise comparison: equal if each pair matches after upper- or
/// lower-casing, so final sigma still matches its capital.
fn eq_ignore_case(left: &str, right: &str) -> bool {
    left.chars().count() == right.chars().count()
        && left.chars().zip(right.chars()).all(|(l, r)| {
            l == r || l.to_uppercase().eq(r.to_uppercase()) || l.to_lowercase().eq(r.to_lowercase())
        })
}

/// The ten records every fresh catalog starts with.
pub fn seed_books() -> Vec<Book> {
    [
        (1, "A Brief History of Time", "Stephen Hawking", "Science", 5),
        (2, "The Great Gatsby", "F. Scott Fitzgerald", "Fiction", 4),
        (3, "Clean Code", "Robert C. Martin", "Programming", 5),
        (4, "Thinking, Fast and Slow", "Daniel Kahneman", "Psychology", 4),
        (5, "Sapiens: A Brief History of Humankind", "Yuval Noah Harari", "History", 5),
        (6, "The Pragmatic Programmer", "Andrew Hunt", "Programming", 5),
        (7, "To Kill a Mockingbird", "Harper Lee", "Fiction", 5),
        (8, "The Selfish Gene", "Richard Dawkins", "Science", 4),
        (9, "Atomic Habits", "James Clear", "Self-help", 5),
        (10, "The Art of War", "Sun Tzu", "Philosophy", 4),
    ]
    .into_iter()
    .map(|(id, title, author, category, rating)| Book {
        id,
        title: title.to_string(),
        author: author.to_string(),
        category: category.to_string(),
        rating,
    })
    .collect()
}
