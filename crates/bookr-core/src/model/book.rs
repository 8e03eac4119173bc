use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;
use crate::model::ids::{BookId, PublisherId};
use crate::validate;

/// The details about a book.
///
/// Every book belongs to exactly one publisher. Contributors are attached
/// through [`BookContributor`](crate::model::BookContributor) rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,

    /// The title of the book.
    pub title: String,

    /// Date of the book.
    pub publication_date: NaiveDate,

    /// ISBN number of the book.
    pub isbn: String,

    pub publisher_id: PublisherId,
}

impl Book {
    pub const TITLE_MAX_LEN: usize = 70;
    pub const ISBN_MAX_LEN: usize = 20;

    #[must_use]
    pub fn new(
        title: impl Into<String>,
        publication_date: NaiveDate,
        isbn: impl Into<String>,
        publisher_id: PublisherId,
    ) -> Self {
        Self {
            id: BookId::new(),
            title: title.into(),
            publication_date,
            isbn: isbn.into(),
            publisher_id,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate::text("title", &self.title, Self::TITLE_MAX_LEN)?;
        validate::text("isbn", &self.isbn, Self::ISBN_MAX_LEN)
    }

    /// Display label: the book's title.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.title
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intro() -> Book {
        Book::new(
            "Intro to X",
            NaiveDate::from_ymd_opt(2021, 3, 14).unwrap(),
            "978-1-23456-789-7",
            PublisherId::new(),
        )
    }

    #[test]
    fn test_book_new() {
        let book = intro();
        assert_eq!(book.label(), "Intro to X");
        assert_eq!(book.to_string(), "Intro to X");
        assert!(book.validate().is_ok());
    }

    #[test]
    fn test_book_limits() {
        let mut book = intro();
        book.title = "t".repeat(Book::TITLE_MAX_LEN);
        assert!(book.validate().is_ok());

        book.isbn = "9".repeat(Book::ISBN_MAX_LEN + 1);
        assert!(matches!(
            book.validate(),
            Err(ValidationError::TooLong { field: "isbn", .. })
        ));
    }

    #[test]
    fn test_book_blank_title() {
        let mut book = intro();
        book.title.clear();
        assert_eq!(book.validate(), Err(ValidationError::Blank { field: "title" }));
    }
}
