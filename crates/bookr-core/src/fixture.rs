//! Bulk load and dump of catalog records as JSON.
//!
//! A fixture lists every record kind in dependency order. Loading is
//! all-or-nothing: one invalid or dangling record rolls the whole load
//! back.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::model::{Book, BookContributor, Contributor, Publisher, Review, User};
use crate::schema::Database;

/// A serialized snapshot of catalog records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fixture {
    pub users: Vec<User>,
    pub publishers: Vec<Publisher>,
    pub books: Vec<Book>,
    pub contributors: Vec<Contributor>,
    pub book_contributors: Vec<BookContributor>,
    pub reviews: Vec<Review>,
}

impl Fixture {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Total number of records.
    pub fn len(&self) -> usize {
        self.users.len()
            + self.publishers.len()
            + self.books.len()
            + self.contributors.len()
            + self.book_contributors.len()
            + self.reviews.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Database {
    /// Insert every record of `fixture` in one transaction.
    ///
    /// Reviews keep the `date_created` recorded in the fixture.
    pub fn load_fixture(&self, fixture: &Fixture) -> Result<()> {
        let tx = self.conn().unchecked_transaction()?;

        for user in &fixture.users {
            self.insert_user(user)?;
        }
        for publisher in &fixture.publishers {
            self.insert_publisher(publisher)?;
        }
        for book in &fixture.books {
            self.insert_book(book)?;
        }
        for contributor in &fixture.contributors {
            self.insert_contributor(contributor)?;
        }
        for link in &fixture.book_contributors {
            self.insert_book_contributor(link)?;
        }
        for review in &fixture.reviews {
            self.insert_review_as_recorded(review)?;
        }

        tx.commit()?;
        log::info!("Loaded {} fixture record(s)", fixture.len());
        Ok(())
    }

    /// Read every record back out.
    pub fn dump_fixture(&self) -> Result<Fixture> {
        Ok(Fixture {
            users: self.list_users()?,
            publishers: self.list_publishers()?,
            books: self.list_books()?,
            contributors: self.list_contributors()?,
            book_contributors: self.list_book_contributors()?,
            reviews: self.list_reviews()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, ValidationError};
    use crate::model::ContributionRole;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn sample() -> Fixture {
        let reader = User::new("reader42");
        let acme = Publisher::new(
            "Acme Press",
            "https://acme.example.com",
            "press@acme.example.com",
        );
        let book = Book::new(
            "Intro to X",
            NaiveDate::from_ymd_opt(2021, 3, 14).unwrap(),
            "978-1-23456-789-7",
            acme.id,
        );
        let jane = Contributor::new("Jane", "Doe", "jane@example.com");
        let credit = BookContributor::new(book.id, jane.id, ContributionRole::Editor);
        let mut review = Review::new("Clear and short.", 4, reader.id, book.id);
        review.date_created = Utc.with_ymd_and_hms(2022, 5, 1, 12, 0, 0).unwrap();

        Fixture {
            users: vec![reader],
            publishers: vec![acme],
            books: vec![book],
            contributors: vec![jane],
            book_contributors: vec![credit],
            reviews: vec![review],
        }
    }

    #[test]
    fn test_load_then_dump() {
        let db = Database::open_in_memory().unwrap();
        let fixture = sample();
        db.load_fixture(&fixture).unwrap();

        let dumped = db.dump_fixture().unwrap();
        assert_eq!(dumped, fixture);
        assert_eq!(
            dumped.reviews[0].date_created,
            Utc.with_ymd_and_hms(2022, 5, 1, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_invalid_record_loads_nothing() {
        let db = Database::open_in_memory().unwrap();
        let mut fixture = sample();
        fixture.contributors[0].email = "not-an-email".to_string();

        let err = db.load_fixture(&fixture).unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::InvalidEmail { field: "email" })
        ));
        assert_eq!(db.counts().unwrap(), crate::schema::TableCounts::default());
    }

    #[test]
    fn test_dangling_reference_loads_nothing() {
        let db = Database::open_in_memory().unwrap();
        let mut fixture = sample();
        fixture.publishers.clear();

        assert!(matches!(
            db.load_fixture(&fixture),
            Err(Error::Database(_))
        ));
        assert!(db.dump_fixture().unwrap().is_empty());
    }

    #[test]
    fn test_json_uses_stored_role_literal() {
        let json = sample().to_json().unwrap();
        assert!(json.contains("\"role\": \"EDITOR\""));

        let co_authored = json.replace("\"EDITOR\"", "\"CO-AUTHOR\"");
        let fixture = Fixture::from_json(&co_authored).unwrap();
        assert_eq!(fixture.book_contributors[0].role, ContributionRole::CoAuthor);
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let fixture = Fixture::from_json(r#"{ "users": [] }"#).unwrap();
        assert!(fixture.is_empty());
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let json = sample().to_json().unwrap().replace("EDITOR", "TRANSLATOR");
        assert!(matches!(
            Fixture::from_json(&json),
            Err(Error::Serialization(_))
        ));
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("catalog.json");
        let fixture = sample();
        fixture.write(&path).unwrap();
        assert_eq!(Fixture::read(&path).unwrap(), fixture);
    }
}
