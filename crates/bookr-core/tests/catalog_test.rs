//! Integration tests for relationships and cascading deletes on an
//! on-disk database.

use bookr_core::model::{Book, BookContributor, ContributionRole, Contributor, Publisher, Review, User};
use bookr_core::Database;
use chrono::NaiveDate;
use tempfile::TempDir;

struct Seeded {
    _dir: TempDir,
    db: Database,
    publisher: Publisher,
    book: Book,
    jane: Contributor,
    reader: User,
    review: Review,
}

/// Acme Press publishes "Intro to X", edited by Jane Doe and reviewed once.
fn seeded() -> Seeded {
    let dir = TempDir::new().unwrap();
    let db = Database::open(dir.path().join("bookr.db")).expect("Failed to open database");

    let publisher = Publisher::new("Acme Press", "https://acme.example.com", "info@acme.example.com");
    db.insert_publisher(&publisher).unwrap();

    let book = Book::new(
        "Intro to X",
        NaiveDate::from_ymd_opt(2021, 3, 14).unwrap(),
        "978-1-23456-789-7",
        publisher.id,
    );
    db.insert_book(&book).unwrap();

    let jane = Contributor::new("Jane", "Doe", "jane@example.com");
    db.insert_contributor(&jane).unwrap();
    db.insert_book_contributor(&BookContributor::new(book.id, jane.id, ContributionRole::Editor))
        .unwrap();

    let reader = User::new("reader42").with_email("reader42@example.com");
    db.insert_user(&reader).unwrap();

    let mut review = Review::new("A tidy introduction.", 4, reader.id, book.id);
    db.insert_review(&mut review).unwrap();

    Seeded {
        _dir: dir,
        db,
        publisher,
        book,
        jane,
        reader,
        review,
    }
}

#[test]
fn test_book_yields_its_contributor_and_review() {
    let s = seeded();

    let credits = s.db.contributors_for_book(s.book.id).unwrap();
    assert_eq!(credits.len(), 1);
    assert_eq!(credits[0].contributor.full_name(), "Jane Doe");
    assert_eq!(credits[0].role, ContributionRole::Editor);

    let reviews = s.db.reviews_for_book(s.book.id).unwrap();
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0].rating, 4);
    assert_eq!(reviews[0].date_created, s.review.date_created);
    assert!(reviews[0].date_edited.is_none());
    assert_eq!(reviews[0].creator_id, s.reader.id);
}

#[test]
fn test_book_resolves_exactly_one_publisher() {
    let s = seeded();
    let publisher = s.db.publisher_for_book(s.book.id).unwrap();
    assert_eq!(publisher, s.publisher);
    assert_eq!(publisher.to_string(), "Acme Press");
}

#[test]
fn test_deleting_publisher_cascades_through_books() {
    let s = seeded();
    assert!(s.db.delete_publisher(s.publisher.id).unwrap());

    let counts = s.db.counts().unwrap();
    assert_eq!(counts.publishers, 0);
    assert_eq!(counts.books, 0);
    assert_eq!(counts.book_contributors, 0);
    assert_eq!(counts.reviews, 0);

    // Contributors and users are not owned by the publisher.
    assert_eq!(counts.contributors, 1);
    assert_eq!(counts.users, 1);
}

#[test]
fn test_deleting_book_removes_credits_and_reviews() {
    let s = seeded();
    assert!(s.db.delete_book(s.book.id).unwrap());

    assert!(s.db.contributors_for_book(s.book.id).unwrap().is_empty());
    assert!(s.db.reviews_for_book(s.book.id).unwrap().is_empty());
    assert!(s.db.get_contributor(s.jane.id).is_ok());
    assert!(s.db.get_publisher(s.publisher.id).is_ok());
}

#[test]
fn test_deleting_contributor_keeps_book() {
    let s = seeded();
    assert!(s.db.delete_contributor(s.jane.id).unwrap());

    assert!(s.db.contributors_for_book(s.book.id).unwrap().is_empty());
    assert_eq!(s.db.get_book(s.book.id).unwrap(), s.book);
    assert_eq!(s.db.reviews_for_book(s.book.id).unwrap().len(), 1);
}

#[test]
fn test_cascades_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bookr.db");

    let publisher = Publisher::new("Acme Press", "https://acme.example.com", "info@acme.example.com");
    let book = Book::new(
        "Intro to X",
        NaiveDate::from_ymd_opt(2021, 3, 14).unwrap(),
        "978-1-23456-789-7",
        publisher.id,
    );
    {
        let db = Database::open(&path).unwrap();
        db.insert_publisher(&publisher).unwrap();
        db.insert_book(&book).unwrap();
    }

    let db = Database::open(&path).unwrap();
    assert_eq!(db.get_book(book.id).unwrap(), book);
    db.delete_publisher(publisher.id).unwrap();
    assert!(db.get_book(book.id).is_err());

    let migrations: i64 = db
        .conn()
        .query_row("SELECT COUNT(*) FROM schema_migrations", [], |row| row.get(0))
        .unwrap();
    assert_eq!(migrations, 1, "reopening must not re-apply migrations");
}

#[test]
fn test_contributor_may_hold_several_roles_on_one_book() {
    let s = seeded();
    s.db.insert_book_contributor(&BookContributor::new(
        s.book.id,
        s.jane.id,
        ContributionRole::CoAuthor,
    ))
    .unwrap();

    let roles: Vec<_> = s
        .db
        .contributors_for_book(s.book.id)
        .unwrap()
        .into_iter()
        .map(|credit| credit.role.as_str())
        .collect();
    assert_eq!(roles, vec!["EDITOR", "CO-AUTHOR"]);
}
