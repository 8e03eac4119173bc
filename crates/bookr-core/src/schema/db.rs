use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, Row, ToSql};
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::{
    Book, BookContributor, BookContributorId, BookCredit, BookId, Contributor, ContributorId,
    Publisher, PublisherId, Review, ReviewId, User, UserId,
};

use super::migrations::MIGRATIONS;

const USER_COLUMNS: &str = "id, username, email";
const PUBLISHER_COLUMNS: &str = "id, name, website, email";
const BOOK_COLUMNS: &str = "id, title, publication_date, isbn, publisher_id";
const CONTRIBUTOR_COLUMNS: &str = "id, first_name, last_name, email";
const BOOK_CONTRIBUTOR_COLUMNS: &str = "id, book_id, contributor_id, role";
const REVIEW_COLUMNS: &str = "id, content, rating, date_created, date_edited, creator_id, book_id";

/// A database connection with CRUD and traversal methods for the
/// review catalog.
///
/// Every foreign key cascades on delete, so removing a publisher removes
/// its books, and removing a book removes its credits and reviews.
#[derive(Debug)]
pub struct Database {
    conn: Connection,
}

/// Row counts per table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableCounts {
    pub users: u64,
    pub publishers: u64,
    pub books: u64,
    pub contributors: u64,
    pub book_contributors: u64,
    pub reviews: u64,
}

impl Database {
    /// Open (or create) a database at the given path and apply migrations.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::init(Connection::open(path)?)
    }

    /// Open an in-memory database (for tests).
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        // Per-connection setting; cascades are inert without it.
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        let db = Self { conn };
        db.apply_migrations()?;
        Ok(db)
    }

    /// Get a reference to the underlying connection (for advanced queries).
    #[must_use]
    pub const fn conn(&self) -> &Connection {
        &self.conn
    }

    fn apply_migrations(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS schema_migrations (
                version INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                applied_at TEXT NOT NULL DEFAULT (datetime('now'))
            )",
            [],
        )?;

        let mut stmt = self
            .conn
            .prepare("SELECT version FROM schema_migrations ORDER BY version")?;
        let applied: Vec<u32> = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        for migration in MIGRATIONS {
            if !applied.contains(&migration.version) {
                log::info!(
                    "Applying migration {} ({})",
                    migration.version,
                    migration.name
                );
                let tx = self.conn.unchecked_transaction()?;
                tx.execute_batch(migration.sql)?;
                tx.execute(
                    "INSERT INTO schema_migrations (version, name) VALUES (?1, ?2)",
                    rusqlite::params![migration.version, migration.name],
                )?;
                tx.commit()?;
            }
        }

        Ok(())
    }

    /// Row counts for every table.
    pub fn counts(&self) -> Result<TableCounts> {
        Ok(TableCounts {
            users: self.count("users")?,
            publishers: self.count("publishers")?,
            books: self.count("books")?,
            contributors: self.count("contributors")?,
            book_contributors: self.count("book_contributors")?,
            reviews: self.count("reviews")?,
        })
    }

    fn count(&self, table: &'static str) -> Result<u64> {
        let n: i64 = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
        u64::try_from(n).map_err(|_| Error::InvalidData(format!("negative count for {table}")))
    }

    fn delete_row(&self, table: &'static str, id: &dyn ToSql) -> Result<bool> {
        let deleted = self
            .conn
            .execute(&format!("DELETE FROM {table} WHERE id = ?1"), rusqlite::params![id])?;
        log::debug!("Deleted {} row(s) from {}", deleted, table);
        Ok(deleted > 0)
    }

    fn query_list<T, P>(
        &self,
        sql: &str,
        params: P,
        map: fn(&Row<'_>) -> rusqlite::Result<T>,
    ) -> Result<Vec<T>>
    where
        P: rusqlite::Params,
    {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt
            .query_map(params, map)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    fn query_one<T>(
        &self,
        sql: &str,
        id: &dyn ToSql,
        map: fn(&Row<'_>) -> rusqlite::Result<T>,
        entity: &'static str,
    ) -> Result<T> {
        self.conn
            .query_row(sql, rusqlite::params![id], map)
            .optional()?
            .ok_or_else(|| Error::NotFound {
                entity,
                id: display_id(id),
            })
    }
}

fn display_id(id: &dyn ToSql) -> String {
    use rusqlite::types::{ToSqlOutput, Value, ValueRef};

    match id.to_sql() {
        Ok(ToSqlOutput::Owned(Value::Text(s))) => s,
        Ok(ToSqlOutput::Borrowed(ValueRef::Text(b))) => String::from_utf8_lossy(b).into_owned(),
        _ => String::from("?"),
    }
}

fn not_found_unless_changed(changed: usize, entity: &'static str, id: &dyn ToSql) -> Result<()> {
    if changed == 0 {
        return Err(Error::NotFound {
            entity,
            id: display_id(id),
        });
    }
    Ok(())
}

// User CRUD
impl Database {
    pub fn insert_user(&self, user: &User) -> Result<()> {
        user.validate()?;
        self.conn.execute(
            "INSERT INTO users (id, username, email) VALUES (?1, ?2, ?3)",
            rusqlite::params![user.id, user.username, user.email],
        )?;
        log::debug!("Inserted user {} ({})", user.username, user.id);
        Ok(())
    }

    pub fn get_user(&self, id: UserId) -> Result<User> {
        self.query_one(
            &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
            &id,
            row_to_user,
            "user",
        )
    }

    pub fn update_user(&self, user: &User) -> Result<()> {
        user.validate()?;
        let changed = self.conn.execute(
            "UPDATE users SET username = ?2, email = ?3 WHERE id = ?1",
            rusqlite::params![user.id, user.username, user.email],
        )?;
        not_found_unless_changed(changed, "user", &user.id)
    }

    /// Delete a user and, by cascade, every review they wrote.
    pub fn delete_user(&self, id: UserId) -> Result<bool> {
        self.delete_row("users", &id)
    }

    pub fn list_users(&self) -> Result<Vec<User>> {
        self.query_list(
            &format!("SELECT {USER_COLUMNS} FROM users ORDER BY username"),
            [],
            row_to_user,
        )
    }
}

// Publisher CRUD
impl Database {
    pub fn insert_publisher(&self, publisher: &Publisher) -> Result<()> {
        publisher.validate()?;
        self.conn.execute(
            "INSERT INTO publishers (id, name, website, email) VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![
                publisher.id,
                publisher.name,
                publisher.website,
                publisher.email
            ],
        )?;
        log::debug!("Inserted publisher {} ({})", publisher, publisher.id);
        Ok(())
    }

    pub fn get_publisher(&self, id: PublisherId) -> Result<Publisher> {
        self.query_one(
            &format!("SELECT {PUBLISHER_COLUMNS} FROM publishers WHERE id = ?1"),
            &id,
            row_to_publisher,
            "publisher",
        )
    }

    pub fn update_publisher(&self, publisher: &Publisher) -> Result<()> {
        publisher.validate()?;
        let changed = self.conn.execute(
            "UPDATE publishers SET name = ?2, website = ?3, email = ?4 WHERE id = ?1",
            rusqlite::params![
                publisher.id,
                publisher.name,
                publisher.website,
                publisher.email
            ],
        )?;
        not_found_unless_changed(changed, "publisher", &publisher.id)
    }

    /// Delete a publisher and, by cascade, all of its books.
    pub fn delete_publisher(&self, id: PublisherId) -> Result<bool> {
        self.delete_row("publishers", &id)
    }

    pub fn list_publishers(&self) -> Result<Vec<Publisher>> {
        self.query_list(
            &format!("SELECT {PUBLISHER_COLUMNS} FROM publishers ORDER BY name"),
            [],
            row_to_publisher,
        )
    }
}

// Book CRUD and traversal
impl Database {
    pub fn insert_book(&self, book: &Book) -> Result<()> {
        book.validate()?;
        self.conn.execute(
            "INSERT INTO books (id, title, publication_date, isbn, publisher_id)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![
                book.id,
                book.title,
                book.publication_date,
                book.isbn,
                book.publisher_id
            ],
        )?;
        log::debug!("Inserted book {} ({})", book, book.id);
        Ok(())
    }

    pub fn get_book(&self, id: BookId) -> Result<Book> {
        self.query_one(
            &format!("SELECT {BOOK_COLUMNS} FROM books WHERE id = ?1"),
            &id,
            row_to_book,
            "book",
        )
    }

    pub fn update_book(&self, book: &Book) -> Result<()> {
        book.validate()?;
        let changed = self.conn.execute(
            "UPDATE books SET title = ?2, publication_date = ?3, isbn = ?4, publisher_id = ?5
             WHERE id = ?1",
            rusqlite::params![
                book.id,
                book.title,
                book.publication_date,
                book.isbn,
                book.publisher_id
            ],
        )?;
        not_found_unless_changed(changed, "book", &book.id)
    }

    /// Delete a book and, by cascade, its credits and reviews.
    pub fn delete_book(&self, id: BookId) -> Result<bool> {
        self.delete_row("books", &id)
    }

    pub fn list_books(&self) -> Result<Vec<Book>> {
        self.query_list(
            &format!("SELECT {BOOK_COLUMNS} FROM books ORDER BY title"),
            [],
            row_to_book,
        )
    }

    pub fn books_by_publisher(&self, publisher_id: PublisherId) -> Result<Vec<Book>> {
        self.query_list(
            &format!(
                "SELECT {BOOK_COLUMNS} FROM books WHERE publisher_id = ?1 ORDER BY publication_date, title"
            ),
            [publisher_id],
            row_to_book,
        )
    }

    /// The one publisher a book belongs to.
    pub fn publisher_for_book(&self, book_id: BookId) -> Result<Publisher> {
        let book = self.get_book(book_id)?;
        self.get_publisher(book.publisher_id)
    }
}

// Contributor CRUD and traversal
impl Database {
    pub fn insert_contributor(&self, contributor: &Contributor) -> Result<()> {
        contributor.validate()?;
        self.conn.execute(
            "INSERT INTO contributors (id, first_name, last_name, email) VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![
                contributor.id,
                contributor.first_name,
                contributor.last_name,
                contributor.email
            ],
        )?;
        log::debug!(
            "Inserted contributor {} ({})",
            contributor.full_name(),
            contributor.id
        );
        Ok(())
    }

    pub fn get_contributor(&self, id: ContributorId) -> Result<Contributor> {
        self.query_one(
            &format!("SELECT {CONTRIBUTOR_COLUMNS} FROM contributors WHERE id = ?1"),
            &id,
            row_to_contributor,
            "contributor",
        )
    }

    pub fn update_contributor(&self, contributor: &Contributor) -> Result<()> {
        contributor.validate()?;
        let changed = self.conn.execute(
            "UPDATE contributors SET first_name = ?2, last_name = ?3, email = ?4 WHERE id = ?1",
            rusqlite::params![
                contributor.id,
                contributor.first_name,
                contributor.last_name,
                contributor.email
            ],
        )?;
        not_found_unless_changed(changed, "contributor", &contributor.id)
    }

    /// Delete a contributor and, by cascade, their credits. Books stay.
    pub fn delete_contributor(&self, id: ContributorId) -> Result<bool> {
        self.delete_row("contributors", &id)
    }

    pub fn list_contributors(&self) -> Result<Vec<Contributor>> {
        self.query_list(
            &format!(
                "SELECT {CONTRIBUTOR_COLUMNS} FROM contributors ORDER BY first_name, last_name"
            ),
            [],
            row_to_contributor,
        )
    }

    /// Books a contributor is credited on, once per book.
    pub fn books_for_contributor(&self, contributor_id: ContributorId) -> Result<Vec<Book>> {
        self.query_list(
            "SELECT DISTINCT b.id, b.title, b.publication_date, b.isbn, b.publisher_id
             FROM books b
             JOIN book_contributors bc ON bc.book_id = b.id
             WHERE bc.contributor_id = ?1
             ORDER BY b.title",
            [contributor_id],
            row_to_book,
        )
    }
}

// BookContributor CRUD and traversal
impl Database {
    pub fn insert_book_contributor(&self, link: &BookContributor) -> Result<()> {
        link.validate()?;
        self.conn.execute(
            "INSERT INTO book_contributors (id, book_id, contributor_id, role)
             VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![link.id, link.book_id, link.contributor_id, link.role],
        )?;
        log::debug!(
            "Credited contributor {} as {} on book {}",
            link.contributor_id,
            link.role,
            link.book_id
        );
        Ok(())
    }

    pub fn get_book_contributor(&self, id: BookContributorId) -> Result<BookContributor> {
        self.query_one(
            &format!("SELECT {BOOK_CONTRIBUTOR_COLUMNS} FROM book_contributors WHERE id = ?1"),
            &id,
            row_to_book_contributor,
            "book contributor",
        )
    }

    pub fn delete_book_contributor(&self, id: BookContributorId) -> Result<bool> {
        self.delete_row("book_contributors", &id)
    }

    /// Every credit row, in insertion order.
    pub fn list_book_contributors(&self) -> Result<Vec<BookContributor>> {
        self.query_list(
            &format!("SELECT {BOOK_CONTRIBUTOR_COLUMNS} FROM book_contributors ORDER BY rowid"),
            [],
            row_to_book_contributor,
        )
    }

    /// The contributors of a book with their roles, one entry per credit
    /// row, in the order they were credited.
    pub fn contributors_for_book(&self, book_id: BookId) -> Result<Vec<BookCredit>> {
        self.query_list(
            "SELECT c.id, c.first_name, c.last_name, c.email, bc.role
             FROM book_contributors bc
             JOIN contributors c ON c.id = bc.contributor_id
             WHERE bc.book_id = ?1
             ORDER BY bc.rowid",
            [book_id],
            |row| {
                Ok(BookCredit {
                    contributor: row_to_contributor(row)?,
                    role: row.get(4)?,
                })
            },
        )
    }
}

// Review CRUD and traversal
impl Database {
    /// Insert a review, stamping `date_created` with the current time.
    pub fn insert_review(&self, review: &mut Review) -> Result<()> {
        review.date_created = Utc::now();
        self.insert_review_as_recorded(review)
    }

    /// Insert a review keeping its recorded `date_created`.
    pub(crate) fn insert_review_as_recorded(&self, review: &Review) -> Result<()> {
        review.validate()?;
        self.conn.execute(
            "INSERT INTO reviews (id, content, rating, date_created, date_edited, creator_id, book_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            rusqlite::params![
                review.id,
                review.content,
                review.rating,
                review.date_created,
                review.date_edited,
                review.creator_id,
                review.book_id
            ],
        )?;
        log::debug!("Inserted review {} of book {}", review.id, review.book_id);
        Ok(())
    }

    pub fn get_review(&self, id: ReviewId) -> Result<Review> {
        self.query_one(
            &format!("SELECT {REVIEW_COLUMNS} FROM reviews WHERE id = ?1"),
            &id,
            row_to_review,
            "review",
        )
    }

    /// Update every column of a review except `date_created`, which is
    /// never rewritten.
    pub fn update_review(&self, review: &Review) -> Result<()> {
        review.validate()?;
        let changed = self.conn.execute(
            "UPDATE reviews
             SET content = ?2, rating = ?3, date_edited = ?4, creator_id = ?5, book_id = ?6
             WHERE id = ?1",
            rusqlite::params![
                review.id,
                review.content,
                review.rating,
                review.date_edited,
                review.creator_id,
                review.book_id
            ],
        )?;
        not_found_unless_changed(changed, "review", &review.id)
    }

    pub fn delete_review(&self, id: ReviewId) -> Result<bool> {
        self.delete_row("reviews", &id)
    }

    pub fn list_reviews(&self) -> Result<Vec<Review>> {
        self.query_list(
            &format!("SELECT {REVIEW_COLUMNS} FROM reviews ORDER BY date_created"),
            [],
            row_to_review,
        )
    }

    pub fn reviews_for_book(&self, book_id: BookId) -> Result<Vec<Review>> {
        self.query_list(
            &format!(
                "SELECT {REVIEW_COLUMNS} FROM reviews WHERE book_id = ?1 ORDER BY date_created"
            ),
            [book_id],
            row_to_review,
        )
    }

    pub fn reviews_by_user(&self, creator_id: UserId) -> Result<Vec<Review>> {
        self.query_list(
            &format!(
                "SELECT {REVIEW_COLUMNS} FROM reviews WHERE creator_id = ?1 ORDER BY date_created"
            ),
            [creator_id],
            row_to_review,
        )
    }
}

fn row_to_user(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
    })
}

fn row_to_publisher(row: &Row<'_>) -> rusqlite::Result<Publisher> {
    Ok(Publisher {
        id: row.get(0)?,
        name: row.get(1)?,
        website: row.get(2)?,
        email: row.get(3)?,
    })
}

fn row_to_book(row: &Row<'_>) -> rusqlite::Result<Book> {
    Ok(Book {
        id: row.get(0)?,
        title: row.get(1)?,
        publication_date: row.get(2)?,
        isbn: row.get(3)?,
        publisher_id: row.get(4)?,
    })
}

fn row_to_contributor(row: &Row<'_>) -> rusqlite::Result<Contributor> {
    Ok(Contributor {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        email: row.get(3)?,
    })
}

fn row_to_book_contributor(row: &Row<'_>) -> rusqlite::Result<BookContributor> {
    Ok(BookContributor {
        id: row.get(0)?,
        book_id: row.get(1)?,
        contributor_id: row.get(2)?,
        role: row.get(3)?,
    })
}

fn row_to_review(row: &Row<'_>) -> rusqlite::Result<Review> {
    Ok(Review {
        id: row.get(0)?,
        content: row.get(1)?,
        rating: row.get(2)?,
        date_created: row.get(3)?,
        date_edited: row.get(4)?,
        creator_id: row.get(5)?,
        book_id: row.get(6)?,
    })
}
