/// A schema migration.
#[derive(Debug)]
pub struct Migration {
    pub version: u32,
    pub name: &'static str,
    pub sql: &'static str,
}

// Length limits repeat the model constants; `length()` counts characters.
const MIGRATION_001: &str = r#"
-- Review authors (identity rows owned by an external provider)
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    username TEXT NOT NULL UNIQUE CHECK (length(username) BETWEEN 1 AND 150),
    email TEXT CHECK (email IS NULL OR length(email) <= 254)
);

-- Publishers
CREATE TABLE IF NOT EXISTS publishers (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL CHECK (length(name) BETWEEN 1 AND 50),
    website TEXT NOT NULL CHECK (length(website) BETWEEN 1 AND 200),
    email TEXT NOT NULL CHECK (length(email) BETWEEN 1 AND 254)
);

-- Books (each belongs to exactly one publisher)
CREATE TABLE IF NOT EXISTS books (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL CHECK (length(title) BETWEEN 1 AND 70),
    publication_date TEXT NOT NULL,
    isbn TEXT NOT NULL CHECK (length(isbn) BETWEEN 1 AND 20),
    publisher_id TEXT NOT NULL REFERENCES publishers(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_books_publisher_id ON books(publisher_id);

-- Contributors (no uniqueness: namesakes are distinct rows)
CREATE TABLE IF NOT EXISTS contributors (
    id TEXT PRIMARY KEY,
    first_name TEXT NOT NULL CHECK (length(first_name) BETWEEN 1 AND 50),
    last_name TEXT NOT NULL CHECK (length(last_name) BETWEEN 1 AND 60),
    email TEXT NOT NULL CHECK (length(email) BETWEEN 1 AND 254)
);

-- Book-contributor junction carrying the role (duplicates allowed)
CREATE TABLE IF NOT EXISTS book_contributors (
    id TEXT PRIMARY KEY,
    book_id TEXT NOT NULL REFERENCES books(id) ON DELETE CASCADE,
    contributor_id TEXT NOT NULL REFERENCES contributors(id) ON DELETE CASCADE,
    role TEXT NOT NULL CHECK (
        length(role) <= 20 AND role IN ('AUTHOR', 'CO-AUTHOR', 'EDITOR')
    )
);

CREATE INDEX IF NOT EXISTS idx_book_contributors_book_id ON book_contributors(book_id);
CREATE INDEX IF NOT EXISTS idx_book_contributors_contributor_id ON book_contributors(contributor_id);

-- Reviews
CREATE TABLE IF NOT EXISTS reviews (
    id TEXT PRIMARY KEY,
    content TEXT NOT NULL CHECK (length(content) >= 1),
    rating INTEGER NOT NULL,
    date_created TEXT NOT NULL,
    date_edited TEXT,
    creator_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    book_id TEXT NOT NULL REFERENCES books(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_reviews_book_id ON reviews(book_id);
CREATE INDEX IF NOT EXISTS idx_reviews_creator_id ON reviews(creator_id);
"#;

pub const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: MIGRATION_001,
}];
