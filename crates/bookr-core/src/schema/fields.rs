//! Static declaration of every entity's fields.
//!
//! This is the introspectable view of the schema: the same limits the
//! records enforce in `validate()` and the SQL enforces in `CHECK`
//! constraints, plus the help text for each field.

use std::fmt;

use crate::model::{Book, BookContributor, ContributionRole, Contributor, Publisher, User};
use crate::validate::{EMAIL_MAX_LEN, URL_MAX_LEN};

/// The storage kind of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Surrogate key.
    PrimaryKey,
    ShortText,
    LongText,
    Integer,
    Date,
    Timestamp,
    Email,
    Url,
    /// Many-to-one reference; deleting the target deletes this row.
    ForeignKey { table: &'static str },
    /// One of a fixed set of stored literals.
    Choice(&'static [&'static str]),
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PrimaryKey => f.write_str("uuid (primary key)"),
            Self::ShortText => f.write_str("text"),
            Self::LongText => f.write_str("long text"),
            Self::Integer => f.write_str("integer"),
            Self::Date => f.write_str("date"),
            Self::Timestamp => f.write_str("timestamp"),
            Self::Email => f.write_str("email"),
            Self::Url => f.write_str("url"),
            Self::ForeignKey { table } => write!(f, "-> {table} (on delete cascade)"),
            Self::Choice(values) => write!(f, "choice({})", values.join("|")),
        }
    }
}

/// One column of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub max_length: Option<usize>,
    pub nullable: bool,
    pub help_text: &'static str,
}

impl FieldSpec {
    const fn new(name: &'static str, kind: FieldKind, help_text: &'static str) -> Self {
        Self {
            name,
            kind,
            max_length: None,
            nullable: false,
            help_text,
        }
    }

    const fn max(self, max_length: usize) -> Self {
        Self {
            max_length: Some(max_length),
            ..self
        }
    }

    const fn nullable(self) -> Self {
        Self {
            nullable: true,
            ..self
        }
    }
}

/// One entity and its table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntitySpec {
    pub name: &'static str,
    pub table: &'static str,
    pub fields: &'static [FieldSpec],
}

impl EntitySpec {
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

pub const ROLE_CHOICES: &[&str] = &[
    ContributionRole::Author.as_str(),
    ContributionRole::CoAuthor.as_str(),
    ContributionRole::Editor.as_str(),
];

const ID: FieldSpec = FieldSpec::new("id", FieldKind::PrimaryKey, "Surrogate key");

pub const USER: EntitySpec = EntitySpec {
    name: "User",
    table: "users",
    fields: &[
        ID,
        FieldSpec::new("username", FieldKind::ShortText, "Login name at the identity provider")
            .max(User::USERNAME_MAX_LEN),
        FieldSpec::new("email", FieldKind::Email, "Contact address of the user")
            .max(EMAIL_MAX_LEN)
            .nullable(),
    ],
};

pub const PUBLISHER: EntitySpec = EntitySpec {
    name: "Publisher",
    table: "publishers",
    fields: &[
        ID,
        FieldSpec::new("name", FieldKind::ShortText, "The name of the publisher")
            .max(Publisher::NAME_MAX_LEN),
        FieldSpec::new("website", FieldKind::Url, "The publisher's website").max(URL_MAX_LEN),
        FieldSpec::new("email", FieldKind::Email, "The email of the publisher").max(EMAIL_MAX_LEN),
    ],
};

pub const BOOK: EntitySpec = EntitySpec {
    name: "Book",
    table: "books",
    fields: &[
        ID,
        FieldSpec::new("title", FieldKind::ShortText, "The title of the book")
            .max(Book::TITLE_MAX_LEN),
        FieldSpec::new("publication_date", FieldKind::Date, "Date of the book"),
        FieldSpec::new("isbn", FieldKind::ShortText, "ISBN number of the book")
            .max(Book::ISBN_MAX_LEN),
        FieldSpec::new(
            "publisher_id",
            FieldKind::ForeignKey { table: "publishers" },
            "The firm that publishes the book",
        ),
    ],
};

pub const CONTRIBUTOR: EntitySpec = EntitySpec {
    name: "Contributor",
    table: "contributors",
    fields: &[
        ID,
        FieldSpec::new("first_name", FieldKind::ShortText, "Contributor's first name")
            .max(Contributor::FIRST_NAME_MAX_LEN),
        FieldSpec::new("last_name", FieldKind::ShortText, "Contributor's last name")
            .max(Contributor::LAST_NAME_MAX_LEN),
        FieldSpec::new("email", FieldKind::Email, "Email of the contributor").max(EMAIL_MAX_LEN),
    ],
};

pub const BOOK_CONTRIBUTOR: EntitySpec = EntitySpec {
    name: "BookContributor",
    table: "book_contributors",
    fields: &[
        ID,
        FieldSpec::new(
            "book_id",
            FieldKind::ForeignKey { table: "books" },
            "The book being credited",
        ),
        FieldSpec::new(
            "contributor_id",
            FieldKind::ForeignKey {
                table: "contributors",
            },
            "The credited contributor",
        ),
        FieldSpec::new(
            "role",
            FieldKind::Choice(ROLE_CHOICES),
            "The role of the contributor in the book",
        )
        .max(BookContributor::ROLE_MAX_LEN),
    ],
};

pub const REVIEW: EntitySpec = EntitySpec {
    name: "Review",
    table: "reviews",
    fields: &[
        ID,
        FieldSpec::new("content", FieldKind::LongText, "The text of the review"),
        FieldSpec::new(
            "rating",
            FieldKind::Integer,
            "The rating the reviewer gives to the book",
        ),
        FieldSpec::new(
            "date_created",
            FieldKind::Timestamp,
            "The date and time the review was created",
        ),
        FieldSpec::new(
            "date_edited",
            FieldKind::Timestamp,
            "The date and time the review was edited",
        )
        .nullable(),
        FieldSpec::new(
            "creator_id",
            FieldKind::ForeignKey { table: "users" },
            "The user that made the review",
        ),
        FieldSpec::new(
            "book_id",
            FieldKind::ForeignKey { table: "books" },
            "The book that is being reviewed",
        ),
    ],
};

/// Every entity, parents before children.
pub const ENTITIES: &[EntitySpec] = &[USER, PUBLISHER, BOOK, CONTRIBUTOR, BOOK_CONTRIBUTOR, REVIEW];

/// Look an entity up by table name.
pub fn entity(table: &str) -> Option<&'static EntitySpec> {
    ENTITIES.iter().find(|e| e.table == table)
}
