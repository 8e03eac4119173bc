use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::model::contributor::Contributor;
use crate::model::ids::{BookContributorId, BookId, ContributorId};
use crate::validate;

/// The role a contributor plays on a book.
///
/// Stored and serialized as the exact literals `AUTHOR`, `CO-AUTHOR`,
/// and `EDITOR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContributionRole {
    #[serde(rename = "AUTHOR")]
    Author,
    #[serde(rename = "CO-AUTHOR")]
    CoAuthor,
    #[serde(rename = "EDITOR")]
    Editor,
}

impl ContributionRole {
    pub const ALL: [Self; 3] = [Self::Author, Self::CoAuthor, Self::Editor];

    /// The stored value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Author => "AUTHOR",
            Self::CoAuthor => "CO-AUTHOR",
            Self::Editor => "EDITOR",
        }
    }

    /// The human-readable name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Author => "Author",
            Self::CoAuthor => "Co-author",
            Self::Editor => "Editor",
        }
    }
}

impl fmt::Display for ContributionRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContributionRole {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidChoice {
                field: "role",
                value: s.to_string(),
            })
    }
}

impl ToSql for ContributionRole {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for ContributionRole {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

/// One contributor's role on one book.
///
/// Nothing prevents the same contributor holding several roles (or the
/// same role twice) on a single book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookContributor {
    pub id: BookContributorId,
    pub book_id: BookId,
    pub contributor_id: ContributorId,

    /// The role of the contributor in the book.
    pub role: ContributionRole,
}

impl BookContributor {
    pub const ROLE_MAX_LEN: usize = 20;

    #[must_use]
    pub fn new(book_id: BookId, contributor_id: ContributorId, role: ContributionRole) -> Self {
        Self {
            id: BookContributorId::new(),
            book_id,
            contributor_id,
            role,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate::max_length("role", self.role.as_str(), Self::ROLE_MAX_LEN)
    }
}

impl fmt::Display for BookContributor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BookContributor object ({})", self.id)
    }
}

/// A contributor as credited on a particular book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookCredit {
    pub contributor: Contributor,
    pub role: ContributionRole,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_literals() {
        assert_eq!(ContributionRole::Author.as_str(), "AUTHOR");
        assert_eq!(ContributionRole::CoAuthor.as_str(), "CO-AUTHOR");
        assert_eq!(ContributionRole::Editor.as_str(), "EDITOR");
        assert_eq!(ContributionRole::CoAuthor.label(), "Co-author");
    }

    #[test]
    fn test_role_parse() {
        assert_eq!("CO-AUTHOR".parse::<ContributionRole>(), Ok(ContributionRole::CoAuthor));
        assert_eq!(
            "CO_AUTHOR".parse::<ContributionRole>(),
            Err(ValidationError::InvalidChoice {
                field: "role",
                value: "CO_AUTHOR".to_string()
            })
        );
        assert!("author".parse::<ContributionRole>().is_err());
        assert!("TRANSLATOR".parse::<ContributionRole>().is_err());
    }

    #[test]
    fn test_role_serde_uses_stored_literal() {
        let json = serde_json::to_string(&ContributionRole::CoAuthor).unwrap();
        assert_eq!(json, "\"CO-AUTHOR\"");
        let role: ContributionRole = serde_json::from_str("\"EDITOR\"").unwrap();
        assert_eq!(role, ContributionRole::Editor);
        assert!(serde_json::from_str::<ContributionRole>("\"Editor\"").is_err());
    }

    #[test]
    fn test_every_role_fits_column() {
        for role in ContributionRole::ALL {
            let link = BookContributor::new(BookId::new(), ContributorId::new(), role);
            assert!(link.validate().is_ok());
        }
    }

    #[test]
    fn test_book_contributor_label() {
        let link = BookContributor::new(BookId::new(), ContributorId::new(), ContributionRole::Author);
        assert_eq!(link.to_string(), format!("BookContributor object ({})", link.id));
    }
}
