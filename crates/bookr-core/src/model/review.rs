use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;
use crate::model::ids::{BookId, ReviewId, UserId};
use crate::validate;

/// A user's review of a book.
///
/// `date_created` is stamped when the review is constructed and is never
/// rewritten by [`Database::update_review`](crate::Database::update_review).
/// `date_edited` is left to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,

    /// The text of the review.
    pub content: String,

    /// The rating the reviewer gives to the book. No range is enforced.
    pub rating: i32,

    pub date_created: DateTime<Utc>,
    pub date_edited: Option<DateTime<Utc>>,

    /// The user that made the review.
    pub creator_id: UserId,

    /// The book that is being reviewed.
    pub book_id: BookId,
}

impl Review {
    #[must_use]
    pub fn new(content: impl Into<String>, rating: i32, creator_id: UserId, book_id: BookId) -> Self {
        Self {
            id: ReviewId::new(),
            content: content.into(),
            rating,
            date_created: Utc::now(),
            date_edited: None,
            creator_id,
            book_id,
        }
    }

    #[must_use]
    pub fn with_date_edited(mut self, at: DateTime<Utc>) -> Self {
        self.date_edited = Some(at);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate::required("content", &self.content)
    }
}

impl fmt::Display for Review {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Review object ({})", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_new() {
        let before = Utc::now();
        let review = Review::new("Great read.", 4, UserId::new(), BookId::new());
        assert!(review.date_created >= before);
        assert!(review.date_edited.is_none());
        assert!(review.validate().is_ok());
    }

    #[test]
    fn test_rating_is_unbounded() {
        for rating in [i32::MIN, -3, 0, 11, i32::MAX] {
            let review = Review::new("ok", rating, UserId::new(), BookId::new());
            assert!(review.validate().is_ok());
        }
    }

    #[test]
    fn test_review_requires_content() {
        let review = Review::new("", 3, UserId::new(), BookId::new());
        assert_eq!(review.validate(), Err(ValidationError::Blank { field: "content" }));
    }

    #[test]
    fn test_review_label() {
        let review = Review::new("fine", 3, UserId::new(), BookId::new());
        assert_eq!(review.to_string(), format!("Review object ({})", review.id));
    }
}
