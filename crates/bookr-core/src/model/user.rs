use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;
use crate::model::ids::UserId;
use crate::validate;

/// The identity a review is attributed to.
///
/// Accounts are owned by an external identity provider; only the rows
/// reviews point at are stored here. Deleting a user deletes their
/// reviews.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: Option<String>,
}

impl User {
    pub const USERNAME_MAX_LEN: usize = 150;

    #[must_use]
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            id: UserId::new(),
            username: username.into(),
            email: None,
        }
    }

    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate::text("username", &self.username, Self::USERNAME_MAX_LEN)?;
        validate::optional_email("email", self.email.as_deref())
    }

    /// Display label: the username.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.username
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
