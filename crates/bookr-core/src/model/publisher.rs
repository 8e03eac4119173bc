use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;
use crate::model::ids::PublisherId;
use crate::validate;

/// The firm that publishes a book.
///
/// Deleting a publisher deletes every book it published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publisher {
    pub id: PublisherId,

    /// The name of the publisher.
    pub name: String,

    /// The publisher's website.
    pub website: String,

    /// The email of the publisher.
    pub email: String,
}

impl Publisher {
    pub const NAME_MAX_LEN: usize = 50;

    #[must_use]
    pub fn new(
        name: impl Into<String>,
        website: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: PublisherId::new(),
            name: name.into(),
            website: website.into(),
            email: email.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate::text("name", &self.name, Self::NAME_MAX_LEN)?;
        validate::url("website", &self.website)?;
        validate::email("email", &self.email)
    }

    /// Display label: the publisher's name.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Publisher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
