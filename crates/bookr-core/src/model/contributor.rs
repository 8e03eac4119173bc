use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;
use crate::model::ids::ContributorId;
use crate::validate;

/// A person credited on a book (author, co-author, editor).
///
/// Contributors are not unique: two rows with the same name and email
/// are distinct contributors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    pub id: ContributorId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl Contributor {
    pub const FIRST_NAME_MAX_LEN: usize = 50;
    pub const LAST_NAME_MAX_LEN: usize = 60;

    #[must_use]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: ContributorId::new(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate::text("first_name", &self.first_name, Self::FIRST_NAME_MAX_LEN)?;
        validate::text("last_name", &self.last_name, Self::LAST_NAME_MAX_LEN)?;
        validate::email("email", &self.email)
    }

    /// Display label: the contributor's first name.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.first_name
    }

    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl fmt::Display for Contributor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
