use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
}

/// A field-level rule violation, raised before any SQL runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: this field cannot be blank")]
    Blank { field: &'static str },

    #[error("{field}: ensure this value has at most {max} characters (it has {actual})")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    #[error("{field}: enter a valid email address")]
    InvalidEmail { field: &'static str },

    #[error("{field}: enter a valid URL")]
    InvalidUrl { field: &'static str },

    #[error("{field}: {value:?} is not one of the available choices")]
    InvalidChoice { field: &'static str, value: String },
}

impl ValidationError {
    /// The name of the offending field.
    pub const fn field(&self) -> &'static str {
        match self {
            Self::Blank { field }
            | Self::TooLong { field, .. }
            | Self::InvalidEmail { field }
            | Self::InvalidUrl { field }
            | Self::InvalidChoice { field, .. } => *field,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
