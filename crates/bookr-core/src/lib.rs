//! Core data model for bookr.
//!
//! This crate defines the book-review records (Publisher, Book,
//! Contributor, BookContributor, Review, and the User identity they
//! reference), their field validation, the SQLite schema, and fixture
//! loading.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod error;
pub mod fixture;
pub mod model;
pub mod schema;
pub mod validate;

pub use error::{Error, Result, ValidationError};
pub use fixture::Fixture;
pub use schema::Database;
