//! SQLite schema, field declarations, and the [`Database`] handle.

pub mod db;
pub mod fields;
pub mod migrations;

pub use db::{Database, TableCounts};
pub use fields::{EntitySpec, FieldKind, FieldSpec, ENTITIES};
