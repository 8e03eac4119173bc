pub mod book;
pub mod config;
pub mod fixture;
pub mod schema;
pub mod status;

pub use book::show_book;
pub use fixture::{dump_fixture, load_fixture};
pub use schema::show_schema;
pub use status::{init_database, show_status};
