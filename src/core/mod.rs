//! Core database logic.

pub mod batch;
pub mod catalog;
pub mod database;
pub mod inspect;
pub mod schema;
pub mod seed;
pub mod tabular;

pub use batch::Batch;
pub use database::{Cursor, Database, Executor};
