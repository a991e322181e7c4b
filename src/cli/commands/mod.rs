//! CLI command implementations.

pub mod demo;
pub mod inspect;
pub mod load;
pub mod query;
pub mod schema;
