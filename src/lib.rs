//! coursedb Library
//!
//! Schema definition, atomic statement batches and tabular load/unload on an
//! embedded SQLite database, built around a small course enrollment catalog.

pub mod cli;
pub mod core;
pub mod error;
pub mod models;
pub mod preflight;
pub mod utils;

pub use error::{Error, Result};
