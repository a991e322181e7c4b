//! Utility functions.

pub mod fs;
pub mod sql;
