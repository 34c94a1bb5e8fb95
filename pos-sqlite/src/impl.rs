//! Storage trait implementations for the SQLite database.
//!
//! This module contains the implementations of the reader and writer ports
//! defined in `pos-core` for the SQLite backend.

use crate::Db;
use pos_core::ports::Repository;

mod reader;
mod writer;

impl Repository for Db {
    type Error = sqlx::Error;
}
