//! Core database connection management.
//!
//! Opens the SQLite database in the platform data directory and applies all
//! pending migrations before handing the connection out. Foreign keys are
//! switched on for every connection so link rows cannot outlive their
//! parents.

use crate::libs::data_storage::DataStorage;
use anyhow::Result;
use rusqlite::Connection;
use std::str::FromStr;

pub const DB_FILE_NAME: &str = "depo.db";

pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Opens the database and brings the schema up to date.
    pub fn new() -> Result<Db> {
        let mut conn = Self::open()?;
        super::migrations::init_with_migrations(&mut conn)?;

        Ok(Db { conn })
    }

    /// Opens a raw connection without running migrations.
    ///
    /// Used by the migrations command to inspect schema state.
    pub fn new_without_migrations() -> Result<Connection> {
        Self::open()
    }

    fn open() -> Result<Connection> {
        let db_file_path = DataStorage::new().get_path(DB_FILE_NAME).map_err(|e| anyhow::anyhow!(e.to_string()))?;
        let conn = Connection::open(db_file_path)?;
        conn.pragma_update(None, "foreign_keys", true)?;

        Ok(conn)
    }
}

/// Parses a TEXT column into a typed value inside a row mapper.
///
/// Keeps enum and decimal parse failures on the rusqlite error path instead
/// of panicking in `query_map` closures.
pub(crate) fn parse_text<T>(idx: usize, raw: String) -> rusqlite::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.parse()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e)))
}
