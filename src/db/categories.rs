//! Item category database operations.
//!
//! Categories are a flat namespace with one seeded member, `Uncategorized`,
//! that serves as the fallback: deleting a category moves its items there,
//! and the fallback itself cannot be deleted.

use super::db::Db;
use crate::libs::messages::Message;
use crate::msg_error_anyhow;
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};

/// Id of the seeded fallback category.
pub const UNCATEGORIZED_ID: i64 = 1;

const INSERT_CATEGORY: &str = "INSERT INTO categories (name) VALUES (?1)";
const RENAME_CATEGORY: &str = "UPDATE categories SET name = ?2 WHERE id = ?1";
const DELETE_CATEGORY: &str = "DELETE FROM categories WHERE id = ?1";
const SELECT_ALL_CATEGORIES: &str = "
    SELECT c.id, c.name, COUNT(i.id)
    FROM categories c
    LEFT JOIN items i ON i.category_id = c.id
    GROUP BY c.id, c.name
    ORDER BY c.name
";
const SELECT_CATEGORY_BY_ID: &str = "SELECT id, name, 0 FROM categories WHERE id = ?1";
const SELECT_CATEGORY_BY_NAME: &str = "SELECT id, name, 0 FROM categories WHERE name = ?1";
const REASSIGN_ITEMS: &str = "UPDATE items SET category_id = ?2 WHERE category_id = ?1";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: Option<i64>,
    pub name: String,
    /// Number of items in the category; populated by listings only.
    #[serde(default)]
    pub item_count: i64,
}

pub struct Categories {
    conn: Connection,
}

impl Categories {
    pub fn new() -> Result<Self> {
        let db = Db::new()?;
        Ok(Categories { conn: db.conn })
    }

    pub fn create(&mut self, name: &str) -> Result<i64> {
        if self.get_by_name(name)?.is_some() {
            return Err(msg_error_anyhow!(Message::CategoryAlreadyExists(name.to_string())));
        }
        self.conn.execute(INSERT_CATEGORY, params![name])?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn list(&mut self) -> Result<Vec<Category>> {
        let mut stmt = self.conn.prepare(SELECT_ALL_CATEGORIES)?;
        let categories = stmt
            .query_map([], |row| {
                Ok(Category {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    item_count: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(categories)
    }

    pub fn get_by_id(&mut self, id: i64) -> Result<Option<Category>> {
        let category = self
            .conn
            .query_row(SELECT_CATEGORY_BY_ID, params![id], |row| {
                Ok(Category {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    item_count: row.get(2)?,
                })
            })
            .optional()?;
        Ok(category)
    }

    pub fn get_by_name(&mut self, name: &str) -> Result<Option<Category>> {
        let category = self
            .conn
            .query_row(SELECT_CATEGORY_BY_NAME, params![name], |row| {
                Ok(Category {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    item_count: row.get(2)?,
                })
            })
            .optional()?;
        Ok(category)
    }

    pub fn rename(&mut self, id: i64, new_name: &str) -> Result<()> {
        self.conn.execute(RENAME_CATEGORY, params![id, new_name])?;
        Ok(())
    }

    /// Deletes a category, moving its items to `Uncategorized` first.
    ///
    /// Returns the number of reassigned items.
    pub fn delete(&mut self, id: i64) -> Result<usize> {
        if id == UNCATEGORIZED_ID {
            return Err(msg_error_anyhow!(Message::CannotDeleteDefaultCategory));
        }

        let tx = self.conn.transaction()?;
        let reassigned = tx.execute(REASSIGN_ITEMS, params![id, UNCATEGORIZED_ID])?;
        tx.execute(DELETE_CATEGORY, params![id])?;
        tx.commit()?;

        Ok(reassigned)
    }
}
