//! Inventory item database operations.
//!
//! CRUD plus the guard rails the rest of the system relies on: items are
//! created fully available, shrinking or growing `total_quantity` moves
//! `available_quantity` by the same delta inside the invariant bounds, and
//! an item referenced by an active rental or an event allocation cannot be
//! deleted.

use super::db::{parse_text, Db};
use crate::libs::item::{AvailabilityStatus, Condition, InventoryItem, ItemFilter, LoadingPriority, RentalStatus};
use crate::libs::messages::Message;
use crate::msg_error_anyhow;
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension, Row};

const ITEM_COLUMNS: &str = "id, name, description, total_quantity, available_quantity, category_id, \
    condition, condition_description, rental_status, rental_price_per_day, rental_description, \
    weight, height, width, length, loading_priority, created_at";

const INSERT_ITEM: &str = "INSERT INTO items (name, description, total_quantity, available_quantity, \
    category_id, condition, condition_description, rental_status, rental_price_per_day, \
    rental_description, weight, height, width, length, loading_priority) \
    VALUES (?1, ?2, ?3, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)";

// Column references on the right-hand side read the pre-update row, so the
// availability adjustment below sees the old total.
const UPDATE_ITEM: &str = "UPDATE items SET \
    name = ?2, description = ?3, category_id = ?4, condition = ?5, condition_description = ?6, \
    rental_status = ?7, rental_price_per_day = ?8, rental_description = ?9, \
    weight = ?10, height = ?11, width = ?12, length = ?13, loading_priority = ?14, \
    available_quantity = MAX(0, MIN(?15, available_quantity + (?15 - total_quantity))), \
    total_quantity = ?15 \
    WHERE id = ?1";

const DELETE_ITEM: &str = "DELETE FROM items WHERE id = ?1";

const COUNT_ACTIVE_RENTAL_REFS: &str = "
    SELECT COUNT(*) FROM rental_items ri
    JOIN rentals r ON r.id = ri.rental_id
    WHERE ri.item_id = ?1 AND r.state != 'returned' AND ri.quantity_returned < ri.quantity_rented
";
const COUNT_EVENT_REFS: &str = "SELECT COUNT(*) FROM event_items WHERE item_id = ?1";

pub struct Items {
    pub(crate) conn: Connection,
}

impl Items {
    pub fn new() -> Result<Self> {
        let db = Db::new()?;
        Ok(Items { conn: db.conn })
    }

    pub fn create(&mut self, item: &InventoryItem) -> Result<i64> {
        self.conn.execute(
            INSERT_ITEM,
            params![
                item.name,
                item.description,
                item.total_quantity,
                item.category_id,
                item.condition.as_str(),
                item.condition_description,
                item.rental_status.as_str(),
                item.rental_price_per_day.to_string(),
                item.rental_description,
                item.weight,
                item.height,
                item.width,
                item.length,
                item.loading_priority.map(|p| p.as_str()),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Updates an item's descriptive fields and total quantity.
    ///
    /// `available_quantity` is never written directly here; it shifts by the
    /// same delta as `total_quantity`, clamped to `0..=total_quantity`. The
    /// free counter itself is owned by the availability ledger.
    pub fn update(&mut self, item: &InventoryItem) -> Result<()> {
        let id = item.id.ok_or_else(|| msg_error_anyhow!(Message::ItemNotFound(item.name.clone())))?;
        let updated = self.conn.execute(
            UPDATE_ITEM,
            params![
                id,
                item.name,
                item.description,
                item.category_id,
                item.condition.as_str(),
                item.condition_description,
                item.rental_status.as_str(),
                item.rental_price_per_day.to_string(),
                item.rental_description,
                item.weight,
                item.height,
                item.width,
                item.length,
                item.loading_priority.map(|p| p.as_str()),
                item.total_quantity,
            ],
        )?;
        if updated == 0 {
            return Err(msg_error_anyhow!(Message::ItemNotFound(item.name.clone())));
        }
        Ok(())
    }

    pub fn get_by_id(&mut self, id: i64) -> Result<Option<InventoryItem>> {
        let sql = format!("SELECT {} FROM items WHERE id = ?1", ITEM_COLUMNS);
        let item = self.conn.query_row(&sql, params![id], map_item).optional()?;
        Ok(item)
    }

    pub fn get_by_name(&mut self, name: &str) -> Result<Option<InventoryItem>> {
        let sql = format!("SELECT {} FROM items WHERE name = ?1", ITEM_COLUMNS);
        let item = self.conn.query_row(&sql, params![name], map_item).optional()?;
        Ok(item)
    }

    pub fn fetch(&mut self, filter: &ItemFilter) -> Result<Vec<InventoryItem>> {
        let mut sql = format!("SELECT {} FROM items", ITEM_COLUMNS);
        let mut clauses: Vec<String> = Vec::new();
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(category_id) = filter.category_id {
            params_vec.push(Box::new(category_id));
            clauses.push(format!("category_id = ?{}", params_vec.len()));
        }
        match filter.availability {
            Some(AvailabilityStatus::Available) => clauses.push("available_quantity > 0".to_string()),
            Some(AvailabilityStatus::Unavailable) => clauses.push("available_quantity = 0".to_string()),
            None => {}
        }
        if let Some(name) = &filter.name {
            params_vec.push(Box::new(format!("%{}%", name.to_lowercase())));
            clauses.push(format!("LOWER(name) LIKE ?{}", params_vec.len()));
        }

        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY name");

        let mut stmt = self.conn.prepare(&sql)?;
        let items = stmt
            .query_map(rusqlite::params_from_iter(params_vec.iter().map(|p| p.as_ref())), map_item)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(items)
    }

    /// Deletes an item unless events or active rentals still reference it.
    pub fn delete(&mut self, id: i64) -> Result<()> {
        let item = self
            .get_by_id(id)?
            .ok_or_else(|| msg_error_anyhow!(Message::ItemNotFound(id.to_string())))?;

        let rental_refs: i64 = self.conn.query_row(COUNT_ACTIVE_RENTAL_REFS, params![id], |row| row.get(0))?;
        if rental_refs > 0 {
            return Err(msg_error_anyhow!(Message::ItemInActiveRental(item.name)));
        }

        let event_refs: i64 = self.conn.query_row(COUNT_EVENT_REFS, params![id], |row| row.get(0))?;
        if event_refs > 0 {
            return Err(msg_error_anyhow!(Message::ItemAllocatedToEvent(item.name)));
        }

        self.conn.execute(DELETE_ITEM, params![id])?;
        Ok(())
    }
}

fn map_item(row: &Row) -> rusqlite::Result<InventoryItem> {
    Ok(InventoryItem {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        total_quantity: row.get(3)?,
        available_quantity: row.get(4)?,
        category_id: row.get(5)?,
        condition: parse_text::<Condition>(6, row.get(6)?)?,
        condition_description: row.get(7)?,
        rental_status: parse_text::<RentalStatus>(8, row.get(8)?)?,
        rental_price_per_day: parse_text(9, row.get(9)?)?,
        rental_description: row.get(10)?,
        weight: row.get(11)?,
        height: row.get(12)?,
        width: row.get(13)?,
        length: row.get(14)?,
        loading_priority: row
            .get::<_, Option<String>>(15)?
            .map(|raw| parse_text::<LoadingPriority>(15, raw))
            .transpose()?,
        created_at: row.get(16)?,
    })
}
