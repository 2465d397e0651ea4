//! Event database operations, including the allocation save.
//!
//! Saving an event's inventory allocation is the diff-based ledger
//! operation: requested per-item quantities are compared against the
//! persisted links, validated as a whole, and only then applied. The whole
//! save runs in one transaction, so a failing line leaves every counter and
//! link row untouched.

use super::db::{parse_text, Db};
use crate::libs::event::{self, Event, EventItem, LoadingRow};
use crate::libs::item::LoadingPriority;
use crate::libs::ledger;
use crate::libs::messages::Message;
use crate::msg_error_anyhow;
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction};
use std::collections::HashMap;

const EVENT_COLUMNS: &str = "id, name, start_date, end_date, client_name, client_contact, location, description, color, created_at";

const INSERT_EVENT: &str = "INSERT INTO events (name, start_date, end_date, client_name, client_contact, location, description, color) \
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";
const UPDATE_EVENT: &str = "UPDATE events SET name = ?2, start_date = ?3, end_date = ?4, client_name = ?5, \
    client_contact = ?6, location = ?7, description = ?8, color = ?9 WHERE id = ?1";
const DELETE_EVENT: &str = "DELETE FROM events WHERE id = ?1";

const SELECT_EVENT_ITEMS: &str = "
    SELECT ei.event_id, ei.item_id, i.name, ei.quantity
    FROM event_items ei
    JOIN items i ON i.id = ei.item_id
    WHERE ei.event_id = ?1
    ORDER BY i.name
";
const SELECT_ALLOCATIONS: &str = "SELECT item_id, quantity FROM event_items WHERE event_id = ?1";
const SELECT_LOADING_ROWS: &str = "
    SELECT ei.item_id, i.name, ei.quantity, i.weight, i.height, i.width, i.length, i.loading_priority
    FROM event_items ei
    JOIN items i ON i.id = ei.item_id
    WHERE ei.event_id = ?1
";
const DELETE_ALLOCATIONS: &str = "DELETE FROM event_items WHERE event_id = ?1";
const INSERT_ALLOCATION: &str = "INSERT INTO event_items (event_id, item_id, quantity) VALUES (?1, ?2, ?3)";

pub struct Events {
    pub(crate) conn: Connection,
}

impl Events {
    pub fn new() -> Result<Self> {
        let db = Db::new()?;
        Ok(Events { conn: db.conn })
    }

    pub fn create(&mut self, event: &Event) -> Result<i64> {
        self.conn.execute(
            INSERT_EVENT,
            params![
                event.name,
                event.start_date,
                event.end_date,
                event.client_name,
                event.client_contact,
                event.location,
                event.description,
                event.color,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn update(&mut self, event: &Event) -> Result<()> {
        let id = event.id.ok_or_else(|| msg_error_anyhow!(Message::EventNotFound(0)))?;
        let updated = self.conn.execute(
            UPDATE_EVENT,
            params![
                id,
                event.name,
                event.start_date,
                event.end_date,
                event.client_name,
                event.client_contact,
                event.location,
                event.description,
                event.color,
            ],
        )?;
        if updated == 0 {
            return Err(msg_error_anyhow!(Message::EventNotFound(id)));
        }
        Ok(())
    }

    pub fn get_by_id(&mut self, id: i64) -> Result<Option<Event>> {
        let sql = format!("SELECT {} FROM events WHERE id = ?1", EVENT_COLUMNS);
        let event = self.conn.query_row(&sql, params![id], map_event).optional()?;
        Ok(event)
    }

    pub fn list(&mut self) -> Result<Vec<Event>> {
        let sql = format!("SELECT {} FROM events ORDER BY start_date", EVENT_COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;
        let events = stmt.query_map([], map_event)?.collect::<Result<Vec<_>, _>>()?;
        Ok(events)
    }

    /// Allocation lines of an event with item names joined in.
    pub fn items_for(&mut self, event_id: i64) -> Result<Vec<EventItem>> {
        let mut stmt = self.conn.prepare(SELECT_EVENT_ITEMS)?;
        let items = stmt
            .query_map(params![event_id], |row| {
                Ok(EventItem {
                    event_id: row.get(0)?,
                    item_id: row.get(1)?,
                    item_name: row.get(2)?,
                    quantity: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(items)
    }

    /// Truck loading plan for the event: allocation lines joined with the
    /// items' physical attributes, highest loading priority first.
    pub fn loading_plan(&mut self, event_id: i64) -> Result<Vec<LoadingRow>> {
        if self.get_by_id(event_id)?.is_none() {
            return Err(msg_error_anyhow!(Message::EventNotFound(event_id)));
        }

        let mut stmt = self.conn.prepare(SELECT_LOADING_ROWS)?;
        let mut rows = stmt
            .query_map(params![event_id], |row| {
                Ok(LoadingRow {
                    item_id: row.get(0)?,
                    item_name: row.get(1)?,
                    quantity: row.get(2)?,
                    weight: row.get(3)?,
                    height: row.get(4)?,
                    width: row.get(5)?,
                    length: row.get(6)?,
                    loading_priority: row
                        .get::<_, Option<String>>(7)?
                        .map(|raw| parse_text::<LoadingPriority>(7, raw))
                        .transpose()?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        event::sort_loading_rows(&mut rows);
        Ok(rows)
    }

    /// Replaces the event's allocation with the requested per-item quantities.
    ///
    /// The save is all-or-nothing: every requested delta is validated against
    /// current availability before any counter moves. Removed lines release
    /// their full quantity, changed lines move only the delta.
    pub fn set_items(&mut self, event_id: i64, requested: &[(i64, i64)]) -> Result<()> {
        if self.get_by_id(event_id)?.is_none() {
            return Err(msg_error_anyhow!(Message::EventNotFound(event_id)));
        }
        for (_, quantity) in requested {
            if *quantity < 1 {
                return Err(msg_error_anyhow!(Message::Custom(format!(
                    "Quantity must be at least 1, got {}",
                    quantity
                ))));
            }
        }

        let tx = self.conn.transaction()?;
        let original = load_allocations(&tx, event_id)?;

        // Validate every delta before touching any counter
        for (item_id, quantity) in requested {
            let previous = original.get(item_id).copied().unwrap_or(0);
            let delta = quantity - previous;
            if delta > 0 {
                let stock = ledger::stock(&tx, *item_id)?;
                if delta > stock.available {
                    return Err(msg_error_anyhow!(Message::Custom(format!(
                        "Cannot save changes. Not enough '{}' in stock. \
                         You are trying to assign {} more, but only {} are available.",
                        stock.name, delta, stock.available
                    ))));
                }
            }
        }

        // Return items that were fully removed from the event
        for (item_id, quantity) in &original {
            if !requested.iter().any(|(id, _)| id == item_id) {
                ledger::release(&tx, *item_id, *quantity)?;
            }
        }

        // Apply per-item deltas for added or changed lines
        for (item_id, quantity) in requested {
            let previous = original.get(item_id).copied().unwrap_or(0);
            let delta = quantity - previous;
            if delta > 0 {
                ledger::reserve(&tx, *item_id, delta)?;
            } else if delta < 0 {
                ledger::release(&tx, *item_id, -delta)?;
            }
        }

        // Replace the link rows with the new allocation
        tx.execute(DELETE_ALLOCATIONS, params![event_id])?;
        for (item_id, quantity) in requested {
            tx.execute(INSERT_ALLOCATION, params![event_id, item_id, quantity])?;
        }

        tx.commit()?;
        Ok(())
    }

    /// Deletes an event, returning every allocated quantity to stock.
    pub fn delete(&mut self, event_id: i64) -> Result<()> {
        if self.get_by_id(event_id)?.is_none() {
            return Err(msg_error_anyhow!(Message::EventNotFound(event_id)));
        }

        let tx = self.conn.transaction()?;
        let allocations = load_allocations(&tx, event_id)?;
        for (item_id, quantity) in &allocations {
            ledger::release(&tx, *item_id, *quantity)?;
        }
        // Link rows go with the event via ON DELETE CASCADE
        tx.execute(DELETE_EVENT, params![event_id])?;
        tx.commit()?;
        Ok(())
    }
}

fn load_allocations(tx: &Transaction, event_id: i64) -> Result<HashMap<i64, i64>> {
    let mut stmt = tx.prepare(SELECT_ALLOCATIONS)?;
    let allocations = stmt
        .query_map(params![event_id], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?)))?
        .collect::<Result<HashMap<_, _>, _>>()?;
    Ok(allocations)
}

fn map_event(row: &Row) -> rusqlite::Result<Event> {
    Ok(Event {
        id: row.get(0)?,
        name: row.get(1)?,
        start_date: row.get(2)?,
        end_date: row.get(3)?,
        client_name: row.get(4)?,
        client_contact: row.get(5)?,
        location: row.get(6)?,
        description: row.get(7)?,
        color: row.get(8)?,
        created_at: row.get(9)?,
    })
}
