//! Shared-inventory availability ledger.
//!
//! Every item has a single `available_quantity` counter that is moved by
//! three independent consumers: event allocation, rental checkout and rental
//! return. All of them go through the two functions in this module, and all
//! of them run inside a `rusqlite::Transaction`, so a multi-entity update
//! either lands completely or not at all and the invariant
//! `0 <= available_quantity <= total_quantity` holds at every commit point.
//!
//! The functions deliberately take a [`Transaction`] rather than a plain
//! connection: moving the counter outside a transaction is exactly the
//! lost-reservation bug this module exists to prevent.

use rusqlite::{params, OptionalExtension, Transaction};
use thiserror::Error;

const SELECT_STOCK: &str = "SELECT name, total_quantity, available_quantity FROM items WHERE id = ?1";
const RESERVE_UNITS: &str = "UPDATE items SET available_quantity = available_quantity - ?2 WHERE id = ?1";
const RELEASE_UNITS: &str = "UPDATE items SET available_quantity = MIN(total_quantity, available_quantity + ?2) WHERE id = ?1";

/// Errors produced by ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The requested reservation exceeds the free units of the item.
    #[error("Not enough '{name}' in stock. You are trying to reserve {requested} more, but only {available} are available.")]
    InsufficientStock {
        name: String,
        requested: i64,
        available: i64,
    },

    /// The item row does not exist.
    #[error("Inventory item {0} not found")]
    ItemNotFound(i64),

    #[error(transparent)]
    Db(#[from] rusqlite::Error),
}

/// Current stock counters of an item, read inside the transaction.
#[derive(Debug, Clone)]
pub struct Stock {
    pub name: String,
    pub total: i64,
    pub available: i64,
}

/// Reads the stock counters of an item within the given transaction.
pub fn stock(tx: &Transaction, item_id: i64) -> Result<Stock, LedgerError> {
    tx.query_row(SELECT_STOCK, params![item_id], |row| {
        Ok(Stock {
            name: row.get(0)?,
            total: row.get(1)?,
            available: row.get(2)?,
        })
    })
    .optional()?
    .ok_or(LedgerError::ItemNotFound(item_id))
}

/// Reserves `units` of an item, failing if not enough are free.
///
/// A zero or negative request is a no-op; callers express releases through
/// [`release`] so the two directions stay auditable.
pub fn reserve(tx: &Transaction, item_id: i64, units: i64) -> Result<(), LedgerError> {
    if units <= 0 {
        return Ok(());
    }

    let stock = stock(tx, item_id)?;
    if stock.available < units {
        return Err(LedgerError::InsufficientStock {
            name: stock.name,
            requested: units,
            available: stock.available,
        });
    }

    tx.execute(RESERVE_UNITS, params![item_id, units])?;
    Ok(())
}

/// Returns `units` of an item to the free pool.
///
/// The counter is clamped at `total_quantity`: releasing stock that was
/// written off in the meantime (a damaged unit, a shrunk total) must not
/// fail the surrounding operation or push availability above what the
/// warehouse owns.
pub fn release(tx: &Transaction, item_id: i64, units: i64) -> Result<(), LedgerError> {
    if units <= 0 {
        return Ok(());
    }

    // Existence check keeps a typo-ed id from silently releasing nothing.
    stock(tx, item_id)?;
    tx.execute(RELEASE_UNITS, params![item_id, units])?;
    Ok(())
}
