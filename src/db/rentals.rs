//! Rental order database operations.
//!
//! Implements the rental side of the availability ledger: draft lines
//! soft-reserve stock the moment they are added, dispatch freezes the order,
//! returns release stock line by line, and deletion compensates for whatever
//! is still outstanding. Every state guard and counter move runs in one
//! transaction.

use super::db::{parse_text, Db};
use crate::libs::ledger;
use crate::libs::messages::Message;
use crate::libs::rental::{PaymentStatus, Rental, RentalLine, RentalState, ReturnLine};
use crate::msg_error_anyhow;
use anyhow::Result;
use chrono::Local;
use rusqlite::{params, Connection, OptionalExtension, Row};

const RENTAL_COLUMNS: &str = "id, client_name, contact_info, rental_date, expected_return_date, \
    actual_return_date, state, payment_status, discount_percentage, notes, created_at";

const INSERT_RENTAL: &str = "INSERT INTO rentals (client_name, contact_info, rental_date, \
    expected_return_date, state, payment_status, discount_percentage, notes) \
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";
const UPDATE_RENTAL_INFO: &str = "UPDATE rentals SET client_name = ?2, contact_info = ?3, \
    rental_date = ?4, expected_return_date = ?5, discount_percentage = ?6, notes = ?7 WHERE id = ?1";
const UPDATE_RENTAL_STATE: &str = "UPDATE rentals SET state = ?2 WHERE id = ?1";
const CLOSE_RENTAL: &str = "UPDATE rentals SET state = 'returned', actual_return_date = ?2 WHERE id = ?1";
const UPDATE_PAYMENT: &str = "UPDATE rentals SET payment_status = ?2 WHERE id = ?1";
const DELETE_RENTAL: &str = "DELETE FROM rentals WHERE id = ?1";

const SELECT_LINES: &str = "
    SELECT ri.id, ri.rental_id, ri.item_id, i.name, ri.quantity_rented, ri.quantity_returned, ri.price_per_day
    FROM rental_items ri
    JOIN items i ON i.id = ri.item_id
    WHERE ri.rental_id = ?1
    ORDER BY i.name
";
const INSERT_LINE: &str = "INSERT INTO rental_items (rental_id, item_id, quantity_rented, price_per_day) \
    VALUES (?1, ?2, ?3, ?4)";
const BUMP_LINE: &str = "UPDATE rental_items SET quantity_rented = quantity_rented + ?3 \
    WHERE rental_id = ?1 AND item_id = ?2";
const SET_LINE_QUANTITY: &str = "UPDATE rental_items SET quantity_rented = ?3 WHERE rental_id = ?1 AND item_id = ?2";
const SET_LINE_RETURNED: &str = "UPDATE rental_items SET quantity_returned = ?3 WHERE rental_id = ?1 AND item_id = ?2";
const DELETE_LINE: &str = "DELETE FROM rental_items WHERE rental_id = ?1 AND item_id = ?2";

const MARK_ITEMS_RENTED: &str = "UPDATE items SET rental_status = 'rented' \
    WHERE id IN (SELECT item_id FROM rental_items WHERE rental_id = ?1)";
// Items revert to not-in-rental-use only when no other rental still has them out.
const RESET_ITEM_RENTAL_STATUS: &str = "
    UPDATE items SET rental_status = 'not_in_rental_use'
    WHERE id IN (SELECT item_id FROM rental_items WHERE rental_id = ?1)
      AND NOT EXISTS (
        SELECT 1 FROM rental_items ri
        JOIN rentals r ON r.id = ri.rental_id
        WHERE ri.item_id = items.id AND ri.rental_id != ?1
          AND r.state = 'rented' AND ri.quantity_returned < ri.quantity_rented
      )
";
const MARK_ITEM_DAMAGED: &str = "UPDATE items SET condition = 'damaged', rental_status = 'not_in_rental_use', \
    condition_description = COALESCE(?2, condition_description) WHERE id = ?1";
const SELECT_ITEM_PRICE: &str = "SELECT rental_price_per_day FROM items WHERE id = ?1";

pub struct Rentals {
    pub(crate) conn: Connection,
}

impl Rentals {
    pub fn new() -> Result<Self> {
        let db = Db::new()?;
        Ok(Rentals { conn: db.conn })
    }

    pub fn create_draft(&mut self, rental: &Rental) -> Result<i64> {
        self.conn.execute(
            INSERT_RENTAL,
            params![
                rental.client_name.trim(),
                rental.contact_info.trim(),
                rental.rental_date,
                rental.expected_return_date,
                RentalState::Draft.as_str(),
                rental.payment_status.as_str(),
                rental.discount_percentage.to_string(),
                rental.notes,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Updates client info, dates and discount of a draft.
    pub fn update_draft(&mut self, rental: &Rental) -> Result<()> {
        let id = rental.id.ok_or_else(|| msg_error_anyhow!(Message::RentalNotFound(0)))?;

        let tx = self.conn.transaction()?;
        require_draft(&tx, id)?;
        tx.execute(
            UPDATE_RENTAL_INFO,
            params![
                id,
                rental.client_name.trim(),
                rental.contact_info.trim(),
                rental.rental_date,
                rental.expected_return_date,
                rental.discount_percentage.to_string(),
                rental.notes,
            ],
        )?;
        tx.commit()?;
        Ok(())
    }

    pub fn get_by_id(&mut self, id: i64) -> Result<Option<Rental>> {
        Ok(find_rental(&self.conn, id)?)
    }

    /// Lists rentals, optionally filtered by a client name substring.
    pub fn list(&mut self, search: Option<&str>) -> Result<Vec<Rental>> {
        let mut sql = format!("SELECT {} FROM rentals", RENTAL_COLUMNS);
        let rentals = match search {
            Some(needle) => {
                sql.push_str(" WHERE LOWER(client_name) LIKE ?1 ORDER BY expected_return_date DESC");
                let mut stmt = self.conn.prepare(&sql)?;
                let rows = stmt
                    .query_map(params![format!("%{}%", needle.to_lowercase())], map_rental)?
                    .collect::<Result<Vec<_>, _>>()?;
                rows
            }
            None => {
                sql.push_str(" ORDER BY expected_return_date DESC");
                let mut stmt = self.conn.prepare(&sql)?;
                let rows = stmt.query_map([], map_rental)?.collect::<Result<Vec<_>, _>>()?;
                rows
            }
        };
        Ok(rentals)
    }

    pub fn lines(&mut self, rental_id: i64) -> Result<Vec<RentalLine>> {
        Ok(load_lines(&self.conn, rental_id)?)
    }

    /// Adds units of an item to a draft rental.
    ///
    /// Reserves the units immediately and snapshots the item's current price
    /// per day when the line is first created; adding more units later never
    /// touches the snapshot.
    pub fn add_line(&mut self, rental_id: i64, item_id: i64, quantity: i64) -> Result<()> {
        if quantity < 1 {
            return Err(msg_error_anyhow!(Message::Custom(format!(
                "Quantity must be at least 1, got {}",
                quantity
            ))));
        }

        let tx = self.conn.transaction()?;
        require_draft(&tx, rental_id)?;
        ledger::reserve(&tx, item_id, quantity)?;

        let existing: Option<i64> = tx
            .query_row(
                "SELECT quantity_rented FROM rental_items WHERE rental_id = ?1 AND item_id = ?2",
                params![rental_id, item_id],
                |row| row.get(0),
            )
            .optional()?;

        match existing {
            Some(_) => {
                tx.execute(BUMP_LINE, params![rental_id, item_id, quantity])?;
            }
            None => {
                let price: String = tx.query_row(SELECT_ITEM_PRICE, params![item_id], |row| row.get(0))?;
                tx.execute(INSERT_LINE, params![rental_id, item_id, quantity, price])?;
            }
        }

        tx.commit()?;
        Ok(())
    }

    /// Sets the rented quantity of a draft line, moving only the delta.
    pub fn set_line_quantity(&mut self, rental_id: i64, item_id: i64, quantity: i64) -> Result<()> {
        if quantity < 1 {
            return Err(msg_error_anyhow!(Message::Custom(format!(
                "Quantity must be at least 1, got {}",
                quantity
            ))));
        }

        let tx = self.conn.transaction()?;
        require_draft(&tx, rental_id)?;
        let line = find_line(&tx, rental_id, item_id)?
            .ok_or_else(|| msg_error_anyhow!(Message::RentalLineNotFound(item_id.to_string())))?;

        let delta = quantity - line.quantity_rented;
        if delta > 0 {
            ledger::reserve(&tx, item_id, delta)?;
        } else if delta < 0 {
            ledger::release(&tx, item_id, -delta)?;
        }
        tx.execute(SET_LINE_QUANTITY, params![rental_id, item_id, quantity])?;

        tx.commit()?;
        Ok(())
    }

    /// Removes a draft line, releasing its full reserved quantity.
    pub fn remove_line(&mut self, rental_id: i64, item_id: i64) -> Result<()> {
        let tx = self.conn.transaction()?;
        require_draft(&tx, rental_id)?;
        let line = find_line(&tx, rental_id, item_id)?
            .ok_or_else(|| msg_error_anyhow!(Message::RentalLineNotFound(item_id.to_string())))?;

        ledger::release(&tx, item_id, line.quantity_rented)?;
        tx.execute(DELETE_LINE, params![rental_id, item_id])?;

        tx.commit()?;
        Ok(())
    }

    /// Confirms dispatch: the single explicit Draft -> Rented transition.
    ///
    /// Stock was already reserved line by line, so dispatch only flips the
    /// order state and marks the items as out on rental.
    pub fn dispatch(&mut self, rental_id: i64) -> Result<()> {
        let tx = self.conn.transaction()?;
        require_draft(&tx, rental_id)?;
        if load_lines(&tx, rental_id)?.is_empty() {
            return Err(msg_error_anyhow!(Message::RentalHasNoLines(rental_id)));
        }

        tx.execute(UPDATE_RENTAL_STATE, params![rental_id, RentalState::Rented.as_str()])?;
        tx.execute(MARK_ITEMS_RENTED, params![rental_id])?;
        tx.commit()?;
        Ok(())
    }

    /// Records a return for one or more lines of a dispatched rental.
    ///
    /// Each return line carries the new cumulative returned quantity.
    /// Decreases and over-returns are rejected. The released delta goes back
    /// to availability unless the line is flagged damaged, in which case the
    /// units are written off and the item is marked damaged instead. Closes
    /// the rental once every line is fully returned; returns `true` then.
    pub fn process_return(&mut self, rental_id: i64, returns: &[ReturnLine]) -> Result<bool> {
        let tx = self.conn.transaction()?;
        let rental = require_rental(&tx, rental_id)?;
        match rental.state {
            RentalState::Draft => return Err(msg_error_anyhow!(Message::RentalNotDispatched(rental_id))),
            RentalState::Returned => return Err(msg_error_anyhow!(Message::RentalAlreadyReturned(rental_id))),
            RentalState::Rented => {}
        }

        for ret in returns {
            let line = find_line(&tx, rental_id, ret.item_id)?
                .ok_or_else(|| msg_error_anyhow!(Message::RentalLineNotFound(ret.item_id.to_string())))?;

            if ret.returned > line.quantity_rented {
                return Err(msg_error_anyhow!(Message::ReturnExceedsRented(
                    line.item_name,
                    ret.returned,
                    line.quantity_rented
                )));
            }
            if ret.returned < line.quantity_returned {
                return Err(msg_error_anyhow!(Message::ReturnBelowRecorded(
                    line.item_name,
                    ret.returned,
                    line.quantity_returned
                )));
            }

            let delta = ret.returned - line.quantity_returned;
            tx.execute(SET_LINE_RETURNED, params![rental_id, ret.item_id, ret.returned])?;

            if ret.damaged {
                // Damaged units are written off, not returned to the pool.
                // Blank notes keep whatever condition description is there.
                let notes = ret.notes.as_deref().map(str::trim).filter(|n| !n.is_empty());
                tx.execute(MARK_ITEM_DAMAGED, params![ret.item_id, notes])?;
            } else {
                ledger::release(&tx, ret.item_id, delta)?;
            }
        }

        let all_returned = load_lines(&tx, rental_id)?.iter().all(|line| line.is_fully_returned());
        if all_returned {
            tx.execute(CLOSE_RENTAL, params![rental_id, Local::now().naive_local()])?;
            tx.execute(RESET_ITEM_RENTAL_STATUS, params![rental_id])?;
        }

        tx.commit()?;
        Ok(all_returned)
    }

    /// Sets the payment status of a dispatched or returned rental.
    pub fn set_payment(&mut self, rental_id: i64, status: PaymentStatus) -> Result<()> {
        let tx = self.conn.transaction()?;
        let rental = require_rental(&tx, rental_id)?;
        if rental.state == RentalState::Draft {
            return Err(msg_error_anyhow!(Message::RentalNotDraft(rental_id)));
        }
        tx.execute(UPDATE_PAYMENT, params![rental_id, status.as_str()])?;
        tx.commit()?;
        Ok(())
    }

    /// Deletes a rental, restoring exactly the outstanding units per line.
    pub fn delete(&mut self, rental_id: i64) -> Result<()> {
        let tx = self.conn.transaction()?;
        require_rental(&tx, rental_id)?;

        for line in load_lines(&tx, rental_id)? {
            ledger::release(&tx, line.item_id, line.outstanding())?;
        }
        tx.execute(RESET_ITEM_RENTAL_STATUS, params![rental_id])?;
        // Line rows go with the rental via ON DELETE CASCADE
        tx.execute(DELETE_RENTAL, params![rental_id])?;
        tx.commit()?;
        Ok(())
    }
}

fn find_rental(conn: &Connection, id: i64) -> rusqlite::Result<Option<Rental>> {
    let sql = format!("SELECT {} FROM rentals WHERE id = ?1", RENTAL_COLUMNS);
    conn.query_row(&sql, params![id], map_rental).optional()
}

fn require_rental(conn: &Connection, rental_id: i64) -> Result<Rental> {
    find_rental(conn, rental_id)?.ok_or_else(|| msg_error_anyhow!(Message::RentalNotFound(rental_id)))
}

fn require_draft(conn: &Connection, rental_id: i64) -> Result<Rental> {
    let rental = require_rental(conn, rental_id)?;
    if rental.state != RentalState::Draft {
        return Err(msg_error_anyhow!(Message::RentalNotDraft(rental_id)));
    }
    Ok(rental)
}

fn load_lines(conn: &Connection, rental_id: i64) -> rusqlite::Result<Vec<RentalLine>> {
    let mut stmt = conn.prepare(SELECT_LINES)?;
    let lines = stmt
        .query_map(params![rental_id], map_line)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(lines)
}

fn find_line(conn: &Connection, rental_id: i64, item_id: i64) -> rusqlite::Result<Option<RentalLine>> {
    let mut stmt = conn.prepare(
        "SELECT ri.id, ri.rental_id, ri.item_id, i.name, ri.quantity_rented, ri.quantity_returned, ri.price_per_day
         FROM rental_items ri JOIN items i ON i.id = ri.item_id
         WHERE ri.rental_id = ?1 AND ri.item_id = ?2",
    )?;
    stmt.query_row(params![rental_id, item_id], map_line).optional()
}

fn map_line(row: &Row) -> rusqlite::Result<RentalLine> {
    Ok(RentalLine {
        id: row.get(0)?,
        rental_id: row.get(1)?,
        item_id: row.get(2)?,
        item_name: row.get(3)?,
        quantity_rented: row.get(4)?,
        quantity_returned: row.get(5)?,
        price_per_day: parse_text(6, row.get(6)?)?,
    })
}

fn map_rental(row: &Row) -> rusqlite::Result<Rental> {
    Ok(Rental {
        id: row.get(0)?,
        client_name: row.get(1)?,
        contact_info: row.get(2)?,
        rental_date: row.get(3)?,
        expected_return_date: row.get(4)?,
        actual_return_date: row.get(5)?,
        state: parse_text::<RentalState>(6, row.get(6)?)?,
        payment_status: parse_text::<PaymentStatus>(7, row.get(7)?)?,
        discount_percentage: parse_text(8, row.get(8)?)?,
        notes: row.get(9)?,
        created_at: row.get(10)?,
    })
}
