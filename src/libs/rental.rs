//! Rental order domain types and lifecycle rules.
//!
//! A rental starts life as a resumable *draft*: items added to it are
//! soft-reserved against the shared stock pool, but the order can still be
//! edited. A single explicit dispatch action moves it to `Rented`, freezing
//! line quantities and price snapshots. Returns move it to `Returned` once
//! every line has come back. `Overdue` is never persisted; it is derived at
//! display time from the expected return date.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::item::ParseEnumError;

/// Persisted lifecycle state of a rental order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RentalState {
    /// Being prepared, resumable by id, items already soft-reserved.
    Draft,
    /// Items dispatched to the client.
    Rented,
    /// Every line fully returned.
    Returned,
}

impl RentalState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RentalState::Draft => "draft",
            RentalState::Rented => "rented",
            RentalState::Returned => "returned",
        }
    }
}

impl FromStr for RentalState {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(RentalState::Draft),
            "rented" => Ok(RentalState::Rented),
            "returned" => Ok(RentalState::Returned),
            other => Err(ParseEnumError(other.to_string())),
        }
    }
}

impl fmt::Display for RentalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payment state of a rental order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Unpaid,
    Paid,
    /// Payment handled via invoice.
    Invoice,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Unpaid => "unpaid",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Invoice => "invoice",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unpaid" => Ok(PaymentStatus::Unpaid),
            "paid" => Ok(PaymentStatus::Paid),
            "invoice" => Ok(PaymentStatus::Invoice),
            other => Err(ParseEnumError(other.to_string())),
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A rental order made by a client.
#[derive(Debug, Clone, Serialize)]
pub struct Rental {
    pub id: Option<i64>,
    pub client_name: String,
    /// Phone or email of the client.
    pub contact_info: String,
    pub rental_date: NaiveDate,
    pub expected_return_date: NaiveDate,
    pub actual_return_date: Option<NaiveDateTime>,
    pub state: RentalState,
    pub payment_status: PaymentStatus,
    /// Percentage discount applied to the order total.
    pub discount_percentage: Decimal,
    pub notes: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}

impl Rental {
    pub fn new(client_name: &str, rental_date: NaiveDate, expected_return_date: NaiveDate) -> Self {
        Rental {
            id: None,
            client_name: client_name.to_string(),
            contact_info: String::new(),
            rental_date,
            expected_return_date,
            actual_return_date: None,
            state: RentalState::Draft,
            payment_status: PaymentStatus::Unpaid,
            discount_percentage: Decimal::ZERO,
            notes: None,
            created_at: None,
        }
    }

    /// Overdue is derived at display time, never stored.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.state == RentalState::Rented && self.expected_return_date < today
    }

    /// Status text for listings, with the derived overdue marker applied.
    pub fn display_state(&self, today: NaiveDate) -> &'static str {
        if self.is_overdue(today) {
            "overdue"
        } else {
            self.state.as_str()
        }
    }
}

/// A single item line of a rental order.
#[derive(Debug, Clone, Serialize)]
pub struct RentalLine {
    pub id: Option<i64>,
    pub rental_id: i64,
    pub item_id: i64,
    /// Denormalized for display; sourced from a join.
    pub item_name: String,
    pub quantity_rented: i64,
    pub quantity_returned: i64,
    /// Price per day per unit captured when the line was created. Later
    /// price edits on the item must not affect this line.
    pub price_per_day: Decimal,
}

impl RentalLine {
    /// Units still out with the client.
    pub fn outstanding(&self) -> i64 {
        (self.quantity_rented - self.quantity_returned).max(0)
    }

    pub fn is_fully_returned(&self) -> bool {
        self.quantity_returned >= self.quantity_rented
    }
}

/// One line of a return operation, as collected from the command line.
#[derive(Debug, Clone)]
pub struct ReturnLine {
    pub item_id: i64,
    /// New cumulative returned quantity for the line.
    pub returned: i64,
    /// Damaged units are written off instead of returned to stock.
    pub damaged: bool,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn overdue_is_derived_for_rented_orders_only() {
        let mut rental = Rental::new("Acme", date(2026, 3, 1), date(2026, 3, 5));
        rental.state = RentalState::Rented;
        assert!(rental.is_overdue(date(2026, 3, 6)));
        assert!(!rental.is_overdue(date(2026, 3, 5)));

        rental.state = RentalState::Returned;
        assert!(!rental.is_overdue(date(2026, 3, 6)));

        rental.state = RentalState::Draft;
        assert!(!rental.is_overdue(date(2026, 3, 6)));
        assert_eq!(rental.display_state(date(2026, 3, 6)), "draft");
    }

    #[test]
    fn outstanding_never_goes_negative() {
        let line = RentalLine {
            id: Some(1),
            rental_id: 1,
            item_id: 1,
            item_name: "Speaker".to_string(),
            quantity_rented: 2,
            quantity_returned: 2,
            price_per_day: Decimal::ZERO,
        };
        assert_eq!(line.outstanding(), 0);
        assert!(line.is_fully_returned());
    }
}
