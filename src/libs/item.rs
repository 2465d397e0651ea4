//! Inventory item domain types.
//!
//! An inventory item owns a fixed pool of physical units (`total_quantity`)
//! of which some number is currently free (`available_quantity`). The free
//! counter is only ever moved by the availability ledger (see
//! [`crate::libs::ledger`]), which keeps it inside `0..=total_quantity`.
//! Availability status is derived from the counter and never persisted.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a stored enum value cannot be parsed back.
#[derive(Debug, Error)]
#[error("unknown enum value: {0}")]
pub struct ParseEnumError(pub String);

/// Derived availability of an item, computed from `available_quantity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityStatus {
    Available,
    Unavailable,
}

impl fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AvailabilityStatus::Available => write!(f, "available"),
            AvailabilityStatus::Unavailable => write!(f, "unavailable"),
        }
    }
}

/// Physical condition of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    New,
    Damaged,
    Lost,
}

impl Condition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::New => "new",
            Condition::Damaged => "damaged",
            Condition::Lost => "lost",
        }
    }
}

impl FromStr for Condition {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Condition::New),
            "damaged" => Ok(Condition::Damaged),
            "lost" => Ok(Condition::Lost),
            other => Err(ParseEnumError(other.to_string())),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether an item currently has units out on rental.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RentalStatus {
    Rented,
    NotInRentalUse,
}

impl RentalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RentalStatus::Rented => "rented",
            RentalStatus::NotInRentalUse => "not_in_rental_use",
        }
    }
}

impl FromStr for RentalStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rented" => Ok(RentalStatus::Rented),
            "not_in_rental_use" => Ok(RentalStatus::NotInRentalUse),
            other => Err(ParseEnumError(other.to_string())),
        }
    }
}

impl fmt::Display for RentalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Suggested priority when loading items into a truck for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadingPriority {
    Lowest,
    Low,
    Medium,
    High,
    Highest,
}

impl LoadingPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadingPriority::Lowest => "lowest",
            LoadingPriority::Low => "low",
            LoadingPriority::Medium => "medium",
            LoadingPriority::High => "high",
            LoadingPriority::Highest => "highest",
        }
    }
}

impl FromStr for LoadingPriority {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lowest" => Ok(LoadingPriority::Lowest),
            "low" => Ok(LoadingPriority::Low),
            "medium" => Ok(LoadingPriority::Medium),
            "high" => Ok(LoadingPriority::High),
            "highest" => Ok(LoadingPriority::Highest),
            other => Err(ParseEnumError(other.to_string())),
        }
    }
}

impl fmt::Display for LoadingPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A physical inventory item that can be allocated to events or rented.
#[derive(Debug, Clone, Serialize)]
pub struct InventoryItem {
    pub id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    /// Total units of this item owned by the warehouse.
    pub total_quantity: i64,
    /// Units not currently allocated to an event or rental.
    pub available_quantity: i64,
    pub category_id: i64,
    pub condition: Condition,
    pub condition_description: Option<String>,
    pub rental_status: RentalStatus,
    /// Price per day for one unit when rented.
    pub rental_price_per_day: Decimal,
    pub rental_description: Option<String>,
    /// Weight of a single unit in kilograms.
    pub weight: i64,
    pub height: i64,
    pub width: i64,
    pub length: i64,
    pub loading_priority: Option<LoadingPriority>,
    pub created_at: Option<NaiveDateTime>,
}

impl InventoryItem {
    /// Creates a new item with every unit available.
    pub fn new(name: &str, total_quantity: i64, category_id: i64) -> Self {
        InventoryItem {
            id: None,
            name: name.to_string(),
            description: None,
            total_quantity,
            available_quantity: total_quantity,
            category_id,
            condition: Condition::New,
            condition_description: None,
            rental_status: RentalStatus::NotInRentalUse,
            rental_price_per_day: Decimal::ZERO,
            rental_description: None,
            weight: 0,
            height: 0,
            width: 0,
            length: 0,
            loading_priority: None,
            created_at: None,
        }
    }

    /// Availability derived from the free-unit counter.
    pub fn availability(&self) -> AvailabilityStatus {
        if self.available_quantity > 0 {
            AvailabilityStatus::Available
        } else {
            AvailabilityStatus::Unavailable
        }
    }
}

/// Filter criteria for inventory listings.
#[derive(Debug, Clone, Default)]
pub struct ItemFilter {
    /// Restrict to a single category.
    pub category_id: Option<i64>,
    /// Restrict by derived availability.
    pub availability: Option<AvailabilityStatus>,
    /// Case-insensitive name substring.
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_item_is_fully_available() {
        let item = InventoryItem::new("Folding chair", 40, 1);
        assert_eq!(item.available_quantity, 40);
        assert_eq!(item.availability(), AvailabilityStatus::Available);
        assert_eq!(item.condition, Condition::New);
        assert_eq!(item.rental_status, RentalStatus::NotInRentalUse);
    }

    #[test]
    fn availability_is_derived_from_counter() {
        let mut item = InventoryItem::new("Stage deck", 2, 1);
        item.available_quantity = 0;
        assert_eq!(item.availability(), AvailabilityStatus::Unavailable);
    }

    #[test]
    fn enum_round_trips() {
        for c in [Condition::New, Condition::Damaged, Condition::Lost] {
            assert_eq!(c.as_str().parse::<Condition>().unwrap(), c);
        }
        assert!("pristine".parse::<Condition>().is_err());
        assert_eq!("highest".parse::<LoadingPriority>().unwrap(), LoadingPriority::Highest);
    }
}
