//! Scheduled event domain types.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use super::item::LoadingPriority;

/// A scheduled event that inventory items can be allocated to.
#[derive(Debug, Clone, Serialize)]
pub struct Event {
    pub id: Option<i64>,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub client_name: Option<String>,
    pub client_contact: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    /// Optional color tag used when rendering calendars.
    pub color: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}

impl Event {
    pub fn new(name: &str, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Event {
            id: None,
            name: name.to_string(),
            start_date,
            end_date,
            client_name: None,
            client_contact: None,
            location: None,
            description: None,
            color: None,
            created_at: None,
        }
    }
}

/// A per-item allocation line of an event.
///
/// Joins an event with an inventory item and the number of units reserved
/// for it. The item name is denormalized for display purposes.
#[derive(Debug, Clone, Serialize)]
pub struct EventItem {
    pub event_id: i64,
    pub item_id: i64,
    pub item_name: String,
    pub quantity: i64,
}

/// One row of a truck loading plan for an event.
///
/// An allocation line joined with the physical attributes that matter when
/// packing the truck.
#[derive(Debug, Clone)]
pub struct LoadingRow {
    pub item_id: i64,
    pub item_name: String,
    pub quantity: i64,
    pub weight: i64,
    pub height: i64,
    pub width: i64,
    pub length: i64,
    pub loading_priority: Option<LoadingPriority>,
}

/// Orders loading rows for the printable list: highest priority first,
/// rows without a priority last, ties broken by item name.
pub fn sort_loading_rows(rows: &mut [LoadingRow]) {
    rows.sort_by(|a, b| {
        b.loading_priority
            .cmp(&a.loading_priority)
            .then_with(|| a.item_name.cmp(&b.item_name))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, priority: Option<LoadingPriority>) -> LoadingRow {
        LoadingRow {
            item_id: 0,
            item_name: name.to_string(),
            quantity: 1,
            weight: 0,
            height: 0,
            width: 0,
            length: 0,
            loading_priority: priority,
        }
    }

    #[test]
    fn loading_rows_sort_by_priority_then_name() {
        let mut rows = vec![
            row("Chair", None),
            row("Truss", Some(LoadingPriority::Highest)),
            row("Backdrop", Some(LoadingPriority::Low)),
            row("Stage deck", Some(LoadingPriority::Highest)),
        ];
        sort_loading_rows(&mut rows);

        let names: Vec<&str> = rows.iter().map(|r| r.item_name.as_str()).collect();
        assert_eq!(names, ["Stage deck", "Truss", "Backdrop", "Chair"]);
    }

    #[test]
    fn unprioritized_rows_sort_last() {
        let mut rows = vec![row("Aisle runner", None), row("Zither", Some(LoadingPriority::Lowest))];
        sort_loading_rows(&mut rows);
        assert_eq!(rows[0].item_name, "Zither");
        assert_eq!(rows[1].item_name, "Aisle runner");
    }
}
