//! Terminal table rendering for all list and detail output.

use chrono::Local;
use prettytable::{row, Table};
use rust_decimal::Decimal;
use std::error::Error;

use super::event::{Event, EventItem, LoadingRow};
use super::item::InventoryItem;
use super::pricing;
use super::rental::{Rental, RentalLine};
use crate::db::categories::Category;

/// Formats a money amount with the configured currency symbol.
pub fn money(value: Decimal, symbol: &str) -> String {
    format!("{}{:.2}", symbol, value.round_dp(2))
}

pub struct View {}

impl View {
    pub fn categories(categories: &[Category]) -> Result<(), Box<dyn Error>> {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME", "ITEMS"]);
        for category in categories {
            table.add_row(row![category.id.unwrap_or(0), category.name, category.item_count]);
        }
        table.printstd();

        Ok(())
    }

    pub fn items(items: &[InventoryItem], currency: &str) -> Result<(), Box<dyn Error>> {
        let mut table = Table::new();

        table.add_row(row![
            "ID",
            "NAME",
            "TOTAL",
            "AVAILABLE",
            "STATUS",
            "CONDITION",
            "RENTAL",
            "PRICE/DAY"
        ]);
        for item in items {
            table.add_row(row![
                item.id.unwrap_or(0),
                item.name,
                item.total_quantity,
                item.available_quantity,
                item.availability(),
                item.condition,
                item.rental_status,
                money(item.rental_price_per_day, currency)
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn item_details(item: &InventoryItem, currency: &str) -> Result<(), Box<dyn Error>> {
        let mut table = Table::new();

        table.add_row(row!["ID", item.id.unwrap_or(0)]);
        table.add_row(row!["Name", item.name]);
        table.add_row(row!["Description", item.description.clone().unwrap_or_default()]);
        table.add_row(row!["Total quantity", item.total_quantity]);
        table.add_row(row!["Available quantity", item.available_quantity]);
        table.add_row(row!["Availability", item.availability()]);
        table.add_row(row!["Condition", item.condition]);
        table.add_row(row!["Condition notes", item.condition_description.clone().unwrap_or_default()]);
        table.add_row(row!["Rental status", item.rental_status]);
        table.add_row(row!["Price per day", money(item.rental_price_per_day, currency)]);
        table.add_row(row!["Weight (kg)", item.weight]);
        table.add_row(row![
            "Dimensions (HxWxL)",
            format!("{}x{}x{}", item.height, item.width, item.length)
        ]);
        table.add_row(row![
            "Loading priority",
            item.loading_priority.map(|p| p.to_string()).unwrap_or_default()
        ]);
        table.printstd();

        Ok(())
    }

    pub fn events(events: &[Event]) -> Result<(), Box<dyn Error>> {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME", "START", "END", "CLIENT", "LOCATION"]);
        for event in events {
            table.add_row(row![
                event.id.unwrap_or(0),
                event.name,
                event.start_date,
                event.end_date,
                event.client_name.clone().unwrap_or_default(),
                event.location.clone().unwrap_or_default()
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn event_items(items: &[EventItem]) -> Result<(), Box<dyn Error>> {
        let mut table = Table::new();

        table.add_row(row!["ITEM ID", "NAME", "QUANTITY"]);
        for item in items {
            table.add_row(row![item.item_id, item.item_name, item.quantity]);
        }
        table.printstd();

        Ok(())
    }

    /// Renders the printable truck loading list for an event.
    pub fn loading_plan(rows: &[LoadingRow]) -> Result<(), Box<dyn Error>> {
        let mut table = Table::new();

        table.add_row(row!["PRIORITY", "ITEM", "QUANTITY", "WEIGHT (kg)", "DIMENSIONS (HxWxL)"]);
        for item in rows {
            table.add_row(row![
                item.loading_priority.map(|p| p.to_string()).unwrap_or_default(),
                item.item_name,
                item.quantity,
                item.weight,
                format!("{}x{}x{}", item.height, item.width, item.length)
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn rentals(rentals: &[Rental]) -> Result<(), Box<dyn Error>> {
        let today = Local::now().date_naive();
        let mut table = Table::new();

        table.add_row(row!["ID", "CLIENT", "FROM", "EXPECTED RETURN", "STATUS", "PAYMENT"]);
        for rental in rentals {
            table.add_row(row![
                rental.id.unwrap_or(0),
                rental.client_name,
                rental.rental_date,
                rental.expected_return_date,
                rental.display_state(today),
                rental.payment_status
            ]);
        }
        table.printstd();

        Ok(())
    }

    /// Renders the lines of a rental plus its price summary.
    pub fn rental_details(rental: &Rental, lines: &[RentalLine], currency: &str) -> Result<(), Box<dyn Error>> {
        let today = Local::now().date_naive();
        let days = pricing::rental_days(rental.rental_date, rental.expected_return_date);
        let subtotal = pricing::subtotal(lines, days);
        let discount = pricing::discount_amount(subtotal, rental.discount_percentage);

        let mut table = Table::new();
        table.add_row(row!["Client", rental.client_name]);
        table.add_row(row!["Contact", rental.contact_info]);
        table.add_row(row!["Status", rental.display_state(today)]);
        table.add_row(row!["Payment", rental.payment_status]);
        table.add_row(row!["Rental date", rental.rental_date]);
        table.add_row(row!["Expected return", rental.expected_return_date]);
        table.add_row(row![
            "Actual return",
            rental.actual_return_date.map(|d| d.to_string()).unwrap_or_default()
        ]);
        table.add_row(row!["Billable days", days]);
        table.printstd();

        let mut lines_table = Table::new();
        lines_table.add_row(row!["ITEM", "RENTED", "RETURNED", "OUTSTANDING", "PRICE/DAY", "LINE TOTAL"]);
        for line in lines {
            let line_total = line.price_per_day * Decimal::from(line.quantity_rented) * Decimal::from(days);
            lines_table.add_row(row![
                line.item_name,
                line.quantity_rented,
                line.quantity_returned,
                line.outstanding(),
                money(line.price_per_day, currency),
                money(line_total, currency)
            ]);
        }
        lines_table.printstd();

        let mut summary = Table::new();
        summary.add_row(row!["Subtotal", money(subtotal, currency)]);
        summary.add_row(row![
            format!("Discount ({}%)", rental.discount_percentage),
            money(discount, currency)
        ]);
        summary.add_row(row![
            "Total",
            money(pricing::total(subtotal, rental.discount_percentage), currency)
        ]);
        summary.printstd();

        Ok(())
    }
}
