//! Data export to CSV and JSON files.
//!
//! Exports are flat, spreadsheet-friendly snapshots of the warehouse state.
//! Derived values (availability, overdue) are materialized at export time so
//! the files are self-contained.

use anyhow::Result;
use chrono::Local;
use clap::ValueEnum;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fs::File;
use std::path::PathBuf;

use super::config::Config;
use super::event::{Event, EventItem};
use super::item::InventoryItem;
use super::rental::{Rental, RentalLine};

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Comma-separated values for spreadsheets.
    Csv,
    /// Structured JSON preserving data types.
    Json,
}

impl ExportFormat {
    fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Data sets that can be exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportData {
    Items,
    Events,
    Rentals,
}

impl ExportData {
    fn file_stem(&self) -> &'static str {
        match self {
            ExportData::Items => "items",
            ExportData::Events => "events",
            ExportData::Rentals => "rentals",
        }
    }
}

/// Flat item row as written to export files.
#[derive(Debug, Serialize)]
pub struct ExportItem {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub total_quantity: i64,
    pub available_quantity: i64,
    pub availability: String,
    pub condition: String,
    pub rental_status: String,
    pub price_per_day: Decimal,
}

/// Flat event allocation row: one line per allocated item, events without
/// allocations get a single line with empty item columns.
#[derive(Debug, Serialize)]
pub struct ExportEventRow {
    pub event_id: i64,
    pub event_name: String,
    pub start_date: String,
    pub end_date: String,
    pub client_name: String,
    pub location: String,
    pub item_name: String,
    pub quantity: Option<i64>,
}

/// Flat rental row: one line per rental line, rentals without lines get a
/// single line with empty item columns.
#[derive(Debug, Serialize)]
pub struct ExportRentalRow {
    pub rental_id: i64,
    pub client_name: String,
    pub rental_date: String,
    pub expected_return_date: String,
    pub status: String,
    pub payment_status: String,
    pub item_name: String,
    pub quantity_rented: Option<i64>,
    pub quantity_returned: Option<i64>,
    pub price_per_day: Option<Decimal>,
}

/// Writes export files for one data set in one format.
pub struct Exporter {
    format: ExportFormat,
    output_path: PathBuf,
}

impl Exporter {
    /// Creates an exporter, deriving the output path when none is given.
    ///
    /// The default filename is `depo_<data>_<YYYY-MM-DD>.<ext>`, placed in
    /// the configured export directory or the current working directory.
    pub fn new(format: ExportFormat, data: ExportData, output_path: Option<PathBuf>, config: &Config) -> Self {
        let output_path = output_path.unwrap_or_else(|| {
            let file_name = format!(
                "depo_{}_{}.{}",
                data.file_stem(),
                Local::now().format("%Y-%m-%d"),
                format.extension()
            );
            let dir = config
                .export
                .as_ref()
                .and_then(|e| e.directory.clone())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("."));
            dir.join(file_name)
        });

        Self { format, output_path }
    }

    pub fn output_path(&self) -> &PathBuf {
        &self.output_path
    }

    pub fn export_items(&self, items: &[InventoryItem], category_names: &[(i64, String)]) -> Result<()> {
        let rows: Vec<ExportItem> = items
            .iter()
            .map(|item| ExportItem {
                id: item.id.unwrap_or(0),
                name: item.name.clone(),
                category: category_names
                    .iter()
                    .find(|(id, _)| *id == item.category_id)
                    .map(|(_, name)| name.clone())
                    .unwrap_or_default(),
                total_quantity: item.total_quantity,
                available_quantity: item.available_quantity,
                availability: item.availability().to_string(),
                condition: item.condition.to_string(),
                rental_status: item.rental_status.to_string(),
                price_per_day: item.rental_price_per_day,
            })
            .collect();

        self.write(&rows)
    }

    pub fn export_events(&self, events: &[(Event, Vec<EventItem>)]) -> Result<()> {
        let mut rows = Vec::new();
        for (event, items) in events {
            let base = |item_name: String, quantity: Option<i64>| ExportEventRow {
                event_id: event.id.unwrap_or(0),
                event_name: event.name.clone(),
                start_date: event.start_date.to_string(),
                end_date: event.end_date.to_string(),
                client_name: event.client_name.clone().unwrap_or_default(),
                location: event.location.clone().unwrap_or_default(),
                item_name,
                quantity,
            };
            if items.is_empty() {
                rows.push(base(String::new(), None));
            } else {
                for item in items {
                    rows.push(base(item.item_name.clone(), Some(item.quantity)));
                }
            }
        }

        self.write(&rows)
    }

    pub fn export_rentals(&self, rentals: &[(Rental, Vec<RentalLine>)]) -> Result<()> {
        let today = Local::now().date_naive();
        let mut rows = Vec::new();
        for (rental, lines) in rentals {
            let base = |line: Option<&RentalLine>| ExportRentalRow {
                rental_id: rental.id.unwrap_or(0),
                client_name: rental.client_name.clone(),
                rental_date: rental.rental_date.to_string(),
                expected_return_date: rental.expected_return_date.to_string(),
                status: rental.display_state(today).to_string(),
                payment_status: rental.payment_status.to_string(),
                item_name: line.map(|l| l.item_name.clone()).unwrap_or_default(),
                quantity_rented: line.map(|l| l.quantity_rented),
                quantity_returned: line.map(|l| l.quantity_returned),
                price_per_day: line.map(|l| l.price_per_day),
            };
            if lines.is_empty() {
                rows.push(base(None));
            } else {
                for line in lines {
                    rows.push(base(Some(line)));
                }
            }
        }

        self.write(&rows)
    }

    fn write<T: Serialize>(&self, rows: &[T]) -> Result<()> {
        match self.format {
            ExportFormat::Csv => {
                let mut writer = csv::Writer::from_path(&self.output_path)?;
                for row in rows {
                    writer.serialize(row)?;
                }
                writer.flush()?;
            }
            ExportFormat::Json => {
                let file = File::create(&self.output_path)?;
                serde_json::to_writer_pretty(file, rows)?;
            }
        }
        Ok(())
    }
}
