//! Data export command.
//!
//! Extracts a flat snapshot of one data set (items, events or rentals) and
//! writes it as CSV or JSON, for spreadsheets, backups or further processing.

use crate::{
    db::{categories::Categories, events::Events, items::Items, rentals::Rentals},
    libs::{
        config::Config,
        export::{ExportData, ExportFormat, Exporter},
        item::ItemFilter,
        messages::Message,
    },
    msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Data set to export
    #[arg(value_enum)]
    data: ExportData,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    format: ExportFormat,

    /// Output file path; defaults to the configured export directory
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub async fn cmd(args: ExportArgs) -> Result<()> {
    let config = Config::read()?;
    let exporter = Exporter::new(args.format, args.data, args.output, &config);

    let exported = match args.data {
        ExportData::Items => {
            let items = Items::new()?.fetch(&ItemFilter::default())?;
            if items.is_empty() {
                false
            } else {
                let category_names: Vec<(i64, String)> = Categories::new()?
                    .list()?
                    .into_iter()
                    .filter_map(|c| c.id.map(|id| (id, c.name)))
                    .collect();
                exporter.export_items(&items, &category_names)?;
                true
            }
        }
        ExportData::Events => {
            let mut events = Events::new()?;
            let all = events.list()?;
            if all.is_empty() {
                false
            } else {
                let mut with_items = Vec::with_capacity(all.len());
                for event in all {
                    let id = event.id.unwrap_or_default();
                    let items = events.items_for(id)?;
                    with_items.push((event, items));
                }
                exporter.export_events(&with_items)?;
                true
            }
        }
        ExportData::Rentals => {
            let mut rentals = Rentals::new()?;
            let all = rentals.list(None)?;
            if all.is_empty() {
                false
            } else {
                let mut with_lines = Vec::with_capacity(all.len());
                for rental in all {
                    let id = rental.id.unwrap_or_default();
                    let lines = rentals.lines(id)?;
                    with_lines.push((rental, lines));
                }
                exporter.export_rentals(&with_lines)?;
                true
            }
        }
    };

    if exported {
        msg_success!(Message::ExportCompleted(exporter.output_path().display().to_string()));
    } else {
        msg_info!(Message::NothingToExport);
    }

    Ok(())
}
