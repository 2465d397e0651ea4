//! Inventory item management commands.

use crate::{
    db::{categories::Categories, items::Items},
    libs::{
        config::Config,
        item::{AvailabilityStatus, Condition, InventoryItem, ItemFilter, LoadingPriority},
        messages::Message,
        view::View,
    },
    msg_error_anyhow, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};
use rust_decimal::Decimal;

#[derive(Debug, Args)]
pub struct ItemArgs {
    #[command(subcommand)]
    command: ItemCommand,
}

#[derive(Debug, Subcommand)]
enum ItemCommand {
    /// Create a new inventory item
    Create {
        name: String,
        /// Total number of physical units
        #[arg(short, long, default_value_t = 1)]
        quantity: i64,
        /// Category name; defaults to 'Uncategorized'
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        /// Rental price per day per unit
        #[arg(short, long, default_value = "0")]
        price: Decimal,
        /// Weight of one unit in kilograms
        #[arg(long, default_value_t = 0)]
        weight: i64,
        /// Dimensions of one unit as HxWxL in centimeters
        #[arg(long)]
        dimensions: Option<String>,
        /// Truck loading priority (lowest, low, medium, high, highest)
        #[arg(long)]
        loading_priority: Option<LoadingPriority>,
    },
    /// List inventory items
    List {
        /// Filter by category name
        #[arg(short, long)]
        category: Option<String>,
        /// Show only items with free units
        #[arg(long, conflicts_with = "unavailable")]
        available: bool,
        /// Show only items with no free units
        #[arg(long)]
        unavailable: bool,
        /// Case-insensitive name substring
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show all details of one item
    Show { item: String },
    /// Edit an item's fields
    Edit {
        item: String,
        #[arg(long)]
        name: Option<String>,
        /// New total number of physical units
        #[arg(short, long)]
        quantity: Option<i64>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        price: Option<Decimal>,
        /// Physical condition (new, damaged, lost)
        #[arg(long)]
        condition: Option<Condition>,
        #[arg(long)]
        condition_notes: Option<String>,
        #[arg(long)]
        weight: Option<i64>,
        #[arg(long)]
        dimensions: Option<String>,
        #[arg(long)]
        loading_priority: Option<LoadingPriority>,
    },
    /// Delete an item that no event or active rental references
    Delete {
        item: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

pub async fn cmd(args: ItemArgs) -> Result<()> {
    let mut items = Items::new()?;
    let config = Config::read()?;
    let currency = config.currency_symbol();

    match args.command {
        ItemCommand::Create {
            name,
            quantity,
            category,
            description,
            price,
            weight,
            dimensions,
            loading_priority,
        } => {
            if quantity < 0 {
                return Err(msg_error_anyhow!(Message::Custom(format!(
                    "Total quantity cannot be negative, got {}",
                    quantity
                ))));
            }

            let mut item = InventoryItem::new(&name, quantity, resolve_category(category)?);
            item.description = description;
            item.rental_price_per_day = price;
            item.weight = weight;
            item.loading_priority = loading_priority;
            if let Some(spec) = dimensions {
                let (height, width, length) = parse_dimensions(&spec)?;
                item.height = height;
                item.width = width;
                item.length = length;
            }

            items.create(&item)?;
            msg_success!(Message::ItemCreated(name));
        }
        ItemCommand::List {
            category,
            available,
            unavailable,
            search,
        } => {
            let filter = ItemFilter {
                category_id: category.map(|name| resolve_existing_category(&name)).transpose()?,
                availability: match (available, unavailable) {
                    (true, _) => Some(AvailabilityStatus::Available),
                    (_, true) => Some(AvailabilityStatus::Unavailable),
                    _ => None,
                },
                name: search,
            };
            let found = items.fetch(&filter)?;
            if found.is_empty() {
                msg_info!(Message::NoItemsFound);
                return Ok(());
            }
            msg_print!(Message::ItemListHeader, true);
            View::items(&found, &currency).map_err(|e| anyhow::anyhow!(e.to_string()))?;
        }
        ItemCommand::Show { item } => {
            let item = resolve_item(&mut items, &item)?;
            View::item_details(&item, &currency).map_err(|e| anyhow::anyhow!(e.to_string()))?;
        }
        ItemCommand::Edit {
            item,
            name,
            quantity,
            category,
            description,
            price,
            condition,
            condition_notes,
            weight,
            dimensions,
            loading_priority,
        } => {
            let mut existing = resolve_item(&mut items, &item)?;

            if let Some(name) = name {
                existing.name = name;
            }
            if let Some(quantity) = quantity {
                if quantity < 0 {
                    return Err(msg_error_anyhow!(Message::Custom(format!(
                        "Total quantity cannot be negative, got {}",
                        quantity
                    ))));
                }
                existing.total_quantity = quantity;
            }
            if let Some(category) = category {
                existing.category_id = resolve_existing_category(&category)?;
            }
            if let Some(description) = description {
                existing.description = Some(description);
            }
            if let Some(price) = price {
                existing.rental_price_per_day = price;
            }
            if let Some(condition) = condition {
                existing.condition = condition;
            }
            if let Some(notes) = condition_notes {
                existing.condition_description = Some(notes);
            }
            if let Some(weight) = weight {
                existing.weight = weight;
            }
            if let Some(spec) = dimensions {
                let (height, width, length) = parse_dimensions(&spec)?;
                existing.height = height;
                existing.width = width;
                existing.length = length;
            }
            if let Some(priority) = loading_priority {
                existing.loading_priority = Some(priority);
            }

            items.update(&existing)?;
            msg_success!(Message::ItemUpdated(existing.name));
        }
        ItemCommand::Delete { item, yes } => {
            let existing = resolve_item(&mut items, &item)?;
            let id = existing.id.unwrap_or_default();

            if !yes {
                let confirmed = Confirm::with_theme(&ColorfulTheme::default())
                    .with_prompt(Message::ConfirmDeleteItem(existing.name.clone()).to_string())
                    .default(false)
                    .interact()?;
                if !confirmed {
                    msg_info!(Message::OperationCancelled);
                    return Ok(());
                }
            }

            items.delete(id)?;
            msg_success!(Message::ItemDeleted(existing.name));
        }
    }

    Ok(())
}

/// Looks up an item by numeric id or by exact name.
fn resolve_item(items: &mut Items, spec: &str) -> Result<InventoryItem> {
    let found = match spec.parse::<i64>() {
        Ok(id) => items.get_by_id(id)?,
        Err(_) => items.get_by_name(spec)?,
    };
    found.ok_or_else(|| msg_error_anyhow!(Message::ItemNotFound(spec.to_string())))
}

/// Resolves an optional category name, creating it on first use.
fn resolve_category(name: Option<String>) -> Result<i64> {
    let Some(name) = name else {
        return Ok(crate::db::categories::UNCATEGORIZED_ID);
    };
    let mut categories = Categories::new()?;
    match categories.get_by_name(&name)? {
        Some(category) => Ok(category.id.unwrap_or_default()),
        None => categories.create(&name),
    }
}

fn resolve_existing_category(name: &str) -> Result<i64> {
    let mut categories = Categories::new()?;
    categories
        .get_by_name(name)?
        .and_then(|c| c.id)
        .ok_or_else(|| msg_error_anyhow!(Message::CategoryNotFound(name.to_string())))
}

/// Parses a `HxWxL` dimension spec in centimeters.
fn parse_dimensions(spec: &str) -> Result<(i64, i64, i64)> {
    let parts: Vec<&str> = spec.split('x').collect();
    if parts.len() != 3 {
        return Err(msg_error_anyhow!(Message::Custom(format!(
            "Invalid dimensions '{}', expected HxWxL",
            spec
        ))));
    }
    let mut values = [0i64; 3];
    for (i, part) in parts.iter().enumerate() {
        values[i] = part.trim().parse().map_err(|_| {
            msg_error_anyhow!(Message::Custom(format!("Invalid dimensions '{}', expected HxWxL", spec)))
        })?;
    }
    Ok((values[0], values[1], values[2]))
}
