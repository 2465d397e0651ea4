//! Display implementation for depo application messages.
//!
//! Provides the `Display` trait implementation for the `Message` enum,
//! converting structured message data into human-readable text for terminal
//! output. All user-facing text lives here, in one place, so wording stays
//! consistent across commands and is easy to adjust or localize later.

use super::types::Message;
use std::fmt;

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            // === CATEGORY MESSAGES ===
            Message::CategoryCreated(name) => format!("Category '{}' created", name),
            Message::CategoryRenamed(old, new) => format!("Category '{}' renamed to '{}'", old, new),
            Message::CategoryDeleted(name) => format!("Category '{}' deleted", name),
            Message::CategoryNotFound(name) => format!("Category '{}' not found", name),
            Message::CategoryAlreadyExists(name) => format!("Category '{}' already exists", name),
            Message::CategoryListHeader => "Item categories:".to_string(),
            Message::NoCategoriesFound => "No categories found".to_string(),
            Message::CannotDeleteDefaultCategory => "The 'Uncategorized' category cannot be deleted".to_string(),
            Message::ItemsReassignedToDefault(count) => format!("{} item(s) moved to 'Uncategorized'", count),

            // === ITEM MESSAGES ===
            Message::ItemCreated(name) => format!("Item '{}' created", name),
            Message::ItemUpdated(name) => format!("Item '{}' updated", name),
            Message::ItemDeleted(name) => format!("Item '{}' deleted", name),
            Message::ItemNotFound(name) => format!("Item '{}' not found", name),
            Message::ItemListHeader => "Inventory items:".to_string(),
            Message::NoItemsFound => "No inventory items found".to_string(),
            Message::ItemInActiveRental(name) => format!(
                "Cannot delete '{}' because it is referenced in one or more active rentals. \
                 Return or delete those rentals before deleting the item.",
                name
            ),
            Message::ItemAllocatedToEvent(name) => format!(
                "Cannot delete '{}' because it is allocated to one or more events. \
                 Remove the item from those events before deleting it.",
                name
            ),
            Message::ConfirmDeleteItem(name) => format!("Delete item '{}'? This cannot be undone.", name),

            // === EVENT MESSAGES ===
            Message::EventCreated(name) => format!("Event '{}' created", name),
            Message::EventUpdated(name) => format!("Event '{}' updated", name),
            Message::EventDeleted(name) => format!("Event '{}' deleted, allocated items returned to stock", name),
            Message::EventNotFound(id) => format!("Event {} not found", id),
            Message::EventListHeader => "Scheduled events:".to_string(),
            Message::NoEventsFound => "No events found".to_string(),
            Message::EventItemsSaved(name) => format!("Inventory allocation for '{}' saved", name),
            Message::EventItemsHeader(name) => format!("Items allocated to '{}':", name),
            Message::EventLoadingHeader(name) => format!("Loading plan for '{}':", name),
            Message::NoEventItems => "No items allocated to this event".to_string(),
            Message::ConfirmDeleteEvent(name) => {
                format!("Delete event '{}'? Allocated items will be returned to stock.", name)
            }
            Message::InvalidItemSpec(raw) => format!("Invalid item specification '{}', expected ITEM=QTY", raw),

            // === RENTAL MESSAGES ===
            Message::RentalDrafted(id) => format!("Draft rental {} created", id),
            Message::RentalUpdated(id) => format!("Rental {} updated", id),
            Message::RentalDeleted(id) => format!("Rental {} deleted, outstanding items returned to stock", id),
            Message::RentalNotFound(id) => format!("Rental {} not found", id),
            Message::RentalListHeader => "Rental orders:".to_string(),
            Message::NoRentalsFound => "No rentals found".to_string(),
            Message::RentalNotDraft(id) => format!("Rental {} is no longer a draft and cannot be edited", id),
            Message::RentalNotDispatched(id) => format!("Rental {} has not been dispatched yet", id),
            Message::RentalAlreadyReturned(id) => format!("Rental {} has already been fully returned", id),
            Message::RentalDispatched(id) => format!("Rental {} dispatched to client", id),
            Message::RentalReturned(id) => format!("Rental {} fully returned and closed", id),
            Message::RentalPartiallyReturned(id) => format!("Return recorded for rental {}, some items are still out", id),
            Message::RentalLineAdded(name, qty) => format!("Added {} x '{}' to the rental", qty, name),
            Message::RentalLineRemoved(name) => format!("Removed '{}' from the rental", name),
            Message::RentalLineNotFound(name) => format!("The rental has no line for '{}'", name),
            Message::RentalQuantitySet(name, qty) => format!("Quantity for '{}' set to {}", name, qty),
            Message::RentalHasNoLines(id) => format!("Cannot dispatch rental {} without items", id),
            Message::ReturnExceedsRented(name, requested, rented) => format!(
                "Cannot return {} x '{}': only {} were rented",
                requested, name, rented
            ),
            Message::ReturnBelowRecorded(name, requested, returned) => format!(
                "Cannot set returned quantity for '{}' to {}: {} already recorded as returned",
                name, requested, returned
            ),
            Message::PaymentStatusSet(id, status) => format!("Payment status for rental {} set to {}", id, status),
            Message::RentalSummaryHeader(id) => format!("Rental order {}:", id),
            Message::DraftResumeHint(id) => format!("Rental {} is a draft; resume it with 'depo rental add {} ...'", id, id),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved".to_string(),
            Message::ConfigFileNotFound => "Configuration file not found, using defaults".to_string(),
            Message::ConfigModuleDisplay => "Display".to_string(),
            Message::ConfigModuleExport => "Export".to_string(),
            Message::PromptSelectModules => "Select modules to configure".to_string(),
            Message::PromptCurrencySymbol => "Currency symbol".to_string(),
            Message::PromptExportDirectory => "Default export directory".to_string(),

            // === EXPORT MESSAGES ===
            Message::ExportCompleted(path) => format!("Data exported to {}", path),
            Message::ExportFailed(reason) => format!("Export failed: {}", reason),
            Message::NothingToExport => "There is no data to export".to_string(),

            // === MIGRATION MESSAGES ===
            Message::MigrationsFound(count) => format!("Found {} pending migration(s)", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("Migration v{} completed", version),
            Message::MigrationFailed(version, error) => format!("Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All migrations completed".to_string(),
            Message::DatabaseVersion(version) => format!("Database schema version: {}", version),
            Message::DatabaseUpToDate => "Database is up to date".to_string(),
            Message::DatabaseNeedsUpdate => "Database needs migration".to_string(),
            Message::MigrationHistory => "Migration history:".to_string(),
            Message::NothingToRollback => "Nothing to roll back".to_string(),
            Message::RollingBack(from, to) => format!("Rolling back from v{} to v{}", from, to),
            Message::RollbackCompleted(version) => format!("Rolled back to v{}", version),

            // === GENERIC MESSAGES ===
            Message::OperationCancelled => "Operation cancelled".to_string(),
            Message::Custom(text) => text.clone(),
        };

        write!(f, "{}", text)
    }
}
