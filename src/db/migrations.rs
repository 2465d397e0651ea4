//! Database schema migration management and versioning system.
//!
//! Provides a migration framework for evolving the database schema over time
//! while maintaining data integrity.
//!
//! ## Features
//!
//! - **Version Tracking**: Maintains precise records of applied migrations
//! - **Automatic Application**: Runs pending migrations during database initialization
//! - **Transaction Safety**: All migrations run within database transactions
//! - **Rollback Support**: Development-time rollback capabilities (debug builds only)
//! - **History Tracking**: Complete audit trail of schema changes

use crate::libs::messages::Message;
use crate::{msg_debug, msg_error, msg_info, msg_success};
use anyhow::Result;
use rusqlite::{params, Connection, Transaction};

/// SQL schema for the migrations tracking table.
const MIGRATIONS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS migrations (
    id INTEGER PRIMARY KEY,
    version INTEGER NOT NULL UNIQUE,
    name TEXT NOT NULL,
    applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

/// A single database migration with its execution logic.
#[derive(Debug, Clone)]
struct Migration {
    /// Unique version number for ordering and tracking
    version: u32,
    /// Human-readable name describing the migration's purpose
    name: &'static str,
    /// Function that applies the schema changes within a transaction
    up: fn(&Transaction) -> Result<()>,
}

/// Central migration system manager that orchestrates schema evolution.
///
/// Maintains the complete registry of available migrations and applies the
/// pending ones in version order, each recorded in the tracking table.
pub struct MigrationManager {
    /// Ordered list of all available migrations
    migrations: Vec<Migration>,
}

impl MigrationManager {
    /// Creates a new migration manager with all registered migrations.
    pub fn new() -> Self {
        let mut manager = Self { migrations: Vec::new() };

        // Register all migrations in chronological order
        manager.register_migrations();
        manager
    }

    /// Registers all database migrations in chronological order.
    fn register_migrations(&mut self) {
        // Version 1: Categories and inventory items
        self.add_migration(1, "create_categories_and_items", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS categories (
                    id INTEGER PRIMARY KEY,
                    name TEXT NOT NULL UNIQUE,
                    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
                )",
                [],
            )?;

            tx.execute(
                "CREATE TABLE IF NOT EXISTS items (
                    id INTEGER PRIMARY KEY,
                    name TEXT NOT NULL,
                    description TEXT,
                    total_quantity INTEGER NOT NULL DEFAULT 0,
                    available_quantity INTEGER NOT NULL DEFAULT 0,
                    category_id INTEGER NOT NULL DEFAULT 1 REFERENCES categories(id),
                    condition TEXT NOT NULL DEFAULT 'new',
                    condition_description TEXT,
                    rental_status TEXT NOT NULL DEFAULT 'not_in_rental_use',
                    rental_price_per_day TEXT NOT NULL DEFAULT '0',
                    rental_description TEXT,
                    weight INTEGER NOT NULL DEFAULT 0,
                    height INTEGER NOT NULL DEFAULT 0,
                    width INTEGER NOT NULL DEFAULT 0,
                    length INTEGER NOT NULL DEFAULT 0,
                    loading_priority TEXT,
                    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
                )",
                [],
            )?;

            // Index items by category for filtered listings
            tx.execute("CREATE INDEX IF NOT EXISTS idx_items_category ON items(category_id)", [])?;

            Ok(())
        });

        // Version 2: Seed the default category that items fall back to
        self.add_migration(2, "seed_uncategorized_category", |tx| {
            tx.execute("INSERT OR IGNORE INTO categories (id, name) VALUES (1, 'Uncategorized')", [])?;
            Ok(())
        });

        // Version 3: Events and per-event inventory allocations
        self.add_migration(3, "add_events_and_allocations", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS events (
                    id INTEGER PRIMARY KEY,
                    name TEXT NOT NULL,
                    start_date DATE NOT NULL,
                    end_date DATE NOT NULL,
                    client_name TEXT,
                    client_contact TEXT,
                    location TEXT,
                    description TEXT,
                    color TEXT,
                    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
                )",
                [],
            )?;

            // Junction table linking events to reserved item quantities
            tx.execute(
                "CREATE TABLE IF NOT EXISTS event_items (
                    event_id INTEGER NOT NULL,
                    item_id INTEGER NOT NULL,
                    quantity INTEGER NOT NULL,
                    PRIMARY KEY (event_id, item_id),
                    FOREIGN KEY (event_id) REFERENCES events(id) ON DELETE CASCADE,
                    FOREIGN KEY (item_id) REFERENCES items(id)
                )",
                [],
            )?;

            tx.execute("CREATE INDEX IF NOT EXISTS idx_events_start_date ON events(start_date)", [])?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_event_items_item ON event_items(item_id)", [])?;
            Ok(())
        });

        // Version 4: Rental orders and their item lines
        self.add_migration(4, "add_rentals", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS rentals (
                    id INTEGER PRIMARY KEY,
                    client_name TEXT NOT NULL,
                    contact_info TEXT NOT NULL DEFAULT '',
                    rental_date DATE NOT NULL,
                    expected_return_date DATE NOT NULL,
                    actual_return_date TIMESTAMP,
                    state TEXT NOT NULL DEFAULT 'draft',
                    payment_status TEXT NOT NULL DEFAULT 'unpaid',
                    discount_percentage TEXT NOT NULL DEFAULT '0',
                    notes TEXT,
                    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
                )",
                [],
            )?;

            tx.execute(
                "CREATE TABLE IF NOT EXISTS rental_items (
                    id INTEGER PRIMARY KEY,
                    rental_id INTEGER NOT NULL,
                    item_id INTEGER NOT NULL,
                    quantity_rented INTEGER NOT NULL,
                    quantity_returned INTEGER NOT NULL DEFAULT 0,
                    price_per_day TEXT NOT NULL,
                    UNIQUE (rental_id, item_id),
                    FOREIGN KEY (rental_id) REFERENCES rentals(id) ON DELETE CASCADE,
                    FOREIGN KEY (item_id) REFERENCES items(id)
                )",
                [],
            )?;

            tx.execute("CREATE INDEX IF NOT EXISTS idx_rentals_state ON rentals(state)", [])?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_rental_items_item ON rental_items(item_id)", [])?;
            Ok(())
        });
    }

    /// Registers a single migration in the migration system.
    fn add_migration(&mut self, version: u32, name: &'static str, up: fn(&Transaction) -> Result<()>) {
        self.migrations.push(Migration { version, name, up });
    }

    /// Executes all pending migrations in the correct order.
    ///
    /// Pending migrations run inside a single transaction: if any migration
    /// fails, all changes are rolled back and the database stays at the
    /// previous version.
    pub fn run_migrations(&self, conn: &mut Connection) -> Result<()> {
        // Initialize the migrations tracking table
        conn.execute(MIGRATIONS_TABLE, [])?;

        // Determine the current schema version
        let current_version = self.get_current_version(conn)?;

        // Find all migrations that haven't been applied yet
        let pending: Vec<&Migration> = self.migrations.iter().filter(|m| m.version > current_version).collect();

        if pending.is_empty() {
            msg_debug!(Message::DatabaseUpToDate);
            return Ok(());
        }

        msg_debug!(Message::MigrationsFound(pending.len()));

        let tx = conn.transaction()?;

        for migration in pending {
            msg_debug!(Message::RunningMigration(migration.version, migration.name.to_string()));

            match (migration.up)(&tx) {
                Ok(()) => {
                    // Record successful migration in tracking table
                    tx.execute(
                        "INSERT INTO migrations (version, name) VALUES (?1, ?2)",
                        params![migration.version, migration.name],
                    )?;
                    msg_debug!(Message::MigrationCompleted(migration.version));
                }
                Err(e) => {
                    msg_error!(Message::MigrationFailed(migration.version, e.to_string()));
                    return Err(e);
                }
            }
        }

        tx.commit()?;
        msg_debug!(Message::AllMigrationsCompleted);

        Ok(())
    }

    /// Retrieves the current database schema version.
    fn get_current_version(&self, conn: &Connection) -> Result<u32> {
        let version: Option<u32> = conn.query_row("SELECT MAX(version) FROM migrations", [], |row| row.get(0)).unwrap_or(Some(0));

        Ok(version.unwrap_or(0))
    }

    /// Checks if a specific migration version has been applied.
    pub fn is_migration_applied(&self, conn: &Connection, version: u32) -> Result<bool> {
        let count: i32 = conn.query_row("SELECT COUNT(*) FROM migrations WHERE version = ?1", params![version], |row| row.get(0))?;

        Ok(count > 0)
    }

    /// Retrieves the complete migration history with timestamps.
    pub fn get_migration_history(&self, conn: &Connection) -> Result<Vec<(u32, String, String)>> {
        let mut stmt = conn.prepare("SELECT version, name, applied_at FROM migrations ORDER BY version")?;

        let history = stmt
            .query_map([], |row| Ok((row.get::<_, u32>(0)?, row.get::<_, String>(1)?, row.get::<_, String>(2)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(history)
    }

    /// Rolls back migrations to a specific target version (debug builds only).
    ///
    /// Simplified rollback that removes migration records without reversing
    /// schema changes; useful in development and tests only.
    #[cfg(debug_assertions)]
    pub fn rollback_to(&self, conn: &mut Connection, target_version: u32) -> Result<()> {
        let current_version = self.get_current_version(conn)?;

        if target_version >= current_version {
            msg_info!(Message::NothingToRollback);
            return Ok(());
        }

        msg_info!(Message::RollingBack(current_version, target_version));

        conn.execute("DELETE FROM migrations WHERE version > ?1", params![target_version])?;

        msg_success!(Message::RollbackCompleted(target_version));
        Ok(())
    }
}

impl Default for MigrationManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Initializes a database connection with all pending migrations applied.
pub fn init_with_migrations(conn: &mut Connection) -> Result<()> {
    let manager = MigrationManager::new();
    manager.run_migrations(conn)?;
    Ok(())
}

/// Retrieves the current database schema version.
pub fn get_db_version(conn: &Connection) -> Result<u32> {
    let manager = MigrationManager::new();
    manager.get_current_version(conn)
}

/// Checks if the database requires migration to the latest schema version.
pub fn needs_migration(conn: &Connection) -> Result<bool> {
    let manager = MigrationManager::new();
    let current = manager.get_current_version(conn)?;
    let latest = manager.migrations.last().map(|m| m.version).unwrap_or(0);
    Ok(current < latest)
}
