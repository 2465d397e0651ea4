//! # Depo - Warehouse, Event and Rental Administration
//!
//! A command-line utility for tracking inventory items, grouping them into
//! categories, allocating them to scheduled events, and managing rental
//! orders against the same stock pool.
//!
//! ## Features
//!
//! - **Inventory Tracking**: Items with total and available quantities,
//!   physical attributes, condition and rental pricing
//! - **Availability Ledger**: One shared, transactional counter per item
//!   that stays consistent across event allocations, rental checkouts and
//!   returns
//! - **Event Allocations**: Reserve per-item quantities for scheduled events
//!   with all-or-nothing validation
//! - **Rental Orders**: Draft, dispatch, return and delete rental orders
//!   with price snapshots and discounts
//! - **Data Export**: Export inventory, events and rentals to CSV and JSON
//!
//! ## Usage
//!
//! ```rust,no_run
//! use depo::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
