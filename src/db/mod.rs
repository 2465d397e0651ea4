//! Database layer with repositories for all stored entities.
//!
//! Each entity gets its own repository struct owning a connection, with the
//! SQL kept in module-level constants. Schema changes go through the
//! versioned migration system in [`migrations`].

pub mod categories;
pub mod db;
pub mod events;
pub mod items;
pub mod migrations;
pub mod rentals;
