//! Shared libraries: domain types, the availability ledger, pricing rules,
//! configuration, presentation and export helpers.

pub mod config;
pub mod data_storage;
pub mod event;
pub mod export;
pub mod item;
pub mod ledger;
pub mod messages;
pub mod pricing;
pub mod rental;
pub mod view;
