//! Centralized user-facing messages.
//!
//! All wording lives in the [`Message`] enum and its `Display` impl; the
//! macros in [`macros`] decide whether a message goes to the console or to
//! the `tracing` subsystem.

pub mod display;
pub mod macros;
pub mod types;

pub use types::Message;
