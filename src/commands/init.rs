//! Application configuration initialization command.
//!
//! Runs an interactive setup wizard covering the configurable modules:
//! display settings (currency symbol) and export defaults.

use crate::{
    libs::{config::Config, data_storage::DataStorage, messages::Message},
    msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;
use std::fs;

/// Command-line arguments for the initialization command.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Remove the existing configuration file instead of creating a new one
    #[arg(short, long)]
    delete: bool,
}

pub fn cmd(init_args: InitArgs) -> Result<()> {
    if init_args.delete {
        let path = DataStorage::new()
            .get_path(crate::libs::config::CONFIG_FILE_NAME)
            .map_err(|e| anyhow::anyhow!(e.to_string()))?;
        if path.exists() {
            fs::remove_file(&path)?;
        } else {
            msg_info!(Message::ConfigFileNotFound);
        }
        return Ok(());
    }

    // Run interactive configuration wizard
    Config::init()?.save()?;

    msg_success!(Message::ConfigSaved);
    Ok(())
}
