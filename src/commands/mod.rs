//! Command-line interface definition and dispatch.

pub mod category;
pub mod event;
pub mod export;
pub mod init;
pub mod item;
#[cfg(debug_assertions)]
pub mod migrations;
pub mod rental;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Manage item categories")]
    Category(category::CategoryArgs),
    #[command(about = "Manage inventory items")]
    Item(item::ItemArgs),
    #[command(about = "Manage events and their inventory allocations")]
    Event(event::EventArgs),
    #[command(about = "Manage rental orders")]
    Rental(rental::RentalArgs),
    #[command(about = "Export data to CSV or JSON")]
    Export(export::ExportArgs),
    #[cfg(debug_assertions)]
    #[command(about = "Database migration management (debug builds)")]
    Migrations(migrations::MigrationsArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Category(args) => category::cmd(args).await,
            Commands::Item(args) => item::cmd(args).await,
            Commands::Event(args) => event::cmd(args).await,
            Commands::Rental(args) => rental::cmd(args).await,
            Commands::Export(args) => export::cmd(args).await,
            #[cfg(debug_assertions)]
            Commands::Migrations(args) => migrations::cmd(args),
        }
    }
}
