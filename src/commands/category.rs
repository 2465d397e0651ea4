//! Item category management commands.

use crate::{
    db::categories::Categories,
    libs::{messages::Message, view::View},
    msg_error_anyhow, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct CategoryArgs {
    #[command(subcommand)]
    command: CategoryCommand,
}

#[derive(Debug, Subcommand)]
enum CategoryCommand {
    /// Create a new category
    Create { name: String },
    /// List all categories with item counts
    List,
    /// Rename a category
    Rename { name: String, new_name: String },
    /// Delete a category, moving its items to 'Uncategorized'
    Delete {
        name: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

pub async fn cmd(args: CategoryArgs) -> Result<()> {
    let mut categories = Categories::new()?;

    match args.command {
        CategoryCommand::Create { name } => {
            categories.create(&name)?;
            msg_success!(Message::CategoryCreated(name));
        }
        CategoryCommand::List => {
            let all = categories.list()?;
            if all.is_empty() {
                msg_info!(Message::NoCategoriesFound);
                return Ok(());
            }
            msg_print!(Message::CategoryListHeader, true);
            View::categories(&all).map_err(|e| anyhow::anyhow!(e.to_string()))?;
        }
        CategoryCommand::Rename { name, new_name } => {
            let category = categories
                .get_by_name(&name)?
                .ok_or_else(|| msg_error_anyhow!(Message::CategoryNotFound(name.clone())))?;
            if categories.get_by_name(&new_name)?.is_some() {
                return Err(msg_error_anyhow!(Message::CategoryAlreadyExists(new_name)));
            }
            categories.rename(category.id.unwrap_or_default(), &new_name)?;
            msg_success!(Message::CategoryRenamed(name, new_name));
        }
        CategoryCommand::Delete { name, yes } => {
            let category = categories
                .get_by_name(&name)?
                .ok_or_else(|| msg_error_anyhow!(Message::CategoryNotFound(name.clone())))?;

            if !yes {
                let confirmed = Confirm::with_theme(&ColorfulTheme::default())
                    .with_prompt(format!("Delete category '{}'? Its items move to 'Uncategorized'.", name))
                    .default(false)
                    .interact()?;
                if !confirmed {
                    msg_info!(Message::OperationCancelled);
                    return Ok(());
                }
            }

            let reassigned = categories.delete(category.id.unwrap_or_default())?;
            msg_success!(Message::CategoryDeleted(name));
            if reassigned > 0 {
                msg_info!(Message::ItemsReassignedToDefault(reassigned));
            }
        }
    }

    Ok(())
}
