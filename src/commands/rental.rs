//! Rental order management commands.
//!
//! Drafting, line edits, dispatch, returns and payment all go through the
//! rentals repository; this module only parses arguments, resolves item
//! references and renders the results.

use crate::{
    db::{items::Items, rentals::Rentals},
    libs::{
        config::Config,
        messages::Message,
        rental::{PaymentStatus, Rental, RentalState, ReturnLine},
        view::View,
    },
    msg_error_anyhow, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};
use rust_decimal::Decimal;

#[derive(Debug, Args)]
pub struct RentalArgs {
    #[command(subcommand)]
    command: RentalCommand,
}

#[derive(Debug, Subcommand)]
enum RentalCommand {
    /// Create a new draft rental
    Create {
        client: String,
        #[arg(long)]
        contact: Option<String>,
        /// Rental start date (YYYY-MM-DD); defaults to today
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Expected return date (YYYY-MM-DD)
        #[arg(long)]
        to: NaiveDate,
        /// Percentage discount on the order total
        #[arg(long, default_value = "0")]
        discount: Decimal,
        #[arg(long)]
        notes: Option<String>,
    },
    /// List rental orders
    List {
        /// Case-insensitive client name substring
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show a rental with its lines and price summary
    Show { id: i64 },
    /// Edit a draft rental's client info, dates or discount
    Edit {
        id: i64,
        #[arg(long)]
        client: Option<String>,
        #[arg(long)]
        contact: Option<String>,
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
        #[arg(long)]
        discount: Option<Decimal>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Add units of an item to a draft rental
    Add {
        id: i64,
        item: String,
        #[arg(short, long, default_value_t = 1)]
        quantity: i64,
    },
    /// Set the rented quantity of a draft line
    SetQty { id: i64, item: String, quantity: i64 },
    /// Remove a line from a draft rental
    Remove { id: i64, item: String },
    /// Dispatch a draft rental to the client
    Dispatch { id: i64 },
    /// Record returned items for a dispatched rental
    Return {
        id: i64,
        /// Cumulative returned quantities as ITEM=QTY
        #[arg(value_name = "ITEM=QTY")]
        lines: Vec<String>,
        /// Return every outstanding unit on every line
        #[arg(long, conflicts_with = "lines")]
        all: bool,
        /// Items whose returned units are damaged; written off, not restocked
        #[arg(long, value_name = "ITEM")]
        damaged: Vec<String>,
        /// Condition notes recorded on damaged items
        #[arg(long)]
        notes: Option<String>,
    },
    /// Set the payment status of a dispatched or returned rental
    Pay {
        id: i64,
        /// One of: unpaid, paid, invoice
        status: PaymentStatus,
    },
    /// Delete a rental, returning outstanding items to stock
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

pub async fn cmd(args: RentalArgs) -> Result<()> {
    let mut rentals = Rentals::new()?;

    match args.command {
        RentalCommand::Create {
            client,
            contact,
            from,
            to,
            discount,
            notes,
        } => {
            let from = from.unwrap_or_else(|| Local::now().date_naive());
            if to < from {
                return Err(msg_error_anyhow!(Message::Custom(format!(
                    "Expected return date {} is before rental date {}",
                    to, from
                ))));
            }

            let mut rental = Rental::new(&client, from, to);
            rental.contact_info = contact.unwrap_or_default();
            rental.discount_percentage = discount;
            rental.notes = notes;

            let id = rentals.create_draft(&rental)?;
            msg_success!(Message::RentalDrafted(id));
            msg_info!(Message::DraftResumeHint(id));
        }
        RentalCommand::List { search } => {
            let all = rentals.list(search.as_deref())?;
            if all.is_empty() {
                msg_info!(Message::NoRentalsFound);
                return Ok(());
            }
            msg_print!(Message::RentalListHeader, true);
            View::rentals(&all).map_err(|e| anyhow::anyhow!(e.to_string()))?;
        }
        RentalCommand::Show { id } => {
            let rental = require(&mut rentals, id)?;
            let lines = rentals.lines(id)?;
            let currency = Config::read()?.currency_symbol();

            msg_print!(Message::RentalSummaryHeader(id), true);
            View::rental_details(&rental, &lines, &currency).map_err(|e| anyhow::anyhow!(e.to_string()))?;
            if rental.state == RentalState::Draft {
                msg_info!(Message::DraftResumeHint(id));
            }
        }
        RentalCommand::Edit {
            id,
            client,
            contact,
            from,
            to,
            discount,
            notes,
        } => {
            let mut rental = require(&mut rentals, id)?;
            if let Some(client) = client {
                rental.client_name = client;
            }
            if let Some(contact) = contact {
                rental.contact_info = contact;
            }
            if let Some(from) = from {
                rental.rental_date = from;
            }
            if let Some(to) = to {
                rental.expected_return_date = to;
            }
            if rental.expected_return_date < rental.rental_date {
                return Err(msg_error_anyhow!(Message::Custom(format!(
                    "Expected return date {} is before rental date {}",
                    rental.expected_return_date, rental.rental_date
                ))));
            }
            if let Some(discount) = discount {
                rental.discount_percentage = discount;
            }
            if let Some(notes) = notes {
                rental.notes = Some(notes);
            }

            rentals.update_draft(&rental)?;
            msg_success!(Message::RentalUpdated(id));
        }
        RentalCommand::Add { id, item, quantity } => {
            let (item_id, item_name) = resolve_item(&item)?;
            rentals.add_line(id, item_id, quantity)?;
            msg_success!(Message::RentalLineAdded(item_name, quantity));
        }
        RentalCommand::SetQty { id, item, quantity } => {
            let (item_id, item_name) = resolve_item(&item)?;
            rentals.set_line_quantity(id, item_id, quantity)?;
            msg_success!(Message::RentalQuantitySet(item_name, quantity));
        }
        RentalCommand::Remove { id, item } => {
            let (item_id, item_name) = resolve_item(&item)?;
            rentals.remove_line(id, item_id)?;
            msg_success!(Message::RentalLineRemoved(item_name));
        }
        RentalCommand::Dispatch { id } => {
            rentals.dispatch(id)?;
            msg_success!(Message::RentalDispatched(id));
        }
        RentalCommand::Return {
            id,
            lines,
            all,
            damaged,
            notes,
        } => {
            let returns = build_returns(&mut rentals, id, &lines, all, &damaged, notes)?;
            let fully_returned = rentals.process_return(id, &returns)?;
            if fully_returned {
                msg_success!(Message::RentalReturned(id));
            } else {
                msg_info!(Message::RentalPartiallyReturned(id));
            }
        }
        RentalCommand::Pay { id, status } => {
            rentals.set_payment(id, status)?;
            msg_success!(Message::PaymentStatusSet(id, status.to_string()));
        }
        RentalCommand::Delete { id, yes } => {
            require(&mut rentals, id)?;

            if !yes {
                let confirmed = Confirm::with_theme(&ColorfulTheme::default())
                    .with_prompt(format!("Delete rental {}? Outstanding items return to stock.", id))
                    .default(false)
                    .interact()?;
                if !confirmed {
                    msg_info!(Message::OperationCancelled);
                    return Ok(());
                }
            }

            rentals.delete(id)?;
            msg_success!(Message::RentalDeleted(id));
        }
    }

    Ok(())
}

fn require(rentals: &mut Rentals, id: i64) -> Result<Rental> {
    rentals.get_by_id(id)?.ok_or_else(|| msg_error_anyhow!(Message::RentalNotFound(id)))
}

fn resolve_item(spec: &str) -> Result<(i64, String)> {
    let mut items = Items::new()?;
    let item = match spec.parse::<i64>() {
        Ok(id) => items.get_by_id(id)?,
        Err(_) => items.get_by_name(spec)?,
    }
    .ok_or_else(|| msg_error_anyhow!(Message::ItemNotFound(spec.to_string())))?;
    Ok((item.id.unwrap_or_default(), item.name))
}

/// Builds the return lines from either explicit `ITEM=QTY` specs or `--all`.
fn build_returns(
    rentals: &mut Rentals,
    rental_id: i64,
    specs: &[String],
    all: bool,
    damaged: &[String],
    notes: Option<String>,
) -> Result<Vec<ReturnLine>> {
    let damaged_ids = damaged.iter().map(|spec| resolve_item(spec)).collect::<Result<Vec<_>>>()?;
    let is_damaged = |item_id: i64| damaged_ids.iter().any(|(id, _)| *id == item_id);

    if all {
        let returns = rentals
            .lines(rental_id)?
            .iter()
            .map(|line| ReturnLine {
                item_id: line.item_id,
                returned: line.quantity_rented,
                damaged: is_damaged(line.item_id),
                notes: notes.clone(),
            })
            .collect();
        return Ok(returns);
    }

    if specs.is_empty() {
        return Err(msg_error_anyhow!(Message::Custom(
            "Nothing to return: pass ITEM=QTY lines or --all".to_string()
        )));
    }

    let mut returns = Vec::with_capacity(specs.len());
    for spec in specs {
        let (item_spec, quantity_spec) = spec
            .split_once('=')
            .ok_or_else(|| msg_error_anyhow!(Message::InvalidItemSpec(spec.clone())))?;
        let returned: i64 = quantity_spec
            .trim()
            .parse()
            .map_err(|_| msg_error_anyhow!(Message::InvalidItemSpec(spec.clone())))?;
        let (item_id, _) = resolve_item(item_spec.trim())?;

        returns.push(ReturnLine {
            item_id,
            returned,
            damaged: is_damaged(item_id),
            notes: notes.clone(),
        });
    }

    Ok(returns)
}
