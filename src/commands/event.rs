//! Event management commands, including the inventory allocation save.

use crate::{
    db::{events::Events, items::Items},
    libs::{event::Event, messages::Message, view::View},
    msg_error_anyhow, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct EventArgs {
    #[command(subcommand)]
    command: EventCommand,
}

#[derive(Debug, Subcommand)]
enum EventCommand {
    /// Create a new event
    Create {
        name: String,
        /// Start date (YYYY-MM-DD)
        #[arg(short, long)]
        start: NaiveDate,
        /// End date (YYYY-MM-DD)
        #[arg(short, long)]
        end: NaiveDate,
        #[arg(long)]
        client: Option<String>,
        #[arg(long)]
        contact: Option<String>,
        #[arg(short, long)]
        location: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        /// Color tag for calendar rendering
        #[arg(long)]
        color: Option<String>,
    },
    /// List events ordered by start date
    List,
    /// Show an event and its allocated items
    Show { id: i64 },
    /// Edit an event's fields
    Edit {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(short, long)]
        start: Option<NaiveDate>,
        #[arg(short, long)]
        end: Option<NaiveDate>,
        #[arg(long)]
        client: Option<String>,
        #[arg(long)]
        contact: Option<String>,
        #[arg(short, long)]
        location: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(long)]
        color: Option<String>,
    },
    /// Show or replace the event's inventory allocation
    Items {
        id: i64,
        /// Replace the allocation with these ITEM=QTY lines; items not listed
        /// are released back to stock
        #[arg(short, long, value_name = "ITEM=QTY")]
        set: Vec<String>,
    },
    /// Print the truck loading list, highest loading priority first
    Loading { id: i64 },
    /// Delete an event, returning its allocated items to stock
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

pub async fn cmd(args: EventArgs) -> Result<()> {
    let mut events = Events::new()?;

    match args.command {
        EventCommand::Create {
            name,
            start,
            end,
            client,
            contact,
            location,
            description,
            color,
        } => {
            if end < start {
                return Err(msg_error_anyhow!(Message::Custom(format!(
                    "End date {} is before start date {}",
                    end, start
                ))));
            }
            let mut event = Event::new(&name, start, end);
            event.client_name = client;
            event.client_contact = contact;
            event.location = location;
            event.description = description;
            event.color = color;

            events.create(&event)?;
            msg_success!(Message::EventCreated(name));
        }
        EventCommand::List => {
            let all = events.list()?;
            if all.is_empty() {
                msg_info!(Message::NoEventsFound);
                return Ok(());
            }
            msg_print!(Message::EventListHeader, true);
            View::events(&all).map_err(|e| anyhow::anyhow!(e.to_string()))?;
        }
        EventCommand::Show { id } => {
            let event = require(&mut events, id)?;
            View::events(std::slice::from_ref(&event)).map_err(|e| anyhow::anyhow!(e.to_string()))?;

            let items = events.items_for(id)?;
            if items.is_empty() {
                msg_info!(Message::NoEventItems);
            } else {
                msg_print!(Message::EventItemsHeader(event.name), true);
                View::event_items(&items).map_err(|e| anyhow::anyhow!(e.to_string()))?;
            }
        }
        EventCommand::Edit {
            id,
            name,
            start,
            end,
            client,
            contact,
            location,
            description,
            color,
        } => {
            let mut event = require(&mut events, id)?;
            if let Some(name) = name {
                event.name = name;
            }
            if let Some(start) = start {
                event.start_date = start;
            }
            if let Some(end) = end {
                event.end_date = end;
            }
            if event.end_date < event.start_date {
                return Err(msg_error_anyhow!(Message::Custom(format!(
                    "End date {} is before start date {}",
                    event.end_date, event.start_date
                ))));
            }
            if let Some(client) = client {
                event.client_name = Some(client);
            }
            if let Some(contact) = contact {
                event.client_contact = Some(contact);
            }
            if let Some(location) = location {
                event.location = Some(location);
            }
            if let Some(description) = description {
                event.description = Some(description);
            }
            if let Some(color) = color {
                event.color = Some(color);
            }

            events.update(&event)?;
            msg_success!(Message::EventUpdated(event.name));
        }
        EventCommand::Items { id, set } => {
            let event = require(&mut events, id)?;

            if set.is_empty() {
                let items = events.items_for(id)?;
                if items.is_empty() {
                    msg_info!(Message::NoEventItems);
                    return Ok(());
                }
                msg_print!(Message::EventItemsHeader(event.name), true);
                View::event_items(&items).map_err(|e| anyhow::anyhow!(e.to_string()))?;
                return Ok(());
            }

            let requested = parse_item_specs(&set)?;
            events.set_items(id, &requested)?;
            msg_success!(Message::EventItemsSaved(event.name));
        }
        EventCommand::Loading { id } => {
            let event = require(&mut events, id)?;
            let rows = events.loading_plan(id)?;
            if rows.is_empty() {
                msg_info!(Message::NoEventItems);
                return Ok(());
            }
            msg_print!(Message::EventLoadingHeader(event.name), true);
            View::loading_plan(&rows).map_err(|e| anyhow::anyhow!(e.to_string()))?;
        }
        EventCommand::Delete { id, yes } => {
            let event = require(&mut events, id)?;

            if !yes {
                let confirmed = Confirm::with_theme(&ColorfulTheme::default())
                    .with_prompt(Message::ConfirmDeleteEvent(event.name.clone()).to_string())
                    .default(false)
                    .interact()?;
                if !confirmed {
                    msg_info!(Message::OperationCancelled);
                    return Ok(());
                }
            }

            events.delete(id)?;
            msg_success!(Message::EventDeleted(event.name));
        }
    }

    Ok(())
}

fn require(events: &mut Events, id: i64) -> Result<Event> {
    events.get_by_id(id)?.ok_or_else(|| msg_error_anyhow!(Message::EventNotFound(id)))
}

/// Parses `ITEM=QTY` arguments, resolving items by id or name.
fn parse_item_specs(specs: &[String]) -> Result<Vec<(i64, i64)>> {
    let mut items = Items::new()?;
    let mut requested = Vec::with_capacity(specs.len());

    for spec in specs {
        let (item_spec, quantity_spec) = spec
            .split_once('=')
            .ok_or_else(|| msg_error_anyhow!(Message::InvalidItemSpec(spec.clone())))?;
        let quantity: i64 = quantity_spec
            .trim()
            .parse()
            .map_err(|_| msg_error_anyhow!(Message::InvalidItemSpec(spec.clone())))?;

        let item_spec = item_spec.trim();
        let item = match item_spec.parse::<i64>() {
            Ok(id) => items.get_by_id(id)?,
            Err(_) => items.get_by_name(item_spec)?,
        }
        .ok_or_else(|| msg_error_anyhow!(Message::ItemNotFound(item_spec.to_string())))?;

        requested.push((item.id.unwrap_or_default(), quantity));
    }

    Ok(requested)
}
