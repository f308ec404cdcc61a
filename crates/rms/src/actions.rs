//! One-shot commands against the write and detail endpoints

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use inquire::Confirm;
use rms_search::OrderStatus;
use rms_ui::{FieldCheck, format_currency, format_phone, validate_email, validate_phone};

use crate::config::Config;
use crate::display::badge_colored;

#[derive(Args, Debug)]
pub struct OrderStatusArgs {
    /// Order number
    pub order_id: u64,

    /// New status: pending, confirmed, preparing, ready, delivered or cancelled
    pub status: OrderStatus,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Args, Debug)]
pub struct ToggleItemArgs {
    /// Menu item id
    pub item_id: u64,
}

#[derive(Args, Debug)]
pub struct CustomerStatsArgs {
    /// Customer id
    pub customer_id: u64,
}

#[derive(Args, Debug)]
pub struct OrderSummaryArgs {
    /// Order number
    pub order_id: u64,
}

pub fn order_status(args: OrderStatusArgs, config: &Config) -> Result<()> {
    if !args.yes {
        let confirmed = Confirm::new(&format!(
            "Set order #{} to {}?",
            args.order_id,
            args.status.label()
        ))
        .with_default(false)
        .prompt()
        .context("Confirmation prompt failed (use --yes to skip it)")?;
        if !confirmed {
            println!("{}", "Cancelled".dimmed());
            return Ok(());
        }
    }

    let reply = config
        .client()?
        .update_order_status(args.order_id, args.status)
        .with_context(|| format!("Error updating order #{}", args.order_id))?;

    let new_status = reply
        .new_status
        .as_deref()
        .unwrap_or(args.status.as_str())
        .to_string();
    println!(
        "{} {} {}",
        "✓".green(),
        reply.message.unwrap_or_default(),
        badge_colored(&format!("[{new_status}]"), OrderStatus::badge_color_for(&new_status))
    );
    Ok(())
}

pub fn toggle_item(args: ToggleItemArgs, config: &Config) -> Result<()> {
    let reply = config
        .client()?
        .toggle_item_availability(args.item_id)
        .with_context(|| format!("Error toggling menu item {}", args.item_id))?;

    let state = match reply.is_available {
        Some(true) => "available".green(),
        Some(false) => "unavailable".red(),
        None => "unknown".dimmed(),
    };
    println!(
        "{} {} (now {state})",
        "✓".green(),
        reply.message.unwrap_or_default()
    );
    Ok(())
}

pub fn customer_stats(args: CustomerStatsArgs, config: &Config) -> Result<()> {
    let stats = config
        .client()?
        .customer_stats(args.customer_id)
        .with_context(|| format!("Failed to load customer {}", args.customer_id))?;

    println!("{}", stats.name.bold());
    print_contact("Phone:", phone_field(&stats.phone));
    print_contact("Email:", email_field(&stats.email));
    println!("  Orders:       {}", stats.total_orders);
    println!(
        "  Total spent:  {}",
        format_currency(stats.total_spent, &config.ui.currency)
    );
    Ok(())
}

/// Shown value and, when the stored value looks wrong, why
type Contact = (String, Option<&'static str>);

fn phone_field(raw: &str) -> Contact {
    let digits = raw.chars().filter(char::is_ascii_digit).count();
    match validate_phone(raw) {
        FieldCheck::Empty => ("-".to_string(), None),
        FieldCheck::Invalid(reason) => (raw.to_string(), Some(reason)),
        FieldCheck::Valid if digits >= 10 => (format_phone(raw), None),
        FieldCheck::Valid => (raw.to_string(), None),
    }
}

fn email_field(raw: &str) -> Contact {
    match validate_email(raw) {
        FieldCheck::Empty => ("-".to_string(), None),
        FieldCheck::Invalid(reason) => (raw.to_string(), Some(reason)),
        FieldCheck::Valid => (raw.to_string(), None),
    }
}

fn print_contact(label: &str, (value, problem): Contact) {
    match problem {
        Some(reason) => println!("  {label:<14}{value} {}", format!("({reason})").yellow()),
        None => println!("  {label:<14}{value}"),
    }
}

pub fn order_summary(args: OrderSummaryArgs, config: &Config) -> Result<()> {
    let summary = config
        .client()?
        .order_summary(args.order_id)
        .with_context(|| format!("Failed to load order #{}", args.order_id))?;
    let currency = &config.ui.currency;

    println!(
        "{} {} {}",
        format!("Order #{}", args.order_id).bold(),
        summary.customer,
        format!("[{}]", summary.status).dimmed()
    );
    for line in &summary.items {
        println!(
            "  {:>3} × {:<30} {:>10} {:>10}",
            line.quantity,
            line.name,
            format_currency(line.price, currency),
            format_currency(line.total, currency)
        );
    }
    println!(
        "  {} items, total {}",
        summary.total_items,
        format_currency(summary.total_price, currency).bold()
    );
    Ok(())
}
