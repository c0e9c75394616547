//! # Franchise Report CLI
//!
//! Prints dashboard payloads as JSON on stdout. Logs go to stderr.
//!
//! ## Usage
//! ```bash
//! franchise-report summary --sales sales.json --period this-week
//! franchise-report transfers --transfers transfers.json --franchise f1
//! franchise-report delete --orders orders.json --order o1
//! franchise-report --help
//! ```

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, Offset, Utc};
use serde::Serialize;
use tracing::info;

use franchise_core::export::ExportRequest;
use franchise_core::order_status::{request_transition, valid_next_statuses_for_label};
use franchise_core::transfer::summarize_transfers;
use franchise_report::cli::{parse_args, Command, USAGE};
use franchise_report::policy::RolePolicy;
use franchise_report::records::{load_sales, load_transfers};
use franchise_report::report::{dashboard_report, network_report};
use franchise_report::store::JsonOrderStore;
use franchise_report::{init_tracing, ReportConfig};

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}

/// Today in the configured reporting offset.
fn local_today(config: &ReportConfig) -> NaiveDate {
    let offset = config.utc_offset().unwrap_or_else(|| Utc.fix());
    Utc::now().with_timezone(&offset).date_naive()
}

fn main() -> Result<()> {
    init_tracing();

    let cli = parse_args(std::env::args().skip(1))?;
    if cli.command == Command::Help {
        println!("{USAGE}");
        return Ok(());
    }

    if cli.command == Command::InitConfig {
        let Some(path) = cli.config.or_else(ReportConfig::default_config_path) else {
            bail!("No config directory available; pass --config PATH");
        };
        ReportConfig::default().save(&path)?;
        println!("{}", path.display());
        return Ok(());
    }

    let config =
        ReportConfig::load(cli.config.clone()).context("Failed to load report configuration")?;

    match cli.command {
        Command::Summary {
            sales,
            franchise,
            window,
            today,
        } => {
            let anchor = today.unwrap_or_else(|| local_today(&config));
            let records = load_sales(&sales)?;
            let range = window.resolve(anchor);
            let report = dashboard_report(records, franchise.as_deref(), range, &config);
            print_json(&report)
        }

        Command::Network { sales, window, today } => {
            let anchor = today.unwrap_or_else(|| local_today(&config));
            let records = load_sales(&sales)?;
            let report = network_report(&records, window.resolve(anchor), anchor, &config);
            print_json(&report)
        }

        Command::Transfers { transfers, franchise } => {
            let records = load_transfers(&transfers)?;
            print_json(&summarize_transfers(&records, &franchise))
        }

        Command::Next { status } => print_json(&valid_next_statuses_for_label(&status)),

        Command::Transition {
            orders,
            order_id,
            target,
            actor,
        } => {
            let policy = RolePolicy::from_settings(&config.access);
            let mut store = JsonOrderStore::open(&orders)?;
            let order = store.get(&order_id)?.clone();

            let updated = request_transition(&order, target, &actor, &policy, &mut store)?;
            store.save()?;
            info!(
                order = %updated.id,
                from = %order.status,
                to = %updated.status,
                "Order status changed"
            );
            print_json(&updated)
        }

        Command::Delete { orders, order_id } => {
            let mut store = JsonOrderStore::open(&orders)?;
            let deleted = store.delete(&order_id, Utc::now())?;
            store.save()?;
            print_json(&deleted)
        }

        Command::Export {
            franchise,
            range,
            format,
        } => {
            let request = ExportRequest::new(franchise, range, format)?;
            print_json(&request.query_pairs())
        }

        Command::Help | Command::InitConfig => Ok(()),
    }
}
