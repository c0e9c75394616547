//! # Command Line Parsing
//!
//! ## Usage
//! ```bash
//! franchise-report [--config PATH] <COMMAND> [OPTIONS]
//!
//! # Dashboard for one franchise over last week, compared with the week before
//! franchise-report summary --sales sales.json --franchise f1 --period last-week
//!
//! # Network view with week-over-week anomalies
//! franchise-report network --sales sales.json --from 2026-03-01 --to 2026-03-31
//!
//! # Move an order along its lifecycle
//! franchise-report transition --orders orders.json --order o1 --to-status shipped \
//!     --user u7 --role manager --franchise f1
//! ```

use std::path::PathBuf;
use std::str::FromStr;

use chrono::NaiveDate;
use franchise_core::export::ExportFormat;
use franchise_core::period::DateRange;
use franchise_core::{Actor, OrderStatus, Role};

use crate::error::{ReportError, ReportResult};

pub const USAGE: &str = "\
Franchise Dashboard Reports

Usage: franchise-report [--config PATH] <COMMAND> [OPTIONS]

Commands:
  summary      Sales summary, P&L, daily trend, categories, top products
  network      Per-franchise performance and revenue anomalies
  transfers    Import/export rollup for one franchise
  next         Statuses an order may move to from --status
  transition   Change an order's status
  delete       Soft-delete an order
  export       Query parameters for a PDF/Excel download
  init-config  Write the default configuration file

Options:
  --config <PATH>      Configuration file (default: platform config dir)
  --sales <FILE>       JSON array of sale records
  --orders <FILE>      JSON array of order records
  --transfers <FILE>   JSON array of transfer records
  --franchise <ID>     Limit to one franchise
  --from <DATE>        Window start, YYYY-MM-DD
  --to <DATE>          Window end, YYYY-MM-DD (inclusive)
  --period <NAME>      today | yesterday | this-week | last-week
  --today <DATE>       Anchor date for --period and anomalies (default: today)
  --order <ID>         Order id
  --status <STATUS>    Current status for `next`
  --to-status <S>      Target status for `transition` (alias: --target)
  --user <ID>          Acting user
  --role <ROLE>        super_admin | manager | staff
  --format <FORMAT>    pdf | excel
  -h, --help           Show this help message";

// =============================================================================
// Windows
// =============================================================================

/// Preset windows offered by the dashboard date picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedPeriod {
    Today,
    Yesterday,
    ThisWeek,
    LastWeek,
}

impl NamedPeriod {
    pub fn resolve(self, anchor: NaiveDate) -> DateRange {
        match self {
            NamedPeriod::Today => DateRange::today(anchor),
            NamedPeriod::Yesterday => DateRange::yesterday(anchor),
            NamedPeriod::ThisWeek => DateRange::this_week(anchor),
            NamedPeriod::LastWeek => DateRange::last_week(anchor),
        }
    }
}

impl FromStr for NamedPeriod {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "today" => Ok(NamedPeriod::Today),
            "yesterday" => Ok(NamedPeriod::Yesterday),
            "this-week" | "week" => Ok(NamedPeriod::ThisWeek),
            "last-week" => Ok(NamedPeriod::LastWeek),
            other => Err(ReportError::usage(format!("unknown period: {other}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    /// Everything in the file.
    All,
    Explicit(DateRange),
    Named(NamedPeriod),
}

impl Window {
    pub fn resolve(self, anchor: NaiveDate) -> Option<DateRange> {
        match self {
            Window::All => None,
            Window::Explicit(range) => Some(range),
            Window::Named(period) => Some(period.resolve(anchor)),
        }
    }
}

// =============================================================================
// Commands
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Summary {
        sales: PathBuf,
        franchise: Option<String>,
        window: Window,
        today: Option<NaiveDate>,
    },
    Network {
        sales: PathBuf,
        window: Window,
        today: Option<NaiveDate>,
    },
    Transfers {
        transfers: PathBuf,
        franchise: String,
    },
    Next {
        status: String,
    },
    Transition {
        orders: PathBuf,
        order_id: String,
        target: OrderStatus,
        actor: Actor,
    },
    Delete {
        orders: PathBuf,
        order_id: String,
    },
    Export {
        franchise: Option<String>,
        range: DateRange,
        format: ExportFormat,
    },
    InitConfig,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cli {
    pub config: Option<PathBuf>,
    pub command: Command,
}

/// Flag values collected in one pass, before the command decides which
/// it needs.
#[derive(Debug, Default)]
struct Flags {
    config: Option<PathBuf>,
    sales: Option<PathBuf>,
    orders: Option<PathBuf>,
    transfers: Option<PathBuf>,
    franchise: Option<String>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    period: Option<NamedPeriod>,
    today: Option<NaiveDate>,
    order: Option<String>,
    status: Option<String>,
    target: Option<String>,
    user: Option<String>,
    role: Option<Role>,
    format: Option<ExportFormat>,
}

fn parse_date(flag: &str, value: &str) -> ReportResult<NaiveDate> {
    let message = || format!("{flag} expects YYYY-MM-DD, got {value}");
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| ReportError::usage(message()))
}

fn required<T>(value: Option<T>, flag: &str) -> ReportResult<T> {
    value.ok_or_else(|| {
        ReportError::usage(format!("missing required option {flag}"))
    })
}

impl Flags {
    fn window(&self) -> ReportResult<Window> {
        match (self.from, self.to, self.period) {
            (None, None, None) => Ok(Window::All),
            (Some(from), Some(to), None) => Ok(Window::Explicit(DateRange::new(from, to)?)),
            (None, None, Some(period)) => Ok(Window::Named(period)),
            (_, _, Some(_)) => Err(ReportError::usage(
                "--period cannot be combined with --from/--to",
            )),
            _ => Err(ReportError::usage("--from and --to must be given together")),
        }
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Parses arguments, excluding the program name.
pub fn parse_args<I, S>(args: I) -> ReportResult<Cli>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut args = args.into_iter().map(Into::<String>::into);
    let mut flags = Flags::default();
    let mut command_name: Option<String> = None;

    while let Some(arg) = args.next() {
        if arg == "-h" || arg == "--help" {
            return Ok(Cli {
                config: flags.config,
                command: Command::Help,
            });
        }

        if !arg.starts_with("--") {
            if command_name.is_some() {
                return Err(ReportError::usage(format!("unexpected argument: {arg}")));
            }
            command_name = Some(arg);
            continue;
        }

        let value = args
            .next()
            .ok_or_else(|| ReportError::usage(format!("{arg} expects a value")))?;

        match arg.as_str() {
            "--config" => flags.config = Some(PathBuf::from(value)),
            "--sales" => flags.sales = Some(PathBuf::from(value)),
            "--orders" => flags.orders = Some(PathBuf::from(value)),
            "--transfers" => flags.transfers = Some(PathBuf::from(value)),
            "--franchise" => flags.franchise = Some(value),
            "--from" => flags.from = Some(parse_date(&arg, &value)?),
            "--to" => flags.to = Some(parse_date(&arg, &value)?),
            "--today" => flags.today = Some(parse_date(&arg, &value)?),
            "--period" => flags.period = Some(value.parse()?),
            "--order" => flags.order = Some(value),
            "--status" => flags.status = Some(value),
            "--to-status" | "--target" => flags.target = Some(value),
            "--user" => flags.user = Some(value),
            "--role" => flags.role = Some(value.parse()?),
            "--format" => flags.format = Some(value.parse()?),
            _ => return Err(ReportError::usage(format!("unknown option: {arg}"))),
        }
    }

    let command = match command_name.as_deref() {
        None | Some("help") => Command::Help,
        Some("summary") => Command::Summary {
            window: flags.window()?,
            sales: required(flags.sales, "--sales")?,
            franchise: flags.franchise,
            today: flags.today,
        },
        Some("network") => Command::Network {
            window: flags.window()?,
            sales: required(flags.sales, "--sales")?,
            today: flags.today,
        },
        Some("transfers") => Command::Transfers {
            transfers: required(flags.transfers, "--transfers")?,
            franchise: required(flags.franchise, "--franchise")?,
        },
        Some("next") => Command::Next {
            status: required(flags.status, "--status")?,
        },
        Some("transition") => {
            let target: OrderStatus = required(flags.target, "--to-status")?.parse()?;
            Command::Transition {
                orders: required(flags.orders, "--orders")?,
                order_id: required(flags.order, "--order")?,
                target,
                actor: Actor {
                    user_id: required(flags.user, "--user")?,
                    role: required(flags.role, "--role")?,
                    franchise_id: flags.franchise,
                },
            }
        }
        Some("delete") => Command::Delete {
            orders: required(flags.orders, "--orders")?,
            order_id: required(flags.order, "--order")?,
        },
        Some("export") => {
            let range = match flags.window()? {
                Window::Explicit(range) => range,
                _ => return Err(ReportError::usage("export needs --from and --to")),
            };
            Command::Export {
                franchise: flags.franchise,
                range,
                format: flags.format.unwrap_or(ExportFormat::Pdf),
            }
        }
        Some("init-config") => Command::InitConfig,
        Some(other) => return Err(ReportError::usage(format!("unknown command: {other}"))),
    };

    Ok(Cli {
        config: flags.config,
        command,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    #[test]
    fn test_summary_with_explicit_window() {
        let cli = parse_args([
            "--config", "report.toml", "summary", "--sales", "sales.json", "--franchise", "f1",
            "--from", "2026-03-01", "--to", "2026-03-07",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("report.toml")));
        assert_eq!(
            cli.command,
            Command::Summary {
                sales: PathBuf::from("sales.json"),
                franchise: Some("f1".to_string()),
                window: Window::Explicit(DateRange::new(date(1), date(7)).unwrap()),
                today: None,
            }
        );
    }

    #[test]
    fn test_named_period_resolves_against_anchor() {
        let cli = parse_args(["network", "--sales", "s.json", "--period", "last_week"]).unwrap();
        let Command::Network { window, .. } = cli.command else {
            panic!("expected network command");
        };
        // Thursday 12 March 2026 -> Mon 2 .. Sun 8 March.
        let range = window.resolve(date(12)).unwrap();
        assert_eq!((range.start, range.end), (date(2), date(8)));
        assert_eq!(Window::All.resolve(date(12)), None);
    }

    #[test]
    fn test_transition_builds_actor() {
        let cli = parse_args([
            "transition", "--orders", "o.json", "--order", "o1", "--to-status", "Shipped",
            "--user", "u7", "--role", "manager", "--franchise", "f1",
        ])
        .unwrap();

        let Command::Transition { target, actor, .. } = cli.command else {
            panic!("expected transition command");
        };
        assert_eq!(target, OrderStatus::Shipped);
        assert_eq!(actor.role, Role::Manager);
        assert_eq!(actor.franchise_id.as_deref(), Some("f1"));
    }

    #[test]
    fn test_usage_errors() {
        assert!(parse_args(["summary"]).is_err());
        let open_ended = ["summary", "--sales", "s.json", "--from", "2026-03-01"];
        assert!(parse_args(open_ended).is_err());
        let summary = |from: &str, to: &str| {
            parse_args(["summary", "--sales", "s.json", "--from", from, "--to", to])
        };
        assert!(summary("03/01/2026", "2026-03-02").is_err());
        assert!(summary("2026-03-09", "2026-03-02").is_err());
        let unknown_status = [
            "transition",
            "--orders",
            "o.json",
            "--order",
            "o1",
            "--to-status",
            "returned",
        ];
        assert!(parse_args(unknown_status).is_err());
        assert!(parse_args(["frobnicate"]).is_err());
        assert!(parse_args(["summary", "--sales"]).is_err());
    }

    #[test]
    fn test_help() {
        let no_args = parse_args(Vec::<String>::new()).unwrap();
        assert_eq!(no_args.command, Command::Help);
        let short = parse_args(["summary", "-h"]).unwrap();
        assert_eq!(short.command, Command::Help);
    }
}
