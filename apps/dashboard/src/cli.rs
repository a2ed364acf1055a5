//! # Command Line
//!
//! Maps `stockroom <command> [args]` onto the dashboard commands. Output is
//! the command's JSON on stdout; errors are the `ApiError` JSON on stderr.
//!
//! ```text
//! stockroom items mouse 1
//!      │
//!      ▼
//! Command::parse ──► Command::Items { query: "mouse", page: 1 }
//!      │
//!      ▼
//! route() = Items ──► guard(Items, session user)
//!      │                   └── signed out? → UNAUTHENTICATED
//!      ▼
//! commands::item::list_items ──► serde_json::Value ──► stdout
//! ```

use std::fmt;
use std::path::PathBuf;

use stockroom_core::report::MOVEMENT_DAYS;
use stockroom_core::{Theme, TransactionKind};

use crate::navigation::Route;

pub const USAGE: &str = "\
Usage: stockroom <command> [args]

Catalog (sign-in required):
  items [query] [page]              Search items, 10 per page
  item <id>                         Item detail
  categories [query]                Categories with item counts
  suppliers [query]                 Suppliers with item counts
  transactions [ALL|IN|OUT|ADJUSTMENT]
                                    Transaction history, newest first
  record <item-id> <type> <amount> [reason]
                                    Record a stock movement
  dashboard                         Overview, distribution, movement
  movement [days]                   Daily in/out totals, default 10 days
  report                            Inventory report
  export [dir]                      Write items-export-<date>.csv
  import <file>                     Import items from .csv/.xls/.xlsx

Session:
  login <email> <password>
  register <name> <email> <password>
  logout
  whoami
  theme [light|dark|toggle]
  help";

/// Malformed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageError(pub String);

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for UsageError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeAction {
    Show,
    Set(Theme),
    Toggle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Items { query: String, page: usize },
    Item { id: String },
    Categories { query: String },
    Suppliers { query: String },
    Transactions { filter: String },
    Record {
        item_id: String,
        kind: TransactionKind,
        amount: i64,
        reason: Option<String>,
    },
    Dashboard,
    Movement { days: usize },
    Report,
    Export { dir: Option<PathBuf> },
    Import { path: PathBuf },
    Login { email: String, password: String },
    Register { name: String, email: String, password: String },
    Logout,
    Whoami,
    Theme(ThemeAction),
    Help,
}

fn arg<'a>(args: &'a [String], index: usize, name: &str) -> Result<&'a str, UsageError> {
    args.get(index)
        .map(String::as_str)
        .ok_or_else(|| UsageError(format!("missing <{}>", name)))
}

fn opt(args: &[String], index: usize) -> Option<String> {
    args.get(index).cloned()
}

impl Command {
    /// Parses the arguments after the program name.
    pub fn parse(args: &[String]) -> Result<Command, UsageError> {
        let Some(name) = args.first() else {
            return Ok(Command::Help);
        };

        let command = match name.as_str() {
            "items" => {
                let page = match args.get(2) {
                    Some(raw) => raw
                        .parse()
                        .map_err(|_| UsageError(format!("page must be a number, got '{}'", raw)))?,
                    None => 1,
                };
                Command::Items {
                    query: opt(args, 1).unwrap_or_default(),
                    page,
                }
            }
            "item" => Command::Item {
                id: arg(args, 1, "id")?.to_string(),
            },
            "categories" => Command::Categories {
                query: opt(args, 1).unwrap_or_default(),
            },
            "suppliers" => Command::Suppliers {
                query: opt(args, 1).unwrap_or_default(),
            },
            "transactions" => Command::Transactions {
                filter: opt(args, 1).unwrap_or_else(|| "ALL".to_string()),
            },
            "record" => {
                let kind = arg(args, 2, "type")?
                    .parse()
                    .map_err(|e| UsageError(format!("{}", e)))?;
                let raw = arg(args, 3, "amount")?;
                let amount = raw
                    .parse()
                    .map_err(|_| UsageError(format!("amount must be a number, got '{}'", raw)))?;
                Command::Record {
                    item_id: arg(args, 1, "item-id")?.to_string(),
                    kind,
                    amount,
                    reason: opt(args, 4),
                }
            }
            "dashboard" => Command::Dashboard,
            "movement" => {
                let days = match args.get(1) {
                    Some(raw) => raw
                        .parse()
                        .map_err(|_| UsageError(format!("days must be a number, got '{}'", raw)))?,
                    None => MOVEMENT_DAYS,
                };
                Command::Movement { days }
            }
            "report" => Command::Report,
            "export" => Command::Export {
                dir: opt(args, 1).map(PathBuf::from),
            },
            "import" => Command::Import {
                path: PathBuf::from(arg(args, 1, "file")?),
            },
            "login" => Command::Login {
                email: arg(args, 1, "email")?.to_string(),
                password: arg(args, 2, "password")?.to_string(),
            },
            "register" => Command::Register {
                name: arg(args, 1, "name")?.to_string(),
                email: arg(args, 2, "email")?.to_string(),
                password: arg(args, 3, "password")?.to_string(),
            },
            "logout" => Command::Logout,
            "whoami" => Command::Whoami,
            "theme" => Command::Theme(match args.get(1).map(String::as_str) {
                None => ThemeAction::Show,
                Some("toggle") => ThemeAction::Toggle,
                Some(other) => ThemeAction::Set(other.parse().map_err(UsageError)?),
            }),
            "help" | "--help" | "-h" => Command::Help,
            other => return Err(UsageError(format!("unknown command '{}'", other))),
        };
        Ok(command)
    }

    /// The screen this command stands in for, when it needs the sign-in
    /// check.
    pub fn route(&self) -> Option<Route> {
        let route = match self {
            Command::Items { .. } | Command::Export { .. } | Command::Import { .. } => Route::Items,
            Command::Item { id } => Route::ItemDetail(id.clone()),
            Command::Categories { .. } => Route::Categories,
            Command::Suppliers { .. } => Route::Suppliers,
            Command::Transactions { .. } | Command::Record { .. } => Route::Transactions,
            Command::Dashboard | Command::Movement { .. } => Route::Dashboard,
            Command::Report => Route::Reports,
            Command::Login { .. } => Route::Login,
            Command::Register { .. } => Route::Register,
            Command::Logout | Command::Whoami | Command::Theme(_) | Command::Help => return None,
        };
        Some(route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<Command, UsageError> {
        let args: Vec<String> = line.split_whitespace().map(String::from).collect();
        Command::parse(&args)
    }

    #[test]
    fn test_items_defaults() {
        assert_eq!(
            parse("items").unwrap(),
            Command::Items {
                query: String::new(),
                page: 1
            }
        );
        assert_eq!(
            parse("items desk 2").unwrap(),
            Command::Items {
                query: "desk".into(),
                page: 2
            }
        );
        assert!(parse("items desk two").is_err());
    }

    #[test]
    fn test_record_parses_kind_and_amount() {
        assert_eq!(
            parse("record 3 out 2").unwrap(),
            Command::Record {
                item_id: "3".into(),
                kind: TransactionKind::Out,
                amount: 2,
                reason: None,
            }
        );
        assert!(parse("record 3 sideways 2").is_err());
        assert!(parse("record 3 in").is_err());
    }

    #[test]
    fn test_theme_actions() {
        assert_eq!(parse("theme").unwrap(), Command::Theme(ThemeAction::Show));
        assert_eq!(
            parse("theme dark").unwrap(),
            Command::Theme(ThemeAction::Set(Theme::Dark))
        );
        assert_eq!(parse("theme toggle").unwrap(), Command::Theme(ThemeAction::Toggle));
        assert!(parse("theme purple").is_err());
    }

    #[test]
    fn test_missing_and_unknown() {
        assert_eq!(parse("").unwrap(), Command::Help);
        assert_eq!(parse("login admin@example.com").unwrap_err().0, "missing <password>");
        assert!(parse("frobnicate").is_err());
    }

    #[test]
    fn test_routes() {
        assert_eq!(parse("report").unwrap().route(), Some(Route::Reports));
        assert_eq!(
            parse("item 4").unwrap().route(),
            Some(Route::ItemDetail("4".into()))
        );
        assert_eq!(parse("whoami").unwrap().route(), None);
        assert_eq!(
            parse("movement").unwrap(),
            Command::Movement {
                days: MOVEMENT_DAYS
            }
        );
        assert_eq!(parse("movement 30").unwrap().route(), Some(Route::Dashboard));
    }
}
