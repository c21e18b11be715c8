use std::str::FromStr;

use thiserror::Error;

use stockdash_core::SortKey;
use stockdash_market_data::Interval;

/// One line of user input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Add(String),
    Remove(String),
    Refresh,
    Sort(SortKey),
    Chart { symbol: String, interval: Interval },
    List,
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command '{0}'. Type 'help' for a list of commands.")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("{0}")]
    Invalid(String),
}

pub const HELP: &str = "\
Commands:
  add <SYMBOL>                    track a symbol
  remove <SYMBOL>                 stop tracking a symbol
  refresh                         fetch quotes for every tracked symbol
  sort <symbol|price|change>      sort the table (repeat to flip direction)
  chart <SYMBOL> [5min|15min|30min]  show the intraday chart
  list                            show the quote table
  help                            show this help
  quit                            exit";

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let Some(name) = parts.next() else {
            return Err(CommandError::Usage("help"));
        };
        let args: Vec<&str> = parts.collect();

        match (name.to_ascii_lowercase().as_str(), args.as_slice()) {
            ("add" | "a", [symbol]) => Ok(Command::Add(symbol.to_string())),
            ("add" | "a", _) => Err(CommandError::Usage("add <SYMBOL>")),
            ("remove" | "rm", [symbol]) => Ok(Command::Remove(symbol.to_string())),
            ("remove" | "rm", _) => Err(CommandError::Usage("remove <SYMBOL>")),
            ("refresh" | "r", []) => Ok(Command::Refresh),
            ("sort" | "s", [key]) => key
                .parse()
                .map(Command::Sort)
                .map_err(|e: stockdash_core::quotes::ParseSortKeyError| {
                    CommandError::Invalid(e.to_string())
                }),
            ("sort" | "s", _) => Err(CommandError::Usage("sort <symbol|price|change>")),
            ("chart" | "c", [symbol]) => Ok(Command::Chart {
                symbol: symbol.to_string(),
                interval: Interval::default(),
            }),
            ("chart" | "c", [symbol, interval]) => interval
                .parse()
                .map(|interval| Command::Chart {
                    symbol: symbol.to_string(),
                    interval,
                })
                .map_err(|e: stockdash_market_data::ParseIntervalError| {
                    CommandError::Invalid(e.to_string())
                }),
            ("chart" | "c", _) => Err(CommandError::Usage("chart <SYMBOL> [5min|15min|30min]")),
            ("list" | "ls", []) => Ok(Command::List),
            ("help" | "h" | "?", _) => Ok(Command::Help),
            ("quit" | "exit" | "q", _) => Ok(Command::Quit),
            (other, _) => Err(CommandError::Unknown(other.to_string())),
        }
    }
}
