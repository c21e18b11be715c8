/// Symbols shown when no watch-list has been saved yet (or it is unreadable)
pub const DEFAULT_WATCHLIST: [&str; 4] = ["AAPL", "MSFT", "GOOGL", "TSLA"];

/// Storage key under which the watch-list is persisted
pub const WATCHLIST_STORAGE_KEY: &str = "tickers";

/// File name of the key-value store inside the data directory
pub const STORAGE_FILE_NAME: &str = "storage.json";

/// Longest ticker symbol accepted from user input
pub const MAX_SYMBOL_LEN: usize = 15;
