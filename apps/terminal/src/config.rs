use std::path::PathBuf;

use stockdash_core::constants::STORAGE_FILE_NAME;
use stockdash_market_data::provider::alpha_vantage::BASE_URL;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Debug)]
pub struct Config {
    /// Alpha Vantage key; `None` selects the demo key
    pub api_key: Option<String>,
    pub api_base: String,
    pub data_dir: PathBuf,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("ALPHA_VANTAGE_KEY")
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        let api_base = lookup("STOCKDASH_API_BASE")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| BASE_URL.to_string());
        let data_dir = lookup("STOCKDASH_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./data"));
        let log_format = match lookup("STOCKDASH_LOG_FORMAT") {
            Some(f) if f.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };
        Self {
            api_key,
            api_base,
            data_dir,
            log_format,
        }
    }

    pub fn storage_path(&self) -> PathBuf {
        self.data_dir.join(STORAGE_FILE_NAME)
    }
}
