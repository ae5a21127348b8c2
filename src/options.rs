use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Result};

use crate::constants::{API_URL, DEFAULT_ITEM_DATA_PATH, RATE_LIMIT_WINDOW, REQUESTS_PER_WINDOW};

#[derive(Debug, Clone)]
pub struct ParserOptions {
    pub base_url: String,
    pub api_key: String,
    pub item_data_path: PathBuf,
    pub requests_per_window: usize,
    pub window: Duration,
}

impl ParserOptions {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: API_URL.to_string(),
            api_key: api_key.into(),
            item_data_path: PathBuf::from(DEFAULT_ITEM_DATA_PATH),
            requests_per_window: REQUESTS_PER_WINDOW,
            window: RATE_LIMIT_WINDOW,
        }
    }

    /// `WCL_KEY` is required; `WCL_BASE_URL` and `ITEM_DATA_PATH` override the defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    pub fn from_vars(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = get("WCL_KEY")
            .filter(|key| !key.is_empty())
            .ok_or_else(|| anyhow!("WCL_KEY is not set"))?;

        let mut options = Self::new(api_key);

        if let Some(base_url) = get("WCL_BASE_URL") {
            options.base_url = base_url;
        }

        if let Some(path) = get("ITEM_DATA_PATH") {
            options.item_data_path = PathBuf::from(path);
        }

        Ok(options)
    }
}
