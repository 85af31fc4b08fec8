use std::path::PathBuf;
use std::str::FromStr;

use crate::errors::{TenderError, TenderResult};

pub const DEFAULT_OUTPUT_PATH: &str = "tenders-data.json";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_RECORDS: usize = 2000;

pub const DEFAULT_SELL2WALES_URL: &str = "https://api.sell2wales.gov.wales";
pub const DEFAULT_FIND_A_TENDER_URL: &str =
    "https://www.find-tender.service.gov.uk/api/1.0/ocdsReleasePackages";
pub const DEFAULT_CONTRACTS_FINDER_URL: &str =
    "https://www.contractsfinder.service.gov.uk/Published/Notices/OCDS/Search?order=publishedDate&stage=active";

#[derive(Debug, Clone)]
pub struct Config {
    pub output_path: PathBuf,
    pub http_timeout_secs: u64,
    pub max_records: usize,
    pub sell2wales_url: String,
    pub find_a_tender_url: String,
    pub contracts_finder_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            http_timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_records: DEFAULT_MAX_RECORDS,
            sell2wales_url: DEFAULT_SELL2WALES_URL.to_string(),
            find_a_tender_url: DEFAULT_FIND_A_TENDER_URL.to_string(),
            contracts_finder_url: DEFAULT_CONTRACTS_FINDER_URL.to_string(),
        }
    }
}

impl Config {
    /// Get the directory where the executable is located
    fn exe_dir() -> Option<PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    pub fn from_env() -> TenderResult<Self> {
        // Try to load .env from executable's directory first
        if let Some(dir) = Self::exe_dir() {
            let env_path = dir.join(".env");
            if env_path.exists() {
                dotenvy::from_path(&env_path).ok();
            }
        }
        // Fall back to current directory
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup; unset keys keep their defaults
    pub fn from_lookup<F>(lookup: F) -> TenderResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let output_path = lookup("TENDERS_OUTPUT_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.output_path);

        let http_timeout_secs = parse_var(&lookup, "TENDERS_HTTP_TIMEOUT_SECS")?
            .unwrap_or(defaults.http_timeout_secs);

        let max_records =
            parse_var(&lookup, "TENDERS_MAX_RECORDS")?.unwrap_or(defaults.max_records);

        Ok(Self {
            output_path,
            http_timeout_secs,
            max_records,
            sell2wales_url: lookup("SELL2WALES_API_URL").unwrap_or(defaults.sell2wales_url),
            find_a_tender_url: lookup("FIND_A_TENDER_API_URL")
                .unwrap_or(defaults.find_a_tender_url),
            contracts_finder_url: lookup("CONTRACTS_FINDER_API_URL")
                .unwrap_or(defaults.contracts_finder_url),
        })
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> TenderResult<Option<T>>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| TenderError::Config(format!("{} must be a number, got '{}'", key, raw))),
        None => Ok(None),
    }
}
