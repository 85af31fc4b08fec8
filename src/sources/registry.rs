use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, Utc};

use crate::config::Config;
use crate::domain::SourceName;
use crate::sources::api_source::ApiSource;
use crate::sources::http::HttpNoticeClient;
use crate::sources::traits::{NoticeClient, TenderSource};
use crate::sources::{contracts_finder, find_a_tender, sell2wales};

pub struct SourceRegistry {
    sources: Vec<Box<dyn TenderSource>>,
}

impl SourceRegistry {
    /// Empty registry; see [`SourceRegistry::from_config`] for the standard set
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// All three procurement APIs sharing one HTTP client
    pub fn from_config(config: &Config) -> Self {
        let client: Arc<dyn NoticeClient> = Arc::new(HttpNoticeClient::new(
            Duration::from_secs(config.http_timeout_secs),
        ));

        Self::with_client(config, client, Utc::now().date_naive())
    }

    /// Standard sources over the given client; `today` anchors the Sell2Wales month grid
    pub fn with_client(config: &Config, client: Arc<dyn NoticeClient>, today: NaiveDate) -> Self {
        let mut registry = Self::new();

        // Registration order is the merge and stats order
        registry.register(Box::new(ApiSource::new(
            sell2wales::profile(&config.sell2wales_url, today),
            client.clone(),
        )));
        registry.register(Box::new(ApiSource::new(
            find_a_tender::profile(&config.find_a_tender_url, config.max_records),
            client.clone(),
        )));
        registry.register(Box::new(ApiSource::new(
            contracts_finder::profile(&config.contracts_finder_url, config.max_records),
            client,
        )));

        registry
    }

    pub fn register(&mut self, source: Box<dyn TenderSource>) {
        self.sources.push(source);
    }

    pub fn sources(&self) -> &[Box<dyn TenderSource>] {
        &self.sources
    }

    pub fn names(&self) -> Vec<SourceName> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
