use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::ACCEPT;

use crate::domain::NoticePage;
use crate::errors::{TenderError, TenderResult};
use crate::sources::traits::NoticeClient;

/// Blocking reqwest client that decodes OCDS pages
pub struct HttpNoticeClient {
    client: Client,
}

impl HttpNoticeClient {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .user_agent(concat!("tenderwatch/", env!("CARGO_PKG_VERSION")))
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }
}

impl Default for HttpNoticeClient {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

impl NoticeClient for HttpNoticeClient {
    fn get_page(&self, url: &str) -> TenderResult<NoticePage> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(TenderError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text()?;
        Ok(serde_json::from_str(&body)?)
    }
}
