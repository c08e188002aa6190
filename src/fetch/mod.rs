// src/fetch/mod.rs

use std::time::Duration;

use once_cell::sync::Lazy;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, REFERER, USER_AGENT};
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tokio::time::sleep;
use tracing::{debug, error, info};
use url::Url;

use crate::model::{RankPage, RawRecord};

pub mod pages;

use pages::{Paginator, Step};

static ENDPOINT: &str = "https://www.hurun.net/zh-CN/Rank/HsRankDetailsList";

/// List id for the 2024 rich list. 2023 is `16BKYYA3`.
pub const DEFAULT_LIST_ID: &str = "ODBYW2BI";

/// Records per page request.
pub const PAGE_LIMIT: u64 = 20;

/// Politeness pause between page requests; the endpoint rate-limits bursts.
const PAGE_DELAY: Duration = Duration::from_millis(500);

static DEFAULT_HEADERS: Lazy<HeaderMap> = Lazy::new(|| {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static(
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
             (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36",
        ),
    );
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("application/json, text/plain, */*"),
    );
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static("zh-CN,zh;q=0.9,en;q=0.8"),
    );
    headers.insert(REFERER, HeaderValue::from_static("https://www.hurun.net/"));
    headers
});

/// Client with the browser-like headers the endpoint expects.
pub fn build_client() -> reqwest::Result<Client> {
    Client::builder()
        .default_headers(DEFAULT_HEADERS.clone())
        .build()
}

/// What ended a fetch early. All variants are logged at the fetch boundary
/// and converted into a partial result; none escape `fetch_all`.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected HTTP status {0}")]
    Status(StatusCode),
    #[error("malformed response body: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Sequential page walker for one rank list.
pub struct Fetcher {
    client: Client,
    endpoint: Url,
    list_id: String,
    limit: u64,
}

impl Fetcher {
    pub fn new(client: Client, list_id: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: Url::parse(ENDPOINT).expect("endpoint constant must parse"),
            list_id: list_id.into(),
            limit: PAGE_LIMIT,
        }
    }

    async fn fetch_page(&self, offset: u64) -> Result<RankPage, FetchError> {
        let resp = self
            .client
            .get(self.endpoint.clone())
            .query(&[
                ("num", self.list_id.as_str()),
                ("search", ""),
                ("offset", &offset.to_string()),
                ("limit", &self.limit.to_string()),
            ])
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        let body = resp.text().await?;
        debug!(offset, bytes = body.len(), "page body received");
        Ok(serde_json::from_str(&body)?)
    }

    /// Walk the collection from offset 0 and return every record received.
    ///
    /// One request in flight at a time, fixed pause between pages, no retry:
    /// any failure logs and returns whatever accumulated so far. Callers must
    /// treat an empty or short result as "no usable data".
    pub async fn fetch_all(&self) -> Vec<RawRecord> {
        let mut pager = Paginator::new(self.limit);
        let mut records: Vec<RawRecord> = Vec::new();

        loop {
            let offset = pager.offset();
            info!(offset, limit = self.limit, "requesting page");

            let page = match self.fetch_page(offset).await {
                Ok(page) => page,
                Err(e) => {
                    error!(offset, error = %e, "fetch aborted; returning partial results");
                    break;
                }
            };

            if pager.total() == 0 && page.total > 0 {
                info!(total = page.total, "collection size reported");
            }

            let step = pager.observe(page.rows.len(), page.total);
            records.extend(page.rows);

            match step {
                Step::Finished => {
                    info!(fetched = pager.fetched(), "pagination complete");
                    break;
                }
                Step::Next { .. } => sleep(PAGE_DELAY).await,
            }
        }

        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_constant_parses() {
        let url = Url::parse(ENDPOINT).unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_str(), Some("www.hurun.net"));
    }

    #[test]
    fn default_headers_look_like_a_browser() {
        let headers = &*DEFAULT_HEADERS;
        assert!(headers
            .get(USER_AGENT)
            .unwrap()
            .to_str()
            .unwrap()
            .contains("Chrome"));
        assert_eq!(
            headers.get(ACCEPT).unwrap(),
            "application/json, text/plain, */*"
        );
        assert!(headers.contains_key(REFERER));
    }
}
