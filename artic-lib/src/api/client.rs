//! HTTP client for the Art Institute of Chicago public API

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use super::RemoteSource;
use crate::error::Error;
use crate::model::Artwork;
use crate::model::Page;

/// Default API root.
pub const DEFAULT_BASE_URL: &str = "https://api.artic.edu/api/v1";

/// The fields requested from the API, matching [`Artwork`].
const FIELDS: &str = "id,title,artist_title,place_of_origin,inscriptions,date_start,date_end";

/// Client for the artworks endpoint of the Art Institute of Chicago API.
///
/// Cheap to clone; the underlying `reqwest::Client` pools connections.
///
/// # Example
///
/// ```ignore
/// use artic_lib::api::{ArticClient, RemoteSource};
///
/// let client = ArticClient::new()?;
/// let page = client.fetch_page(1, 12).await?;
/// println!("{} of {} records", page.len(), page.total_records());
/// ```
#[derive(Debug, Clone)]
pub struct ArticClient {
    http: Client,
    base_url: String,
    timeout: Option<Duration>,
}

#[derive(Deserialize)]
struct ArtworksResponse {
    data: Vec<Artwork>,
    pagination: PaginationInfo,
}

#[derive(Deserialize)]
struct PaginationInfo {
    total: u64,
}

impl ArticClient {
    /// Creates a client against the public API root.
    pub fn new() -> Result<Self, Error> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a client against a custom API root, e.g. a local stub.
    pub fn with_base_url(base_url: &str) -> Result<Self, Error> {
        Url::parse(base_url).map_err(|e| Error::InvalidUrl(format!("{base_url}: {e}")))?;
        Ok(Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: None,
        })
    }

    /// Sets a per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[async_trait]
impl RemoteSource for ArticClient {
    async fn fetch_page(&self, page_index: u32, page_size: u32) -> Result<Page, Error> {
        let url = format!("{}/artworks", self.base_url);
        debug!("fetching page {page_index} (limit {page_size}) from {url}");

        let mut request = self.http.get(&url).query(&[
            ("page", page_index.to_string().as_str()),
            ("limit", page_size.to_string().as_str()),
            ("fields", FIELDS),
        ]);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::http(status.as_u16(), body));
        }

        let body = response.text().await?;
        let parsed: ArtworksResponse = serde_json::from_str(&body)
            .map_err(|e| Error::parse_with_body(e.to_string(), body))?;

        Ok(Page::new(
            page_index,
            page_size,
            parsed.data,
            parsed.pagination.total,
        ))
    }
}
