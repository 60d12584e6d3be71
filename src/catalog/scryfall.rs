//! Scryfall HTTP client implementing [`CatalogProvider`].

use std::time::Duration;

use serde::Deserialize;

use super::{CatalogCard, CatalogError, CatalogProvider};

/// Public Scryfall API root.
pub const DEFAULT_BASE_URL: &str = "https://api.scryfall.com";

/// Connection settings for [`ScryfallClient`].
#[derive(Debug, Clone)]
pub struct ScryfallConfig {
    /// API root without trailing slash.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Sent as `User-Agent`; Scryfall rejects requests without one.
    pub user_agent: String,
}

impl Default for ScryfallConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(15),
            user_agent: format!("mtgstack/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// HTTP client for the Scryfall card search and autocomplete endpoints.
///
/// No retries: a failed request surfaces as a [`CatalogError`].
#[derive(Debug, Clone)]
pub struct ScryfallClient {
    http: reqwest::Client,
    base_url: String,
}

impl ScryfallClient {
    /// Builds a client from `config`.
    pub fn new(config: ScryfallConfig) -> Result<Self, CatalogError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get(&self, path: &str, q: &str) -> Result<(u16, String), CatalogError> {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("GET {url} q={q:?}");

        let resp = self
            .http
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&[("q", q)])
            .send()
            .await?;

        let status = resp.status().as_u16();
        let text = resp.text().await?;
        Ok((status, text))
    }
}

impl CatalogProvider for ScryfallClient {
    async fn search(&self, query: &str) -> Result<Vec<CatalogCard>, CatalogError> {
        let (status, body) = self.get("/cards/search", query).await?;
        decode_search_body(status, &body)
    }

    async fn autocomplete(&self, prefix: &str) -> Result<Vec<String>, CatalogError> {
        let (status, body) = self.get("/cards/autocomplete", prefix).await?;
        decode_autocomplete_body(status, &body)
    }
}

#[derive(Debug, Deserialize)]
struct ListBody<T> {
    #[serde(default = "Vec::new")]
    data: Vec<T>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    details: String,
}

/// Decodes a `/cards/search` response.
///
/// A 404 `not_found` error object means the query matched nothing and
/// yields an empty list.
pub fn decode_search_body(status: u16, body: &str) -> Result<Vec<CatalogCard>, CatalogError> {
    if !(200..300).contains(&status) {
        let err = parse_error_body(body);
        if status == 404 && err.code == "not_found" {
            return Ok(Vec::new());
        }
        return Err(status_error(status, err, body));
    }

    let list: ListBody<CatalogCard> = serde_json::from_str(body)?;
    Ok(list.data)
}

/// Decodes a `/cards/autocomplete` catalog response.
pub fn decode_autocomplete_body(status: u16, body: &str) -> Result<Vec<String>, CatalogError> {
    if !(200..300).contains(&status) {
        let err = parse_error_body(body);
        return Err(status_error(status, err, body));
    }

    let list: ListBody<String> = serde_json::from_str(body)?;
    Ok(list.data)
}

fn parse_error_body(body: &str) -> ErrorBody {
    serde_json::from_str(body).unwrap_or_default()
}

fn status_error(status: u16, err: ErrorBody, body: &str) -> CatalogError {
    let details = if err.details.is_empty() {
        body.chars().take(200).collect()
    } else {
        err.details
    };
    CatalogError::Status { status, details }
}
