use crate::barcode::normalize_barcode;
use crate::discogs::models::{MasterRecord, MasterResponse, ReleaseSummary, SearchResponse};
use reqwest::{Client, Error as ReqwestError, StatusCode};
use thiserror::Error;
use tracing::{debug, info, warn};

pub const DEFAULT_BASE_URL: &str = "https://api.discogs.com";

#[derive(Error, Debug)]
pub enum DiscogsError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] ReqwestError),
    #[error("Discogs API returned status {0}")]
    Status(StatusCode),
    #[error("API rate limit exceeded")]
    RateLimit,
    #[error("Invalid API token")]
    InvalidToken,
    #[error("No release found for barcode {0}")]
    NotFound(String),
}

/// Client for the two Discogs endpoints the lookup needs.
///
/// Holds no credential: the token is passed per call and never stored.
#[derive(Clone)]
pub struct DiscogsClient {
    client: Client,
    base_url: String,
    user_agent: String,
}

impl DiscogsClient {
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, user_agent)
    }

    pub fn with_base_url(base_url: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            user_agent: user_agent.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Search releases by barcode and return the first match.
    ///
    /// The search endpoint authenticates through the `token` query parameter.
    /// Additional matches are dropped in catalog order; there is no ranking.
    pub async fn search_by_barcode(
        &self,
        barcode: &str,
        token: &str,
    ) -> Result<ReleaseSummary, DiscogsError> {
        let barcode = normalize_barcode(barcode);
        // Token is a query parameter: errors must not carry the URL.
        let url = format!("{}/database/search", self.base_url);
        info!("📡 Discogs API: GET {} (barcode: {})", url, barcode);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("barcode", barcode.as_str()),
                ("type", "release"),
                ("token", token),
            ])
            .header("User-Agent", self.user_agent.as_str())
            .send()
            .await
            .map_err(ReqwestError::without_url)?;
        let status = response.status();
        debug!("Response status: {}", status);
        if status.is_success() {
            let search_response: SearchResponse =
                response.json().await.map_err(ReqwestError::without_url)?;
            info!(
                "✓ Discogs search returned {} result(s)",
                search_response.results.len()
            );
            for (i, result) in search_response.results.iter().enumerate().take(3) {
                debug!(
                    "  Raw result {}: {} (type: {}, master_id: {:?})",
                    i + 1,
                    result.title,
                    result.release_type,
                    result.master_id
                );
            }
            search_response
                .results
                .into_iter()
                .next()
                .ok_or(DiscogsError::NotFound(barcode))
        } else if status == StatusCode::UNAUTHORIZED {
            warn!("✗ Discogs rejected the API token");
            Err(DiscogsError::InvalidToken)
        } else if status == StatusCode::TOO_MANY_REQUESTS {
            warn!("✗ Discogs rate limit exceeded");
            Err(DiscogsError::RateLimit)
        } else {
            warn!("✗ Discogs API error: {}", status);
            Err(DiscogsError::Status(status))
        }
    }

    /// Fetch the master release for enrichment.
    ///
    /// Returns `None` without a request when there is no master, and `None`
    /// on any failure: missing enrichment never aborts a lookup. The master
    /// endpoint authenticates through the `Authorization` header.
    pub async fn resolve_master(
        &self,
        master_id: Option<u64>,
        token: &str,
    ) -> Option<MasterRecord> {
        let master_id = master_id?;
        let url = format!("{}/masters/{}", self.base_url, master_id);
        info!("📡 Discogs API: GET {}", url);
        let response = match self
            .client
            .get(&url)
            .header("Authorization", format!("Discogs token={}", token))
            .header("User-Agent", self.user_agent.as_str())
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!("Master {} unavailable: {}", master_id, e);
                return None;
            }
        };
        let status = response.status();
        if !status.is_success() {
            warn!("Master {} unavailable: status {}", master_id, status);
            return None;
        }
        match response.json::<MasterResponse>().await {
            Ok(master) => {
                let record = MasterRecord::from_response(master);
                info!(
                    "✓ Master {}: {} - {} ({} track(s))",
                    master_id,
                    record.artist,
                    record.title,
                    record.tracklist.len()
                );
                Some(record)
            }
            Err(e) => {
                warn!("Master {} response could not be parsed: {}", master_id, e);
                None
            }
        }
    }
}
