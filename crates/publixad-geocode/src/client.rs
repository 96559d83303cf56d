//! HTTP client for the geocod.io batch geocoding API.
//!
//! Wraps `reqwest` with geocod.io-specific error handling, API key
//! management, and typed response deserialization. Exactly one request is
//! made per batch regardless of how many addresses it carries.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::GeocodeError;
use crate::normalize::{normalize_match, GeocodeService};
use crate::types::{BatchResponse, CanonicalAddress};

const DEFAULT_BASE_URL: &str = "https://api.geocod.io/v1.7/";

/// Client for geocod.io batch geocoding.
///
/// Use [`GeocodioClient::new`] for production or
/// [`GeocodioClient::with_base_url`] to point at a mock server in tests.
pub struct GeocodioClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl GeocodioClient {
    /// Creates a new client pointed at the production geocod.io API.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, GeocodeError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`GeocodeError::ApiError`] if `base_url` is
    /// not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("publixad/0.1 (weekly-ad-connector)")
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // Url::join keeps the version path segment instead of replacing it.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| GeocodeError::ApiError {
            status: 0,
            message: format!("invalid base URL '{base_url}': {e}"),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Geocodes a keyed batch of raw address strings in one request.
    ///
    /// Every key the service processed appears in the output. A key maps to
    /// `Some(address)` when at least one candidate match came back (the
    /// top-ranked candidate is used) and to `None` when the service returned
    /// zero candidates. A key the service never processed is absent.
    ///
    /// # Errors
    ///
    /// - [`GeocodeError::ApiError`] on a non-2xx response.
    /// - [`GeocodeError::Http`] on network failure.
    /// - [`GeocodeError::Deserialize`] if the response does not match the
    ///   expected envelope.
    pub async fn batch_geocode(
        &self,
        addresses: &HashMap<String, String>,
    ) -> Result<HashMap<String, Option<CanonicalAddress>>, GeocodeError> {
        let url = self.batch_url()?;

        tracing::debug!(count = addresses.len(), "sending geocode batch");
        let response = self.client.post(url).json(addresses).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GeocodeError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let parsed: BatchResponse =
            serde_json::from_str(&body).map_err(|e| GeocodeError::Deserialize {
                context: format!("batch geocode of {} addresses", addresses.len()),
                source: e,
            })?;

        let out = parsed
            .results
            .into_iter()
            .map(|(key, entry)| {
                let address = entry
                    .response
                    .results
                    .first()
                    .map(|m| normalize_match(GeocodeService::Geocodio, m));
                (key, address)
            })
            .collect();

        Ok(out)
    }

    /// Builds the batch endpoint URL with the API key as a query parameter.
    fn batch_url(&self) -> Result<Url, GeocodeError> {
        let mut url = self
            .base_url
            .join("geocode")
            .map_err(|e| GeocodeError::ApiError {
                status: 0,
                message: format!("invalid endpoint path: {e}"),
            })?;
        url.query_pairs_mut().append_pair("api_key", &self.api_key);
        Ok(url)
    }
}
