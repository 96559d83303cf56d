//! HTTP client for the Publix accessibility weekly-ad site.
//!
//! The site is the plain-text accessible rendering of the weekly ad, which
//! keeps the markup small and stable enough to scrape. There is no API; every
//! request returns server-rendered HTML.
//!
//! Transport failures are deliberately not errors here: the client logs them
//! and returns `None`, and extractors treat "no document" as "no records".
//! One best-effort attempt per call — no retries, no caching.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::ConnectorError;

const DEFAULT_BASE_URL: &str = "https://accessibleweeklyad.publix.com/PublixAccessibility";

/// Query parameters required on every call to the site. Caller-supplied
/// parameters never override these.
const FIXED_PARAMS: [(&str, &str); 1] = [("NuepRequest", "true")];

/// Shared fetch capability for the store and sale connectors.
///
/// Use [`WeeklyAdClient::new`] for production or
/// [`WeeklyAdClient::with_base_url`] to point at a mock server in tests.
pub struct WeeklyAdClient {
    client: Client,
    base_url: Url,
}

impl WeeklyAdClient {
    /// Creates a client pointed at the production weekly-ad site.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ConnectorError> {
        Self::with_base_url(timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ConnectorError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, ConnectorError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let trimmed = base_url.trim_end_matches('/');
        let base_url = Url::parse(trimmed).map_err(|e| ConnectorError::InvalidBaseUrl {
            base_url: trimmed.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, base_url })
    }

    /// Fetches one page of the site, returning the HTML body.
    ///
    /// The URL is the base URL plus `sub_path` (when given); the query string
    /// is the union of [`FIXED_PARAMS`] and `params`, with fixed parameters
    /// taking precedence on key collision.
    ///
    /// Returns `None` on network failure, a non-2xx status, an unreadable
    /// body, or an empty body. Failures are logged, never propagated —
    /// callers must treat "no document" as a valid outcome.
    pub(crate) async fn fetch_page(
        &self,
        sub_path: Option<&str>,
        params: &[(&str, &str)],
    ) -> Option<String> {
        let url = self.build_url(sub_path, params);

        let response = match self.client.get(url.clone()).send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(%url, error = %err, "weekly-ad request failed");
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "weekly-ad request rejected");
            return None;
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => {
                tracing::warn!(%url, error = %err, "failed to read weekly-ad body");
                return None;
            }
        };

        if body.is_empty() {
            tracing::debug!(%url, "weekly-ad body was empty");
            return None;
        }

        Some(body)
    }

    /// Builds the full request URL with properly percent-encoded query
    /// parameters, fixed parameters first.
    fn build_url(&self, sub_path: Option<&str>, params: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();

        if let Some(sub) = sub_path {
            if let Ok(mut segments) = url.path_segments_mut() {
                segments
                    .pop_if_empty()
                    .extend(sub.trim_matches('/').split('/'));
            }
        }

        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in FIXED_PARAMS {
                pairs.append_pair(key, value);
            }
            for (key, value) in params {
                if FIXED_PARAMS.iter().any(|(fixed, _)| fixed == key) {
                    continue;
                }
                pairs.append_pair(key, value);
            }
        }

        url
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
