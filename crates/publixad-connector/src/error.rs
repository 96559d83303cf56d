use thiserror::Error;

/// Errors surfaced by the connectors.
///
/// Extraction-level problems (unreachable site, empty document, malformed
/// tiles) never become errors; they degrade to empty collections. The
/// failures callers must handle are client construction and the geocoding
/// batch, which would otherwise silently drop address data for stores that
/// were already fetched.
#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    #[error("address geocoding failed: {0}")]
    Geocode(#[from] publixad_geocode::GeocodeError),
}
