//! Store catalog extraction from the store search page.

use std::collections::HashMap;

use publixad_geocode::GeocodioClient;
use scraper::{ElementRef, Selector};

use crate::client::WeeklyAdClient;
use crate::error::ConnectorError;
use crate::extract;
use crate::types::Store;

const GEOCODE_TIMEOUT_SECS: u64 = 30;

/// Construction-time configuration for [`StoreConnector`].
///
/// Address parsing is effective only when `parse_addresses` is set *and* an
/// API key is supplied; either one alone leaves it disabled.
#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    pub parse_addresses: bool,
    pub geocodio_api_key: Option<String>,
}

/// Extracts store listings for a ZIP/location query.
///
/// Holds a [`WeeklyAdClient`] rather than extending it, so tests can
/// substitute a client pointed at a mock server.
pub struct StoreConnector {
    client: WeeklyAdClient,
    geocoder: Option<GeocodioClient>,
}

impl StoreConnector {
    /// Creates a connector, building a geocod.io client when address parsing
    /// is enabled by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::Geocode`] if the geocoding client cannot be
    /// constructed.
    pub fn new(client: WeeklyAdClient, config: StoreConfig) -> Result<Self, ConnectorError> {
        let geocoder = if config.parse_addresses {
            config
                .geocodio_api_key
                .as_deref()
                .map(|key| GeocodioClient::new(key, GEOCODE_TIMEOUT_SECS))
                .transpose()?
        } else {
            None
        };

        Ok(Self { client, geocoder })
    }

    /// Creates a connector with address parsing routed through the given
    /// geocoding client (for testing with wiremock).
    #[must_use]
    pub fn with_geocoder(client: WeeklyAdClient, geocoder: GeocodioClient) -> Self {
        Self {
            client,
            geocoder: Some(geocoder),
        }
    }

    /// Fetches the stores near a ZIP code, keyed by normalized store number.
    ///
    /// An unreachable site, an empty document, or a page with no store tiles
    /// all yield an empty map. Tiles that repeat a store number overwrite the
    /// earlier entry. When address parsing is enabled and at least one store
    /// was found, the raw addresses are geocoded in a single batch and each
    /// resolved address is set on its store in place.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::Geocode`] if the geocoding batch fails —
    /// the already-fetched stores are not silently returned address-less.
    pub async fn get_stores(&self, zip: &str) -> Result<HashMap<String, Store>, ConnectorError> {
        let Some(body) = self
            .client
            .fetch_page(None, &[("CityStateZip", zip)])
            .await
        else {
            return Ok(HashMap::new());
        };

        let mut stores = parse_store_list(&body);
        tracing::debug!(zip, count = stores.len(), "extracted store tiles");

        if stores.is_empty() {
            return Ok(stores);
        }

        if let Some(geocoder) = &self.geocoder {
            let addresses: HashMap<String, String> = stores
                .iter()
                .map(|(store_num, store)| (store_num.clone(), store.address_raw.clone()))
                .collect();

            let parsed = geocoder.batch_geocode(&addresses).await?;
            for (store_num, address) in parsed {
                if let Some(address) = address {
                    if let Some(store) = stores.get_mut(&store_num) {
                        store.address = Some(address);
                    }
                }
            }
        }

        Ok(stores)
    }
}

/// Walks the store-list container and collects one [`Store`] per well-formed
/// tile, keyed by derived store number (last tile wins on collision).
fn parse_store_list(body: &str) -> HashMap<String, Store> {
    let doc = extract::parse_document(body);
    let container = extract::selector("#neupStoreLocation div.storeLocation_storeListTile");
    let directions = extract::selector("a.action-tracking-directions");
    let headline = extract::selector(".addressHeadline");
    let address_line = extract::selector(".addressStoreTitle");

    let mut stores = HashMap::new();
    for tile in doc.select(&container) {
        let Some(store) = parse_store_tile(tile, &directions, &headline, &address_line) else {
            continue;
        };
        stores.insert(store.store_num.clone(), store);
    }
    stores
}

/// Reads one store tile. Any missing field makes the tile malformed and it
/// is skipped without logging.
fn parse_store_tile(
    tile: ElementRef<'_>,
    directions: &Selector,
    headline: &Selector,
    address_line: &Selector,
) -> Option<Store> {
    let link = extract::first_match(tile, directions)?;
    let href = extract::attr_str(link, "href")?;
    let store_num = derive_store_num(&href)?;
    let publix_id = extract::attr_str(link, "data-tracking-storeid")?;
    let name = extract::text_of(tile, headline)?;
    let address_raw = extract::text_of(tile, address_line)?;

    Some(Store {
        store_num,
        publix_id,
        name,
        address_raw,
        address: None,
    })
}

/// Derives the store number from a directions link target: the final path
/// segment with leading zeros stripped. A segment that is empty or all zeros
/// carries no usable number, so the tile is treated as malformed.
fn derive_store_num(href: &str) -> Option<String> {
    let segment = href.trim_end_matches('/').rsplit('/').next()?;
    let stripped = segment.trim_start_matches('0');
    if stripped.is_empty() {
        None
    } else {
        Some(stripped.to_owned())
    }
}

#[cfg(test)]
#[path = "stores_test.rs"]
mod tests;
