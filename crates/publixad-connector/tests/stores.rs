//! Integration tests for `StoreConnector` using wiremock HTTP mocks.
//!
//! One mock server stands in for the weekly-ad site and, where address
//! parsing is exercised, a second one stands in for geocod.io — no real
//! network traffic is made.

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use publixad_connector::{ConnectorError, StoreConfig, StoreConnector, WeeklyAdClient};
use publixad_geocode::GeocodioClient;

fn test_client(base_url: &str) -> WeeklyAdClient {
    WeeklyAdClient::with_base_url(5, "publixad-test/0.1", base_url)
        .expect("client construction should not fail")
}

fn two_store_page() -> String {
    r#"<html><body><div id="neupStoreLocation">
        <div class="storeLocation_storeListTile">
            <a class="action-tracking-directions" href="/directions/0007326"
               data-tracking-storeid="pub-7326">Directions</a>
            <span class="addressHeadline">Publix at Hamilton Place</span>
            <span class="addressStoreTitle">7326 McCutcheon Rd Chattanooga, TN 37421</span>
        </div>
        <div class="storeLocation_storeListTile">
            <a class="action-tracking-directions" href="/directions/2671411"
               data-tracking-storeid="pub-2671411">Directions</a>
            <span class="addressHeadline">Publix Super Market at Northgate</span>
            <span class="addressStoreTitle">271 Northgate Mall Dr Hixson, TN 37343</span>
        </div>
    </div></body></html>"#
        .to_string()
}

#[tokio::test]
async fn store_search_without_address_parsing_returns_bare_stores() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("NuepRequest", "true"))
        .and(query_param("CityStateZip", "37421"))
        .respond_with(ResponseTemplate::new(200).set_body_string(two_store_page()))
        .expect(1)
        .mount(&server)
        .await;

    let config = StoreConfig {
        parse_addresses: false,
        // A key alone must not enable address parsing; no geocoding client
        // is even constructed, so no geocoding call can be made.
        geocodio_api_key: Some("unused-key".to_string()),
    };
    let connector = StoreConnector::new(test_client(&server.uri()), config)
        .expect("connector construction should not fail");

    let stores = connector.get_stores("37421").await.expect("should succeed");

    assert_eq!(stores.len(), 2);
    assert!(stores.values().all(|store| store.address.is_none()));
    assert_eq!(
        stores.get("7326").map(|s| s.name.as_str()),
        Some("Publix at Hamilton Place")
    );
}

#[tokio::test]
async fn unreachable_site_degrades_to_empty_map() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let connector = StoreConnector::new(test_client(&server.uri()), StoreConfig::default())
        .expect("connector construction should not fail");

    let stores = connector.get_stores("37421").await.expect("should succeed");
    assert!(stores.is_empty());
}

#[tokio::test]
async fn empty_body_degrades_to_empty_map() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .mount(&server)
        .await;

    let connector = StoreConnector::new(test_client(&server.uri()), StoreConfig::default())
        .expect("connector construction should not fail");

    let stores = connector.get_stores("37421").await.expect("should succeed");
    assert!(stores.is_empty());
}

#[tokio::test]
async fn page_without_store_tiles_yields_empty_map() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body><p>No stores near you.</p></body></html>"),
        )
        .mount(&server)
        .await;

    let connector = StoreConnector::new(test_client(&server.uri()), StoreConfig::default())
        .expect("connector construction should not fail");

    let stores = connector.get_stores("00000").await.expect("should succeed");
    assert!(stores.is_empty());
}

#[tokio::test]
async fn address_parsing_fills_resolved_stores_in_place() {
    let ad_server = MockServer::start().await;
    let geo_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(two_store_page()))
        .mount(&ad_server)
        .await;

    // One resolved address, one zero-candidate entry.
    let geo_body = serde_json::json!({
        "results": {
            "7326": {
                "response": {
                    "results": [{
                        "address_components": {
                            "number": "7326",
                            "formatted_street": "McCutcheon Rd",
                            "city": "Chattanooga",
                            "county": "Hamilton County",
                            "state": "TN",
                            "zip": "37421"
                        },
                        "formatted_address": "7326 McCutcheon Rd, Chattanooga, TN 37421",
                        "location": { "lat": 35.0304, "lng": -85.1588 }
                    }]
                }
            },
            "2671411": { "response": { "results": [] } }
        }
    });

    Mock::given(method("POST"))
        .and(path("/geocode"))
        .and(query_param("api_key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&geo_body))
        .expect(1)
        .mount(&geo_server)
        .await;

    let geocoder = GeocodioClient::with_base_url("test-key", 5, &geo_server.uri())
        .expect("geocoder construction should not fail");
    let connector = StoreConnector::with_geocoder(test_client(&ad_server.uri()), geocoder);

    let stores = connector.get_stores("37421").await.expect("should succeed");

    let resolved = stores.get("7326").expect("store 7326 should be present");
    let address = resolved.address.as_ref().expect("address should be filled");
    assert_eq!(address.components.city.as_deref(), Some("Chattanooga"));
    assert_eq!(address.components.zip.as_deref(), Some("37421"));

    let unresolved = stores.get("2671411").expect("store 2671411 should be present");
    assert!(unresolved.address.is_none());
}

#[tokio::test]
async fn geocoding_failure_surfaces_instead_of_dropping_addresses() {
    let ad_server = MockServer::start().await;
    let geo_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(two_store_page()))
        .mount(&ad_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/geocode"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&geo_server)
        .await;

    let geocoder = GeocodioClient::with_base_url("test-key", 5, &geo_server.uri())
        .expect("geocoder construction should not fail");
    let connector = StoreConnector::with_geocoder(test_client(&ad_server.uri()), geocoder);

    let err = connector
        .get_stores("37421")
        .await
        .expect_err("a failed batch must not be swallowed");
    assert!(
        matches!(err, ConnectorError::Geocode(_)),
        "expected Geocode error, got: {err:?}"
    );
}

#[tokio::test]
async fn no_geocoding_batch_is_sent_for_an_empty_store_list() {
    let ad_server = MockServer::start().await;
    let geo_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<html><body></body></html>"),
        )
        .mount(&ad_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/geocode"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&geo_server)
        .await;

    let geocoder = GeocodioClient::with_base_url("test-key", 5, &geo_server.uri())
        .expect("geocoder construction should not fail");
    let connector = StoreConnector::with_geocoder(test_client(&ad_server.uri()), geocoder);

    let stores = connector.get_stores("37421").await.expect("should succeed");
    assert!(stores.is_empty());
}
