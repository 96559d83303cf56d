//! Geocod.io batch API response types and the service-agnostic address shape.
//!
//! The batch endpoint echoes every submitted key under `results`, wrapping
//! each entry in a `{ "response": { "results": [ ... ] } }` envelope. The
//! inner `results` array holds candidate matches ranked best-first and may
//! be empty when the service could not resolve an address.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Top-level envelope for a geocod.io batch geocode response.
#[derive(Debug, Deserialize)]
pub struct BatchResponse {
    /// One entry per submitted key. A key the service did not process at all
    /// is simply absent here.
    #[serde(default)]
    pub results: HashMap<String, BatchEntry>,
}

/// One keyed entry in a batch response.
#[derive(Debug, Deserialize)]
pub struct BatchEntry {
    pub response: MatchList,
}

/// The candidate matches for a single address, ranked best-first.
#[derive(Debug, Deserialize)]
pub struct MatchList {
    #[serde(default)]
    pub results: Vec<GeocodeMatch>,
}

/// A single candidate match in geocod.io's native shape.
#[derive(Debug, Deserialize)]
pub struct GeocodeMatch {
    #[serde(default)]
    pub address_components: Option<NativeComponents>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub location: Option<NativeLocation>,
}

/// Address components as geocod.io names them.
#[derive(Debug, Deserialize)]
pub struct NativeComponents {
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub formatted_street: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub county: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip: Option<String>,
}

/// Coordinates as geocod.io names them (`lat`/`lng`).
#[derive(Debug, Deserialize)]
pub struct NativeLocation {
    pub lat: f64,
    pub lng: f64,
}

/// The normalized, service-agnostic address produced from one candidate
/// match. All fields stay `None` until filled; a provider we do not know how
/// to translate yields this shape with every field `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanonicalAddress {
    pub components: AddressComponents,
    pub formatted: Option<String>,
    pub location: Option<Coordinates>,
}

/// Street-level components of a [`CanonicalAddress`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddressComponents {
    pub number: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub county: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
}

/// A latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}
