//! Translation from a provider's native match shape into [`CanonicalAddress`].
//!
//! The translation is keyed by [`GeocodeService`] so additional providers can
//! be added without changing the output shape callers depend on.

use crate::types::{AddressComponents, CanonicalAddress, Coordinates, GeocodeMatch};

/// Which geocoding provider produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeocodeService {
    Geocodio,
    /// A provider this crate has no field translation for. Normalizing under
    /// this tag yields an all-`None` address with the canonical shape rather
    /// than an error, so callers keep working when a new provider is wired in
    /// before its translation lands.
    Unsupported,
}

/// Maps one candidate match into the canonical address shape.
#[must_use]
pub fn normalize_match(service: GeocodeService, m: &GeocodeMatch) -> CanonicalAddress {
    match service {
        GeocodeService::Geocodio => from_geocodio(m),
        GeocodeService::Unsupported => CanonicalAddress::default(),
    }
}

fn from_geocodio(m: &GeocodeMatch) -> CanonicalAddress {
    let components = m.address_components.as_ref().map_or_else(
        AddressComponents::default,
        |c| AddressComponents {
            number: c.number.clone(),
            street: c.formatted_street.clone(),
            city: c.city.clone(),
            county: c.county.clone(),
            state: c.state.clone(),
            zip: c.zip.clone(),
        },
    );

    CanonicalAddress {
        components,
        formatted: m.formatted_address.clone(),
        location: m.location.as_ref().map(|l| Coordinates {
            lat: l.lat,
            lng: l.lng,
        }),
    }
}
