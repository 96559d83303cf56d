pub mod client;
pub mod error;
pub mod normalize;
pub mod types;

pub use client::GeocodioClient;
pub use error::GeocodeError;
pub use normalize::{normalize_match, GeocodeService};
pub use types::{AddressComponents, CanonicalAddress, Coordinates};
