//! Record types extracted from the weekly-ad site.
//!
//! ## Observed markup shape
//!
//! The accessibility site renders server-side HTML with no JSON anywhere, so
//! every field here originates as a string attribute or text node on a tile
//! element:
//!
//! - Store tiles (`div.storeLocation_storeListTile`) carry the store number
//!   only inside the directions link's `href`, zero-padded to seven digits
//!   (e.g. `/0007326`). The `data-tracking-storeid` attribute is a *different*
//!   identifier used by the site's own analytics.
//! - Sale tiles (`div.theTile`) put every data field on the nested
//!   "add to shopping list" button. Attribute names mix `data_` underscores
//!   and `data-` dashes as the site ships them; we read them verbatim.
//! - Coupon tiles share the sale-tile markup but have no listing id (absent
//!   or `"0"`), which is how they are told apart from products.

use chrono::NaiveDate;
use publixad_geocode::CanonicalAddress;
use rust_decimal::Decimal;
use serde::Serialize;

/// A retail store location extracted from the store search page.
#[derive(Debug, Clone, Serialize)]
pub struct Store {
    /// Store number from the directions link, leading zeros stripped.
    /// This is the identity key in the map [`crate::StoreConnector`] returns.
    pub store_num: String,
    /// The site's own analytics store id (`data-tracking-storeid`).
    pub publix_id: String,
    /// Store display name.
    pub name: String,
    /// The whole unparsed address line, including city, state and ZIP.
    pub address_raw: String,
    /// Filled in place when address parsing is enabled and the geocoder
    /// resolved this store's raw address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<CanonicalAddress>,
}

/// One on-sale product extracted from a department listing page.
#[derive(Debug, Clone, Serialize)]
pub struct Sale {
    pub store_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Final sale price, two decimal places.
    pub sale_price: Decimal,
    pub description: String,
    /// True when the sale price truncates to integer zero: "buy one get one"
    /// listings are priced as zero additional cost.
    pub is_bogo: bool,
    pub product: SaleProduct,
}

/// The product a [`Sale`] applies to.
#[derive(Debug, Clone, Serialize)]
pub struct SaleProduct {
    pub product_id: i64,
    pub name: String,
    /// Product image URL.
    pub image: String,
    /// Department name the listing was fetched under. A product tied to
    /// multiple departments legitimately appears once per department.
    pub department: String,
}
