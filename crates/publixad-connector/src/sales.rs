//! Sale catalog extraction from the department listing pages.

use futures::stream::{self, StreamExt};
use scraper::{ElementRef, Selector};

use crate::client::WeeklyAdClient;
use crate::extract;
use crate::types::{Sale, SaleProduct};

/// Department names mapped to the site's opaque category ids, in the order
/// departments are queried when no filter is given. The ids come from the
/// landing page's category navigation and change only when the site
/// restructures its ad categories.
pub(crate) const DEPARTMENTS: [(&str, u32); 18] = [
    ("bogo", 5_232_540),
    ("baby", 5_232_519),
    ("bakery", 5_232_520),
    ("beauty", 5_232_530),
    ("alcohol", 5_232_521),
    ("dairy", 5_232_525),
    ("deli", 5_232_526),
    ("floral", 5_232_527),
    ("frozen", 5_232_528),
    ("grocery", 5_232_529),
    ("health", 5_232_789),
    ("housewares", 5_232_531),
    ("meat", 5_232_533),
    ("nonfood", 5_232_805),
    ("pet", 5_232_535),
    ("produce", 5_232_537),
    ("seafood", 5_232_538),
    ("gathershare", 5_232_561),
];

/// Cap on overlapping department requests. The department count is fixed and
/// small, so this is a politeness bound on the site, not a throughput knob.
const MAX_CONCURRENT_DEPARTMENTS: usize = 6;

const CATEGORY_SUB_PATH: &str = "BrowseByListing/ByCategory";

/// Optional filters for a sale query.
#[derive(Debug, Clone, Default)]
pub struct SaleFilter {
    /// Department names to query. Empty means every known department.
    pub departments: Vec<String>,
}

/// Extracts on-sale products for a store across one or more departments.
pub struct SaleConnector {
    client: WeeklyAdClient,
}

impl SaleConnector {
    #[must_use]
    pub fn new(client: WeeklyAdClient) -> Self {
        Self { client }
    }

    /// The department names this connector knows how to query.
    pub fn department_names() -> impl Iterator<Item = &'static str> {
        DEPARTMENTS.iter().map(|(name, _)| *name)
    }

    /// Fetches the sales for a store, one sub-query per department.
    ///
    /// Department queries run concurrently, bounded by
    /// [`MAX_CONCURRENT_DEPARTMENTS`]; results are concatenated in
    /// department order (not completion order), with each department's
    /// records in document order. Sales are not deduplicated across
    /// departments: a product tied to several departments appears once per
    /// department.
    ///
    /// Never fails — unknown departments, unreachable pages and malformed
    /// tiles all degrade to fewer records.
    pub async fn get_sales(&self, store_id: &str, filter: &SaleFilter) -> Vec<Sale> {
        let departments: Vec<&str> = if filter.departments.is_empty() {
            DEPARTMENTS.iter().map(|(name, _)| *name).collect()
        } else {
            filter.departments.iter().map(String::as_str).collect()
        };

        stream::iter(departments)
            .map(|dept| self.sales_by_department(store_id, dept))
            .buffered(MAX_CONCURRENT_DEPARTMENTS)
            .collect::<Vec<Vec<Sale>>>()
            .await
            .into_iter()
            .flatten()
            .collect()
    }

    /// Fetches the sales for one department.
    ///
    /// An unknown department name short-circuits to empty without a network
    /// call — there is no category id to send for it.
    pub async fn sales_by_department(&self, store_id: &str, dept: &str) -> Vec<Sale> {
        let Some(category_id) = category_id(dept) else {
            tracing::debug!(dept, "unknown department, skipping");
            return Vec::new();
        };

        let Some(body) = self
            .client
            .fetch_page(
                Some(CATEGORY_SUB_PATH),
                &[
                    ("StoreID", store_id),
                    ("CategoryID", &category_id.to_string()),
                ],
            )
            .await
        else {
            return Vec::new();
        };

        let sales = parse_sale_tiles(&body, dept);
        tracing::debug!(store_id, dept, count = sales.len(), "extracted sale tiles");
        sales
    }
}

/// Resolves a department name to its category id.
pub(crate) fn category_id(dept: &str) -> Option<u32> {
    DEPARTMENTS
        .iter()
        .find(|(name, _)| *name == dept)
        .map(|(_, id)| *id)
}

/// Walks the sale-tile container and collects one [`Sale`] per product tile,
/// in document order.
fn parse_sale_tiles(body: &str, dept: &str) -> Vec<Sale> {
    let doc = extract::parse_document(body);
    let container = extract::selector("#BrowseContent div.theTile");
    let button = extract::selector(".shoppingListButton");

    doc.select(&container)
        .filter_map(|tile| parse_sale_tile(tile, &button, dept))
        .collect()
}

/// Reads one sale tile off its "add to shopping list" control.
///
/// Tiles without a listing id (absent, `"0"`, or unparseable) are coupon
/// entries, not products, and are dropped. A tile missing its price, store
/// id echo, dates or title is malformed and is also dropped.
fn parse_sale_tile(tile: ElementRef<'_>, button: &Selector, dept: &str) -> Option<Sale> {
    let control = extract::first_match(tile, button)?;

    let product_id = extract::attr_i64(control, "data_listingid").filter(|id| *id != 0)?;
    let sale_price = extract::attr_decimal(control, "data_finalprice")?.round_dp(2);
    let store_id = extract::attr_i64(control, "data_storeid")?;
    let start_date = extract::attr_date(control, "data_startdate")?;
    let end_date = extract::attr_date(control, "data_expdate")?;
    let name = extract::attr_str(control, "data_title")?;
    let description = extract::attr_str(control, "data_description").unwrap_or_default();
    let image = extract::attr_str(control, "data-image").unwrap_or_default();

    // BOGO listings are priced as zero additional cost.
    let is_bogo = sale_price.trunc().is_zero();

    Some(Sale {
        store_id,
        start_date,
        end_date,
        sale_price,
        description,
        is_bogo,
        product: SaleProduct {
            product_id,
            name,
            image,
            department: dept.to_owned(),
        },
    })
}

#[cfg(test)]
#[path = "sales_test.rs"]
mod tests;
