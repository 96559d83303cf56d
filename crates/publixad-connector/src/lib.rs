pub mod client;
pub mod error;
pub mod extract;
pub mod sales;
pub mod stores;
pub mod types;

pub use client::WeeklyAdClient;
pub use error::ConnectorError;
pub use sales::{SaleConnector, SaleFilter};
pub use stores::{StoreConfig, StoreConnector};
pub use types::{Sale, SaleProduct, Store};
