//! Market price domain: query building, table extraction, price sources.

pub mod api;
pub mod extractor;
pub mod query;
pub mod table;

use serde::{Deserialize, Serialize};

/// Pricing unit for every record: one quintal (100 kg).
pub const PRICE_UNIT: &str = "quintal";

/// One observed price quotation from a mandi.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    /// Name of the market/trading post, trimmed.
    pub mandi: String,
    /// Modal price in rupees per quintal; zero when the portal rendered
    /// an empty quote.
    pub price: f64,
    /// Always [`PRICE_UNIT`].
    pub unit: String,
    /// Date string exactly as the portal rendered it.
    pub date: String,
}
