//! Build the Agmarknet search URL for a commodity/state pair.

use url::Url;

/// The portal's commodity-wise market search page.
pub const SEARCH_ENDPOINT: &str = "https://agmarknet.gov.in/SearchCmmMkt.aspx";

/// A commodity/state search. Values are free text; the portal matches
/// them against its own vocabulary.
#[derive(Debug, Clone)]
pub struct MarketQuery {
    pub commodity: String,
    pub state: String,
}

impl MarketQuery {
    pub fn new(commodity: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            commodity: commodity.into(),
            state: state.into(),
        }
    }

    /// The search URL with every parameter other than commodity and state
    /// held at the portal's default unselected value. The head fields must
    /// stay as the literal `--Select--` placeholders or the page serves an
    /// empty result.
    pub fn search_url(&self) -> Url {
        Url::parse_with_params(
            SEARCH_ENDPOINT,
            [
                ("Tx_Commodity", self.commodity.as_str()),
                ("Tx_State", self.state.as_str()),
                ("Tx_District", "0"),
                ("Tx_Market", "0"),
                ("DateFrom", ""),
                ("DateTo", ""),
                ("Fr_Date", ""),
                ("To_Date", ""),
                ("Tx_Trend", "0"),
                ("Tx_CommodityHead", "--Select--"),
                ("Tx_StateHead", "--Select--"),
                ("Tx_DistrictHead", "--Select--"),
                ("Tx_MarketHead", "--Select--"),
            ],
        )
        .expect("search endpoint is a valid base URL")
    }
}
