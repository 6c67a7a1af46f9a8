//! data.gov.in Agmarknet resource API client.
//!
//! Alternative price source for callers holding an API key. Queries the
//! published Agmarknet daily-price resource instead of scraping the
//! portal.

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

use crate::market::query::MarketQuery;
use crate::market::{PriceRecord, PRICE_UNIT};

/// Production API host.
pub const DEFAULT_BASE_URL: &str = "https://api.data.gov.in";

/// Resource id of the Agmarknet daily price dataset.
const RESOURCE_PATH: &str = "/resource/9ef84268-d583-457a-9d56-604376e4efee";

const RECORD_LIMIT: u32 = 10;

/// Client for the data.gov.in Agmarknet resource.
pub struct AgmarknetApi {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct ResourceResponse {
    #[serde(default)]
    records: Vec<ResourceRecord>,
}

#[derive(Debug, Deserialize)]
struct ResourceRecord {
    market: Option<String>,
    modal_price: Option<String>,
    arrival_date: Option<String>,
}

impl AgmarknetApi {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, api_key)
    }

    /// Point the client at a different host. Used by tests.
    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Fetch the most recent price records for a commodity/state pair.
    ///
    /// Records whose modal price does not parse are dropped rather than
    /// failing the whole response.
    pub async fn fetch(&self, query: &MarketQuery) -> Result<Vec<PriceRecord>> {
        let filters = format!("commodity={}, state={}", query.commodity, query.state);
        let response = self
            .client
            .get(format!("{}{}", self.base_url, RESOURCE_PATH))
            .query(&[
                ("api-key", self.api_key.as_str()),
                ("format", "json"),
                ("filters", filters.as_str()),
            ])
            .query(&[("limit", RECORD_LIMIT)])
            .send()
            .await
            .context("querying data.gov.in")?
            .error_for_status()
            .context("data.gov.in rejected the request")?;

        let body: ResourceResponse = response
            .json()
            .await
            .context("decoding data.gov.in response")?;

        let prices: Vec<PriceRecord> = body.records.into_iter().filter_map(to_price).collect();
        info!(records = prices.len(), "api fetch complete");
        Ok(prices)
    }
}

fn to_price(record: ResourceRecord) -> Option<PriceRecord> {
    let price: f64 = record
        .modal_price
        .as_deref()?
        .trim()
        .replace(',', "")
        .parse()
        .ok()?;
    Some(PriceRecord {
        mandi: record.market.unwrap_or_default(),
        price,
        unit: PRICE_UNIT.to_string(),
        date: record.arrival_date.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_maps_resource_records_to_prices() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(RESOURCE_PATH))
            .and(query_param("api-key", "test-key"))
            .and(query_param("format", "json"))
            .and(query_param("filters", "commodity=Wheat, state=Punjab"))
            .and(query_param("limit", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "records": [
                    {"market": "Khanna", "modal_price": "2,250", "arrival_date": "01/08/2026"},
                    {"market": "Ludhiana", "modal_price": "NR", "arrival_date": "01/08/2026"}
                ]
            })))
            .mount(&server)
            .await;

        let api = AgmarknetApi::with_base_url(server.uri(), "test-key");
        let prices = api.fetch(&MarketQuery::new("Wheat", "Punjab")).await.unwrap();

        assert_eq!(prices.len(), 1);
        assert_eq!(prices[0].mandi, "Khanna");
        assert_eq!(prices[0].price, 2250.0);
        assert_eq!(prices[0].unit, "quintal");
        assert_eq!(prices[0].date, "01/08/2026");
    }

    #[tokio::test]
    async fn test_missing_records_field_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(RESOURCE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "ok"
            })))
            .mount(&server)
            .await;

        let api = AgmarknetApi::with_base_url(server.uri(), "test-key");
        let prices = api.fetch(&MarketQuery::new("Wheat", "Punjab")).await.unwrap();
        assert!(prices.is_empty());
    }

    #[tokio::test]
    async fn test_server_error_is_propagated() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(RESOURCE_PATH))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let api = AgmarknetApi::with_base_url(server.uri(), "bad-key");
        let err = api
            .fetch(&MarketQuery::new("Wheat", "Punjab"))
            .await
            .unwrap_err();
        assert!(format!("{err:#}").contains("rejected"));
    }
}
