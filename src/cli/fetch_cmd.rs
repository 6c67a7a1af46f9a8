//! `mandi fetch <crop> <state>` — print a price envelope to stdout.

use std::path::PathBuf;
use std::sync::Arc;

use crate::cli::{output, CliError};
use crate::market::api::AgmarknetApi;
use crate::market::extractor::PriceExtractor;
use crate::market::query::MarketQuery;
use crate::renderer::chromium::{ChromiumConfig, ChromiumRenderer};

/// Usage line surfaced in the error envelope when arguments are missing.
pub const USAGE: &str = "mandi fetch <crop> <state>";

/// Run the fetch command.
///
/// Prints exactly one JSON document to stdout: `{"prices": [...]}` on
/// success (an empty list is a success), or an error envelope via the
/// caller. Missing arguments fail before any network activity.
pub async fn run(
    crop: Option<String>,
    state: Option<String>,
    api_key: Option<String>,
    chromium: Option<PathBuf>,
) -> Result<(), CliError> {
    let (Some(crop), Some(state)) = (crop, state) else {
        return Err(CliError::Usage(USAGE));
    };
    let query = MarketQuery::new(crop, state);

    let prices = match api_key {
        Some(key) => AgmarknetApi::new(key).fetch(&query).await?,
        None => {
            let renderer = Arc::new(ChromiumRenderer::new(ChromiumConfig {
                executable: chromium,
            }));
            PriceExtractor::new(renderer).fetch(&query).await?
        }
    };

    output::print_json(&serde_json::json!({ "prices": prices }));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::{PriceRecord, PRICE_UNIT};
    use assert_json_diff::assert_json_eq;

    #[tokio::test]
    async fn test_missing_arguments_is_a_usage_error() {
        let err = run(None, None, None, None).await.unwrap_err();
        assert_eq!(err.to_string(), "Usage: mandi fetch <crop> <state>");
    }

    #[tokio::test]
    async fn test_missing_state_alone_is_a_usage_error() {
        let err = run(Some("Wheat".into()), None, None, None).await.unwrap_err();
        assert!(matches!(err, CliError::Usage(_)));
    }

    #[test]
    fn test_success_envelope_shape() {
        let prices = vec![PriceRecord {
            mandi: "Khanna".to_string(),
            price: 2250.5,
            unit: PRICE_UNIT.to_string(),
            date: "01 Aug 2026".to_string(),
        }];
        let envelope = serde_json::json!({ "prices": prices });
        assert_json_eq!(
            envelope,
            serde_json::json!({
                "prices": [{
                    "mandi": "Khanna",
                    "price": 2250.5,
                    "unit": "quintal",
                    "date": "01 Aug 2026"
                }]
            })
        );
    }
}
