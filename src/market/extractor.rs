//! The scrape pipeline: render the search page, settle, parse the table.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::market::query::MarketQuery;
use crate::market::table;
use crate::market::PriceRecord;
use crate::renderer::{RenderContext, Renderer};

/// How long to let the portal's client-side scripts fill the result table.
/// A fixed sleep, not a poll: the page exposes no readiness signal worth
/// trusting, so the delay never ends early and never extends.
pub const RENDER_SETTLE: Duration = Duration::from_secs(8);

const NAVIGATION_TIMEOUT_MS: u64 = 30_000;

/// Fetches price records by driving a browser against the portal.
///
/// Each call owns one browser context for its whole duration; the context
/// is closed on every exit path, success or failure.
pub struct PriceExtractor {
    renderer: Arc<dyn Renderer>,
    settle: Duration,
}

impl PriceExtractor {
    pub fn new(renderer: Arc<dyn Renderer>) -> Self {
        Self {
            renderer,
            settle: RENDER_SETTLE,
        }
    }

    /// Run one search and extract every price row the portal rendered.
    pub async fn fetch(&self, query: &MarketQuery) -> Result<Vec<PriceRecord>> {
        let url = query.search_url();
        info!(commodity = %query.commodity, state = %query.state, "fetching prices");

        let mut context = self
            .renderer
            .new_context()
            .await
            .context("creating browser context")?;
        let outcome = self.drive(context.as_mut(), url.as_str()).await;
        if let Err(e) = context.close().await {
            warn!("failed to close browser cleanly: {e:#}");
        }
        let html = outcome?;

        let prices = table::extract_prices(&html)?;
        info!(records = prices.len(), "extraction complete");
        Ok(prices)
    }

    async fn drive(&self, context: &mut dyn RenderContext, url: &str) -> Result<String> {
        let nav = context
            .navigate(url, NAVIGATION_TIMEOUT_MS)
            .await
            .context("loading search page")?;
        debug!(final_url = %nav.final_url, load_time_ms = nav.load_time_ms, "page loaded");

        tokio::time::sleep(self.settle).await;

        context.content().await.context("reading rendered page")
    }
}
