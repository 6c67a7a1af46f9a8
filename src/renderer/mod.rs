//! Browser rendering abstraction.
//!
//! A [`Renderer`] hands out isolated browser contexts; a context owns one
//! browser process for its lifetime and must be closed explicitly so the
//! process is released.

pub mod chromium;

use anyhow::Result;
use async_trait::async_trait;

/// Outcome of a page navigation.
#[derive(Debug, Clone)]
pub struct NavigationResult {
    /// The URL after redirects.
    pub final_url: String,
    /// Wall-clock load time in milliseconds.
    pub load_time_ms: u64,
}

/// One exclusively-owned browser context.
#[async_trait]
pub trait RenderContext: Send {
    /// Navigate to a URL and wait for the load to settle.
    async fn navigate(&mut self, url: &str, timeout_ms: u64) -> Result<NavigationResult>;

    /// Serialized markup of the current page.
    async fn content(&self) -> Result<String>;

    /// Close the context and release the underlying browser process.
    async fn close(self: Box<Self>) -> Result<()>;
}

/// Factory for browser contexts.
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Launch a fresh, isolated browser context.
    async fn new_context(&self) -> Result<Box<dyn RenderContext>>;
}
