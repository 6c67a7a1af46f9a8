//! Chromium renderer over the DevTools protocol.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::renderer::{NavigationResult, RenderContext, Renderer};

/// Configuration for [`ChromiumRenderer`].
#[derive(Debug, Clone, Default)]
pub struct ChromiumConfig {
    /// Explicit browser executable; auto-detected when unset.
    pub executable: Option<PathBuf>,
}

/// Launches headless Chromium processes, one per context.
pub struct ChromiumRenderer {
    config: ChromiumConfig,
}

impl ChromiumRenderer {
    pub fn new(config: ChromiumConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Renderer for ChromiumRenderer {
    async fn new_context(&self) -> Result<Box<dyn RenderContext>> {
        // The sandbox is disabled and /dev/shm avoided so the browser also
        // runs inside containers with a small shared-memory mount.
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .args(vec!["--disable-dev-shm-usage", "--disable-gpu"]);
        if let Some(exe) = self.config.executable.clone().or_else(find_chromium) {
            debug!(executable = %exe.display(), "using chromium");
            builder = builder.chrome_executable(exe);
        }
        let config = builder
            .build()
            .map_err(|e| anyhow!(e))
            .context("building browser config")?;

        let (mut browser, mut handler) = Browser::launch(config)
            .await
            .context("launching headless chromium")?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("browser event error: {e}");
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                let _ = browser.close().await;
                let _ = browser.wait().await;
                handler_task.abort();
                return Err(e).context("opening blank page");
            }
        };

        Ok(Box::new(ChromiumContext {
            browser,
            page,
            handler_task,
        }))
    }
}

struct ChromiumContext {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
}

#[async_trait]
impl RenderContext for ChromiumContext {
    async fn navigate(&mut self, url: &str, timeout_ms: u64) -> Result<NavigationResult> {
        let started = Instant::now();
        let load = async {
            self.page.goto(url).await?;
            self.page.wait_for_navigation().await?;
            Ok::<(), chromiumoxide::error::CdpError>(())
        };
        tokio::time::timeout(Duration::from_millis(timeout_ms), load)
            .await
            .map_err(|_| anyhow!("navigation timed out after {timeout_ms}ms"))?
            .with_context(|| format!("navigating to {url}"))?;

        let final_url = self
            .page
            .url()
            .await
            .ok()
            .flatten()
            .unwrap_or_else(|| url.to_string());

        Ok(NavigationResult {
            final_url,
            load_time_ms: started.elapsed().as_millis() as u64,
        })
    }

    async fn content(&self) -> Result<String> {
        self.page.content().await.context("reading page content")
    }

    async fn close(mut self: Box<Self>) -> Result<()> {
        let closed = self.browser.close().await;
        let _ = self.browser.wait().await;
        self.handler_task.abort();
        closed.context("closing chromium")?;
        Ok(())
    }
}

/// Locate a Chromium/Chrome executable on PATH or in well-known locations.
pub fn find_chromium() -> Option<PathBuf> {
    for name in [
        "chromium",
        "chromium-browser",
        "google-chrome",
        "google-chrome-stable",
        "chrome",
    ] {
        if let Ok(path) = which::which(name) {
            return Some(path);
        }
    }
    if cfg!(target_os = "macos") {
        let app = PathBuf::from("/Applications/Google Chrome.app/Contents/MacOS/Google Chrome");
        if app.exists() {
            return Some(app);
        }
    }
    None
}
