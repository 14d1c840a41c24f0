//! Headless Chromium session management.
//!
//! One [`BrowserSession`] is one Chromium process plus one page, scoped to
//! a single `extract` call. The adapter calls [`BrowserSession::close`] on
//! every path; the handler guard and Chromium's own child-process teardown
//! act as the backstop if the future is dropped mid-flight.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;

use crate::error::BrowserError;

/// Launch configuration shared by every call of one adapter instance.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub user_agent: String,
    /// Browser UI locale, also sent as `Accept-Language`.
    pub locale: String,
    pub viewport: (u32, u32),
    /// Explicit Chromium binary; discovered on `PATH` when absent.
    pub chromium_path: Option<PathBuf>,
    /// Where diagnostic HTML snapshots land; system temp dir when absent.
    pub snapshot_dir: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            user_agent: partscout_core::app_config::DEFAULT_USER_AGENT.to_owned(),
            locale: "es-CL".to_owned(),
            viewport: (1366, 768),
            chromium_path: None,
            snapshot_dir: None,
        }
    }
}

/// Locates the Chromium binary: explicit override first, then `PATH`.
fn find_chromium(override_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        if path.exists() {
            return Some(path.to_owned());
        }
    }
    for name in ["google-chrome", "chromium", "chromium-browser", "chrome"] {
        if let Ok(path) = which::which(name) {
            return Some(path);
        }
    }
    None
}

/// Aborts the CDP event loop when dropped, so an abandoned session cannot
/// leak the handler task.
struct HandlerGuard(JoinHandle<()>);

impl Drop for HandlerGuard {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// An isolated rendering-engine instance with one open page.
pub struct BrowserSession {
    browser: Browser,
    page: Page,
    handler: HandlerGuard,
}

impl BrowserSession {
    /// Launches a fresh headless Chromium instance and opens a blank page.
    ///
    /// # Errors
    ///
    /// - [`BrowserError::ChromiumNotFound`] when no binary can be located.
    /// - [`BrowserError::Config`] when the launch flags are rejected.
    /// - [`BrowserError::Cdp`] when the process fails to start or the
    ///   first page cannot be created.
    pub async fn launch(config: &SessionConfig) -> Result<Self, BrowserError> {
        let chromium =
            find_chromium(config.chromium_path.as_deref()).ok_or(BrowserError::ChromiumNotFound)?;

        let (width, height) = config.viewport;
        let browser_config = BrowserConfig::builder()
            .chrome_executable(chromium)
            .window_size(width, height)
            .arg("--headless=new")
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions")
            .arg("--disable-background-networking")
            .arg(format!("--lang={}", config.locale))
            .arg(format!("--user-agent={}", config.user_agent))
            .build()
            .map_err(BrowserError::Config)?;

        let (browser, mut handler) = Browser::launch(browser_config).await?;

        let handler = HandlerGuard(tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                let _ = event;
            }
        }));

        let page = browser.new_page("about:blank").await?;

        Ok(Self {
            browser,
            page,
            handler,
        })
    }

    /// Navigates to `url` and waits for the load to settle, bounded by
    /// `timeout`.
    ///
    /// # Errors
    ///
    /// - [`BrowserError::NavigationTimeout`] when the budget elapses.
    /// - [`BrowserError::Cdp`] on protocol failure.
    pub async fn navigate(&self, url: &str, timeout: Duration) -> Result<(), BrowserError> {
        let navigation = async {
            self.page.goto(url).await?;
            self.page.wait_for_navigation().await?;
            Ok::<(), BrowserError>(())
        };

        match tokio::time::timeout(timeout, navigation).await {
            Ok(result) => result,
            Err(_) => Err(BrowserError::NavigationTimeout {
                url: url.to_owned(),
                timeout_secs: timeout.as_secs(),
            }),
        }
    }

    /// Counts elements matching `selector` that currently take up layout
    /// space (the visibility probe of the container ladder).
    ///
    /// # Errors
    ///
    /// Returns [`BrowserError::Evaluation`] when the probe result is not a
    /// number, or [`BrowserError::Cdp`] on protocol failure.
    pub async fn visible_count(&self, selector: &str) -> Result<u64, BrowserError> {
        // Serialize the selector as a JSON string so quotes cannot break
        // out of the script.
        let literal = serde_json::Value::String(selector.to_owned()).to_string();
        let script = format!(
            "Array.from(document.querySelectorAll({literal}))\
             .filter(e => e.offsetWidth > 0 || e.offsetHeight > 0).length"
        );

        let result = self.page.evaluate(script).await?;
        result
            .into_value::<u64>()
            .map_err(|e| BrowserError::Evaluation(e.to_string()))
    }

    /// All elements currently matching `selector`.
    ///
    /// # Errors
    ///
    /// Returns [`BrowserError::Cdp`] on protocol failure.
    pub async fn find_elements(
        &self,
        selector: &str,
    ) -> Result<Vec<chromiumoxide::element::Element>, BrowserError> {
        Ok(self.page.find_elements(selector).await?)
    }

    /// The full rendered document, for diagnostic snapshots.
    ///
    /// # Errors
    ///
    /// Returns [`BrowserError::Evaluation`] when the DOM cannot be
    /// serialized, or [`BrowserError::Cdp`] on protocol failure.
    pub async fn page_html(&self) -> Result<String, BrowserError> {
        let result = self
            .page
            .evaluate("document.documentElement.outerHTML")
            .await?;
        result
            .into_value::<String>()
            .map_err(|e| BrowserError::Evaluation(e.to_string()))
    }

    /// Releases the page, the browser process and the handler task.
    /// Best-effort: teardown failures are logged, never surfaced.
    pub async fn close(mut self) {
        if let Err(error) = self.page.close().await {
            tracing::debug!(%error, "page close failed");
        }
        if let Err(error) = self.browser.close().await {
            tracing::debug!(%error, "browser close failed");
        }
        if let Err(error) = self.browser.wait().await {
            tracing::debug!(%error, "browser wait failed");
        }
        drop(self.handler);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_config_defaults_are_browser_like() {
        let config = SessionConfig::default();
        assert!(config.user_agent.contains("Mozilla/5.0"));
        assert_eq!(config.locale, "es-CL");
        assert_eq!(config.viewport, (1366, 768));
    }

    #[test]
    fn missing_override_path_is_ignored() {
        // A nonexistent override must not be returned even when set.
        let missing = PathBuf::from("/definitely/not/a/chromium");
        let found = find_chromium(Some(&missing));
        assert_ne!(found, Some(missing));
    }

    #[tokio::test]
    #[ignore] // Requires a Chromium binary on PATH.
    async fn launch_navigate_and_probe() {
        let session = BrowserSession::launch(&SessionConfig::default())
            .await
            .expect("failed to launch Chromium");

        session
            .navigate(
                "data:text/html,<div class=\"product\"><h2>Filtro</h2></div>",
                Duration::from_secs(10),
            )
            .await
            .expect("navigation failed");

        let visible = session
            .visible_count("div.product")
            .await
            .expect("probe failed");
        assert_eq!(visible, 1);

        let missing = session
            .visible_count(".does-not-exist")
            .await
            .expect("probe failed");
        assert_eq!(missing, 0);

        session.close().await;
    }
}
