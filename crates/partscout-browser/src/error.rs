use thiserror::Error;

#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("Chromium binary not found; install Chromium or set PARTSCOUT_CHROMIUM_PATH")]
    ChromiumNotFound,

    #[error("failed to configure browser: {0}")]
    Config(String),

    #[error("browser protocol error: {0}")]
    Cdp(#[from] chromiumoxide::error::CdpError),

    #[error("navigation to {url} timed out after {timeout_secs}s")]
    NavigationTimeout { url: String, timeout_secs: u64 },

    #[error("JS evaluation returned an unexpected value: {0}")]
    Evaluation(String),
}
