use std::path::PathBuf;

/// User agent presented to storefronts when none is configured. Kept
/// browser-like on purpose: several of the covered retailers serve reduced
/// markup to obvious bots.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Process-wide configuration read from the environment.
///
/// Per-store settings live in the stores YAML file ([`crate::load_stores`]);
/// this struct only carries the cross-store knobs.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub stores_path: PathBuf,
    pub log_level: String,
    pub user_agent: String,
    /// Per-HTTP-request timeout for static and API adapters.
    pub http_timeout_secs: u64,
    /// Per-navigation timeout for the browser adapter.
    pub browser_timeout_secs: u64,
    /// Fallback inter-request delay when a store does not set one.
    pub request_delay_ms: u64,
    /// MercadoLibre site to search (e.g. `MLC` for Chile).
    pub meli_site_id: String,
    /// Explicit Chromium binary path; discovered on `PATH` when absent.
    pub chromium_path: Option<PathBuf>,
    /// Where the browser adapter drops HTML snapshots when no container
    /// selector matches. Defaults to the system temp directory.
    pub snapshot_dir: Option<PathBuf>,
}
