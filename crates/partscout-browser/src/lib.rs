//! Browser-automation extraction for JavaScript-rendered storefronts.
//!
//! Same fallback-chain idea as the static adapter, applied to a live
//! document: container selectors are polled for visibility in order, and
//! per-item fields are read through child queries against the rendered
//! DOM. Each call owns one headless Chromium process, released on every
//! exit path.

pub mod adapter;
pub mod error;
pub mod profiles;
pub mod session;

pub use adapter::BrowserStoreAdapter;
pub use error::BrowserError;
pub use session::{BrowserSession, SessionConfig};
