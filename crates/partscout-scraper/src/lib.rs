//! Static-document extraction for HTML storefronts.
//!
//! One generic [`StaticStoreAdapter`] serves every plain-HTML store; the
//! differences between stores are data, not code — an ordered
//! [`partscout_core::SelectorSet`] per store, registered in [`profiles`].

pub mod adapter;
pub mod client;
pub mod error;
mod extract;
pub mod profiles;

pub use adapter::StaticStoreAdapter;
pub use client::{FetchedPage, StoreHttpClient};
pub use error::ScraperError;
