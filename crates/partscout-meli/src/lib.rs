//! Structured-API extraction against the MercadoLibre public search API.
//!
//! Unlike the HTML adapters there is no selector chain here: the endpoint
//! schema is stable, so listings map field-by-field onto offers.

pub mod adapter;
pub mod client;
pub mod error;
pub mod types;

pub use adapter::MeliAdapter;
pub use client::MeliClient;
pub use error::MeliError;
pub use types::{MeliListing, MeliSearchResponse};
