//! MercadoLibre search API response types.
//!
//! ## Observed shape from the live `sites/MLC/search` endpoint
//!
//! ### `price` / `original_price`
//! Numeric JSON values (integers for CLP listings, decimals elsewhere).
//! `original_price` is `null` unless the listing is discounted; when set it
//! is the pre-discount price and is greater than `price`.
//!
//! ### `available_quantity`
//! Present on search results but capped by the API (large stocks report
//! `50`). `0` means the listing cannot currently be bought.
//!
//! ### `status`
//! `"active"` for buyable listings; `"paused"`/`"closed"` listings may
//! still appear in cached result pages.
//!
//! ### `seller.seller_reputation.level_id`
//! An ordinal string from `"1_red"` to `"5_green"`, or `null` for sellers
//! without enough history.
//!
//! ### `shipping.free_shipping`
//! Boolean; absent on some older listing types, so it defaults to `false`.

use serde::Deserialize;

/// Top-level response from `GET /sites/{site}/search`.
#[derive(Debug, Deserialize)]
pub struct MeliSearchResponse {
    #[serde(default)]
    pub results: Vec<MeliListing>,
    #[serde(default)]
    pub paging: Option<MeliPaging>,
}

#[derive(Debug, Deserialize)]
pub struct MeliPaging {
    #[serde(default)]
    pub total: i64,
    #[serde(default)]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

/// One listing from the search results.
#[derive(Debug, Deserialize)]
pub struct MeliListing {
    /// Listing ID (e.g., `"MLC123456789"`). Entries with an empty ID are
    /// skipped during mapping.
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub title: String,

    /// Current price as a JSON number. `0` or missing means the listing is
    /// not buyable and is skipped.
    #[serde(default)]
    pub price: f64,

    /// Pre-discount price; `null` unless the listing is on sale.
    #[serde(default)]
    pub original_price: Option<f64>,

    /// Remaining stock as reported by the API (capped at 50).
    #[serde(default)]
    pub available_quantity: Option<i64>,

    /// Listing status; treated as active when absent.
    #[serde(default)]
    pub status: Option<String>,

    /// Canonical listing page URL.
    #[serde(default)]
    pub permalink: Option<String>,

    /// Thumbnail URL. Often `http://` — normalized downstream.
    #[serde(default)]
    pub thumbnail: Option<String>,

    /// `"new"` or `"used"`.
    #[serde(default)]
    pub condition: Option<String>,

    #[serde(default)]
    pub seller: Option<MeliSeller>,

    #[serde(default)]
    pub shipping: Option<MeliShipping>,
}

#[derive(Debug, Deserialize)]
pub struct MeliSeller {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub seller_reputation: Option<MeliSellerReputation>,
}

#[derive(Debug, Deserialize)]
pub struct MeliSellerReputation {
    /// Ordinal reputation level, `"1_red"` … `"5_green"`.
    #[serde(default)]
    pub level_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MeliShipping {
    #[serde(default)]
    pub free_shipping: bool,
    #[serde(default)]
    pub logistic_type: Option<String>,
}
