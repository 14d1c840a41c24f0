pub mod adapter;
pub mod app_config;
pub mod assemble;
pub mod availability;
pub mod config;
pub mod error;
pub mod offer;
pub mod pacer;
pub mod price;
pub mod selectors;
pub mod stores;
pub mod urlnorm;

pub use adapter::{ExtractContext, SourceAdapter};
pub use app_config::AppConfig;
pub use assemble::{assemble_offer, RawItem};
pub use error::ConfigError;
pub use offer::{ItemError, Offer, SearchQuery};
pub use pacer::RequestPacer;
pub use selectors::{FieldRule, SelectorSet};
pub use stores::{load_stores, AdapterKind, PriceFormat, StoreConfig, StoresFile};
