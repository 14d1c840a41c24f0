use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("empty response body from {url}")]
    EmptyBody { url: String },

    #[error("invalid selector \"{selector}\" for store {store}: {reason}")]
    InvalidSelector {
        store: String,
        selector: String,
        reason: String,
    },

    #[error("no selector profile registered for store \"{0}\"")]
    UnknownProfile(String),
}
