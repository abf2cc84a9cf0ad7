use std::error;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

pub mod client;
pub mod lookup;
pub mod mock;
pub mod provider;
pub mod selection;

pub use lookup::FlightLookup;
pub use provider::{FlightProvider, LookupRequest};

/// Default timeout for a single outbound provider call. Kept in the single
/// digit seconds so a whole fallback chain fits into a request deadline.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(8);

#[derive(Debug, Clone)]
pub enum ProviderError {
    Request(Arc<reqwest::Error>),
    Json(Arc<serde_json::Error>),
    InvalidResponse {
        status_code: reqwest::StatusCode,
        url: String,
        response: Option<String>,
    },
    /// The provider answered with an error payload (invalid key, rate limit, ...).
    Api {
        code: Option<String>,
        message: String,
    },
    Timeout,
    Other(String),
}

impl error::Error for ProviderError {}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ProviderError::Request(e) => write!(f, "HTTP request error: {}", e),
            ProviderError::Json(e) => write!(f, "JSON parse error: {}", e),
            ProviderError::InvalidResponse {
                status_code,
                url,
                response,
            } => match response {
                Some(text) => {
                    write!(f, "Invalid Response ({}) {}: {}", status_code, text, url)
                }
                None => write!(f, "Invalid Response ({}) {}", status_code, url),
            },
            ProviderError::Api { code, message } => match code {
                Some(code) => write!(f, "Provider error {}: {}", code, message),
                None => write!(f, "Provider error: {}", message),
            },
            ProviderError::Timeout => write!(f, "Provider did not answer in time."),
            ProviderError::Other(e) => write!(f, "{e}"),
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        ProviderError::Request(Arc::new(e))
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(e: serde_json::Error) -> Self {
        ProviderError::Json(Arc::new(e))
    }
}
