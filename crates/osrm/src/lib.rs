//! Driving routes from an OSRM server.
//! See <https://project-osrm.org/docs/v5.24.0/api/>

use std::error;
use std::fmt;
use std::sync::Arc;

pub mod client;
pub mod data_model;

pub use client::OsrmClient;

#[derive(Debug, Clone)]
pub enum ApiError {
    RequestError(Arc<reqwest::Error>),
    JsonError(Arc<serde_json::Error>),
    InvalidResponse {
        status_code: reqwest::StatusCode,
        url: String,
        response: Option<String>,
    },
    /// OSRM answered with a code other than `Ok`, e.g. `NoRoute`.
    Routing { code: String, message: Option<String> },
    NoRoute,
}

impl error::Error for ApiError {}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ApiError::RequestError(e) => write!(f, "HTTP request error: {}", e),
            ApiError::JsonError(e) => write!(f, "JSON parse error: {}", e),
            ApiError::InvalidResponse {
                status_code,
                url,
                response,
            } => match response {
                Some(text) => {
                    write!(f, "Invalid Response ({}) {}: {}", status_code, text, url)
                }
                None => write!(f, "Invalid Response ({}) {}", status_code, url),
            },
            ApiError::Routing { code, message } => match message {
                Some(message) => write!(f, "Routing failed ({}): {}", code, message),
                None => write!(f, "Routing failed ({})", code),
            },
            ApiError::NoRoute => write!(f, "No route found."),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::RequestError(Arc::new(e))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::JsonError(Arc::new(e))
    }
}
