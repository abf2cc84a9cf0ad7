use std::env;
use std::time::Duration;

use flight_data::{client::HttpClient, ProviderError};

use crate::data_model::{FlightRecord, FlightsResponse};

/// The free plan is only served over plain http.
pub const AVIATIONSTACK_API_URL: &str = "http://api.aviationstack.com/v1";

#[derive(Clone, Debug)]
pub struct AviationstackCredentials {
    pub access_key: String,
}

impl AviationstackCredentials {
    pub fn new<S: Into<String>>(access_key: S) -> Self {
        Self {
            access_key: access_key.into(),
        }
    }

    /// Reads `AVIATIONSTACK_API_KEY`.
    pub fn from_env() -> Option<Self> {
        env::var("AVIATIONSTACK_API_KEY").ok().map(Self::new)
    }
}

pub struct AviationstackClient {
    credentials: AviationstackCredentials,
    base_url: String,
    http: HttpClient,
}

impl AviationstackClient {
    pub fn new(
        credentials: AviationstackCredentials,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            credentials,
            base_url: AVIATIONSTACK_API_URL.to_owned(),
            http: HttpClient::new(timeout)?,
        })
    }

    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub async fn flights(&self, flight_iata: &str) -> Result<Vec<FlightRecord>, ProviderError> {
        let url = format!("{}/flights", self.base_url);
        let response: Option<FlightsResponse> = self
            .http
            .get_json(
                &url,
                &[
                    ("access_key", self.credentials.access_key.as_str()),
                    ("flight_iata", flight_iata),
                ],
                &[],
            )
            .await?;

        match response {
            None => Ok(vec![]),
            Some(FlightsResponse {
                error: Some(error), ..
            }) => Err(ProviderError::Api {
                code: error.code(),
                message: error.message,
            }),
            Some(FlightsResponse { data, .. }) => Ok(data),
        }
    }
}
