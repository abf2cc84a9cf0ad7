use std::env;
use std::time::Duration;

use flight_data::{client::HttpClient, ProviderError};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::data_model::{Envelope, FlightInfo};

pub const AIRLABS_API_URL: &str = "https://airlabs.co/api/v9";

#[derive(Clone, Debug)]
pub struct AirLabsCredentials {
    pub api_key: String,
}

impl AirLabsCredentials {
    pub fn new<S: Into<String>>(api_key: S) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    /// Reads `AIRLABS_API_KEY`.
    pub fn from_env() -> Option<Self> {
        env::var("AIRLABS_API_KEY").ok().map(Self::new)
    }
}

pub struct AirLabsClient {
    credentials: AirLabsCredentials,
    base_url: String,
    http: HttpClient,
}

impl AirLabsClient {
    pub fn new(credentials: AirLabsCredentials, timeout: Duration) -> Result<Self, ProviderError> {
        Ok(Self {
            credentials,
            base_url: AIRLABS_API_URL.to_owned(),
            http: HttpClient::new(timeout)?,
        })
    }

    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Live information on the current (or next) flight with this number.
    pub async fn flight(&self, flight_iata: &str) -> Result<Vec<FlightInfo>, ProviderError> {
        self.get("flight", flight_iata).await
    }

    /// Raw schedule entries, passed through unchanged.
    pub async fn schedules(&self, flight_iata: &str) -> Result<Vec<Value>, ProviderError> {
        self.get("schedules", flight_iata).await
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        flight_iata: &str,
    ) -> Result<Vec<T>, ProviderError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let envelope: Option<Envelope<T>> = self
            .http
            .get_json(
                &url,
                &[
                    ("flight_iata", flight_iata),
                    ("api_key", self.credentials.api_key.as_str()),
                ],
                &[],
            )
            .await?;

        match envelope {
            None => Ok(vec![]),
            Some(Envelope {
                error: Some(error), ..
            }) => Err(ProviderError::Api {
                code: error.code(),
                message: error.message,
            }),
            Some(Envelope { response, .. }) => {
                Ok(response.map(|response| response.into_vec()).unwrap_or_default())
            }
        }
    }
}
