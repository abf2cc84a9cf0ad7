use std::env;
use std::time::Duration;

use chrono::NaiveDate;
use flight_data::{client::HttpClient, ProviderError};

use crate::data_model::{FlightRecord, FlightsResponse};

pub const AERODATABOX_API_URL: &str = "https://aerodatabox.p.rapidapi.com";
pub const AERODATABOX_API_HOST: &str = "aerodatabox.p.rapidapi.com";

#[derive(Clone, Debug)]
pub struct AeroDataBoxCredentials {
    pub api_key: String,
    pub api_host: String,
}

impl AeroDataBoxCredentials {
    pub fn new<S: Into<String>>(api_key: S) -> Self {
        Self {
            api_key: api_key.into(),
            api_host: AERODATABOX_API_HOST.to_owned(),
        }
    }

    /// Reads `AERODATABOX_API_KEY` and optionally `AERODATABOX_API_HOST`.
    pub fn from_env() -> Option<Self> {
        let api_key = env::var("AERODATABOX_API_KEY").ok()?;
        let api_host = env::var("AERODATABOX_API_HOST")
            .unwrap_or_else(|_| AERODATABOX_API_HOST.to_owned());
        Some(Self { api_key, api_host })
    }
}

pub struct AeroDataBoxClient {
    credentials: AeroDataBoxCredentials,
    base_url: String,
    http: HttpClient,
}

impl AeroDataBoxClient {
    pub fn new(
        credentials: AeroDataBoxCredentials,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            credentials,
            base_url: AERODATABOX_API_URL.to_owned(),
            http: HttpClient::new(timeout)?,
        })
    }

    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// All flights with `flight_number` departing on the local date `date`.
    pub async fn flights_on(
        &self,
        flight_number: &str,
        date: NaiveDate,
    ) -> Result<Vec<FlightRecord>, ProviderError> {
        let url = format!(
            "{}/flights/number/{}/{}",
            self.base_url,
            flight_number,
            date.format("%Y-%m-%d")
        );
        let response: Option<FlightsResponse> = self
            .http
            .get_json(
                &url,
                &[("withAircraftImage", "false"), ("withLocation", "false")],
                &[
                    ("X-RapidAPI-Key", self.credentials.api_key.as_str()),
                    ("X-RapidAPI-Host", self.credentials.api_host.as_str()),
                ],
            )
            .await?;

        match response {
            None => Ok(vec![]),
            Some(FlightsResponse::Flights(flights)) => Ok(flights),
            Some(FlightsResponse::Message { message }) => Err(ProviderError::Api {
                code: None,
                message,
            }),
        }
    }
}
