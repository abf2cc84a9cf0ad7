use std::env;
use std::time::Duration;

use model::weather::WeatherReport;

use crate::{
    data_model::{ErrorResponse, ForecastResponse},
    ApiError,
};

pub const OPEN_METEO_API_URL: &str = "https://api.open-meteo.com";

const CURRENT_FIELDS: &str = "temperature_2m,weather_code,is_day";

#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    base_url: String,
    client: reqwest::Client,
}

impl OpenMeteoClient {
    pub fn new(timeout: Duration) -> Result<Self, ApiError> {
        Ok(Self {
            base_url: OPEN_METEO_API_URL.to_owned(),
            client: reqwest::Client::builder().timeout(timeout).build()?,
        })
    }

    /// Uses `OPEN_METEO_URL` as base url if set.
    pub fn from_env(timeout: Duration) -> Result<Self, ApiError> {
        let client = Self::new(timeout)?;
        Ok(match env::var("OPEN_METEO_URL") {
            Ok(base_url) => client.with_base_url(base_url),
            Err(_) => client,
        })
    }

    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    /// Current conditions at the given coordinate. A single attempt, errors are
    /// left to the caller.
    pub async fn current_weather(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<WeatherReport, ApiError> {
        let url = format!("{}/v1/forecast", self.base_url);
        log::debug!("Requesting current weather at ({latitude}, {longitude}).");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("current", CURRENT_FIELDS.to_owned()),
            ])
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if status == reqwest::StatusCode::BAD_REQUEST {
            if let Ok(error) = serde_json::from_str::<ErrorResponse>(&text) {
                return Err(ApiError::Rejected(error.reason));
            }
        }
        if !status.is_success() {
            return Err(ApiError::InvalidResponse {
                status_code: status,
                url,
                response: Some(text).filter(|text| !text.is_empty()),
            });
        }

        let forecast: ForecastResponse = serde_json::from_str(&text)?;
        let current = forecast.current;
        Ok(WeatherReport::new(
            current.temperature_2m,
            current.weather_code,
            current.is_day == 1,
        ))
    }
}

#[cfg(test)]
mod tests {
    use model::weather::WeatherCondition;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client(server: &MockServer) -> OpenMeteoClient {
        OpenMeteoClient::new(Duration::from_secs(2))
            .unwrap()
            .with_base_url(server.uri())
    }

    #[tokio::test]
    async fn reads_current_conditions() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .and(query_param("latitude", "51.47"))
            .and(query_param("longitude", "-0.4543"))
            .and(query_param("current", "temperature_2m,weather_code,is_day"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "latitude": 51.48,
                "longitude": -0.46,
                "current_units": {"temperature_2m": "°C"},
                "current": {
                    "time": "2025-11-21T20:00",
                    "interval": 900,
                    "temperature_2m": 8.4,
                    "weather_code": 61,
                    "is_day": 0
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let report = client(&server).current_weather(51.47, -0.4543).await.unwrap();
        assert_eq!(report.temperature, 8.4);
        assert_eq!(report.weather_code, 61);
        assert!(!report.is_day);
        assert_eq!(report.condition, WeatherCondition::Rain);
        assert_eq!(report.icon, "🌧️");
    }

    #[tokio::test]
    async fn bad_request_carries_the_reason() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": true,
                "reason": "Latitude must be in range of -90 to 90°. Given: 123.0."
            })))
            .mount(&server)
            .await;

        let result = client(&server).current_weather(123.0, 0.0).await;
        assert!(matches!(result, Err(ApiError::Rejected(reason)) if reason.starts_with("Latitude")));
    }

    #[tokio::test]
    async fn server_errors_are_invalid_responses() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let result = client(&server).current_weather(0.0, 0.0).await;
        assert!(matches!(
            result,
            Err(ApiError::InvalidResponse { response: None, .. })
        ));
    }
}
