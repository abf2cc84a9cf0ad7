use std::env;
use std::time::Duration;

use model::travel::{TrafficLevel, TravelEstimate};
use utility::format;

use crate::{data_model::RouteResponse, ApiError};

pub const OSRM_API_URL: &str = "https://router.project-osrm.org";

/// A coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    base_url: String,
    client: reqwest::Client,
}

impl OsrmClient {
    pub fn new(timeout: Duration) -> Result<Self, ApiError> {
        Ok(Self {
            base_url: OSRM_API_URL.to_owned(),
            client: reqwest::Client::builder().timeout(timeout).build()?,
        })
    }

    /// Uses `OSRM_URL` as base url if set.
    pub fn from_env(timeout: Duration) -> Result<Self, ApiError> {
        let client = Self::new(timeout)?;
        Ok(match env::var("OSRM_URL") {
            Ok(base_url) => client.with_base_url(base_url),
            Err(_) => client,
        })
    }

    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    /// Fastest driving route between two coordinates.
    pub async fn driving(
        &self,
        from: Coordinate,
        to: Coordinate,
    ) -> Result<TravelEstimate, ApiError> {
        // OSRM expects longitude first
        let url = format!(
            "{}/route/v1/driving/{},{};{},{}",
            self.base_url, from.longitude, from.latitude, to.longitude, to.latitude
        );
        log::debug!("Requesting endpoint '{url}'.");

        let response = self
            .client
            .get(&url)
            .query(&[("overview", "false")])
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;

        let route: RouteResponse = match serde_json::from_str(&text) {
            Ok(route) => route,
            Err(_) if !status.is_success() => {
                return Err(ApiError::InvalidResponse {
                    status_code: status,
                    url,
                    response: Some(text).filter(|text| !text.is_empty()),
                })
            }
            Err(why) => return Err(why.into()),
        };

        if route.code != "Ok" {
            return Err(ApiError::Routing {
                code: route.code,
                message: route.message,
            });
        }
        let best = route.routes.first().ok_or(ApiError::NoRoute)?;
        Ok(estimate(best.duration, best.distance))
    }
}

fn estimate(duration_seconds: f64, distance_meters: f64) -> TravelEstimate {
    TravelEstimate {
        duration_seconds,
        distance_meters,
        duration: format::duration_hours_minutes(duration_seconds),
        distance: format::distance_km(distance_meters),
        traffic: TrafficLevel::from_duration(duration_seconds),
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client(server: &MockServer) -> OsrmClient {
        OsrmClient::new(Duration::from_secs(2))
            .unwrap()
            .with_base_url(format!("{}/", server.uri()))
    }

    fn from() -> Coordinate {
        Coordinate::new(40.7128, -74.006)
    }

    fn to() -> Coordinate {
        Coordinate::new(40.6413, -73.7781)
    }

    #[tokio::test]
    async fn builds_estimate_from_first_route() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/route/v1/driving/-74.006,40.7128;-73.7781,40.6413"))
            .and(query_param("overview", "false"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "code": "Ok",
                "routes": [
                    {"duration": 2460.0, "distance": 31234.0, "weight": 2460.0},
                    {"duration": 3000.0, "distance": 29000.0, "weight": 3000.0}
                ],
                "waypoints": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let estimate = client(&server).driving(from(), to()).await.unwrap();
        assert_eq!(estimate.duration, "41 min");
        assert_eq!(estimate.distance, "31.2 km");
        assert_eq!(estimate.traffic, TrafficLevel::Moderate);
    }

    #[tokio::test]
    async fn no_route_code_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "code": "NoRoute",
                "message": "Impossible route between points"
            })))
            .mount(&server)
            .await;

        let result = client(&server).driving(from(), to()).await;
        assert!(matches!(result, Err(ApiError::Routing { code, .. }) if code == "NoRoute"));
    }

    #[tokio::test]
    async fn empty_route_list_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"code": "Ok", "routes": []})),
            )
            .mount(&server)
            .await;

        let result = client(&server).driving(from(), to()).await;
        assert!(matches!(result, Err(ApiError::NoRoute)));
    }

    #[tokio::test]
    async fn garbage_from_proxies_is_an_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
            .mount(&server)
            .await;

        let result = client(&server).driving(from(), to()).await;
        assert!(matches!(
            result,
            Err(ApiError::InvalidResponse { response: Some(_), .. })
        ));
    }

    #[test]
    fn long_drives_are_heavy_traffic() {
        let estimate = estimate(3900.0, 80_000.0);
        assert_eq!(estimate.duration, "1h 5min");
        assert_eq!(estimate.distance, "80.0 km");
        assert_eq!(estimate.traffic, TrafficLevel::Heavy);
    }
}
