use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::ProviderError;

/// Thin wrapper around a [`reqwest::Client`] shared by all flight data providers.
/// Every request is bounded by the configured timeout.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new(timeout: Duration) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Fetches json from `url`. Returns `None` for empty answers
    /// (`204 No Content` or an empty body).
    ///
    /// Query parameters are passed separately so api keys never end up in logs.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
        headers: &[(&str, &str)],
    ) -> Result<Option<T>, ProviderError> {
        log::debug!("Requesting endpoint '{url}'.");

        let mut request = self.client.get(url).query(query);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        let response = request.send().await?;

        match response.status() {
            reqwest::StatusCode::NO_CONTENT => Ok(None),
            status if status.is_success() => {
                let text = response.text().await?;
                if text.trim().is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(serde_json::from_str(&text)?))
                }
            }
            other => match response.text().await {
                Ok(val) => Err(ProviderError::InvalidResponse {
                    status_code: other,
                    url: url.to_owned(),
                    response: Some(val),
                }),
                Err(_) => Err(ProviderError::InvalidResponse {
                    status_code: other,
                    url: url.to_owned(),
                    response: None,
                }),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn sends_query_and_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/flights"))
            .and(query_param("flight_iata", "AA123"))
            .and(header("X-Test", "yes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([1, 2])))
            .mount(&server)
            .await;

        let client = HttpClient::new(Duration::from_secs(2)).unwrap();
        let body: Option<Value> = client
            .get_json(
                &format!("{}/flights", server.uri()),
                &[("flight_iata", "AA123")],
                &[("X-Test", "yes")],
            )
            .await
            .unwrap();
        assert_eq!(body, Some(serde_json::json!([1, 2])));
    }

    #[tokio::test]
    async fn no_content_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = HttpClient::new(Duration::from_secs(2)).unwrap();
        let body: Option<Value> = client.get_json(&server.uri(), &[], &[]).await.unwrap();
        assert!(body.is_none());
    }

    #[tokio::test]
    async fn error_status_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
            .mount(&server)
            .await;

        let client = HttpClient::new(Duration::from_secs(2)).unwrap();
        let result: Result<Option<Value>, _> = client.get_json(&server.uri(), &[], &[]).await;
        match result {
            Err(ProviderError::InvalidResponse {
                status_code,
                response,
                ..
            }) => {
                assert_eq!(status_code, reqwest::StatusCode::TOO_MANY_REQUESTS);
                assert_eq!(response.as_deref(), Some("slow down"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_json_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let client = HttpClient::new(Duration::from_secs(2)).unwrap();
        let result: Result<Option<Value>, _> = client.get_json(&server.uri(), &[], &[]).await;
        assert!(matches!(result, Err(ProviderError::Json(_))));
    }

    #[tokio::test]
    async fn slow_answers_fail() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([]))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let client = HttpClient::new(Duration::from_millis(50)).unwrap();
        let result: Result<Option<Value>, _> = client.get_json(&server.uri(), &[], &[]).await;
        assert!(matches!(result, Err(ProviderError::Request(_))));
    }
}
