use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub current: Current,
}

#[derive(Debug, Deserialize)]
pub struct Current {
    pub temperature_2m: f64,
    pub weather_code: i32,
    /// `1` during daylight, `0` at night.
    pub is_day: u8,
}

/// Body of a `400 Bad Request`.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub reason: String,
}
