use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use serde_json::Value;
use utility::serde::date_time;

#[derive(Debug, Deserialize)]
pub struct FlightsResponse {
    #[serde(default)]
    pub data: Vec<FlightRecord>,
    pub error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    pub code: Option<Value>,
}

impl ErrorBody {
    pub fn code(&self) -> Option<String> {
        self.code.as_ref().map(|code| match code {
            Value::String(code) => code.clone(),
            other => other.to_string(),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FlightRecord {
    pub flight_status: Option<String>,
    pub departure: Movement,
    pub arrival: Movement,
    pub airline: Option<Airline>,
    pub flight: Designator,
}

/// Departure or arrival. Times are RFC 3339 timestamps.
#[derive(Debug, Clone, Deserialize)]
pub struct Movement {
    pub iata: Option<String>,
    pub airport: Option<String>,
    pub timezone: Option<String>,
    #[serde(deserialize_with = "date_time::deserialize_with_offset_option", default)]
    pub scheduled: Option<DateTime<FixedOffset>>,
    #[serde(deserialize_with = "date_time::deserialize_with_offset_option", default)]
    pub estimated: Option<DateTime<FixedOffset>>,
    pub terminal: Option<String>,
    pub gate: Option<String>,
    pub baggage: Option<String>,
    /// Delay in minutes.
    pub delay: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Airline {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Designator {
    pub iata: Option<String>,
}
