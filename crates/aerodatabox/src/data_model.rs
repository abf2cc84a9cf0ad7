use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use utility::serde::date_time;

/// Body of `GET /flights/number/{number}/{date}`. RapidAPI sometimes answers
/// with a plain message object instead of a list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FlightsResponse {
    Flights(Vec<FlightRecord>),
    Message { message: String },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightRecord {
    pub number: String,
    #[serde(default)]
    pub status: Option<String>,
    pub departure: Movement,
    pub arrival: Movement,
    #[serde(default)]
    pub airline: Option<Airline>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movement {
    pub airport: Airport,
    #[serde(default)]
    pub scheduled_time: Option<Time>,
    #[serde(default)]
    pub revised_time: Option<Time>,
    #[serde(default)]
    pub predicted_time: Option<Time>,
    #[serde(default)]
    pub terminal: Option<String>,
    #[serde(default)]
    pub gate: Option<String>,
    #[serde(default)]
    pub baggage_belt: Option<String>,
}

impl Movement {
    pub fn scheduled_local(&self) -> Option<DateTime<FixedOffset>> {
        self.scheduled_time.as_ref().and_then(|time| time.local)
    }

    /// Best known actual time: revised if present, else predicted.
    pub fn estimated_local(&self) -> Option<DateTime<FixedOffset>> {
        self.revised_time
            .as_ref()
            .and_then(|time| time.local)
            .or_else(|| self.predicted_time.as_ref().and_then(|time| time.local))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Airport {
    #[serde(default)]
    pub iata: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub municipality_name: Option<String>,
    #[serde(default)]
    pub time_zone: Option<String>,
}

/// A point in time. Only the local representation (`2025-11-21 08:00-05:00`)
/// is used, it already carries the offset.
#[derive(Debug, Clone, Deserialize)]
pub struct Time {
    #[serde(deserialize_with = "date_time::deserialize_with_offset_option", default)]
    pub local: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Airline {
    #[serde(default)]
    pub name: Option<String>,
}
