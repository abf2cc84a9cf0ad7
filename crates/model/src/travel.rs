use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::ExampleData;

/// Drives shorter than this many seconds count as light traffic.
pub const LIGHT_TRAFFIC_MAX_SECS: f64 = 1800.0;
/// Drives shorter than this many seconds count as moderate traffic.
pub const MODERATE_TRAFFIC_MAX_SECS: f64 = 3600.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum TrafficLevel {
    Light,
    Moderate,
    Heavy,
}

impl TrafficLevel {
    pub fn from_duration(duration_secs: f64) -> Self {
        if duration_secs < LIGHT_TRAFFIC_MAX_SECS {
            Self::Light
        } else if duration_secs < MODERATE_TRAFFIC_MAX_SECS {
            Self::Moderate
        } else {
            Self::Heavy
        }
    }
}

/// Driving time and distance to an airport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TravelEstimate {
    pub duration_seconds: f64,
    pub distance_meters: f64,
    /// Human readable duration, e.g. `1h 5min`.
    pub duration: String,
    /// Human readable distance, e.g. `12.3 km`.
    pub distance: String,
    pub traffic: TrafficLevel,
}

impl ExampleData for TravelEstimate {
    fn example_data() -> Self {
        Self {
            duration_seconds: 2460.0,
            distance_meters: 31200.0,
            duration: "41 min".to_owned(),
            distance: "31.2 km".to_owned(),
            traffic: TrafficLevel::Moderate,
        }
    }
}
