use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::ExampleData;

/// Reference data for one airport, keyed by its IATA code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AirportRecord {
    pub lat: f64,
    pub lon: f64,
    pub city: String,
    pub country: String,
    pub name: String,
}

impl ExampleData for AirportRecord {
    fn example_data() -> Self {
        Self {
            lat: 49.0097,
            lon: 2.5479,
            city: "Paris".to_owned(),
            country: "FR".to_owned(),
            name: "Charles de Gaulle International Airport".to_owned(),
        }
    }
}

/// Airport as resolved for a flight: coordinates plus the label to display.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAirport {
    pub code: String,
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl ResolvedAirport {
    /// Placeholder for codes missing from the reference table.
    pub fn unknown(code: &str) -> Self {
        Self {
            code: code.to_owned(),
            city: code.to_owned(),
            latitude: 0.0,
            longitude: 0.0,
        }
    }

    pub fn has_coordinates(&self) -> bool {
        self.latitude != 0.0 || self.longitude != 0.0
    }
}
