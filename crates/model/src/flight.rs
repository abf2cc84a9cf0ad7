use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, SecondsFormat};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{airport::ResolvedAirport, ExampleData};

/// A departure delay of at least this many minutes turns an on time flight into
/// a delayed one.
pub const DELAY_THRESHOLD_MINUTES: u32 = 15;

/// Uppercases a flight designator and strips all whitespace, `"aa 123"` becomes
/// `"AA123"`.
pub fn normalize_flight_number(query: &str) -> String {
    query
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
pub enum FlightStatus {
    #[serde(rename = "On Time")]
    OnTime,
    Delayed,
    Boarding,
    #[serde(rename = "In Air")]
    InAir,
    Landed,
    Cancelled,
    #[default]
    Scheduled,
}

/// Coarse phase of a flight, used to rank candidates. Earlier variants win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FlightPhase {
    Active,
    Future,
    Past,
}

impl FlightStatus {
    pub fn phase(&self) -> FlightPhase {
        match self {
            Self::InAir | Self::Boarding => FlightPhase::Active,
            Self::OnTime | Self::Delayed | Self::Scheduled => FlightPhase::Future,
            Self::Landed | Self::Cancelled => FlightPhase::Past,
        }
    }

    pub fn is_active(&self) -> bool {
        self.phase() == FlightPhase::Active
    }

    /// Reports an on time flight as delayed once its delay crosses
    /// [`DELAY_THRESHOLD_MINUTES`].
    pub fn with_delay(self, delay_minutes: u32) -> Self {
        match self {
            Self::OnTime if delay_minutes >= DELAY_THRESHOLD_MINUTES => Self::Delayed,
            other => other,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::OnTime => "On Time",
            Self::Delayed => "Delayed",
            Self::Boarding => "Boarding",
            Self::InAir => "In Air",
            Self::Landed => "Landed",
            Self::Cancelled => "Cancelled",
            Self::Scheduled => "Scheduled",
        }
    }
}

impl fmt::Display for FlightStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Departure or arrival side of a flight.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FlightEndpoint {
    /// IATA airport code.
    pub code: String,
    pub city: String,
    /// Scheduled local time.
    pub time: DateTime<FixedOffset>,
    /// Revised or estimated local time, if the provider knows one.
    pub estimated_time: Option<DateTime<FixedOffset>>,
    pub timezone: String,
    pub latitude: f64,
    pub longitude: f64,
    pub terminal: Option<String>,
    pub gate: Option<String>,
    /// Baggage belt, only reported for arrivals.
    pub baggage: Option<String>,
}

impl FlightEndpoint {
    /// Endpoint at a resolved airport without terminal, gate or baggage info.
    pub fn new(
        airport: ResolvedAirport,
        time: DateTime<FixedOffset>,
        timezone: impl Into<String>,
    ) -> Self {
        Self {
            code: airport.code,
            city: airport.city,
            time,
            estimated_time: None,
            timezone: timezone.into(),
            latitude: airport.latitude,
            longitude: airport.longitude,
            terminal: None,
            gate: None,
            baggage: None,
        }
    }

    pub fn local_date(&self) -> NaiveDate {
        self.time.date_naive()
    }
}

/// Label for an endpoint's time zone: the provider's zone name if known,
/// otherwise the utc offset of `time`.
pub fn timezone_label(zone: Option<&str>, time: &DateTime<FixedOffset>) -> String {
    match zone.map(str::trim).filter(|zone| !zone.is_empty()) {
        Some(zone) => zone.to_owned(),
        None if time.offset().local_minus_utc() == 0 => "UTC".to_owned(),
        None => format!("UTC{}", time.offset()),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    pub id: String,
    pub flight_number: String,
    pub airline: String,
    pub origin: FlightEndpoint,
    pub destination: FlightEndpoint,
    pub status: FlightStatus,
    /// Departure delay in minutes.
    pub delay: u32,
}

impl Flight {
    pub fn new(
        flight_number: impl Into<String>,
        airline: impl Into<String>,
        origin: FlightEndpoint,
        destination: FlightEndpoint,
        status: FlightStatus,
        delay: u32,
    ) -> Self {
        let flight_number = flight_number.into();
        Self {
            id: Self::make_id(&flight_number, &origin.time),
            flight_number,
            airline: airline.into(),
            origin,
            destination,
            status: status.with_delay(delay),
            delay,
        }
    }

    /// Key used to deduplicate rows of a single response.
    pub fn make_id(flight_number: &str, departure: &DateTime<FixedOffset>) -> String {
        format!("{}-{}", flight_number, departure.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }

    pub fn departure(&self) -> DateTime<FixedOffset> {
        self.origin.time
    }

    pub fn departure_date(&self) -> NaiveDate {
        self.origin.local_date()
    }
}

impl ExampleData for Flight {
    fn example_data() -> Self {
        let departure = DateTime::parse_from_rfc3339("2025-11-21T08:00:00-05:00")
            .unwrap_or_default();
        let arrival = DateTime::parse_from_rfc3339("2025-11-21T20:00:00+00:00")
            .unwrap_or_default();
        Flight::new(
            "AA123",
            "American Airlines",
            FlightEndpoint {
                code: "JFK".to_owned(),
                city: "New York".to_owned(),
                time: departure,
                estimated_time: None,
                timezone: "America/New_York".to_owned(),
                latitude: 40.6413,
                longitude: -73.7781,
                terminal: Some("4".to_owned()),
                gate: Some("B32".to_owned()),
                baggage: None,
            },
            FlightEndpoint {
                code: "LHR".to_owned(),
                city: "London".to_owned(),
                time: arrival,
                estimated_time: None,
                timezone: "Europe/London".to_owned(),
                latitude: 51.47,
                longitude: -0.4543,
                terminal: Some("3".to_owned()),
                gate: None,
                baggage: Some("7".to_owned()),
            },
            FlightStatus::OnTime,
            0,
        )
    }
}
