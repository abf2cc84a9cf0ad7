//! A small fixed data set answering lookups without any third party service.
//! Useful for demos and local development, enabled through configuration.

use async_trait::async_trait;
use chrono::{DateTime, Days, FixedOffset, NaiveDate, NaiveTime, TimeZone as _};
use model::flight::{Flight, FlightEndpoint, FlightStatus};

use crate::{
    provider::{FlightProvider, LookupRequest},
    ProviderError,
};

struct MockEndpoint {
    code: &'static str,
    city: &'static str,
    /// Local wall clock time, `HH:MM`.
    time: &'static str,
    /// Days after the departure date.
    day_offset: u64,
    utc_offset_hours: i32,
    timezone: &'static str,
    latitude: f64,
    longitude: f64,
    terminal: Option<&'static str>,
    gate: Option<&'static str>,
}

struct MockFlight {
    flight_number: &'static str,
    airline: &'static str,
    origin: MockEndpoint,
    destination: MockEndpoint,
    status: FlightStatus,
}

const MOCK_FLIGHTS: [MockFlight; 5] = [
    MockFlight {
        flight_number: "AA123",
        airline: "American Airlines",
        origin: MockEndpoint {
            code: "JFK",
            city: "New York",
            time: "08:00",
            day_offset: 0,
            utc_offset_hours: -5,
            timezone: "America/New_York",
            latitude: 40.6413,
            longitude: -73.7781,
            terminal: Some("4"),
            gate: Some("B32"),
        },
        destination: MockEndpoint {
            code: "LHR",
            city: "London",
            time: "20:00",
            day_offset: 0,
            utc_offset_hours: 0,
            timezone: "Europe/London",
            latitude: 51.47,
            longitude: -0.4543,
            terminal: Some("3"),
            gate: Some("A12"),
        },
        status: FlightStatus::OnTime,
    },
    MockFlight {
        flight_number: "BA456",
        airline: "British Airways",
        origin: MockEndpoint {
            code: "LHR",
            city: "London",
            time: "10:00",
            day_offset: 0,
            utc_offset_hours: 0,
            timezone: "Europe/London",
            latitude: 51.47,
            longitude: -0.4543,
            terminal: Some("5"),
            gate: Some("A22"),
        },
        destination: MockEndpoint {
            code: "JFK",
            city: "New York",
            time: "13:00",
            day_offset: 0,
            utc_offset_hours: -5,
            timezone: "America/New_York",
            latitude: 40.6413,
            longitude: -73.7781,
            terminal: Some("7"),
            gate: Some("C45"),
        },
        status: FlightStatus::InAir,
    },
    MockFlight {
        flight_number: "DL789",
        airline: "Delta Air Lines",
        origin: MockEndpoint {
            code: "LAX",
            city: "Los Angeles",
            time: "09:00",
            day_offset: 0,
            utc_offset_hours: -8,
            timezone: "America/Los_Angeles",
            latitude: 33.9416,
            longitude: -118.4085,
            terminal: None,
            gate: None,
        },
        destination: MockEndpoint {
            code: "HND",
            city: "Tokyo",
            time: "14:00",
            day_offset: 1,
            utc_offset_hours: 9,
            timezone: "Asia/Tokyo",
            latitude: 35.5494,
            longitude: 139.7798,
            terminal: None,
            gate: None,
        },
        status: FlightStatus::Boarding,
    },
    MockFlight {
        flight_number: "UA101",
        airline: "United Airlines",
        origin: MockEndpoint {
            code: "SFO",
            city: "San Francisco",
            time: "11:30",
            day_offset: 0,
            utc_offset_hours: -8,
            timezone: "America/Los_Angeles",
            latitude: 37.6213,
            longitude: -122.379,
            terminal: None,
            gate: None,
        },
        destination: MockEndpoint {
            code: "SIN",
            city: "Singapore",
            time: "19:30",
            day_offset: 1,
            utc_offset_hours: 8,
            timezone: "Asia/Singapore",
            latitude: 1.3644,
            longitude: 103.9915,
            terminal: None,
            gate: None,
        },
        status: FlightStatus::Delayed,
    },
    MockFlight {
        flight_number: "AF202",
        airline: "Air France",
        origin: MockEndpoint {
            code: "CDG",
            city: "Paris",
            time: "14:00",
            day_offset: 0,
            utc_offset_hours: 1,
            timezone: "Europe/Paris",
            latitude: 49.0097,
            longitude: 2.5479,
            terminal: None,
            gate: None,
        },
        destination: MockEndpoint {
            code: "DXB",
            city: "Dubai",
            time: "23:45",
            day_offset: 0,
            utc_offset_hours: 4,
            timezone: "Asia/Dubai",
            latitude: 25.2532,
            longitude: 55.3657,
            terminal: None,
            gate: None,
        },
        status: FlightStatus::OnTime,
    },
];

impl MockEndpoint {
    fn local_time(&self, departure_date: NaiveDate) -> Option<DateTime<FixedOffset>> {
        let date = departure_date.checked_add_days(Days::new(self.day_offset))?;
        let time = NaiveTime::parse_from_str(self.time, "%H:%M").ok()?;
        FixedOffset::east_opt(self.utc_offset_hours * 3600)?
            .from_local_datetime(&date.and_time(time))
            .single()
    }

    fn to_endpoint(&self, departure_date: NaiveDate) -> Option<FlightEndpoint> {
        Some(FlightEndpoint {
            code: self.code.to_owned(),
            city: self.city.to_owned(),
            time: self.local_time(departure_date)?,
            estimated_time: None,
            timezone: self.timezone.to_owned(),
            latitude: self.latitude,
            longitude: self.longitude,
            terminal: self.terminal.map(str::to_owned),
            gate: self.gate.map(str::to_owned),
            baggage: None,
        })
    }
}

impl MockFlight {
    fn to_flight(&self, departure_date: NaiveDate) -> Option<Flight> {
        Some(Flight::new(
            self.flight_number,
            self.airline,
            self.origin.to_endpoint(departure_date)?,
            self.destination.to_endpoint(departure_date)?,
            self.status,
            0,
        ))
    }
}

/// Answers lookups from [`MOCK_FLIGHTS`], moved onto the requested date.
#[derive(Debug, Clone, Default)]
pub struct MockProvider;

#[async_trait]
impl FlightProvider for MockProvider {
    fn name(&self) -> &'static str {
        "Mock Data"
    }

    fn supports(&self, _request: &LookupRequest<'_>) -> bool {
        true
    }

    async fn lookup(
        &self,
        request: &LookupRequest<'_>,
    ) -> Result<Vec<Flight>, ProviderError> {
        Ok(MOCK_FLIGHTS
            .iter()
            .filter(|mock| mock.flight_number == request.flight_number)
            .filter_map(|mock| mock.to_flight(request.date))
            .collect())
    }
}
