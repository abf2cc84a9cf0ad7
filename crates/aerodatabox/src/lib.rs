//! Flight data from AeroDataBox (via RapidAPI). The only provider that answers
//! for arbitrary past and future dates.
//! See <https://doc.aerodatabox.com/>

use airports::AirportTable;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use flight_data::{FlightProvider, LookupRequest, ProviderError};
use model::flight::{normalize_flight_number, timezone_label, Flight, FlightEndpoint, FlightStatus};
use phf::phf_map;
use utility::non_empty;

pub mod client;
pub mod data_model;

use crate::{
    client::AeroDataBoxClient,
    data_model::{FlightRecord, Movement},
};

/// AeroDataBox flight status vocabulary. Anything else, `Unknown` included,
/// maps to [`FlightStatus::Scheduled`].
pub static STATUS_TABLE: phf::Map<&'static str, FlightStatus> = phf_map! {
    "Expected" => FlightStatus::OnTime,
    "CheckIn" => FlightStatus::OnTime,
    "Boarding" => FlightStatus::Boarding,
    "GateClosed" => FlightStatus::Boarding,
    "Departed" => FlightStatus::InAir,
    "EnRoute" => FlightStatus::InAir,
    "Approaching" => FlightStatus::InAir,
    "Delayed" => FlightStatus::Delayed,
    "Diverted" => FlightStatus::Delayed,
    "Arrived" => FlightStatus::Landed,
    "Canceled" => FlightStatus::Cancelled,
    "CanceledUncertain" => FlightStatus::Cancelled,
};

pub fn map_status(status: Option<&str>) -> FlightStatus {
    status
        .and_then(|status| STATUS_TABLE.get(status.trim()))
        .copied()
        .unwrap_or_default()
}

fn delay_minutes(scheduled: DateTime<FixedOffset>, movement: &Movement) -> u32 {
    movement
        .estimated_local()
        .map(|estimated| (estimated - scheduled).num_minutes())
        .and_then(|minutes| u32::try_from(minutes).ok())
        .unwrap_or(0)
}

fn to_endpoint(
    movement: &Movement,
    time: DateTime<FixedOffset>,
    airports: &AirportTable,
) -> Option<FlightEndpoint> {
    let code = non_empty(movement.airport.iata.clone())?;
    let provider_city = movement
        .airport
        .municipality_name
        .as_deref()
        .or(movement.airport.name.as_deref());
    let resolved = airports.resolve(&code, provider_city);
    let timezone = timezone_label(movement.airport.time_zone.as_deref(), &time);
    Some(FlightEndpoint {
        estimated_time: movement.estimated_local(),
        terminal: non_empty(movement.terminal.clone()),
        gate: non_empty(movement.gate.clone()),
        ..FlightEndpoint::new(resolved, time, timezone)
    })
}

/// Maps one AeroDataBox row. Rows without airport codes or scheduled times
/// are dropped.
pub fn to_flight(record: &FlightRecord, airports: &AirportTable) -> Option<Flight> {
    let departure_time = record.departure.scheduled_local()?;
    let arrival_time = record.arrival.scheduled_local()?;
    let origin = to_endpoint(&record.departure, departure_time, airports)?;
    let destination = FlightEndpoint {
        baggage: non_empty(record.arrival.baggage_belt.clone()),
        ..to_endpoint(&record.arrival, arrival_time, airports)?
    };
    let airline = record
        .airline
        .as_ref()
        .and_then(|airline| airline.name.clone())
        .unwrap_or_default();

    Some(Flight::new(
        normalize_flight_number(&record.number),
        airline,
        origin,
        destination,
        map_status(record.status.as_deref()),
        delay_minutes(departure_time, &record.departure),
    ))
}

pub struct AeroDataBoxProvider {
    client: AeroDataBoxClient,
}

impl AeroDataBoxProvider {
    pub fn new(client: AeroDataBoxClient) -> Self {
        Self { client }
    }

    async fn fetch(
        &self,
        request: &LookupRequest<'_>,
    ) -> Result<Vec<FlightRecord>, ProviderError> {
        let tomorrow = request.next_day().filter(|_| request.is_today());
        let Some(tomorrow) = tomorrow else {
            return self
                .client
                .flights_on(request.flight_number, request.date)
                .await;
        };

        let (today, tomorrow) = futures::join!(
            self.client.flights_on(request.flight_number, request.date),
            self.client.flights_on(request.flight_number, tomorrow),
        );
        match (today, tomorrow) {
            (Ok(mut today), Ok(tomorrow)) => {
                today.extend(tomorrow);
                Ok(today)
            }
            (Ok(records), Err(why)) | (Err(why), Ok(records)) => {
                log::warn!(
                    "AeroDataBox answered only one of two days for {}: {}",
                    request.flight_number,
                    why
                );
                Ok(records)
            }
            (Err(why), Err(_)) => Err(why),
        }
    }
}

#[async_trait]
impl FlightProvider for AeroDataBoxProvider {
    fn name(&self) -> &'static str {
        "AeroDataBox"
    }

    fn supports(&self, _request: &LookupRequest<'_>) -> bool {
        true
    }

    async fn lookup(
        &self,
        request: &LookupRequest<'_>,
    ) -> Result<Vec<Flight>, ProviderError> {
        let records = self.fetch(request).await?;
        Ok(records
            .iter()
            .filter_map(|record| {
                let flight = to_flight(record, request.airports);
                if flight.is_none() {
                    log::debug!("Dropping incomplete AeroDataBox row {}.", record.number);
                }
                flight
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::NaiveDate;
    use model::airport::AirportRecord;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::client::AeroDataBoxCredentials;

    fn record(departure_local: &str, status: &str) -> serde_json::Value {
        serde_json::json!({
            "number": "AA 123",
            "status": status,
            "airline": {"name": "American Airlines", "iata": "AA"},
            "departure": {
                "airport": {
                    "iata": "JFK",
                    "icao": "KJFK",
                    "name": "New York, John F Kennedy",
                    "municipalityName": "New York",
                    "timeZone": "America/New_York"
                },
                "scheduledTime": {"local": departure_local, "utc": "ignored"},
                "revisedTime": {"local": "2025-11-21 08:20-05:00"},
                "terminal": "8",
                "gate": ""
            },
            "arrival": {
                "airport": {"iata": "LHR", "name": "London Heathrow", "timeZone": "Europe/London"},
                "scheduledTime": {"local": "2025-11-21 20:00+00:00"},
                "terminal": "3",
                "baggageBelt": "7"
            }
        })
    }

    fn airports() -> AirportTable {
        AirportTable::from_records([(
            "JFK",
            AirportRecord {
                lat: 40.6413,
                lon: -73.7781,
                city: "New York".to_owned(),
                country: "US".to_owned(),
                name: "John F Kennedy International Airport".to_owned(),
            },
        )])
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn provider(server: &MockServer) -> AeroDataBoxProvider {
        let client = AeroDataBoxClient::new(
            AeroDataBoxCredentials::new("secret"),
            Duration::from_secs(2),
        )
        .unwrap()
        .with_base_url(server.uri());
        AeroDataBoxProvider::new(client)
    }

    #[test]
    fn status_table_covers_vocabulary() {
        assert_eq!(map_status(Some("EnRoute")), FlightStatus::InAir);
        assert_eq!(map_status(Some("GateClosed")), FlightStatus::Boarding);
        assert_eq!(map_status(Some("Arrived")), FlightStatus::Landed);
        assert_eq!(map_status(Some("Canceled")), FlightStatus::Cancelled);
        assert_eq!(map_status(Some("Unknown")), FlightStatus::Scheduled);
        assert_eq!(map_status(Some("SomethingNew")), FlightStatus::Scheduled);
        assert_eq!(map_status(None), FlightStatus::Scheduled);
    }

    #[test]
    fn maps_rows_to_flights() {
        let row: FlightRecord =
            serde_json::from_value(record("2025-11-21 08:00-05:00", "Expected")).unwrap();
        let flight = to_flight(&row, &airports()).unwrap();

        assert_eq!(flight.flight_number, "AA123");
        assert_eq!(flight.airline, "American Airlines");
        assert_eq!(flight.id, "AA123-2025-11-21T08:00:00-05:00");
        assert_eq!(flight.delay, 20);
        // 20 minutes late turns the expected flight into a delayed one
        assert_eq!(flight.status, FlightStatus::Delayed);

        assert_eq!(flight.origin.city, "New York");
        assert_eq!(flight.origin.latitude, 40.6413);
        assert_eq!(flight.origin.timezone, "America/New_York");
        assert_eq!(flight.origin.terminal.as_deref(), Some("8"));
        assert_eq!(flight.origin.gate, None);

        // LHR is not in the table
        assert_eq!(flight.destination.city, "LHR");
        assert_eq!(flight.destination.latitude, 0.0);
        assert_eq!(flight.destination.longitude, 0.0);
        assert_eq!(flight.destination.baggage.as_deref(), Some("7"));
    }

    #[test]
    fn rows_without_schedule_are_dropped() {
        let mut value = record("2025-11-21 08:00-05:00", "Expected");
        value["departure"]["scheduledTime"] = serde_json::Value::Null;
        let row: FlightRecord = serde_json::from_value(value).unwrap();
        assert!(to_flight(&row, &airports()).is_none());
    }

    #[tokio::test]
    async fn past_dates_use_a_single_call() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/flights/number/AA123/2025-11-21"))
            .and(header("X-RapidAPI-Key", "secret"))
            .and(header("X-RapidAPI-Host", "aerodatabox.p.rapidapi.com"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                record("2025-11-21 08:00-05:00", "Arrived")
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let airports = airports();
        let request = LookupRequest {
            flight_number: "AA123",
            date: date("2025-11-21"),
            today: date("2025-11-30"),
            airports: &airports,
        };
        let flights = provider(&server).lookup(&request).await.unwrap();
        assert_eq!(flights.len(), 1);
        assert_eq!(flights[0].status, FlightStatus::Landed);
    }

    #[tokio::test]
    async fn today_also_asks_for_tomorrow() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/flights/number/AA123/2025-11-21"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                record("2025-11-21 08:00-05:00", "Arrived")
            ])))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/flights/number/AA123/2025-11-22"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                record("2025-11-22 08:00-05:00", "Expected")
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let airports = airports();
        let request = LookupRequest {
            flight_number: "AA123",
            date: date("2025-11-21"),
            today: date("2025-11-21"),
            airports: &airports,
        };
        let flights = provider(&server).lookup(&request).await.unwrap();
        assert_eq!(flights.len(), 2);
    }

    #[tokio::test]
    async fn one_failing_day_still_answers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/flights/number/AA123/2025-11-21"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/flights/number/AA123/2025-11-22"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                record("2025-11-22 08:00-05:00", "Expected")
            ])))
            .mount(&server)
            .await;

        let airports = airports();
        let request = LookupRequest {
            flight_number: "AA123",
            date: date("2025-11-21"),
            today: date("2025-11-21"),
            airports: &airports,
        };
        let flights = provider(&server).lookup(&request).await.unwrap();
        assert_eq!(flights.len(), 1);
    }

    #[tokio::test]
    async fn message_payload_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!({"message": "You are not subscribed to this API."}),
            ))
            .mount(&server)
            .await;

        let airports = airports();
        let request = LookupRequest {
            flight_number: "AA123",
            date: date("2025-11-21"),
            today: date("2025-11-30"),
            airports: &airports,
        };
        let result = provider(&server).lookup(&request).await;
        assert!(matches!(result, Err(ProviderError::Api { .. })));
    }

    #[tokio::test]
    async fn no_content_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let airports = airports();
        let request = LookupRequest {
            flight_number: "AA123",
            date: date("2025-11-21"),
            today: date("2025-11-30"),
            airports: &airports,
        };
        assert!(provider(&server).lookup(&request).await.unwrap().is_empty());
    }
}
