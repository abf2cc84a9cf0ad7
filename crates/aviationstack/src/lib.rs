//! Current flight data from Aviationstack, the last live source before the
//! built-in data set.
//! See <https://aviationstack.com/documentation>

use airports::AirportTable;
use async_trait::async_trait;
use flight_data::{FlightProvider, LookupRequest, ProviderError};
use model::flight::{normalize_flight_number, timezone_label, Flight, FlightEndpoint, FlightStatus};
use phf::phf_map;
use utility::non_empty;

pub mod client;
pub mod data_model;

use crate::{
    client::AviationstackClient,
    data_model::{FlightRecord, Movement},
};

/// Aviationstack `flight_status` vocabulary. Anything else maps to
/// [`FlightStatus::Scheduled`].
pub static STATUS_TABLE: phf::Map<&'static str, FlightStatus> = phf_map! {
    "scheduled" => FlightStatus::OnTime,
    "active" => FlightStatus::InAir,
    "landed" => FlightStatus::Landed,
    "cancelled" => FlightStatus::Cancelled,
    "incident" => FlightStatus::Delayed,
    "diverted" => FlightStatus::Delayed,
};

pub fn map_status(status: Option<&str>) -> FlightStatus {
    status
        .map(|status| status.trim().to_lowercase())
        .and_then(|status| STATUS_TABLE.get(status.as_str()).copied())
        .unwrap_or_default()
}

fn endpoint(movement: &Movement, airports: &AirportTable) -> Option<FlightEndpoint> {
    let code = non_empty(movement.iata.clone())?;
    let time = movement.scheduled?;
    let resolved = airports.resolve(&code, movement.airport.as_deref());
    let timezone = timezone_label(movement.timezone.as_deref(), &time);
    Some(FlightEndpoint {
        estimated_time: movement.estimated,
        terminal: non_empty(movement.terminal.clone()),
        gate: non_empty(movement.gate.clone()),
        ..FlightEndpoint::new(resolved, time, timezone)
    })
}

fn delay_minutes(departure: &Movement) -> u32 {
    departure
        .delay
        .or_else(|| {
            let scheduled = departure.scheduled?;
            departure
                .estimated
                .map(|estimated| (estimated - scheduled).num_minutes())
        })
        .and_then(|minutes| u32::try_from(minutes).ok())
        .unwrap_or(0)
}

pub fn to_flight(record: &FlightRecord, airports: &AirportTable) -> Option<Flight> {
    let flight_number = normalize_flight_number(record.flight.iata.as_deref()?);
    let origin = endpoint(&record.departure, airports)?;
    let destination = FlightEndpoint {
        baggage: non_empty(record.arrival.baggage.clone()),
        ..endpoint(&record.arrival, airports)?
    };
    let airline = record
        .airline
        .as_ref()
        .and_then(|airline| airline.name.clone())
        .unwrap_or_default();

    Some(Flight::new(
        flight_number,
        airline,
        origin,
        destination,
        map_status(record.flight_status.as_deref()),
        delay_minutes(&record.departure),
    ))
}

pub struct AviationstackProvider {
    client: AviationstackClient,
}

impl AviationstackProvider {
    pub fn new(client: AviationstackClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FlightProvider for AviationstackProvider {
    fn name(&self) -> &'static str {
        "Aviationstack"
    }

    fn supports(&self, request: &LookupRequest<'_>) -> bool {
        request.is_today()
    }

    async fn lookup(
        &self,
        request: &LookupRequest<'_>,
    ) -> Result<Vec<Flight>, ProviderError> {
        let records = self.client.flights(request.flight_number).await?;
        Ok(records
            .iter()
            .filter_map(|record| to_flight(record, request.airports))
            .collect())
    }
}
