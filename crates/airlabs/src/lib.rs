//! Live flight data and schedules from AirLabs.
//! See <https://airlabs.co/docs/>

use airports::AirportTable;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone as _};
use flight_data::{FlightProvider, LookupRequest, ProviderError};
use model::flight::{normalize_flight_number, timezone_label, Flight, FlightEndpoint, FlightStatus};
use phf::phf_map;
use serde_json::Value;
use utility::{non_empty, serde::date_time};

pub mod client;
pub mod data_model;

use crate::{client::AirLabsClient, data_model::FlightInfo};

/// AirLabs flight status vocabulary. Anything else maps to
/// [`FlightStatus::Scheduled`].
pub static STATUS_TABLE: phf::Map<&'static str, FlightStatus> = phf_map! {
    "scheduled" => FlightStatus::OnTime,
    "boarding" => FlightStatus::Boarding,
    "en-route" => FlightStatus::InAir,
    "active" => FlightStatus::InAir,
    "delayed" => FlightStatus::Delayed,
    "landed" => FlightStatus::Landed,
    "cancelled" => FlightStatus::Cancelled,
};

pub fn map_status(status: Option<&str>) -> FlightStatus {
    status
        .map(|status| status.trim().to_lowercase())
        .and_then(|status| STATUS_TABLE.get(status.as_str()).copied())
        .unwrap_or_default()
}

/// Combines a local wall clock time with its utc counterpart. Without the
/// utc time the local time is taken as utc.
fn zoned(local: Option<NaiveDateTime>, utc: Option<NaiveDateTime>) -> Option<DateTime<FixedOffset>> {
    match (local, utc) {
        (Some(local), Some(utc)) => date_time::with_offset_from_utc(local, utc),
        (Some(time), None) | (None, Some(time)) => FixedOffset::east_opt(0)?
            .from_local_datetime(&time)
            .single(),
        (None, None) => None,
    }
}

/// Puts an estimate given as local wall clock time into the offset of the
/// scheduled time.
fn estimate(
    scheduled: &DateTime<FixedOffset>,
    estimated: Option<NaiveDateTime>,
) -> Option<DateTime<FixedOffset>> {
    scheduled
        .offset()
        .from_local_datetime(&estimated?)
        .single()
}

fn delay_minutes(info: &FlightInfo, departure: &DateTime<FixedOffset>) -> u32 {
    info.dep_delayed
        .or(info.delayed)
        .or_else(|| {
            estimate(departure, info.dep_estimated)
                .map(|estimated| (estimated - *departure).num_minutes())
        })
        .and_then(|minutes| u32::try_from(minutes).ok())
        .unwrap_or(0)
}

fn endpoint(
    code: &Option<String>,
    city: Option<&str>,
    time: DateTime<FixedOffset>,
    airports: &AirportTable,
) -> Option<FlightEndpoint> {
    let code = non_empty(code.clone())?;
    let resolved = airports.resolve(&code, city);
    let timezone = timezone_label(None, &time);
    Some(FlightEndpoint::new(resolved, time, timezone))
}

/// Maps one AirLabs flight. Flights without airport codes or scheduled times
/// are dropped.
pub fn to_flight(info: &FlightInfo, airports: &AirportTable) -> Option<Flight> {
    let flight_number = normalize_flight_number(info.flight_iata.as_deref()?);
    let departure = zoned(info.dep_time, info.dep_time_utc)?;
    let arrival = zoned(info.arr_time, info.arr_time_utc)?;

    let origin = FlightEndpoint {
        estimated_time: estimate(&departure, info.dep_estimated),
        terminal: non_empty(info.dep_terminal.clone()),
        gate: non_empty(info.dep_gate.clone()),
        ..endpoint(
            &info.dep_iata,
            info.dep_city.as_deref().or(info.dep_name.as_deref()),
            departure,
            airports,
        )?
    };
    let destination = FlightEndpoint {
        estimated_time: estimate(&arrival, info.arr_estimated),
        terminal: non_empty(info.arr_terminal.clone()),
        gate: non_empty(info.arr_gate.clone()),
        baggage: non_empty(info.arr_baggage.clone()),
        ..endpoint(
            &info.arr_iata,
            info.arr_city.as_deref().or(info.arr_name.as_deref()),
            arrival,
            airports,
        )?
    };

    Some(Flight::new(
        flight_number,
        info.airline_name.clone().unwrap_or_default(),
        origin,
        destination,
        map_status(info.status.as_deref()),
        delay_minutes(info, &departure),
    ))
}

/// AirLabs only knows about flights currently in its live feed, so it is
/// only asked for today.
pub struct AirLabsProvider {
    client: AirLabsClient,
}

impl AirLabsProvider {
    pub fn new(client: AirLabsClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FlightProvider for AirLabsProvider {
    fn name(&self) -> &'static str {
        "AirLabs"
    }

    fn supports(&self, request: &LookupRequest<'_>) -> bool {
        request.is_today()
    }

    async fn lookup(
        &self,
        request: &LookupRequest<'_>,
    ) -> Result<Vec<Flight>, ProviderError> {
        let flights = self.client.flight(request.flight_number).await?;
        Ok(flights
            .iter()
            .filter_map(|info| to_flight(info, request.airports))
            .collect())
    }

    async fn schedules(
        &self,
        flight_number: &str,
    ) -> Result<Option<Vec<Value>>, ProviderError> {
        self.client.schedules(flight_number).await.map(Some)
    }
}
