use std::sync::Arc;

use airports::AirportTable;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use model::travel::TravelEstimate;
use osrm::{client::Coordinate, OsrmClient};
use serde::Deserialize;
use utility::non_empty;

use crate::common::{RouteErrorResponse, RouteResult};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TravelQuery {
    latitude: f64,
    longitude: f64,
    /// IATA code of the target airport.
    airport: Option<String>,
    to_latitude: Option<f64>,
    to_longitude: Option<f64>,
}

/// Where to drive to: either an airport from the table or explicit coordinates.
fn target(params: &TravelQuery, airports: &AirportTable) -> RouteResult<Coordinate> {
    let target = match (
        non_empty(params.airport.clone()),
        params.to_latitude,
        params.to_longitude,
    ) {
        (Some(code), _, _) => {
            let airport = airports.resolve(&code, None);
            airport
                .has_coordinates()
                .then(|| Coordinate::new(airport.latitude, airport.longitude))
        }
        (None, Some(latitude), Some(longitude)) => {
            Some(Coordinate::new(latitude, longitude)).filter(|coordinate| {
                coordinate.latitude != 0.0 || coordinate.longitude != 0.0
            })
        }
        (None, _, _) => {
            return Err(RouteErrorResponse::bad_request(
                "Expected either 'airport' or 'toLatitude' and 'toLongitude'.",
            ))
        }
    };

    target.ok_or_else(|| RouteErrorResponse::unprocessable("Airport coordinates unavailable."))
}

pub(crate) async fn travel_time(
    State(routing): State<OsrmClient>,
    State(airports): State<Arc<AirportTable>>,
    params: Result<Query<TravelQuery>, QueryRejection>,
) -> RouteResult<Json<TravelEstimate>> {
    let Query(params) = params?;
    let from = Coordinate::new(params.latitude, params.longitude);
    let to = target(&params, &airports)?;

    routing.driving(from, to).await.map(Json).map_err(|why| {
        log::warn!("Route calculation failed: {}", why);
        RouteErrorResponse::bad_gateway("Travel time is currently unavailable.")
    })
}
