use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::{get, on},
    Json, Router,
};
use flight_data::FlightLookup;
use model::flight::Flight;
use serde::Deserialize;
use serde_json::Value;
use utility::{non_empty, serde::date};

use crate::{
    common::{route_not_found, schema, METHOD_FILTER_ALL},
    WebState,
};

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/", get(lookup_flight))
        .route("/schedules", get(schedules))
        .route("/schema", get(schema::<Flight>))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

#[derive(Debug, Deserialize)]
pub(crate) struct FlightQuery {
    query: Option<String>,
    /// `YYYY-MM-DD`, defaults to today.
    date: Option<String>,
}

/// Zero or one flight. Bad input is answered with an empty list rather than an
/// error so the search box can fire requests while the user is typing.
async fn lookup_flight(
    State(flight_lookup): State<FlightLookup>,
    params: Result<Query<FlightQuery>, QueryRejection>,
) -> Json<Vec<Flight>> {
    let params = match params {
        Ok(Query(params)) => params,
        Err(rejection) => {
            log::debug!("Ignoring flight lookup with malformed query: {rejection}");
            return Json(vec![]);
        }
    };
    let Some(query) = non_empty(params.query) else {
        return Json(vec![]);
    };
    let date = match non_empty(params.date) {
        None => None,
        Some(raw) => match date::parse_iso(&raw) {
            Some(date) => Some(date),
            None => {
                log::debug!("Ignoring flight lookup with invalid date '{raw}'.");
                return Json(vec![]);
            }
        },
    };

    Json(flight_lookup.lookup(&query, date).await.into_iter().collect())
}

#[derive(Debug, Deserialize)]
pub(crate) struct SchedulesQuery {
    query: Option<String>,
}

async fn schedules(
    State(flight_lookup): State<FlightLookup>,
    params: Result<Query<SchedulesQuery>, QueryRejection>,
) -> Json<Vec<Value>> {
    let Ok(Query(params)) = params else {
        return Json(vec![]);
    };
    match non_empty(params.query) {
        Some(query) => Json(flight_lookup.schedules(&query).await),
        None => Json(vec![]),
    }
}
