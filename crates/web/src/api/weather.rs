use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use model::weather::WeatherReport;
use open_meteo::OpenMeteoClient;
use serde::Deserialize;

use crate::common::{RouteErrorResponse, RouteResult};

#[derive(Debug, Deserialize)]
pub(crate) struct WeatherQuery {
    latitude: f64,
    longitude: f64,
}

pub(crate) async fn current_weather(
    State(weather): State<OpenMeteoClient>,
    params: Result<Query<WeatherQuery>, QueryRejection>,
) -> RouteResult<Json<WeatherReport>> {
    let Query(params) = params?;
    weather
        .current_weather(params.latitude, params.longitude)
        .await
        .map(Json)
        .map_err(|why| {
            log::warn!(
                "Weather lookup at ({}, {}) failed: {}",
                params.latitude,
                params.longitude,
                why
            );
            RouteErrorResponse::bad_gateway("Weather data is currently unavailable.")
        })
}
