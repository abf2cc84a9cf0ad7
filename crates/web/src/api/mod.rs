use axum::{
    response::IntoResponse,
    routing::{get, on},
    Json, Router,
};
use model::{travel::TravelEstimate, weather::WeatherReport};
use serde_json::json;

mod airports;
mod flights;
mod travel;
mod weather;

use crate::{
    common::{route_not_found, schema, METHOD_FILTER_ALL},
    WebState,
};

pub fn routes(state: WebState) -> Router {
    Router::new()
        .route("/ping", get(ping))
        .route("/weather", get(weather::current_weather))
        .route("/weather/schema", get(schema::<WeatherReport>))
        .route("/travel-time", get(travel::travel_time))
        .route("/travel-time/schema", get(schema::<TravelEstimate>))
        .nest_service("/flights", flights::routes(state.clone()))
        .nest_service("/airports", airports::routes(state.clone()))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

async fn ping() -> impl IntoResponse {
    Json(json!({
        "message": "pong!"
    }))
}
