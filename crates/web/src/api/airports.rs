use std::sync::Arc;

use airports::AirportTable;
use axum::{
    extract::{OriginalUri, Path, State},
    http::Method,
    routing::{get, on},
    Json, Router,
};
use model::airport::AirportRecord;
use serde::Serialize;

use crate::{
    common::{route_not_found, schema, RouteErrorResponse, RouteResult, METHOD_FILTER_ALL},
    WebState,
};

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/schema", get(schema::<AirportRecord>))
        .route("/:code", get(get_airport))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

#[derive(Debug, Serialize)]
pub(crate) struct AirportDto {
    code: String,
    #[serde(flatten)]
    airport: AirportRecord,
}

async fn get_airport(
    OriginalUri(original_uri): OriginalUri,
    Path(code): Path<String>,
    State(airports): State<Arc<AirportTable>>,
) -> RouteResult<Json<AirportDto>> {
    let code = code.trim().to_uppercase();
    airports
        .get(&code)
        .map(|airport| {
            Json(AirportDto {
                code: code.clone(),
                airport: airport.clone(),
            })
        })
        .ok_or_else(|| {
            RouteErrorResponse::not_found(&Method::GET, original_uri.path())
                .with_message(format!("Unknown airport '{code}'."))
        })
}
