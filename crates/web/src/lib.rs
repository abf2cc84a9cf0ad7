pub use crate::common::RouteResult;

use std::path::Path;
use std::sync::Arc;

use airports::AirportTable;
use axum::{extract::FromRef, routing::get_service, Router};
use flight_data::FlightLookup;
use open_meteo::OpenMeteoClient;
use osrm::OsrmClient;
use tokio::net::TcpListener;
use tower_http::{
    catch_panic::CatchPanicLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

pub mod api;
pub mod common;
pub mod config;

pub use config::Settings;

#[derive(Clone, FromRef)]
pub struct WebState {
    pub flight_lookup: FlightLookup,
    pub airports: Arc<AirportTable>,
    pub weather: OpenMeteoClient,
    pub routing: OsrmClient,
}

/// The whole application: the json api below `/api` and the front end bundle
/// for everything else.
pub fn router(settings: &Settings, state: WebState) -> Router {
    Router::new()
        .nest_service("/api", api::routes(state))
        .fallback_service(static_content_router(&settings.static_dir))
        .layer(CatchPanicLayer::custom(common::panic_response))
        .layer(TraceLayer::new_for_http())
}

/// Serves `router` on an already bound listener until the process stops.
pub async fn serve(listener: TcpListener, router: Router) -> std::io::Result<()> {
    axum::serve(listener, router.into_make_service()).await
}

pub async fn start_web_server(settings: Settings, state: WebState) -> std::io::Result<()> {
    let routes = router(&settings, state);

    let listener = TcpListener::bind(&settings.bind_address).await?;
    log::info!("Listening on http://{}.", listener.local_addr()?);
    serve(listener, routes).await
}

fn static_content_router(static_dir: &Path) -> Router {
    Router::new().fallback_service(get_service(
        ServeDir::new(static_dir).not_found_service(ServeFile::new(static_dir.join("404.html"))),
    ))
}
