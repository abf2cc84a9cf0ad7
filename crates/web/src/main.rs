use std::error::Error;
use std::process::ExitCode;
use std::sync::Arc;

use aerodatabox::{
    client::{AeroDataBoxClient, AeroDataBoxCredentials},
    AeroDataBoxProvider,
};
use airlabs::{
    client::{AirLabsClient, AirLabsCredentials},
    AirLabsProvider,
};
use airports::AirportTable;
use aviationstack::{
    client::{AviationstackClient, AviationstackCredentials},
    AviationstackProvider,
};
use flight_data::{mock::MockProvider, FlightLookup};
use open_meteo::OpenMeteoClient;
use osrm::OsrmClient;
use web::{start_web_server, Settings, WebState};

/// Chains every provider with credentials in the environment, in priority
/// order.
fn flight_lookup(
    settings: &Settings,
    airports: Arc<AirportTable>,
) -> Result<FlightLookup, Box<dyn Error>> {
    let timeout = settings.provider_timeout;
    let mut lookup = FlightLookup::new(airports).with_timeout(timeout);

    if let Some(credentials) = AeroDataBoxCredentials::from_env() {
        let client = AeroDataBoxClient::new(credentials, timeout)?;
        lookup = lookup.with_provider(AeroDataBoxProvider::new(client));
    }
    if let Some(credentials) = AirLabsCredentials::from_env() {
        let client = AirLabsClient::new(credentials, timeout)?;
        lookup = lookup.with_provider(AirLabsProvider::new(client));
    }
    if let Some(credentials) = AviationstackCredentials::from_env() {
        let client = AviationstackClient::new(credentials, timeout)?;
        lookup = lookup.with_provider(AviationstackProvider::new(client));
    }
    if settings.mock_data {
        lookup = lookup.with_provider(MockProvider);
    }

    Ok(lookup)
}

fn web_state(settings: &Settings) -> Result<WebState, Box<dyn Error>> {
    let airports = Arc::new(AirportTable::load_or_empty(&settings.airports_json));
    let flight_lookup = flight_lookup(settings, airports.clone())?;
    if flight_lookup.provider_names().is_empty() {
        log::warn!("No flight data provider configured, every lookup will come back empty.");
    } else {
        log::info!(
            "Flight data providers: {}.",
            flight_lookup.provider_names().join(", ")
        );
    }

    Ok(WebState {
        flight_lookup,
        airports,
        weather: OpenMeteoClient::from_env(settings.provider_timeout)?,
        routing: OsrmClient::from_env(settings.provider_timeout)?,
    })
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let settings = Settings::from_env();
    let state = match web_state(&settings) {
        Ok(state) => state,
        Err(why) => {
            log::error!("Could not set up the web server: {}", why);
            return ExitCode::FAILURE;
        }
    };

    if let Err(why) = start_web_server(settings, state).await {
        log::error!("Web server stopped: {}", why);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
