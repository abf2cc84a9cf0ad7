use std::sync::Arc;
use std::time::Duration;

use airports::AirportTable;
use chrono::{Local, NaiveDate};
use model::flight::{normalize_flight_number, Flight};
use serde_json::Value;
use tokio::time;

use crate::{
    provider::{FlightProvider, LookupRequest},
    selection, ProviderError, DEFAULT_TIMEOUT,
};

/// Resolves a flight number to at most one flight by asking providers in
/// priority order. Provider failures are logged and skipped, a lookup itself
/// never fails.
#[derive(Clone)]
pub struct FlightLookup {
    providers: Vec<Arc<dyn FlightProvider>>,
    airports: Arc<AirportTable>,
    timeout: Duration,
}

impl FlightLookup {
    pub fn new(airports: Arc<AirportTable>) -> Self {
        Self {
            providers: vec![],
            airports,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Appends a provider. Providers added first are asked first.
    pub fn with_provider<P: FlightProvider + 'static>(mut self, provider: P) -> Self {
        self.providers.push(Arc::new(provider));
        self
    }

    /// Upper bound for a single provider's whole lookup.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|provider| provider.name()).collect()
    }

    /// Looks up `query` on `date`, defaulting to the server's local today.
    pub async fn lookup(&self, query: &str, date: Option<NaiveDate>) -> Option<Flight> {
        let today = Local::now().date_naive();
        self.lookup_on(query, date.unwrap_or(today), today).await
    }

    /// Same as [`FlightLookup::lookup`] with an explicit notion of today.
    pub async fn lookup_on(
        &self,
        query: &str,
        date: NaiveDate,
        today: NaiveDate,
    ) -> Option<Flight> {
        let flight_number = designator(query)?;
        let request = LookupRequest {
            flight_number: &flight_number,
            date,
            today,
            airports: &self.airports,
        };

        for provider in self.providers.iter() {
            if !provider.supports(&request) {
                log::debug!(
                    "Skipping provider '{}' for {} on {}.",
                    provider.name(),
                    flight_number,
                    date
                );
                continue;
            }

            let flights = match self.bounded(provider.lookup(&request)).await {
                Ok(flights) => flights,
                Err(why) => {
                    log::warn!(
                        "Provider '{}' failed for {} on {}: {}",
                        provider.name(),
                        flight_number,
                        date,
                        why
                    );
                    continue;
                }
            };

            let candidates = flights
                .into_iter()
                .filter(|flight| selection::is_relevant(flight, &request))
                .collect::<Vec<_>>();
            if let Some(flight) = selection::select(candidates) {
                log::info!(
                    "Provider '{}' answered {} on {} ({}).",
                    provider.name(),
                    flight_number,
                    date,
                    flight.status
                );
                return Some(flight);
            }
            log::debug!(
                "Provider '{}' has no flight {} on {}.",
                provider.name(),
                flight_number,
                date
            );
        }

        None
    }

    /// Raw schedule entries from the first provider offering them. Failures and
    /// missing support both give an empty list.
    pub async fn schedules(&self, query: &str) -> Vec<Value> {
        let Some(flight_number) = designator(query) else {
            return vec![];
        };

        for provider in self.providers.iter() {
            match self.bounded(provider.schedules(&flight_number)).await {
                Ok(Some(schedules)) => {
                    log::info!(
                        "Found {} schedules for flight {} at '{}'.",
                        schedules.len(),
                        flight_number,
                        provider.name()
                    );
                    return schedules;
                }
                Ok(None) => continue,
                Err(why) => {
                    log::warn!(
                        "Provider '{}' failed to list schedules for {}: {}",
                        provider.name(),
                        flight_number,
                        why
                    );
                    return vec![];
                }
            }
        }

        vec![]
    }

    async fn bounded<T, F>(&self, future: F) -> Result<T, ProviderError>
    where
        F: std::future::Future<Output = Result<T, ProviderError>>,
    {
        time::timeout(self.timeout, future)
            .await
            .unwrap_or(Err(ProviderError::Timeout))
    }
}

/// Normalized flight number, or `None` when it is empty or carries anything
/// but ASCII letters and digits. Providers embed it in URL paths.
fn designator(query: &str) -> Option<String> {
    let flight_number = normalize_flight_number(query);
    if flight_number.is_empty() {
        return None;
    }
    if !flight_number.chars().all(|c| c.is_ascii_alphanumeric()) {
        log::debug!("Ignoring malformed flight number '{flight_number}'.");
        return None;
    }
    Some(flight_number)
}
