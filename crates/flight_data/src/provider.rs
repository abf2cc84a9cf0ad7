use airports::AirportTable;
use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use model::flight::Flight;
use serde_json::Value;

use crate::ProviderError;

/// Everything a provider needs to answer a single lookup.
#[derive(Debug, Clone, Copy)]
pub struct LookupRequest<'a> {
    /// Normalized flight number, e.g. `AA123`.
    pub flight_number: &'a str,
    /// The day the caller is interested in.
    pub date: NaiveDate,
    /// The server's local date when the request was received.
    pub today: NaiveDate,
    pub airports: &'a AirportTable,
}

impl<'a> LookupRequest<'a> {
    pub fn is_today(&self) -> bool {
        self.date == self.today
    }

    pub fn next_day(&self) -> Option<NaiveDate> {
        self.date.checked_add_days(Days::new(1))
    }

    /// Departure dates that count as an answer to this request. Lookups for
    /// today also accept tomorrow's departure, so late evening queries still
    /// find the next flight.
    pub fn relevant_dates(&self) -> Vec<NaiveDate> {
        let mut dates = vec![self.date];
        if self.is_today() {
            dates.extend(self.next_day());
        }
        dates
    }
}

/// A third party flight data service. Providers are consulted in order by
/// [`crate::FlightLookup`] until one of them yields a relevant flight.
#[async_trait]
pub trait FlightProvider: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Whether this provider can answer for the requested date at all. Providers
    /// restricted to live data only support today.
    fn supports(&self, request: &LookupRequest<'_>) -> bool;

    /// Fetches all flights with the requested number the provider knows about
    /// around the requested date, already mapped to the canonical shape.
    async fn lookup(
        &self,
        request: &LookupRequest<'_>,
    ) -> Result<Vec<Flight>, ProviderError>;

    /// Raw schedule entries for a flight number. `None` means the provider does
    /// not offer schedules.
    async fn schedules(
        &self,
        _flight_number: &str,
    ) -> Result<Option<Vec<Value>>, ProviderError> {
        Ok(None)
    }
}
