use chrono::NaiveDateTime;
use serde::Deserialize;
use serde_json::Value;
use utility::serde::date_time;

/// Every AirLabs answer is wrapped in either `response` or `error`.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub response: Option<OneOrMany<T>>,
    pub error: Option<ErrorBody>,
}

/// `/flight` answers with a single object, `/schedules` with a list (or a
/// single object when there is only one entry).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    pub code: Option<Value>,
}

impl ErrorBody {
    pub fn code(&self) -> Option<String> {
        self.code.as_ref().map(|code| match code {
            Value::String(code) => code.clone(),
            other => other.to_string(),
        })
    }
}

/// Live information on a single flight. Times are local wall clock times
/// (`2025-11-21 08:00`) with a separate utc counterpart.
#[derive(Debug, Clone, Deserialize)]
pub struct FlightInfo {
    pub flight_iata: Option<String>,
    pub airline_name: Option<String>,
    pub status: Option<String>,
    /// Overall delay in minutes.
    pub delayed: Option<i64>,

    pub dep_iata: Option<String>,
    pub dep_city: Option<String>,
    pub dep_name: Option<String>,
    #[serde(deserialize_with = "date_time::deserialize_naive_option", default)]
    pub dep_time: Option<NaiveDateTime>,
    #[serde(deserialize_with = "date_time::deserialize_naive_option", default)]
    pub dep_time_utc: Option<NaiveDateTime>,
    #[serde(deserialize_with = "date_time::deserialize_naive_option", default)]
    pub dep_estimated: Option<NaiveDateTime>,
    pub dep_terminal: Option<String>,
    pub dep_gate: Option<String>,
    pub dep_delayed: Option<i64>,

    pub arr_iata: Option<String>,
    pub arr_city: Option<String>,
    pub arr_name: Option<String>,
    #[serde(deserialize_with = "date_time::deserialize_naive_option", default)]
    pub arr_time: Option<NaiveDateTime>,
    #[serde(deserialize_with = "date_time::deserialize_naive_option", default)]
    pub arr_time_utc: Option<NaiveDateTime>,
    #[serde(deserialize_with = "date_time::deserialize_naive_option", default)]
    pub arr_estimated: Option<NaiveDateTime>,
    pub arr_terminal: Option<String>,
    pub arr_gate: Option<String>,
    pub arr_baggage: Option<String>,
}
