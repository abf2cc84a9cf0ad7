use std::collections::HashMap;
use std::error;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;

use model::airport::{AirportRecord, ResolvedAirport};

pub mod import;

#[derive(Debug, Clone)]
pub enum AirportError {
    Io(Arc<io::Error>),
    Csv(Arc<csv::Error>),
    Json(Arc<serde_json::Error>),
}

impl error::Error for AirportError {}

impl fmt::Display for AirportError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AirportError::Io(e) => write!(f, "I/O error: {}", e),
            AirportError::Csv(e) => write!(f, "CSV error: {}", e),
            AirportError::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl From<io::Error> for AirportError {
    fn from(e: io::Error) -> Self {
        AirportError::Io(Arc::new(e))
    }
}

impl From<csv::Error> for AirportError {
    fn from(e: csv::Error) -> Self {
        AirportError::Csv(Arc::new(e))
    }
}

impl From<serde_json::Error> for AirportError {
    fn from(e: serde_json::Error) -> Self {
        AirportError::Json(Arc::new(e))
    }
}

/// Read-only lookup table from IATA code to airport reference data.
/// Loaded once at startup and shared for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct AirportTable {
    airports: HashMap<String, AirportRecord>,
}

impl AirportTable {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_records<I, S>(records: I) -> Self
    where
        I: IntoIterator<Item = (S, AirportRecord)>,
        S: AsRef<str>,
    {
        Self {
            airports: records
                .into_iter()
                .map(|(code, record)| (code.as_ref().to_uppercase(), record))
                .collect(),
        }
    }

    /// Parses the json produced by [`import::process_airports`].
    pub fn from_json_str(json: &str) -> Result<Self, AirportError> {
        let airports: HashMap<String, AirportRecord> = serde_json::from_str(json)?;
        Ok(Self::from_records(airports))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, AirportError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Loads the table, or falls back to an empty one if the file is missing or
    /// broken. Flights then still resolve, just without coordinates.
    pub fn load_or_empty<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path.as_ref()) {
            Ok(table) => {
                log::info!(
                    "Loaded {} airports from '{}'.",
                    table.len(),
                    path.as_ref().display()
                );
                table
            }
            Err(why) => {
                log::warn!(
                    "Could not load airports from '{}', using an empty table: {}",
                    path.as_ref().display(),
                    why
                );
                Self::empty()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.airports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }

    pub fn get(&self, code: &str) -> Option<&AirportRecord> {
        self.airports.get(&code.trim().to_uppercase())
    }

    /// Resolves a code to coordinates and a city label. Unknown codes resolve to
    /// (0, 0) and use the raw code as label. Known codes use the table's city,
    /// then `provider_city`, then the code.
    pub fn resolve(&self, code: &str, provider_city: Option<&str>) -> ResolvedAirport {
        let Some(record) = self.get(code) else {
            return ResolvedAirport::unknown(code);
        };
        let city = [Some(record.city.as_str()), provider_city]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|city| !city.is_empty())
            .unwrap_or(code)
            .to_owned();
        ResolvedAirport {
            code: code.to_owned(),
            city,
            latitude: record.lat,
            longitude: record.lon,
        }
    }
}
