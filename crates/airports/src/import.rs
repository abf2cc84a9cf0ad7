//! Conversion of the OurAirports `airports.csv` into the json table loaded by
//! [`crate::AirportTable`].
//! See <https://ourairports.com/data/>

use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::path::Path;

use model::airport::AirportRecord;
use serde::Deserialize;

use crate::AirportError;

/// The columns of `airports.csv` we care about. All other columns are ignored.
#[derive(Debug, Deserialize)]
struct CsvAirport {
    #[serde(default)]
    name: String,
    #[serde(default)]
    latitude_deg: String,
    #[serde(default)]
    longitude_deg: String,
    #[serde(default)]
    iso_country: String,
    #[serde(default)]
    municipality: String,
    #[serde(default)]
    iata_code: String,
}

impl CsvAirport {
    fn into_record(self) -> Option<(String, AirportRecord)> {
        let code = self.iata_code.trim();
        if code.chars().count() != 3 {
            return None;
        }
        let lat = self.latitude_deg.trim().parse::<f64>().ok()?;
        let lon = self.longitude_deg.trim().parse::<f64>().ok()?;
        if !lat.is_finite() || !lon.is_finite() {
            return None;
        }
        Some((
            code.to_owned(),
            AirportRecord {
                lat,
                lon,
                city: self.municipality,
                country: self.iso_country,
                name: self.name,
            },
        ))
    }
}

/// Reads airports from csv. Rows without a three letter IATA code or without
/// numeric coordinates are skipped, later rows win over earlier ones.
pub fn read_airports<R: Read>(
    reader: R,
) -> Result<BTreeMap<String, AirportRecord>, AirportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut airports = BTreeMap::new();
    let mut malformed = 0usize;
    for row in reader.deserialize::<CsvAirport>() {
        match row {
            Ok(row) => {
                if let Some((code, record)) = row.into_record() {
                    airports.insert(code, record);
                }
            }
            Err(why) => {
                log::debug!("Skipping malformed airport row: {}", why);
                malformed += 1;
            }
        }
    }
    if malformed > 0 {
        log::warn!("Skipped {} malformed airport rows.", malformed);
    }
    Ok(airports)
}

/// Converts `csv_path` into a pretty printed json table at `json_path`,
/// creating parent directories as needed. Returns the number of airports.
pub fn process_airports<P: AsRef<Path>, Q: AsRef<Path>>(
    csv_path: P,
    json_path: Q,
) -> Result<usize, AirportError> {
    let airports = read_airports(fs::File::open(csv_path)?)?;

    if let Some(dir) = json_path.as_ref().parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }
    }
    fs::write(json_path, serde_json::to_string_pretty(&airports)?)?;

    Ok(airports.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AirportTable;

    const CSV: &str = "\
id,ident,type,name,latitude_deg,longitude_deg,elevation_ft,continent,iso_country,iso_region,municipality,scheduled_service,icao_code,iata_code
1,LFPG,large_airport,\"Paris Charles de Gaulle Airport\",49.012798,2.55,392,EU,FR,FR-IDF,\"Paris, Roissy\",yes,LFPG,CDG
2,00A,heliport,Total RF Heliport,40.07,-74.93,11,NA,US,US-PA,Bensalem,no,,
3,KJFK,large_airport,John F Kennedy International Airport,40.639447,-73.779317,13,NA,US,US-NY,New York,yes,KJFK,JFK
4,XXXX,small_airport,Broken,not-a-number,1.0,0,EU,DE,DE-SH,Kiel,no,,KEL
5,YYYY,small_airport,Too long,1.0,1.0,0,EU,DE,DE-SH,Kiel,no,,ABCD
";

    #[test]
    fn keeps_only_rows_with_iata_code_and_coordinates() {
        let airports = read_airports(CSV.as_bytes()).unwrap();
        assert_eq!(airports.keys().collect::<Vec<_>>(), vec!["CDG", "JFK"]);

        let cdg = &airports["CDG"];
        assert_eq!(cdg.city, "Paris, Roissy");
        assert_eq!(cdg.country, "FR");
        assert_eq!(cdg.name, "Paris Charles de Gaulle Airport");
        assert_eq!(cdg.lat, 49.012798);
    }

    #[test]
    fn writes_a_table_that_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("airports.csv");
        let json_path = dir.path().join("data").join("airports.json");
        fs::write(&csv_path, CSV).unwrap();

        let count = process_airports(&csv_path, &json_path).unwrap();
        assert_eq!(count, 2);

        let table = AirportTable::load(&json_path).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("jfk").unwrap().city, "New York");
    }
}
