use std::cmp::Ordering;

use itertools::Itertools;
use model::flight::{Flight, FlightPhase};

use crate::provider::LookupRequest;

/// Whether a candidate answers the request: it departs on one of the relevant
/// dates, or it is airborne or boarding right now and today was asked for.
pub fn is_relevant(flight: &Flight, request: &LookupRequest<'_>) -> bool {
    request.relevant_dates().contains(&flight.departure_date())
        || (request.is_today() && flight.status.is_active())
}

/// Removes rows sharing the same id. The first row wins, order is kept.
pub fn dedup(flights: Vec<Flight>) -> Vec<Flight> {
    flights
        .into_iter()
        .unique_by(|flight| flight.id.clone())
        .collect()
}

/// Ranks two candidates. Active flights beat future ones, which beat past ones.
/// Among active and future flights the soonest departure wins, among past
/// flights the most recent one.
pub fn compare(a: &Flight, b: &Flight) -> Ordering {
    let phase = a.status.phase();
    phase.cmp(&b.status.phase()).then_with(|| match phase {
        FlightPhase::Active | FlightPhase::Future => a.departure().cmp(&b.departure()),
        FlightPhase::Past => b.departure().cmp(&a.departure()),
    })
}

/// Deduplicates the candidates and picks the single best one.
pub fn select(flights: Vec<Flight>) -> Option<Flight> {
    dedup(flights).into_iter().min_by(compare)
}

#[cfg(test)]
mod tests {
    use airports::AirportTable;
    use chrono::{DateTime, NaiveDate};
    use model::flight::{FlightEndpoint, FlightStatus};

    use super::*;

    fn endpoint(code: &str, time: &str) -> FlightEndpoint {
        FlightEndpoint {
            code: code.to_owned(),
            city: code.to_owned(),
            time: DateTime::parse_from_rfc3339(time).unwrap(),
            estimated_time: None,
            timezone: "UTC".to_owned(),
            latitude: 0.0,
            longitude: 0.0,
            terminal: None,
            gate: None,
            baggage: None,
        }
    }

    fn flight(departure: &str, status: FlightStatus) -> Flight {
        Flight::new(
            "AA123",
            "American Airlines",
            endpoint("JFK", departure),
            endpoint("LHR", "2025-11-22T06:00:00+00:00"),
            status,
            0,
        )
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn duplicate_rows_collapse_into_one() {
        let flights = vec![
            flight("2025-11-21T08:00:00-05:00", FlightStatus::OnTime),
            flight("2025-11-21T08:00:00-05:00", FlightStatus::Delayed),
        ];
        let unique = dedup(flights);
        assert_eq!(unique.len(), 1);
        assert_eq!(unique[0].status, FlightStatus::OnTime);
    }

    #[test]
    fn active_beats_future() {
        let selected = select(vec![
            flight("2025-11-21T18:00:00-05:00", FlightStatus::OnTime),
            flight("2025-11-21T08:00:00-05:00", FlightStatus::InAir),
        ])
        .unwrap();
        assert_eq!(selected.status, FlightStatus::InAir);
    }

    #[test]
    fn boarding_beats_earlier_scheduled() {
        let selected = select(vec![
            flight("2025-11-21T06:00:00-05:00", FlightStatus::Scheduled),
            flight("2025-11-21T09:00:00-05:00", FlightStatus::Boarding),
        ])
        .unwrap();
        assert_eq!(selected.status, FlightStatus::Boarding);
    }

    #[test]
    fn future_beats_past() {
        let selected = select(vec![
            flight("2025-11-21T08:00:00-05:00", FlightStatus::Landed),
            flight("2025-11-22T08:00:00-05:00", FlightStatus::Delayed),
        ])
        .unwrap();
        assert_eq!(selected.status, FlightStatus::Delayed);
    }

    #[test]
    fn soonest_future_departure_wins() {
        let selected = select(vec![
            flight("2025-11-22T08:00:00-05:00", FlightStatus::OnTime),
            flight("2025-11-21T08:00:00-05:00", FlightStatus::OnTime),
        ])
        .unwrap();
        assert_eq!(selected.departure_date(), date("2025-11-21"));
    }

    #[test]
    fn most_recent_past_departure_wins() {
        let selected = select(vec![
            flight("2025-11-20T08:00:00-05:00", FlightStatus::Landed),
            flight("2025-11-21T08:00:00-05:00", FlightStatus::Cancelled),
            flight("2025-11-19T08:00:00-05:00", FlightStatus::Landed),
        ])
        .unwrap();
        assert_eq!(selected.departure_date(), date("2025-11-21"));
        assert_eq!(selected.status, FlightStatus::Cancelled);
    }

    #[test]
    fn nothing_to_select() {
        assert!(select(vec![]).is_none());
    }

    #[test]
    fn relevance_depends_on_requested_date() {
        let airports = AirportTable::empty();
        let past_request = LookupRequest {
            flight_number: "AA123",
            date: date("2025-11-21"),
            today: date("2025-11-25"),
            airports: &airports,
        };
        let today_request = LookupRequest {
            today: date("2025-11-21"),
            ..past_request
        };

        let on_date = flight("2025-11-21T08:00:00-05:00", FlightStatus::OnTime);
        let next_day = flight("2025-11-22T08:00:00-05:00", FlightStatus::OnTime);
        let yesterday_in_air = flight("2025-11-20T23:00:00-05:00", FlightStatus::InAir);

        assert!(is_relevant(&on_date, &past_request));
        assert!(!is_relevant(&next_day, &past_request));
        assert!(!is_relevant(&yesterday_in_air, &past_request));

        assert!(is_relevant(&on_date, &today_request));
        assert!(is_relevant(&next_day, &today_request));
        assert!(is_relevant(&yesterday_in_air, &today_request));
    }
}
