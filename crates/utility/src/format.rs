/// Formats a duration given in seconds as `1h 5min` or `45 min`.
pub fn duration_hours_minutes(seconds: f64) -> String {
    let total_seconds = seconds.max(0.0) as i64;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    if hours > 0 {
        format!("{}h {}min", hours, minutes)
    } else {
        format!("{} min", minutes)
    }
}

/// Formats a distance given in meters as kilometers with one decimal.
pub fn distance_km(meters: f64) -> String {
    format!("{:.1} km", meters / 1000.0)
}
