use serde::Deserialize;

/// Answer of the `route` service. Failed requests carry the same `code`
/// field together with a `message`.
#[derive(Debug, Deserialize)]
pub struct RouteResponse {
    pub code: String,
    pub message: Option<String>,
    #[serde(default)]
    pub routes: Vec<Route>,
}

#[derive(Debug, Deserialize)]
pub struct Route {
    /// Seconds.
    pub duration: f64,
    /// Meters.
    pub distance: f64,
}
