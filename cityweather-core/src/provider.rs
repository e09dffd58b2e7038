use async_trait::async_trait;
use reqwest::RequestBuilder;
use std::fmt::Debug;

use crate::{
    error::WeatherError,
    model::{GeocodeCandidate, Municipality, WeatherReading},
};

pub mod nominatim;
pub mod open_meteo;
pub mod psgc;

pub use nominatim::NominatimGeocoder;
pub use open_meteo::OpenMeteoFetcher;
pub use psgc::PsgcDirectory;

/// Forward geocoder: place name to candidate coordinates.
///
/// An empty vector is a valid "no match" answer, not an error.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    async fn search(&self, query: &str) -> Result<Vec<GeocodeCandidate>, WeatherError>;
}

/// Fixed list of municipality names, filtered client-side.
#[async_trait]
pub trait MunicipalityDirectory: Send + Sync + Debug {
    async fn municipalities(&self) -> Result<Vec<Municipality>, WeatherError>;
}

/// Current conditions for a coordinate pair, already schema-checked.
#[async_trait]
pub trait WeatherFetcher: Send + Sync + Debug {
    async fn fetch_weather(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<WeatherReading, WeatherError>;
}

/// Send a request and return the body of a 2xx response.
///
/// Transport errors, timeouts and non-success statuses all map to
/// [`WeatherError::Network`] tagged with `service`.
pub(crate) async fn fetch_body(
    service: &'static str,
    request: RequestBuilder,
) -> Result<String, WeatherError> {
    let res = request
        .send()
        .await
        .map_err(|e| WeatherError::network(service, e))?;

    let status = res.status();
    let body = res
        .text()
        .await
        .map_err(|e| WeatherError::network(service, e))?;

    if !status.is_success() {
        return Err(WeatherError::network(
            service,
            format!("status {status}: {}", truncate_body(&body)),
        ));
    }

    Ok(body)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
