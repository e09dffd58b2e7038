use serde::{Deserialize, Serialize};

/// A place picked by the resolver, ready to be handed to the weather fetcher.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLocation {
    pub display_name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// One entry of a geocoder search response.
///
/// Coordinates arrive as numeric strings and are parsed by the resolver.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeocodeCandidate {
    pub lat: String,
    pub lon: String,
    pub display_name: String,
}

/// Entry of the municipality directory. Other directory fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Municipality {
    pub name: String,
}

/// Current conditions that passed schema validation.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReading {
    pub latitude: f64,
    pub longitude: f64,
    pub temperature_c: f64,
    pub wind_speed_kmh: f64,
    pub weather_code: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReport {
    pub city: String,
    pub temperature: f64,
    pub wind_speed: f64,
    pub weather_description: String,
}

/// Outcome of one lookup; the only type presentation code needs to handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum WeatherResult {
    Success(WeatherReport),
    Failure { message: String },
}

impl WeatherResult {
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}
