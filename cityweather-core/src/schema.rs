//! Shape check for the weather provider's response.
//!
//! The payload is untrusted: it is decoded into strict private structs so that
//! a missing field, a `null`, or a string where a number belongs is rejected
//! here instead of surfacing later as a wrong reading.

use serde::Deserialize;
use serde_json::Value;

use crate::{error::WeatherError, model::WeatherReading};

#[derive(Debug, Deserialize)]
struct OmPayload {
    latitude: f64,
    longitude: f64,
    current: OmCurrent,
}

#[derive(Debug, Deserialize)]
struct OmCurrent {
    temperature_2m: f64,
    wind_speed_10m: f64,
    weather_code: f64,
}

/// Code stored for a numeric `weather_code` that is not a whole number.
/// It is outside the WMO table, so it translates to "Unknown".
pub const UNCLASSIFIED_WEATHER_CODE: i64 = -1;

/// Whole numbers, including `3.0`, keep their value; anything else is unclassified.
fn weather_code_from_number(raw: f64) -> i64 {
    if raw.fract() == 0.0 && raw >= i64::MIN as f64 && raw < i64::MAX as f64 {
        raw as i64
    } else {
        UNCLASSIFIED_WEATHER_CODE
    }
}

/// Validate a raw weather payload and extract the reading.
pub fn validate_weather_payload(payload: Value) -> Result<WeatherReading, WeatherError> {
    // serde accepts sequences for structs; the provider contract is objects only.
    if !payload.is_object() {
        return Err(WeatherError::Schema("payload is not an object".into()));
    }
    if !payload.get("current").is_some_and(Value::is_object) {
        return Err(WeatherError::Schema("`current` is missing or not an object".into()));
    }

    let parsed: OmPayload =
        serde_json::from_value(payload).map_err(|e| WeatherError::Schema(e.to_string()))?;

    Ok(WeatherReading {
        latitude: parsed.latitude,
        longitude: parsed.longitude,
        temperature_c: parsed.current.temperature_2m,
        wind_speed_kmh: parsed.current.wind_speed_10m,
        weather_code: weather_code_from_number(parsed.current.weather_code),
    })
}

/// Decode a response body and validate it.
pub fn validate_weather_body(body: &str) -> Result<WeatherReading, WeatherError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| WeatherError::Schema(format!("body is not valid JSON: {e}")))?;
    validate_weather_payload(value)
}
