use async_trait::async_trait;
use reqwest::Client;

use crate::{
    config::RetryPolicy, error::WeatherError, model::WeatherReading,
    schema::validate_weather_body,
};

use super::{WeatherFetcher, fetch_body};

const SERVICE: &str = "weather";
/// Field names are part of Open-Meteo's API and must match exactly.
const CURRENT_FIELDS: &str = "temperature_2m,wind_speed_10m,weather_code";

/// Current conditions from Open-Meteo (free tier, no API key).
#[derive(Debug, Clone)]
pub struct OpenMeteoFetcher {
    base_url: String,
    http: Client,
    retry: RetryPolicy,
}

impl OpenMeteoFetcher {
    pub fn new(base_url: impl Into<String>, http: Client, retry: RetryPolicy) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
            retry,
        }
    }

    async fn fetch_once(&self, latitude: f64, longitude: f64) -> Result<WeatherReading, WeatherError> {
        let url = format!("{}/v1/forecast", self.base_url);

        let body = fetch_body(
            SERVICE,
            self.http.get(url).query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("current", CURRENT_FIELDS.to_string()),
            ]),
        )
        .await?;

        validate_weather_body(&body)
    }
}

#[async_trait]
impl WeatherFetcher for OpenMeteoFetcher {
    async fn fetch_weather(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<WeatherReading, WeatherError> {
        let max_attempts = self.retry.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match self.fetch_once(latitude, longitude).await {
                Err(err) if err.is_transient() && attempt < max_attempts => {
                    let delay = self.retry.backoff_for(attempt);
                    tracing::debug!(attempt, ?delay, error = %err, "Retrying weather fetch");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                other => return other,
            }
        }
    }
}
