use async_trait::async_trait;
use reqwest::Client;

use crate::{error::WeatherError, model::Municipality};

use super::{MunicipalityDirectory, fetch_body};

const SERVICE: &str = "municipality directory";

/// Municipality list from the Philippine Standard Geographic Code API.
///
/// The endpoint takes no query parameters and returns the whole list.
#[derive(Debug, Clone)]
pub struct PsgcDirectory {
    url: String,
    http: Client,
}

impl PsgcDirectory {
    pub fn new(url: impl Into<String>, http: Client) -> Self {
        Self {
            url: url.into(),
            http,
        }
    }
}

#[async_trait]
impl MunicipalityDirectory for PsgcDirectory {
    async fn municipalities(&self) -> Result<Vec<Municipality>, WeatherError> {
        let body = fetch_body(SERVICE, self.http.get(&self.url)).await?;

        let list: Vec<Municipality> = serde_json::from_str(&body).map_err(|e| {
            WeatherError::Unknown(format!("Failed to parse municipality directory JSON: {e}"))
        })?;

        tracing::debug!(count = list.len(), "Fetched municipality directory");
        Ok(list)
    }
}
