use async_trait::async_trait;
use reqwest::Client;

use crate::{error::WeatherError, model::GeocodeCandidate};

use super::{Geocoder, fetch_body};

const SERVICE: &str = "geocoding";

/// Forward geocoding through Nominatim (OpenStreetMap). No API key required.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    base_url: String,
    http: Client,
}

impl NominatimGeocoder {
    pub fn new(base_url: impl Into<String>, http: Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        }
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn search(&self, query: &str) -> Result<Vec<GeocodeCandidate>, WeatherError> {
        let url = format!("{}/search", self.base_url);
        tracing::debug!(query, "Geocoding");

        let body = fetch_body(
            SERVICE,
            self.http
                .get(url)
                .query(&[("city", query), ("format", "json")]),
        )
        .await?;

        serde_json::from_str(&body)
            .map_err(|e| WeatherError::Unknown(format!("Failed to parse geocoding JSON: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn search_sends_city_and_format() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("city", "Paris"))
            .and(query_param("format", "json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "lat": "48.85", "lon": "2.35", "display_name": "Paris, France", "importance": 0.9 }
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let geocoder = NominatimGeocoder::new(server.uri(), Client::new());
        let results = geocoder.search("Paris").await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].display_name, "Paris, France");
        assert_eq!(results[0].lat, "48.85");
    }

    #[tokio::test]
    async fn empty_array_is_not_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let geocoder = NominatimGeocoder::new(format!("{}/", server.uri()), Client::new());
        assert!(geocoder.search("Nowhere").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn server_error_is_network_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let geocoder = NominatimGeocoder::new(server.uri(), Client::new());
        let err = geocoder.search("Paris").await.unwrap_err();

        match err {
            WeatherError::Network { service, message } => {
                assert_eq!(service, "geocoding");
                assert!(message.contains("503"));
            }
            other => panic!("expected network error, got {other:?}"),
        }
    }
}
