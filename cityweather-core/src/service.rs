//! Single entry point for presentation code.
//!
//! Runs resolve -> fetch -> translate for one city and folds every failure into
//! [`WeatherResult::Failure`], so callers only ever branch on the result tag.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::instrument;

use crate::{
    Config,
    codes::describe_weather_code,
    error::WeatherError,
    model::{WeatherReport, WeatherResult},
    provider::{NominatimGeocoder, OpenMeteoFetcher, PsgcDirectory, WeatherFetcher},
    resolver::{LocationResolver, ResolverStrategy},
};

pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a city name.";

/// Holds only immutable collaborators, so one instance can serve concurrent lookups.
#[derive(Debug, Clone)]
pub struct WeatherService {
    resolver: LocationResolver,
    fetcher: Arc<dyn WeatherFetcher>,
}

impl WeatherService {
    pub fn new(resolver: LocationResolver, fetcher: Arc<dyn WeatherFetcher>) -> Self {
        Self { resolver, fetcher }
    }

    /// Wire up the HTTP providers described by `config`.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let http = config.build_http_client()?;
        let geocoder = Arc::new(NominatimGeocoder::new(&config.geocoder_url, http.clone()));

        let resolver = match config.strategy()? {
            ResolverStrategy::Direct => LocationResolver::direct(geocoder),
            ResolverStrategy::Directory => LocationResolver::directory(
                Arc::new(PsgcDirectory::new(&config.directory_url, http.clone())),
                geocoder,
            ),
        };

        let fetcher = Arc::new(OpenMeteoFetcher::new(&config.weather_url, http, config.retry));

        Ok(Self::new(resolver, fetcher))
    }

    pub fn strategy(&self) -> ResolverStrategy {
        self.resolver.strategy()
    }

    /// Look up current weather for `city`. Never fails; errors become `Failure`.
    #[instrument(skip(self), fields(strategy = %self.strategy()))]
    pub async fn weather_for_city(&self, city: &str) -> WeatherResult {
        if city.trim().is_empty() {
            return WeatherResult::failure(EMPTY_QUERY_MESSAGE);
        }

        match self.lookup(city).await {
            Ok(report) => {
                tracing::info!(city = %report.city, "Weather lookup succeeded");
                WeatherResult::Success(report)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Weather lookup failed");
                WeatherResult::failure(err.user_message())
            }
        }
    }

    /// Same as [`Self::weather_for_city`], abandoned as soon as `cancel` fires.
    pub async fn weather_for_city_cancellable(
        &self,
        city: &str,
        cancel: &CancellationToken,
    ) -> WeatherResult {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!(city, "Weather lookup cancelled");
                WeatherResult::failure(WeatherError::Cancelled.user_message())
            }
            result = self.weather_for_city(city) => result,
        }
    }

    /// Autocomplete candidates for `query`; independent of the main lookup.
    pub async fn suggestions(&self, query: &str) -> Result<Vec<String>, WeatherError> {
        self.resolver.suggestions(query).await
    }

    async fn lookup(&self, city: &str) -> Result<WeatherReport, WeatherError> {
        let location = self.resolver.resolve(city).await?;
        tracing::debug!(
            name = %location.display_name,
            latitude = location.latitude,
            longitude = location.longitude,
            "Resolved location"
        );

        let reading = self
            .fetcher
            .fetch_weather(location.latitude, location.longitude)
            .await?;

        Ok(WeatherReport {
            city: location.display_name,
            temperature: reading.temperature_c,
            wind_speed: reading.wind_speed_kmh,
            weather_description: describe_weather_code(reading.weather_code).to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::GENERIC_FAILURE_MESSAGE,
        model::{GeocodeCandidate, WeatherReading},
        provider::Geocoder,
    };
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    struct StaticGeocoder(Result<Vec<GeocodeCandidate>, WeatherError>);

    #[async_trait]
    impl Geocoder for StaticGeocoder {
        async fn search(&self, _query: &str) -> Result<Vec<GeocodeCandidate>, WeatherError> {
            self.0.clone()
        }
    }

    #[derive(Debug)]
    struct StaticFetcher {
        result: Result<WeatherReading, WeatherError>,
        calls: AtomicUsize,
    }

    impl StaticFetcher {
        fn new(result: Result<WeatherReading, WeatherError>) -> Arc<Self> {
            Arc::new(Self {
                result,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl WeatherFetcher for StaticFetcher {
        async fn fetch_weather(&self, _lat: f64, _lon: f64) -> Result<WeatherReading, WeatherError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    #[derive(Debug)]
    struct PendingFetcher;

    #[async_trait]
    impl WeatherFetcher for PendingFetcher {
        async fn fetch_weather(&self, _lat: f64, _lon: f64) -> Result<WeatherReading, WeatherError> {
            std::future::pending().await
        }
    }

    fn paris() -> Vec<GeocodeCandidate> {
        vec![GeocodeCandidate {
            lat: "48.85".into(),
            lon: "2.35".into(),
            display_name: "Paris, France".into(),
        }]
    }

    fn overcast() -> WeatherReading {
        WeatherReading {
            latitude: 48.86,
            longitude: 2.34,
            temperature_c: 15.2,
            wind_speed_kmh: 10.1,
            weather_code: 3,
        }
    }

    fn service(
        geocode: Result<Vec<GeocodeCandidate>, WeatherError>,
        fetcher: Arc<dyn WeatherFetcher>,
    ) -> WeatherService {
        WeatherService::new(
            LocationResolver::direct(Arc::new(StaticGeocoder(geocode))),
            fetcher,
        )
    }

    #[tokio::test]
    async fn success_translates_code() {
        let svc = service(Ok(paris()), StaticFetcher::new(Ok(overcast())));

        let result = svc.weather_for_city("Paris").await;

        assert_eq!(
            result,
            WeatherResult::Success(WeatherReport {
                city: "Paris, France".into(),
                temperature: 15.2,
                wind_speed: 10.1,
                weather_description: "Overcast".into(),
            })
        );
    }

    #[tokio::test]
    async fn unknown_code_is_labelled_unknown() {
        let reading = WeatherReading {
            weather_code: 99,
            ..overcast()
        };
        let svc = service(Ok(paris()), StaticFetcher::new(Ok(reading)));

        match svc.weather_for_city("Paris").await {
            WeatherResult::Success(report) => assert_eq!(report.weather_description, "Unknown"),
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn not_found_skips_weather_fetch() {
        let fetcher = StaticFetcher::new(Ok(overcast()));
        let svc = service(Ok(vec![]), fetcher.clone());

        let result = svc.weather_for_city("Zzzznotacity").await;

        assert_eq!(result, WeatherResult::failure("City 'Zzzznotacity' not found!"));
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn blank_input_fails_without_lookup() {
        let fetcher = StaticFetcher::new(Ok(overcast()));
        let svc = service(Ok(paris()), fetcher.clone());

        assert_eq!(
            svc.weather_for_city("   ").await,
            WeatherResult::failure(EMPTY_QUERY_MESSAGE)
        );
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn stage_errors_map_to_policy_messages() {
        let cases = [
            (
                WeatherError::network("weather", "connection refused"),
                "Could not reach the weather service. Please check your connection and try again.",
            ),
            (
                WeatherError::Unknown("panic in parser".into()),
                GENERIC_FAILURE_MESSAGE,
            ),
        ];

        for (err, expected) in cases {
            let svc = service(Ok(paris()), StaticFetcher::new(Err(err)));
            assert_eq!(svc.weather_for_city("Paris").await, WeatherResult::failure(expected));
        }
    }

    #[tokio::test]
    async fn geocoder_outage_names_geocoding_service() {
        let svc = service(
            Err(WeatherError::network("geocoding", "timed out")),
            StaticFetcher::new(Ok(overcast())),
        );

        match svc.weather_for_city("Paris").await {
            WeatherResult::Failure { message } => {
                assert!(message.contains("geocoding service"));
                assert!(!message.contains("timed out"));
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn cancellation_yields_failure() {
        let svc = service(Ok(paris()), Arc::new(PendingFetcher));
        let token = CancellationToken::new();
        token.cancel();

        let result = svc.weather_for_city_cancellable("Paris", &token).await;

        assert_eq!(result, WeatherResult::failure("The request was cancelled."));
    }

    #[tokio::test]
    async fn uncancelled_token_returns_result() {
        let svc = service(Ok(paris()), StaticFetcher::new(Ok(overcast())));
        let token = CancellationToken::new();

        assert!(svc.weather_for_city_cancellable("Paris", &token).await.is_success());
    }

    #[test]
    fn from_config_honours_strategy() {
        let mut cfg = Config::default();
        assert_eq!(WeatherService::from_config(&cfg).unwrap().strategy(), ResolverStrategy::Direct);

        cfg.set_strategy(ResolverStrategy::Directory);
        assert_eq!(
            WeatherService::from_config(&cfg).unwrap().strategy(),
            ResolverStrategy::Directory
        );
    }
}
