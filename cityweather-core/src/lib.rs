//! Core library for the `cityweather` CLI.
//!
//! This crate defines:
//! - Location resolution (direct geocoding, or municipality directory + geocoding)
//! - Current-weather fetching with schema validation of the provider payload
//! - The orchestration entry point returning a single [`WeatherResult`]
//! - Configuration handling
//!
//! It is used by `cityweather-cli`, but can be reused by any other front end.

pub mod codes;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod resolver;
pub mod schema;
pub mod service;

pub use codes::describe_weather_code;
pub use config::{Config, RetryPolicy};
pub use error::WeatherError;
pub use model::{ResolvedLocation, WeatherReading, WeatherReport, WeatherResult};
pub use resolver::{LocationResolver, ResolverStrategy};
pub use service::WeatherService;
pub use tokio_util::sync::CancellationToken;
