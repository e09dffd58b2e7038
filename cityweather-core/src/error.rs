use thiserror::Error;

/// Message shown for failures that could not be classified.
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to fetch weather data. Please try again.";

/// Errors produced by the lookup pipeline stages.
///
/// None of these escape [`crate::WeatherService::weather_for_city`]; they are
/// converted into [`crate::WeatherResult::Failure`] using [`WeatherError::user_message`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WeatherError {
    #[error("City '{name}' not found!")]
    NotFound { name: String },

    #[error("Weather payload failed validation: {0}")]
    Schema(String),

    #[error("Request to {service} failed: {message}")]
    Network {
        service: &'static str,
        message: String,
    },

    #[error("Could not parse coordinate '{value}' for '{name}'")]
    Parse { name: String, value: String },

    #[error("Request was cancelled")]
    Cancelled,

    #[error("Unexpected error: {0}")]
    Unknown(String),
}

impl WeatherError {
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    pub fn network(service: &'static str, source: impl std::fmt::Display) -> Self {
        Self::Network {
            service,
            message: source.to_string(),
        }
    }

    /// True when a fresh attempt of the same request could succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Network { .. })
    }

    /// Text safe to show to an end user.
    ///
    /// Not-found errors name the place that was searched for. Every other kind
    /// gets a fixed, actionable sentence so provider internals never leak.
    pub fn user_message(&self) -> String {
        match self {
            Self::NotFound { .. } => self.to_string(),
            Self::Schema(_) => "The weather service returned data in an unexpected format. \
                 Please try again later."
                .to_string(),
            Self::Network { service, .. } => format!(
                "Could not reach the {service} service. Please check your connection and try again."
            ),
            Self::Parse { name, .. } => {
                format!("Received invalid coordinates for '{name}'. Please try a different city.")
            }
            Self::Cancelled => "The request was cancelled.".to_string(),
            Self::Unknown(_) => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}
