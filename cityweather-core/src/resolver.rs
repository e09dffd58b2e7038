//! Turns free-text input into a single place with coordinates.

use std::{convert::TryFrom, fmt, sync::Arc};

use crate::{
    error::WeatherError,
    model::{GeocodeCandidate, Municipality, ResolvedLocation},
    provider::{Geocoder, MunicipalityDirectory},
};

/// How a city name is turned into coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResolverStrategy {
    /// Geocode the raw input.
    #[default]
    Direct,
    /// Match the input against the municipality directory, then geocode the match.
    Directory,
}

impl ResolverStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolverStrategy::Direct => "direct",
            ResolverStrategy::Directory => "directory",
        }
    }

    pub const fn all() -> &'static [ResolverStrategy] {
        &[ResolverStrategy::Direct, ResolverStrategy::Directory]
    }
}

impl fmt::Display for ResolverStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ResolverStrategy {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "direct" => Ok(ResolverStrategy::Direct),
            "directory" => Ok(ResolverStrategy::Directory),
            _ => Err(anyhow::anyhow!(
                "Unknown strategy '{value}'. Supported strategies: direct, directory."
            )),
        }
    }
}

/// Keep the municipalities whose name contains `query`, ignoring case.
///
/// Directory order is preserved; no ranking is applied.
pub fn filter_municipalities<'a>(list: &'a [Municipality], query: &str) -> Vec<&'a Municipality> {
    let needle = query.to_lowercase();
    list.iter()
        .filter(|m| m.name.to_lowercase().contains(&needle))
        .collect()
}

#[derive(Debug, Clone)]
pub enum LocationResolver {
    Direct {
        geocoder: Arc<dyn Geocoder>,
    },
    Directory {
        directory: Arc<dyn MunicipalityDirectory>,
        geocoder: Arc<dyn Geocoder>,
    },
}

impl LocationResolver {
    pub fn direct(geocoder: Arc<dyn Geocoder>) -> Self {
        Self::Direct { geocoder }
    }

    pub fn directory(directory: Arc<dyn MunicipalityDirectory>, geocoder: Arc<dyn Geocoder>) -> Self {
        Self::Directory {
            directory,
            geocoder,
        }
    }

    pub fn strategy(&self) -> ResolverStrategy {
        match self {
            Self::Direct { .. } => ResolverStrategy::Direct,
            Self::Directory { .. } => ResolverStrategy::Directory,
        }
    }

    pub async fn resolve(&self, query: &str) -> Result<ResolvedLocation, WeatherError> {
        match self {
            Self::Direct { geocoder } => geocode_first(geocoder.as_ref(), query).await,
            Self::Directory {
                directory,
                geocoder,
            } => {
                let list = directory.municipalities().await?;
                let matched = filter_municipalities(&list, query)
                    .into_iter()
                    .next()
                    .ok_or_else(|| WeatherError::not_found(query))?;

                tracing::debug!(query, matched = %matched.name, "Matched municipality");
                // From here on, errors name the municipality rather than the raw input.
                geocode_first(geocoder.as_ref(), &matched.name).await
            }
        }
    }

    /// Municipality names matching `query`, for autocomplete.
    ///
    /// The direct strategy has no directory and returns an empty list.
    pub async fn suggestions(&self, query: &str) -> Result<Vec<String>, WeatherError> {
        match self {
            Self::Direct { .. } => Ok(Vec::new()),
            Self::Directory { directory, .. } => {
                let list = directory.municipalities().await?;
                Ok(filter_municipalities(&list, query)
                    .into_iter()
                    .map(|m| m.name.clone())
                    .collect())
            }
        }
    }
}

async fn geocode_first(geocoder: &dyn Geocoder, name: &str) -> Result<ResolvedLocation, WeatherError> {
    let top = geocoder
        .search(name)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| WeatherError::not_found(name))?;

    to_resolved(name, top)
}

fn to_resolved(name: &str, candidate: GeocodeCandidate) -> Result<ResolvedLocation, WeatherError> {
    let parse = |value: &str| {
        value
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| WeatherError::Parse {
                name: name.to_string(),
                value: value.to_string(),
            })
    };

    Ok(ResolvedLocation {
        latitude: parse(&candidate.lat)?,
        longitude: parse(&candidate.lon)?,
        display_name: candidate.display_name,
    })
}
