use chrono::{DateTime, Local};
use cityweather_core::{WeatherReport, WeatherResult};

/// Text card for one lookup result.
pub fn render_result(result: &WeatherResult, fetched_at: DateTime<Local>) -> String {
    match result {
        WeatherResult::Success(report) => render_report(report, fetched_at),
        WeatherResult::Failure { message } => format!("Error: {message}"),
    }
}

fn render_report(report: &WeatherReport, fetched_at: DateTime<Local>) -> String {
    format!(
        "{city}\n\
         Current Weather (as of {time})\n\
         \n  Location:    {city}\
         \n  Temperature: {temp}°C\
         \n  Wind Speed:  {wind} km/h\
         \n  Weather:     {desc}",
        city = report.city,
        time = fetched_at.format("%Y-%m-%d %H:%M"),
        temp = report.temperature,
        wind = report.wind_speed,
        desc = report.weather_description,
    )
}

pub fn render_suggestions(query: &str, names: &[String]) -> String {
    if names.is_empty() {
        return format!("No municipalities match '{query}'.");
    }
    names
        .iter()
        .enumerate()
        .map(|(i, name)| format!("{:>3}. {name}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}
