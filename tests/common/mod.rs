//! Shared fixtures for integration tests

#![allow(dead_code)]

use serde_json::{Value, json};
use weather_watch::state::WeatherSnapshot;

/// Provider body for London, as in the end-to-end scenario
pub fn london_json() -> Value {
    json!({
        "location": {
            "name": "London",
            "region": "City of London, Greater London",
            "country": "United Kingdom",
            "localtime": "2024-01-01 12:00"
        },
        "current": {
            "temp_c": 10,
            "temp_f": 50,
            "condition": { "text": "Partly cloudy", "icon": "//cdn/64x64/116.png" },
            "humidity": 80,
            "wind_kph": 15,
            "wind_dir": "SW",
            "pressure_mb": 1015,
            "vis_km": 10,
            "feelslike_c": 8,
            "uv": 3
        }
    })
}

pub fn london() -> WeatherSnapshot {
    serde_json::from_value(london_json()).expect("fixture parses")
}

/// London with a different condition text
pub fn london_with(condition: &str) -> WeatherSnapshot {
    let mut snapshot = london();
    snapshot.current.condition.text = condition.to_string();
    snapshot
}
