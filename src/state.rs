//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;

use crate::error::ErrorKind;
use crate::mapper::{self, ClockStyle, Theme};

/// Current conditions for one location, as returned by the provider
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WeatherSnapshot {
    pub location: SnapshotLocation,
    pub current: CurrentConditions,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SnapshotLocation {
    pub name: String,
    pub region: String,
    pub country: String,
    /// Provider local time, e.g. `2024-01-01 12:00`
    pub localtime: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CurrentConditions {
    pub temp_c: f64,
    pub temp_f: f64,
    pub condition: Condition,
    pub humidity: u32,
    pub wind_kph: f64,
    pub wind_dir: String,
    pub pressure_mb: f64,
    pub vis_km: f64,
    pub feelslike_c: f64,
    pub uv: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Condition {
    pub text: String,
    /// Protocol-relative icon path (`//cdn.weatherapi.com/...`)
    pub icon: String,
}

impl WeatherSnapshot {
    pub fn theme(&self) -> Theme {
        mapper::theme_for(&self.current.condition.text)
    }

    pub fn icon_url(&self) -> String {
        mapper::icon_url(&self.current.condition.icon)
    }

    /// `Region, Country`, skipping whichever part is blank
    pub fn region_line(&self) -> String {
        [&self.location.region, &self.location.country]
            .into_iter()
            .filter(|part| !part.trim().is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// The four UI states, derived from [`AppState::weather`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueryStatus {
    Idle,
    Loading,
    Success,
    Error,
}

/// Animation timing for the title gradient and the idle star field.
pub const ANIM_TICK_MS: u64 = 80;
pub const ANIM_CYCLE_TICKS: u32 = 24;

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    /// Text input contents, updated on every keystroke
    #[debug(section = "Query", label = "Input")]
    pub city_input: String,

    /// Query lifecycle: Empty (idle) → Loading → Loaded/Failed
    #[debug(section = "Query", label = "Result", debug_fmt)]
    pub weather: DataResource<WeatherSnapshot>,

    /// Classification of the current error, set only while `weather` is Failed
    #[debug(section = "Query", label = "Error kind", debug_fmt)]
    pub error_kind: Option<ErrorKind>,

    /// Id of the latest submission; completions carrying any other id are stale
    #[debug(section = "Query", label = "Request")]
    pub request_id: u64,

    #[debug(section = "Display", label = "Clock", debug_fmt)]
    pub clock: ClockStyle,

    #[debug(skip)]
    pub tick_count: u32,
}

impl AppState {
    pub fn new(clock: ClockStyle) -> Self {
        Self {
            city_input: String::new(),
            weather: DataResource::Empty,
            error_kind: None,
            request_id: 0,
            clock,
            tick_count: 0,
        }
    }

    pub fn status(&self) -> QueryStatus {
        match &self.weather {
            DataResource::Empty => QueryStatus::Idle,
            DataResource::Loading => QueryStatus::Loading,
            DataResource::Loaded(_) => QueryStatus::Success,
            DataResource::Failed(_) => QueryStatus::Error,
        }
    }

    pub fn result(&self) -> Option<&WeatherSnapshot> {
        self.weather.data()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.weather.error()
    }

    /// Theme for the whole screen; the space theme until a result arrives
    pub fn theme(&self) -> Theme {
        self.result()
            .map(WeatherSnapshot::theme)
            .unwrap_or(Theme::Space)
    }

    /// Idle shows twinkling stars, loading animates the title
    pub fn anim_active(&self) -> bool {
        matches!(self.status(), QueryStatus::Idle | QueryStatus::Loading)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ClockStyle::default())
    }
}
