//! Presentation mapping: condition text to theme, and display formatting
//!
//! Everything here is a pure function of its input.

use chrono::{NaiveDate, NaiveDateTime};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============================================================================
// Themes
// ============================================================================

/// Named visual treatment selected from the condition text
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Theme {
    ClearDay,
    Cloudy,
    Rainy,
    Windy,
    Snowy,
    Storm,
    Hazy,
    Hot,
    Cold,
    /// No result yet, or no rule matched
    Space,
}

/// Keyword groups in priority order. The first group with a keyword contained
/// in the lowercased condition wins, so "Thundery rain" is rainy, not storm.
const THEME_RULES: &[(&[&str], Theme)] = &[
    (&["sunny", "clear"], Theme::ClearDay),
    (&["cloud", "overcast"], Theme::Cloudy),
    (&["rain", "drizzle", "shower"], Theme::Rainy),
    (&["wind", "breezy"], Theme::Windy),
    (&["snow", "blizzard", "ice"], Theme::Snowy),
    (&["thunder", "storm"], Theme::Storm),
    (&["mist", "fog", "haze"], Theme::Hazy),
    (&["hot"], Theme::Hot),
    (&["cold", "freezing"], Theme::Cold),
];

pub fn theme_for(condition: &str) -> Theme {
    let condition = condition.to_lowercase();
    THEME_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| condition.contains(k)))
        .map(|(_, theme)| *theme)
        .unwrap_or(Theme::Space)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Relative luminance in 0.0..=1.0 (no gamma correction)
    pub fn luminance(self) -> f32 {
        (0.2126 * self.0 as f32 + 0.7152 * self.1 as f32 + 0.0722 * self.2 as f32) / 255.0
    }
}

/// Three-stop gradient, start → middle → end
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub from: Rgb,
    pub via: Rgb,
    pub to: Rgb,
}

const DARK_TEXT: Rgb = Rgb(17, 24, 39);
const LIGHT_TEXT: Rgb = Rgb(255, 255, 255);

impl Theme {
    pub fn palette(self) -> Palette {
        let (from, via, to) = match self {
            Theme::ClearDay => (Rgb(253, 186, 116), Rgb(253, 224, 71), Rgb(251, 146, 60)),
            Theme::Cloudy => (Rgb(156, 163, 175), Rgb(209, 213, 219), Rgb(107, 114, 128)),
            Theme::Rainy => (Rgb(71, 85, 105), Rgb(59, 130, 246), Rgb(51, 65, 85)),
            Theme::Windy => (Rgb(253, 230, 138), Rgb(254, 240, 138), Rgb(252, 211, 77)),
            Theme::Snowy => (Rgb(219, 234, 254), Rgb(255, 255, 255), Rgb(191, 219, 254)),
            Theme::Storm => (Rgb(88, 28, 135), Rgb(31, 41, 55), Rgb(49, 46, 129)),
            Theme::Hazy => (Rgb(209, 213, 219), Rgb(229, 231, 235), Rgb(156, 163, 175)),
            Theme::Hot => (Rgb(248, 113, 113), Rgb(251, 146, 60), Rgb(250, 204, 21)),
            Theme::Cold => (Rgb(147, 197, 253), Rgb(165, 243, 252), Rgb(96, 165, 250)),
            Theme::Space => (Rgb(15, 23, 42), Rgb(88, 28, 135), Rgb(15, 23, 42)),
        };
        Palette { from, via, to }
    }

    /// Screen fill color
    pub fn background(self) -> Rgb {
        match self {
            // The middle stop is too loud to fill a whole terminal
            Theme::Space => self.palette().from,
            _ => self.palette().via,
        }
    }

    /// Foreground that stays readable on [`Theme::background`]
    pub fn text_color(self) -> Rgb {
        if self.background().luminance() > 0.55 {
            DARK_TEXT
        } else {
            LIGHT_TEXT
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Theme::ClearDay => "\u{2600}\u{fe0f}",
            Theme::Cloudy => "\u{2601}\u{fe0f}",
            Theme::Rainy => "\u{1f327}\u{fe0f}",
            Theme::Windy => "\u{1f32c}\u{fe0f}",
            Theme::Snowy => "\u{2744}\u{fe0f}",
            Theme::Storm => "\u{26c8}\u{fe0f}",
            Theme::Hazy => "\u{1f32b}\u{fe0f}",
            Theme::Hot => "\u{1f525}",
            Theme::Cold => "\u{1f9ca}",
            Theme::Space => "\u{2728}",
        }
    }
}

// ============================================================================
// UV index
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UvCategory {
    Low,
    Moderate,
    High,
    VeryHigh,
    Extreme,
}

impl UvCategory {
    pub fn label(self) -> &'static str {
        match self {
            UvCategory::Low => "Low",
            UvCategory::Moderate => "Moderate",
            UvCategory::High => "High",
            UvCategory::VeryHigh => "Very High",
            UvCategory::Extreme => "Extreme",
        }
    }
}

pub fn uv_category(uv: f64) -> UvCategory {
    if uv <= 2.0 {
        UvCategory::Low
    } else if uv <= 5.0 {
        UvCategory::Moderate
    } else if uv <= 7.0 {
        UvCategory::High
    } else if uv <= 10.0 {
        UvCategory::VeryHigh
    } else {
        UvCategory::Extreme
    }
}

// ============================================================================
// Local time
// ============================================================================

/// Hour convention used by [`format_local_time`]
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema, clap::ValueEnum,
)]
pub enum ClockStyle {
    #[default]
    #[serde(rename = "12h")]
    #[value(name = "12h")]
    TwelveHour,
    #[serde(rename = "24h")]
    #[value(name = "24h")]
    TwentyFourHour,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unrecognized timestamp: {0:?}")]
pub struct TimeFormatError(pub String);

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
];

pub fn parse_local_time(timestamp: &str) -> Result<NaiveDateTime, TimeFormatError> {
    let trimmed = timestamp.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| TimeFormatError(timestamp.to_string()))
}

/// `Monday, January 1, 2024 at 12:00 PM` (or `... at 12:00` for 24h)
pub fn format_local_time(timestamp: &str, clock: ClockStyle) -> Result<String, TimeFormatError> {
    let parsed = parse_local_time(timestamp)?;
    let pattern = match clock {
        ClockStyle::TwelveHour => "%A, %B %-d, %Y at %I:%M %p",
        ClockStyle::TwentyFourHour => "%A, %B %-d, %Y at %H:%M",
    };
    Ok(parsed.format(pattern).to_string())
}

// ============================================================================
// Field formatting
// ============================================================================

/// Round half toward positive infinity, so -2.5 becomes -2
pub fn round_half_up(value: f64) -> i64 {
    let rounded = value.round();
    // `f64::round` takes negative halves away from zero
    if value - rounded == 0.5 {
        (rounded + 1.0) as i64
    } else {
        rounded as i64
    }
}

pub fn format_celsius(value: f64) -> String {
    format!("{}°C", round_half_up(value))
}

pub fn format_fahrenheit(value: f64) -> String {
    format!("{}°F", round_half_up(value))
}

pub fn format_humidity(pct: u32) -> String {
    format!("{pct}%")
}

pub fn format_wind(kph: f64) -> String {
    format!("{kph} km/h")
}

pub fn format_pressure(mb: f64) -> String {
    format!("{mb} mb")
}

pub fn format_visibility(km: f64) -> String {
    format!("{km} km")
}

/// Icon paths arrive protocol-relative (`//cdn...`)
pub fn icon_url(icon: &str) -> String {
    if icon.starts_with("//") {
        format!("https:{icon}")
    } else {
        icon.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_first_match_wins() {
        assert_eq!(theme_for("Patchy rain nearby"), Theme::Rainy);
        assert_eq!(theme_for("Partly Cloudy"), Theme::Cloudy);
        assert_eq!(theme_for("Thundery outbreaks in nearby"), Theme::Storm);
        // rain group is checked before thunder
        assert_eq!(theme_for("Moderate or heavy rain with thunder"), Theme::Rainy);
        // "Sunny" beats everything after it
        assert_eq!(theme_for("Sunny and cold"), Theme::ClearDay);
    }

    #[test]
    fn theme_covers_each_group() {
        assert_eq!(theme_for("Clear"), Theme::ClearDay);
        assert_eq!(theme_for("Overcast"), Theme::Cloudy);
        assert_eq!(theme_for("Light drizzle"), Theme::Rainy);
        assert_eq!(theme_for("Breezy"), Theme::Windy);
        assert_eq!(theme_for("Blizzard"), Theme::Snowy);
        assert_eq!(theme_for("Ice pellets"), Theme::Snowy);
        assert_eq!(theme_for("Storm"), Theme::Storm);
        assert_eq!(theme_for("Freezing fog"), Theme::Hazy);
        assert_eq!(theme_for("HOT"), Theme::Hot);
        assert_eq!(theme_for("Cold"), Theme::Cold);
    }

    #[test]
    fn theme_falls_back_to_space() {
        assert_eq!(theme_for(""), Theme::Space);
        assert_eq!(theme_for("Volcanic ash"), Theme::Space);
    }

    #[test]
    fn text_color_contrasts_background() {
        assert_eq!(Theme::Space.text_color(), LIGHT_TEXT);
        assert_eq!(Theme::Rainy.text_color(), LIGHT_TEXT);
        assert_eq!(Theme::Storm.text_color(), LIGHT_TEXT);
        assert_eq!(Theme::ClearDay.text_color(), DARK_TEXT);
        assert_eq!(Theme::Snowy.text_color(), DARK_TEXT);
    }

    #[test]
    fn uv_thresholds_are_inclusive() {
        assert_eq!(uv_category(0.0), UvCategory::Low);
        assert_eq!(uv_category(2.0), UvCategory::Low);
        assert_eq!(uv_category(2.1), UvCategory::Moderate);
        assert_eq!(uv_category(5.0), UvCategory::Moderate);
        assert_eq!(uv_category(7.0), UvCategory::High);
        assert_eq!(uv_category(10.0), UvCategory::VeryHigh);
        assert_eq!(uv_category(11.0), UvCategory::Extreme);
        assert_eq!(UvCategory::VeryHigh.label(), "Very High");
    }

    #[test]
    fn local_time_twelve_hour() {
        assert_eq!(
            format_local_time("2024-01-01 12:00", ClockStyle::TwelveHour).unwrap(),
            "Monday, January 1, 2024 at 12:00 PM"
        );
        assert_eq!(
            format_local_time("2024-07-04 9:05", ClockStyle::TwelveHour).unwrap(),
            "Thursday, July 4, 2024 at 09:05 AM"
        );
    }

    #[test]
    fn local_time_twenty_four_hour() {
        assert_eq!(
            format_local_time("2024-03-15T18:30:00", ClockStyle::TwentyFourHour).unwrap(),
            "Friday, March 15, 2024 at 18:30"
        );
    }

    #[test]
    fn local_time_rejects_garbage() {
        let err = format_local_time("yesterday-ish", ClockStyle::TwelveHour).unwrap_err();
        assert_eq!(err, TimeFormatError("yesterday-ish".into()));
        assert!(format_local_time("", ClockStyle::TwelveHour).is_err());
    }

    #[test]
    fn formatting_is_repeatable() {
        let a = format_local_time("2024-01-01 12:00", ClockStyle::TwelveHour);
        let b = format_local_time("2024-01-01 12:00", ClockStyle::TwelveHour);
        assert_eq!(a, b);
        assert_eq!(theme_for("Mist"), theme_for("Mist"));
        assert_eq!(uv_category(6.5), uv_category(6.5));
    }

    #[test]
    fn rounding_matches_half_up() {
        assert_eq!(round_half_up(10.0), 10);
        assert_eq!(round_half_up(10.5), 11);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-2.6), -3);
        assert_eq!(round_half_up(-0.5), 0);
        assert_eq!(round_half_up(0.49999999999999994), 0);
        assert_eq!(round_half_up(-0.49999999999999994), 0);
        assert_eq!(format_celsius(-0.4), "0°C");
        assert_eq!(format_fahrenheit(50.0), "50°F");
    }

    #[test]
    fn numeric_labels() {
        assert_eq!(format_humidity(80), "80%");
        assert_eq!(format_wind(15.0), "15 km/h");
        assert_eq!(format_wind(15.1), "15.1 km/h");
        assert_eq!(format_pressure(1015.0), "1015 mb");
        assert_eq!(format_visibility(10.0), "10 km");
    }

    #[test]
    fn icon_url_prefixes_scheme_once() {
        assert_eq!(
            icon_url("//cdn.weatherapi.com/weather/64x64/day/116.png"),
            "https://cdn.weatherapi.com/weather/64x64/day/116.png"
        );
        assert_eq!(icon_url("https://x/y.png"), "https://x/y.png");
    }
}
