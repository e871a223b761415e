//! Conversions from mapper palettes to ratatui / artbox colors

use artbox::{Color as ArtColor, ColorStop, Fill, LinearGradient};
use ratatui::style::{Color, Style};
use std::cmp::Ordering;

use crate::mapper::{Rgb, Theme};

pub fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

fn art_color(rgb: Rgb) -> ArtColor {
    ArtColor::rgb(rgb.0, rgb.1, rgb.2)
}

/// Base style for everything drawn on the themed background
pub fn base_style(theme: Theme) -> Style {
    Style::default()
        .bg(color(theme.background()))
        .fg(color(theme.text_color()))
}

/// Text that should recede a little from the main foreground
pub fn muted(theme: Theme) -> Style {
    let fg = theme.text_color();
    let bg = theme.background();
    let mix = |a: u8, b: u8| ((a as u16 * 2 + b as u16) / 3) as u8;
    Style::default().fg(Color::Rgb(mix(fg.0, bg.0), mix(fg.1, bg.1), mix(fg.2, bg.2)))
}

/// Theme gradient, shifted by `phase` (0.0..1.0) for the loading animation
pub fn gradient(theme: Theme, angle: f32, phase: f32) -> Fill {
    let palette = theme.palette();
    let (from, via, to) = (
        art_color(palette.from),
        art_color(palette.via),
        art_color(palette.to),
    );
    let phase = phase.rem_euclid(1.0);
    let base_stops = [(0.0, from), (0.5, via), (1.0, to)];

    if phase == 0.0 {
        let stops = base_stops
            .into_iter()
            .map(|(pos, c)| ColorStop::new(pos, c))
            .collect();
        return Fill::Linear(LinearGradient::new(angle, stops));
    }

    let edge_color = sample_color(&base_stops, (1.0 - phase).rem_euclid(1.0));
    let mut shifted = Vec::with_capacity(base_stops.len() + 2);
    shifted.push((0.0, edge_color));
    shifted.push((1.0, edge_color));
    for (pos, c) in base_stops {
        shifted.push(((pos + phase) % 1.0, c));
    }
    shifted.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
    let stops = shifted
        .into_iter()
        .map(|(pos, c)| ColorStop::new(pos, c))
        .collect();

    Fill::Linear(LinearGradient::new(angle, stops))
}

fn sample_color(stops: &[(f32, ArtColor)], position: f32) -> ArtColor {
    let pos = position.clamp(0.0, 1.0);
    let mut prev = stops[0];
    for stop in stops {
        if stop.0 >= pos {
            if (stop.0 - prev.0).abs() < f32::EPSILON {
                return stop.1;
            }
            let t = (pos - prev.0) / (stop.0 - prev.0);
            return prev.1.interpolate(stop.1, t);
        }
        prev = *stop;
    }
    prev.1
}
