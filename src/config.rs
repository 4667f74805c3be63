use std::time::Duration;

use bevy::prelude::*;

/// Paths of every asset the loading screen waits for, relative to `assets/`.
#[derive(Clone, Debug)]
pub struct AssetPaths {
    pub wordmark: String,
    pub spectre: String,
    pub skyline: String,
    pub city_backdrop: String,
    pub tracker: String,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            wordmark: "models/wordmark.glb".into(),
            spectre: "models/spectre.glb".into(),
            skyline: "images/chicagoskyline.jpg".into(),
            city_backdrop: "images/city-bg.jpg".into(),
            tracker: "images/heli.jpg".into(),
        }
    }
}

#[derive(Resource, Clone, Debug)]
pub struct PageConfig {
    pub title: String,
    /// Shortest time the loading screen stays up, counted from when loading starts.
    pub min_loading_display: Duration,
    pub star_count: usize,
    pub star_radius: f32,
    pub star_depth: f32,
    pub show_diagnostics: bool,
    pub assets: AssetPaths,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: "MYTHCORP".into(),
            min_loading_display: Duration::from_millis(4000),
            star_count: 5000,
            star_radius: 100.0,
            star_depth: 50.0,
            show_diagnostics: false,
            assets: AssetPaths::default(),
        }
    }
}
