use std::ops::RangeInclusive;

use bevy::color::HexColorError;
use bevy::prelude::*;
use rand::Rng;
use thiserror::Error;

pub const ROTATION_SPEED_RANGE: RangeInclusive<f32> = 0.0..=2.0;
pub const POSITION_RANGE: RangeInclusive<f32> = -5.0..=5.0;
pub const GLOW_INTENSITY_RANGE: RangeInclusive<f32> = 0.0..=3.0;
pub const STAR_DENSITY_RANGE: RangeInclusive<f32> = 0.0..=5.0;
pub const TRACKER_SCALE_RANGE: RangeInclusive<f32> = 0.5..=5.0;
pub const TRACKER_SMOOTHNESS_RANGE: RangeInclusive<f32> = 0.01..=0.2;

/// Upper bound used by `randomize` for glow; the slider allows more.
const RANDOM_GLOW_MAX: f32 = 2.0;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid glow color {input:?}")]
    InvalidColor {
        input: String,
        #[source]
        source: HexColorError,
    },
}

/// A single field overwrite.
#[derive(Debug, Clone, PartialEq)]
pub enum Setting {
    Color(String),
    RotationSpeed(f32),
    Position(Vec3),
    GlowIntensity(f32),
    StarDensity(f32),
    ShowTracker(bool),
    TrackerScale(f32),
    TrackerSmoothness(f32),
}

/// Cosmetic parameters of the experience scene.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ExperienceSettings {
    pub color: String,
    pub rotation_speed: f32,
    pub position: Vec3,
    pub glow_intensity: f32,
    pub star_density: f32,
    pub show_tracker: bool,
    pub tracker_scale: f32,
    pub tracker_smoothness: f32,
}

impl Default for ExperienceSettings {
    fn default() -> Self {
        Self {
            color: "#00ffff".into(),
            rotation_speed: 0.2,
            position: Vec3::ZERO,
            glow_intensity: 0.5,
            star_density: 1.0,
            show_tracker: false,
            tracker_scale: 1.5,
            tracker_smoothness: 0.1,
        }
    }
}

impl ExperienceSettings {
    /// Overwrites one field. Range clamping is left to the widgets.
    pub fn set(&mut self, setting: Setting) {
        match setting {
            Setting::Color(color) => self.color = color,
            Setting::RotationSpeed(v) => self.rotation_speed = v,
            Setting::Position(p) => self.position = p,
            Setting::GlowIntensity(v) => self.glow_intensity = v,
            Setting::StarDensity(v) => self.star_density = v,
            Setting::ShowTracker(v) => self.show_tracker = v,
            Setting::TrackerScale(v) => self.tracker_scale = v,
            Setting::TrackerSmoothness(v) => self.tracker_smoothness = v,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Every field is drawn independently.
    pub fn randomize(&mut self, rng: &mut impl Rng) {
        let mut axis = || rng.gen_range(*POSITION_RANGE.start()..*POSITION_RANGE.end());
        let position = Vec3::new(axis(), axis(), axis());

        *self = Self {
            color: format!("#{:06x}", rng.gen_range(0..=0xff_ffffu32)),
            rotation_speed: rng.gen_range(*ROTATION_SPEED_RANGE.start()..*ROTATION_SPEED_RANGE.end()),
            position,
            glow_intensity: rng.gen_range(0.0..RANDOM_GLOW_MAX),
            star_density: rng.gen_range(*STAR_DENSITY_RANGE.start()..*STAR_DENSITY_RANGE.end()),
            show_tracker: rng.gen_bool(0.5),
            tracker_scale: rng.gen_range(*TRACKER_SCALE_RANGE.start()..*TRACKER_SCALE_RANGE.end()),
            tracker_smoothness: rng.gen_range(
                *TRACKER_SMOOTHNESS_RANGE.start()..*TRACKER_SMOOTHNESS_RANGE.end(),
            ),
        };
    }

    pub fn glow_color(&self) -> Result<Color, SettingsError> {
        parse_glow_color(&self.color)
    }
}

pub fn parse_glow_color(input: &str) -> Result<Color, SettingsError> {
    Srgba::hex(input)
        .map(Color::from)
        .map_err(|source| SettingsError::InvalidColor {
            input: input.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn is_hex_color(s: &str) -> bool {
        s.len() == 7 && s.starts_with('#') && s[1..].chars().all(|c| c.is_ascii_hexdigit())
    }

    #[test]
    fn set_overwrites_a_single_field() {
        let mut settings = ExperienceSettings::default();
        settings.set(Setting::RotationSpeed(1.25));
        settings.set(Setting::Position(Vec3::new(1.0, -2.0, 3.0)));

        assert_eq!(settings.rotation_speed, 1.25);
        assert_eq!(settings.position, Vec3::new(1.0, -2.0, 3.0));
        assert_eq!(settings.color, "#00ffff");
        assert_eq!(settings.tracker_scale, 1.5);
    }

    #[test]
    fn reset_restores_defaults_after_any_changes() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut settings = ExperienceSettings::default();
        settings.set(Setting::Color("#123456".into()));
        settings.randomize(&mut rng);
        settings.set(Setting::ShowTracker(true));

        settings.reset();
        assert_eq!(settings, ExperienceSettings::default());
        settings.reset();
        assert_eq!(settings, ExperienceSettings::default());
    }

    #[test]
    fn randomize_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut settings = ExperienceSettings::default();
        for _ in 0..2000 {
            settings.randomize(&mut rng);
            assert!(is_hex_color(&settings.color), "{}", settings.color);
            assert!(settings.glow_color().is_ok());
            assert!(ROTATION_SPEED_RANGE.contains(&settings.rotation_speed));
            for axis in settings.position.to_array() {
                assert!(POSITION_RANGE.contains(&axis));
            }
            assert!((0.0..=RANDOM_GLOW_MAX).contains(&settings.glow_intensity));
            assert!(GLOW_INTENSITY_RANGE.contains(&settings.glow_intensity));
            assert!(STAR_DENSITY_RANGE.contains(&settings.star_density));
            assert!(TRACKER_SCALE_RANGE.contains(&settings.tracker_scale));
            assert!(TRACKER_SMOOTHNESS_RANGE.contains(&settings.tracker_smoothness));
        }
    }

    #[test]
    fn randomize_pads_small_colors() {
        // A color close to zero still needs six digits.
        let mut rng = StdRng::seed_from_u64(42);
        let mut settings = ExperienceSettings::default();
        let mut saw_leading_zero = false;
        for _ in 0..5000 {
            settings.randomize(&mut rng);
            assert_eq!(settings.color.len(), 7);
            saw_leading_zero |= settings.color.starts_with("#0");
        }
        assert!(saw_leading_zero);
    }

    #[test]
    fn default_glow_color_is_cyan() {
        let color = ExperienceSettings::default().glow_color().unwrap();
        assert_eq!(color, Color::from(Srgba::rgb(0.0, 1.0, 1.0)));
    }

    #[test]
    fn invalid_glow_color_is_reported() {
        let err = parse_glow_color("#zz00zz").unwrap_err();
        assert!(err.to_string().contains("#zz00zz"));
    }
}
