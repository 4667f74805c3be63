use std::ops::RangeInclusive;

use bevy::prelude::*;
use bevy_egui::egui::{self, Align2, Color32, RichText};

use crate::settings::{
    ExperienceSettings, Setting, GLOW_INTENSITY_RANGE, POSITION_RANGE, ROTATION_SPEED_RANGE,
    STAR_DENSITY_RANGE, TRACKER_SCALE_RANGE, TRACKER_SMOOTHNESS_RANGE,
};

/// What the user asked for this frame.
#[derive(Debug, Default, PartialEq)]
pub struct ControlsOutcome {
    pub edits: Vec<Setting>,
    pub randomize: bool,
    pub reset: bool,
    pub back_to_menu: bool,
}

fn slider(
    ui: &mut egui::Ui,
    label: &str,
    value: f32,
    range: RangeInclusive<f32>,
    step: f64,
) -> Option<f32> {
    let mut value = value;
    ui.add(egui::Slider::new(&mut value, range).step_by(step).text(label))
        .changed()
        .then_some(value)
}

/// Reads `settings` without touching it; edits come back in the outcome.
pub fn show_controls_panel(ctx: &mut egui::Context, settings: &ExperienceSettings) -> ControlsOutcome {
    let mut out = ControlsOutcome::default();

    egui::Window::new("Controls")
        .anchor(Align2::LEFT_TOP, [20.0, 20.0])
        .resizable(false)
        .default_width(250.0)
        .show(ctx, |ui| {
            ui.label("Glow Color");
            let mut color = settings.color.clone();
            if ui.text_edit_singleline(&mut color).changed() {
                out.edits.push(Setting::Color(color));
            }
            if let Some(v) = slider(ui, "Glow Intensity", settings.glow_intensity, GLOW_INTENSITY_RANGE, 0.1) {
                out.edits.push(Setting::GlowIntensity(v));
            }

            ui.separator();

            let mut show_tracker = settings.show_tracker;
            if ui.checkbox(&mut show_tracker, "Show Mouse Tracker").changed() {
                out.edits.push(Setting::ShowTracker(show_tracker));
            }

            ui.separator();

            egui::CollapsingHeader::new("Advanced Settings").show(ui, |ui| {
                if let Some(v) = slider(ui, "Rotation Speed", settings.rotation_speed, ROTATION_SPEED_RANGE, 0.1) {
                    out.edits.push(Setting::RotationSpeed(v));
                }

                let mut position = settings.position;
                let mut moved = false;
                for (label, axis) in [
                    ("Position X", &mut position.x),
                    ("Position Y", &mut position.y),
                    ("Position Z", &mut position.z),
                ] {
                    if let Some(v) = slider(ui, label, *axis, POSITION_RANGE, 0.1) {
                        *axis = v;
                        moved = true;
                    }
                }
                if moved {
                    out.edits.push(Setting::Position(position));
                }

                if let Some(v) = slider(ui, "Star Density", settings.star_density, STAR_DENSITY_RANGE, 0.1) {
                    out.edits.push(Setting::StarDensity(v));
                }

                ui.label(RichText::new("Tracker Settings").strong());
                if let Some(v) = slider(ui, "Tracker Size", settings.tracker_scale, TRACKER_SCALE_RANGE, 0.1) {
                    out.edits.push(Setting::TrackerScale(v));
                }
                if let Some(v) = slider(
                    ui,
                    "Tracker Smoothness",
                    settings.tracker_smoothness,
                    TRACKER_SMOOTHNESS_RANGE,
                    0.01,
                ) {
                    out.edits.push(Setting::TrackerSmoothness(v));
                }
            });

            ui.separator();

            out.randomize = ui.button("Randomize All").clicked();
            out.reset = ui.button("Reset to Defaults").clicked();
            ui.add_space(8.0);
            out.back_to_menu = ui
                .add(egui::Button::new(RichText::new("Back to Menu").color(Color32::WHITE)).fill(Color32::from_gray(0x33)))
                .clicked();
        });

    out
}
