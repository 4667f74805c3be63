use bevy::prelude::*;
use bevy_egui::egui::{self, Color32, RichText};

use crate::settings::{parse_glow_color, ExperienceSettings, Setting};
use crate::view::ViewEvent;

/// Glow color being edited on the settings screen, applied on save.
#[derive(Resource, Default)]
pub struct SettingsDraft {
    pub color: String,
}

pub fn show_settings_panel(
    ctx: &mut egui::Context,
    draft: &mut SettingsDraft,
    settings: &mut ExperienceSettings,
    ev_view: &mut EventWriter<ViewEvent>,
) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none().fill(Color32::BLACK))
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(ui.available_height() * 0.35);
                ui.heading(RichText::new("Default Settings").color(Color32::WHITE));
                ui.add_space(16.0);
                ui.label("Default Glow Color:");
                ui.add(egui::TextEdit::singleline(&mut draft.color).desired_width(120.0));
                if parse_glow_color(&draft.color).is_err() {
                    ui.colored_label(Color32::from_rgb(0xcc, 0x55, 0x55), "not a #rrggbb color");
                }
                ui.add_space(24.0);
                if ui.button("Save & Back").clicked() {
                    settings.set(Setting::Color(draft.color.clone()));
                    ev_view.send(ViewEvent::BackToMenu);
                }
            });
        });
}
