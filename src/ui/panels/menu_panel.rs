use bevy::prelude::*;
use bevy_egui::egui::{self, Color32, FontId, RichText};

use crate::ui::ping_pong;
use crate::view::ViewEvent;

const PAN_PERIOD_SECS: f32 = 40.0;
/// Share of the backdrop image width visible at once.
const PAN_WINDOW: f32 = 0.6;

/// Horizontal UV range of the backdrop at `elapsed` seconds.
pub fn pan_window(elapsed: f32) -> (f32, f32) {
    let start = ping_pong(elapsed, PAN_PERIOD_SECS) * (1.0 - PAN_WINDOW);
    (start, start + PAN_WINDOW)
}

fn menu_button(ui: &mut egui::Ui, text: &str, size: f32) -> egui::Response {
    ui.add(
        egui::Button::new(RichText::new(text).size(size).color(Color32::WHITE))
            .fill(Color32::TRANSPARENT)
            .stroke(egui::Stroke::new(1.0, Color32::WHITE)),
    )
}

pub fn show_menu_panel(
    ctx: &mut egui::Context,
    backdrop: Option<egui::TextureId>,
    elapsed: f32,
    title: &str,
    ev_view: &mut EventWriter<ViewEvent>,
) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none().fill(Color32::BLACK))
        .show(ctx, |ui| {
            let screen = ui.max_rect();
            if let Some(texture) = backdrop {
                let (u0, u1) = pan_window(elapsed);
                let uv = egui::Rect::from_min_max(egui::pos2(u0, 0.0), egui::pos2(u1, 1.0));
                ui.painter().image(texture, screen, uv, Color32::WHITE);
            }
            ui.painter()
                .rect_filled(screen, 0.0, Color32::from_black_alpha(128));

            ui.vertical_centered(|ui| {
                ui.add_space(ui.available_height() * 0.35);
                ui.label(
                    RichText::new(title)
                        .font(FontId::proportional(48.0))
                        .extra_letter_spacing(8.0)
                        .color(Color32::WHITE),
                );
                ui.add_space(32.0);
                if menu_button(ui, "Enter Experience", 18.0).clicked() {
                    ev_view.send(ViewEvent::StartExperience);
                }
                ui.add_space(16.0);
                if menu_button(ui, "Settings", 14.0).clicked() {
                    ev_view.send(ViewEvent::OpenSettings);
                }
                ui.add_space(16.0);
                ui.add_enabled_ui(false, |ui| {
                    menu_button(ui, "More Choices (Coming Soon)", 14.0);
                });
            });
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pan_window_stays_inside_image() {
        for step in 0..400 {
            let (u0, u1) = pan_window(step as f32 * 0.5);
            assert!(u0 >= 0.0 && u1 <= 1.0 + 1e-6);
            assert!((u1 - u0 - PAN_WINDOW).abs() < 1e-6);
        }
    }

    #[test]
    fn pan_reverses_at_half_period() {
        assert_eq!(pan_window(0.0).0, 0.0);
        assert!((pan_window(40.0).0 - (1.0 - PAN_WINDOW)).abs() < 1e-6);
        assert!(pan_window(60.0).0 < pan_window(40.0).0);
    }
}
