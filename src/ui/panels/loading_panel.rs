use bevy_egui::egui::{self, Color32, FontId, RichText};

use crate::loading::LoadProgress;
use crate::ui::ping_pong;

const SCANNER_PERIOD_SECS: f32 = 1.5;
const SCANNER_SIZE: egui::Vec2 = egui::vec2(200.0, 2.0);
const CYAN: Color32 = Color32::from_rgb(0x00, 0xff, 0xff);

pub fn progress_line(progress: &LoadProgress) -> String {
    format!(
        "{}% | Verifying: {}",
        progress.percent().round() as u32,
        progress.item
    )
}

pub fn show_loading_panel(ctx: &mut egui::Context, progress: &LoadProgress, elapsed: f32) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none().fill(Color32::from_rgb(0x10, 0x10, 0x10)))
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(ui.available_height() * 0.38);
                ui.label(
                    RichText::new("SYSTEM INITIALIZING")
                        .font(FontId::monospace(32.0))
                        .extra_letter_spacing(3.0)
                        .color(Color32::WHITE),
                );
                ui.add_space(16.0);

                let (track, _) = ui.allocate_exact_size(SCANNER_SIZE, egui::Sense::hover());
                let painter = ui.painter_at(track);
                painter.rect_filled(track, 0.0, Color32::from_gray(0x33));
                let offset = (ping_pong(elapsed, SCANNER_PERIOD_SECS) * 2.0 - 1.0) * track.width();
                painter.rect_filled(track.translate(egui::vec2(offset, 0.0)), 0.0, CYAN);

                ui.add_space(16.0);
                ui.label(
                    RichText::new(progress_line(progress))
                        .font(FontId::monospace(14.0))
                        .color(Color32::from_gray(0x55)),
                );
                ui.add_space(32.0);
                ui.label(
                    RichText::new("Headphones Recommended for Optimal Experience")
                        .font(FontId::monospace(12.0))
                        .color(Color32::from_gray(0x88)),
                );
            });
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_line_rounds_percentage() {
        let mut progress = LoadProgress::default();
        progress.report(2, 3, "spectre");
        assert_eq!(progress_line(&progress), "67% | Verifying: spectre");
    }
}
