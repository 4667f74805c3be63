//! egui overlays, one panel per view plus the diagnostics window.

pub mod panels;

use bevy::diagnostic::{DiagnosticsStore, EntityCountDiagnosticsPlugin, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPlugin};

use crate::config::PageConfig;
use crate::loading::{LoadProgress, PageAssets};
use crate::settings::ExperienceSettings;
use crate::view::{View, ViewEvent};
use panels::controls_panel::show_controls_panel;
use panels::loading_panel::show_loading_panel;
use panels::menu_panel::show_menu_panel;
use panels::settings_panel::{show_settings_panel, SettingsDraft};

pub struct UiPlugin;
impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .add_systems(OnEnter(View::Settings), open_settings_draft)
            .add_systems(OnExit(View::Settings), |mut commands: Commands| {
                commands.remove_resource::<SettingsDraft>();
            })
            .add_systems(Update, loading_ui.run_if(in_state(View::Loading)))
            .add_systems(Update, menu_ui.run_if(in_state(View::Menu)))
            .add_systems(Update, settings_ui.run_if(in_state(View::Settings)))
            .add_systems(Update, controls_ui.run_if(in_state(View::Experience)))
            .add_systems(
                Update,
                diagnostics_ui.run_if(|config: Res<PageConfig>| config.show_diagnostics),
            );
    }
}

/// Position in `[0, 1]` of a value sweeping back and forth, one way per `period`.
pub fn ping_pong(t: f32, period: f32) -> f32 {
    if period <= 0.0 {
        return 0.0;
    }
    let phase = (t / period).rem_euclid(2.0);
    if phase > 1.0 {
        2.0 - phase
    } else {
        phase
    }
}

fn loading_ui(mut contexts: EguiContexts, progress: Res<LoadProgress>, time: Res<Time>) {
    show_loading_panel(contexts.ctx_mut(), &progress, time.elapsed_seconds());
}

fn menu_ui(
    mut contexts: EguiContexts,
    assets: Res<PageAssets>,
    config: Res<PageConfig>,
    time: Res<Time>,
    mut ev_view: EventWriter<ViewEvent>,
) {
    let backdrop = contexts.add_image(assets.city_backdrop.clone_weak());
    show_menu_panel(
        contexts.ctx_mut(),
        Some(backdrop),
        time.elapsed_seconds(),
        &config.title,
        &mut ev_view,
    );
}

fn open_settings_draft(mut commands: Commands, settings: Res<ExperienceSettings>) {
    commands.insert_resource(SettingsDraft {
        color: settings.color.clone(),
    });
}

fn settings_ui(
    mut contexts: EguiContexts,
    draft: Option<ResMut<SettingsDraft>>,
    mut settings: ResMut<ExperienceSettings>,
    mut ev_view: EventWriter<ViewEvent>,
) {
    let Some(mut draft) = draft else {
        return;
    };
    show_settings_panel(contexts.ctx_mut(), &mut draft, &mut settings, &mut ev_view);
}

fn controls_ui(
    mut contexts: EguiContexts,
    mut settings: ResMut<ExperienceSettings>,
    mut ev_view: EventWriter<ViewEvent>,
) {
    let outcome = show_controls_panel(contexts.ctx_mut(), &settings);

    for edit in outcome.edits {
        settings.set(edit);
    }
    if outcome.randomize {
        settings.randomize(&mut rand::thread_rng());
        debug!("randomized experience settings: {:?}", *settings);
    }
    if outcome.reset {
        settings.reset();
    }
    if outcome.back_to_menu {
        ev_view.send(ViewEvent::BackToMenu);
    }
}

/// Lines of the F3 overlay. Readings the store does not have yet are left out.
fn diagnostic_lines(diagnostics: &DiagnosticsStore, view: View) -> Vec<String> {
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|fps| fps.smoothed())
        .map(|fps| format!("{fps:.0} fps"));
    let entities = diagnostics
        .get(&EntityCountDiagnosticsPlugin::ENTITY_COUNT)
        .and_then(|count| count.value())
        .map(|count| format!("{count} entities"));
    std::iter::once(format!("view {view:?}"))
        .chain(fps)
        .chain(entities)
        .collect()
}

fn diagnostics_ui(
    mut contexts: EguiContexts,
    diagnostics: Res<DiagnosticsStore>,
    view: Res<State<View>>,
) {
    let lines = diagnostic_lines(&diagnostics, *view.get());
    egui::Area::new(egui::Id::new("diagnostics"))
        .anchor(egui::Align2::RIGHT_TOP, [-10.0, 10.0])
        .show(contexts.ctx_mut(), |ui| {
            for line in lines {
                ui.label(
                    egui::RichText::new(line)
                        .monospace()
                        .color(egui::Color32::LIGHT_GREEN),
                );
            }
        });
}
