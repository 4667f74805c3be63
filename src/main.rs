mod config;
mod input;
mod loading;
mod scene;
mod settings;
mod ui;
mod view;

use bevy::core_pipeline::bloom::{BloomPrefilterSettings, BloomSettings};
use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::diagnostic::{EntityCountDiagnosticsPlugin, FrameTimeDiagnosticsPlugin};
use bevy::log::LogPlugin;
use bevy::prelude::*;
use config::PageConfig;
use input::InputPlugin;
use loading::LoadingPlugin;
use scene::ScenePlugin;
use settings::ExperienceSettings;
use ui::UiPlugin;
use view::{View, ViewPlugin};

fn main() {
    let config = PageConfig::default();

    App::new()
        .insert_resource(ClearColor(Color::BLACK))
        .insert_resource(Msaa::Sample4)
        .add_plugins(FrameTimeDiagnosticsPlugin)
        .add_plugins(EntityCountDiagnosticsPlugin)
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: config.title.clone(),
                        resolution: (1400., 900.).into(),
                        ..default()
                    }),
                    ..default()
                })
                .set(LogPlugin {
                    filter: "wgpu=error,naga=warn,mythcorp_landing=debug".into(),
                    ..default()
                }),
        )
        .insert_resource(config)
        .init_resource::<ExperienceSettings>()
        .init_state::<View>()
        .add_plugins((ViewPlugin, LoadingPlugin, ScenePlugin, UiPlugin, InputPlugin))
        .add_systems(Startup, setup_camera)
        .run();
}

fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera3dBundle {
            camera: Camera {
                hdr: true,
                ..default()
            },
            tonemapping: Tonemapping::TonyMcMapface,
            transform: Transform::from_xyz(0.0, 0.0, 8.0).looking_at(Vec3::ZERO, Vec3::Y),
            ..default()
        },
        BloomSettings {
            prefilter_settings: BloomPrefilterSettings {
                threshold: 0.1,
                threshold_softness: 0.2,
            },
            ..BloomSettings::NATURAL
        },
        MainCamera,
    ));
}

#[derive(Component)]
pub struct MainCamera;
