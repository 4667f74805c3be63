use bevy::core_pipeline::bloom::BloomSettings;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::config::PageConfig;
use crate::input::PointerNdc;
use crate::loading::PageAssets;
use crate::scene::stars::{self, Star};
use crate::scene::{frame_smoothing, place_camera, view_frustum, viewport_size, MaterialOverride, Spin};
use crate::settings::ExperienceSettings;
use crate::view::View;
use crate::MainCamera;

const CAMERA_POS: Vec3 = Vec3::new(0.0, 0.0, 10.0);
const CAMERA_FOV: f32 = 60.0;
const MODEL_SCALE: f32 = 1.5;
const MODEL_EMISSIVE_GAIN: f32 = 2.0;

#[derive(Component)]
pub struct ShowcaseModel;

/// Image that trails the pointer across the z = 0 plane.
#[derive(Component)]
pub struct Tracker;

/// Material shared by every mesh of the showcase model, with the settings
/// color it currently shows. `None` while showing the fallback color.
#[derive(Resource)]
struct ModelMaterial {
    handle: Handle<StandardMaterial>,
    shown: Option<String>,
}

pub struct ExperiencePlugin;
impl Plugin for ExperiencePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(View::Experience), spawn_experience)
            .add_systems(OnExit(View::Experience), |mut commands: Commands| {
                commands.remove_resource::<ModelMaterial>();
            })
            .add_systems(
                Update,
                (
                    (apply_model_settings, apply_glow, apply_star_density)
                        .run_if(resource_changed::<ExperienceSettings>),
                    follow_pointer,
                )
                    .run_if(in_state(View::Experience)),
            );
    }
}

/// Base and emissive colors of the showcase model for a glow color.
pub fn model_colors(glow: Color) -> (Color, LinearRgba) {
    let linear = glow.to_linear();
    let emissive = LinearRgba::rgb(
        linear.red * MODEL_EMISSIVE_GAIN,
        linear.green * MODEL_EMISSIVE_GAIN,
        linear.blue * MODEL_EMISSIVE_GAIN,
    );
    (glow, emissive)
}

fn spawn_experience(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut camera: Query<(&mut Transform, &mut Projection, &mut BloomSettings), With<MainCamera>>,
    assets: Res<PageAssets>,
    config: Res<PageConfig>,
    settings: Res<ExperienceSettings>,
) {
    place_camera(&mut camera, CAMERA_POS, CAMERA_FOV, settings.glow_intensity);
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 150.0,
    });
    commands.spawn((
        DirectionalLightBundle {
            directional_light: DirectionalLight {
                illuminance: 4_000.0,
                ..default()
            },
            transform: Transform::from_xyz(10.0, 10.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
            ..default()
        },
        StateScoped(View::Experience),
    ));

    let star_field = stars::spawn_star_field(
        &mut commands,
        &mut meshes,
        &mut materials,
        &config,
        settings.star_density,
    );
    commands
        .entity(star_field)
        .insert(StateScoped(View::Experience));

    let (glow, shown) = match settings.glow_color() {
        Ok(glow) => (glow, Some(settings.color.clone())),
        Err(err) => {
            warn!("{err}, falling back to default glow color");
            (Color::srgb(0.0, 1.0, 1.0), None)
        }
    };
    let (base_color, emissive) = model_colors(glow);
    let model_material = materials.add(StandardMaterial {
        base_color,
        emissive,
        ..default()
    });
    commands.insert_resource(ModelMaterial {
        handle: model_material.clone(),
        shown,
    });
    commands.spawn((
        SceneBundle {
            scene: assets.spectre.clone(),
            transform: Transform::from_translation(settings.position)
                .with_scale(Vec3::splat(MODEL_SCALE)),
            ..default()
        },
        ShowcaseModel,
        Spin {
            speed: settings.rotation_speed,
        },
        MaterialOverride(model_material),
        StateScoped(View::Experience),
    ));

    commands.spawn((
        PbrBundle {
            mesh: meshes.add(Rectangle::new(1.0, 1.0)),
            material: materials.add(StandardMaterial {
                base_color_texture: Some(assets.tracker.clone()),
                unlit: true,
                alpha_mode: AlphaMode::Blend,
                ..default()
            }),
            transform: Transform::from_scale(Vec3::splat(settings.tracker_scale)),
            visibility: if settings.show_tracker {
                Visibility::Inherited
            } else {
                Visibility::Hidden
            },
            ..default()
        },
        Tracker,
        StateScoped(View::Experience),
    ));
}

fn apply_model_settings(
    settings: Res<ExperienceSettings>,
    model_material: Option<ResMut<ModelMaterial>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut models: Query<(&mut Transform, &mut Spin), With<ShowcaseModel>>,
) {
    for (mut t, mut spin) in &mut models {
        t.translation = settings.position;
        spin.speed = settings.rotation_speed;
    }

    let Some(mut model_material) = model_material else {
        return;
    };
    if model_material.shown.as_deref() == Some(settings.color.as_str()) {
        return;
    }
    let glow = match settings.glow_color() {
        Ok(glow) => glow,
        Err(err) => {
            // Typing a color passes through invalid strings; keep the last one.
            debug!("{err}");
            return;
        }
    };
    let Some(material) = materials.get_mut(&model_material.handle) else {
        return;
    };
    model_material.shown = Some(settings.color.clone());
    let (base_color, emissive) = model_colors(glow);
    material.base_color = base_color;
    material.emissive = emissive;
}

fn apply_glow(
    settings: Res<ExperienceSettings>,
    mut bloom: Query<&mut BloomSettings, With<MainCamera>>,
) {
    for mut bloom in &mut bloom {
        bloom.intensity = settings.glow_intensity;
    }
}

fn apply_star_density(settings: Res<ExperienceSettings>, mut stars: Query<(&mut Transform, &Star)>) {
    stars::scale_stars(settings.star_density, &mut stars);
}

/// Where the tracker heads for a pointer in `[-1, 1]²` on a plane of `viewport` size.
pub fn tracker_target(pointer: Vec2, viewport: Vec2) -> Vec3 {
    (pointer * viewport / 2.0).extend(0.0)
}

fn follow_pointer(
    time: Res<Time>,
    pointer: Res<PointerNdc>,
    settings: Res<ExperienceSettings>,
    windows: Query<&Window, With<PrimaryWindow>>,
    camera: Query<&Projection, With<MainCamera>>,
    mut trackers: Query<(&mut Transform, &mut Visibility), With<Tracker>>,
) {
    let Ok(projection) = camera.get_single() else {
        return;
    };
    let Some((fov, aspect)) = view_frustum(&windows, projection) else {
        return;
    };
    let target = tracker_target(pointer.0, viewport_size(fov, aspect, CAMERA_POS.z));
    let alpha = frame_smoothing(settings.tracker_smoothness, time.delta_seconds());

    for (mut t, mut visibility) in &mut trackers {
        *visibility = if settings.show_tracker {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        t.translation = t.translation.lerp(target, alpha);
        t.scale = Vec3::splat(settings.tracker_scale);
    }
}
