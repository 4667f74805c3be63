use bevy::core_pipeline::bloom::BloomSettings;
use bevy::prelude::*;
use bevy::utils::HashSet;
use bevy::window::PrimaryWindow;

use crate::config::PageConfig;
use crate::input::PointerNdc;
use crate::loading::PageAssets;
use crate::scene::fade::{exit_timeline, visit_tree, FadeTimeline, HasOpacity};
use crate::scene::{
    frame_smoothing, place_camera, stars, view_frustum, viewport_size, MaterialOverride, Spin,
};
use crate::view::{View, ViewEvent};
use crate::MainCamera;

const CAMERA_POS: Vec3 = Vec3::new(0.0, 0.0, 8.0);
const CAMERA_FOV: f32 = 50.0;
const BLOOM_INTENSITY: f32 = 0.7;
const BACKDROP_DEPTH: f32 = -30.0;
const LOGO_PARALLAX: f32 = 0.3;
const LOGO_SMOOTHING: f32 = 0.05;
const SPECTRE_DEPTH: f32 = -4.0;
const SPECTRE_MARGIN: f32 = 0.05;

/// Asks the landing scene to play its exit and move on.
#[derive(Event, Default)]
pub struct EnterRequested;

/// Everything faded by the exit animation hangs off this entity.
#[derive(Component)]
pub struct ContentRoot;

#[derive(Component)]
pub struct Backdrop;

/// The clickable logo; `radius` bounds the hit test.
#[derive(Component)]
pub struct Logo {
    pub radius: f32,
}

#[derive(Component)]
struct PinnedToCorner;

#[derive(Resource)]
pub struct ExitFade {
    timeline: FadeTimeline<Entity>,
    done: bool,
}

pub struct LandingPlugin;
impl Plugin for LandingPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<EnterRequested>()
            .add_systems(OnEnter(View::Landing), spawn_landing)
            .add_systems(OnExit(View::Landing), |mut commands: Commands| {
                commands.remove_resource::<ExitFade>();
            })
            .add_systems(
                Update,
                (
                    logo_parallax,
                    pin_spectre_to_corner,
                    begin_exit_fade,
                    run_exit_fade,
                )
                    .chain()
                    .run_if(in_state(View::Landing)),
            );
    }
}

fn spawn_landing(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut camera: Query<(&mut Transform, &mut Projection, &mut BloomSettings), With<MainCamera>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    assets: Res<PageAssets>,
    config: Res<PageConfig>,
) {
    place_camera(&mut camera, CAMERA_POS, CAMERA_FOV, BLOOM_INTENSITY);
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 150.0,
    });
    commands.spawn((
        DirectionalLightBundle {
            directional_light: DirectionalLight {
                illuminance: 2_000.0,
                ..default()
            },
            transform: Transform::from_xyz(10.0, 10.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
            ..default()
        },
        StateScoped(View::Landing),
    ));

    // Blurred, darkened city behind the scene; sized to cover the window.
    let aspect = windows
        .get_single()
        .map(|w| w.width() / w.height().max(1.0))
        .unwrap_or(16.0 / 9.0);
    let cover = viewport_size(CAMERA_FOV.to_radians(), aspect, CAMERA_POS.z - BACKDROP_DEPTH) * 1.1;
    commands.spawn((
        PbrBundle {
            mesh: meshes.add(Rectangle::new(cover.x, cover.y)),
            material: materials.add(StandardMaterial {
                base_color: Color::srgb(0.45, 0.45, 0.5),
                base_color_texture: Some(assets.skyline.clone()),
                unlit: true,
                alpha_mode: AlphaMode::Blend,
                ..default()
            }),
            transform: Transform::from_xyz(0.0, 0.0, BACKDROP_DEPTH),
            ..default()
        },
        Backdrop,
        StateScoped(View::Landing),
    ));

    let wordmark = materials.add(StandardMaterial {
        base_color: Color::srgb(0.0, 1.0, 1.0),
        unlit: true,
        ..default()
    });
    let spectre = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(0x88, 0x88, 0x88),
        emissive: LinearRgba::rgb(0.0, 0.5, 0.5),
        ..default()
    });

    let star_field = stars::spawn_star_field(&mut commands, &mut meshes, &mut materials, &config, 1.0);
    commands
        .spawn((
            SpatialBundle::default(),
            ContentRoot,
            Name::new("landing content"),
            StateScoped(View::Landing),
        ))
        .add_child(star_field)
        .with_children(|root| {
            root.spawn((SpatialBundle::default(), Logo { radius: 2.5 }))
                .with_children(|logo| {
                    logo.spawn((
                        SceneBundle {
                            scene: assets.wordmark.clone(),
                            ..default()
                        },
                        MaterialOverride(wordmark),
                    ));
                });
            root.spawn((
                SpatialBundle::from_transform(Transform::from_xyz(0.0, 0.0, SPECTRE_DEPTH)),
                Spin { speed: 0.2 },
                PinnedToCorner,
            ))
            .with_children(|group| {
                group.spawn((
                    SceneBundle {
                        scene: assets.spectre.clone(),
                        transform: Transform::from_scale(Vec3::splat(0.4))
                            .with_rotation(Quat::from_rotation_y(-0.5)),
                        ..default()
                    },
                    MaterialOverride(spectre),
                ));
            });
        });
}

/// Target rotation of the logo for a pointer position in `[-1, 1]²`.
pub fn parallax_target(pointer: Vec2) -> Vec2 {
    Vec2::new(-pointer.y * LOGO_PARALLAX, pointer.x * LOGO_PARALLAX)
}

fn logo_parallax(
    time: Res<Time>,
    pointer: Res<PointerNdc>,
    mut logos: Query<&mut Transform, With<Logo>>,
    mut tilt: Local<Vec2>,
) {
    let target = parallax_target(pointer.0);
    *tilt = tilt.lerp(target, frame_smoothing(LOGO_SMOOTHING, time.delta_seconds()));
    for mut t in &mut logos {
        t.rotation = Quat::from_euler(EulerRot::YXZ, tilt.y, tilt.x, 0.0);
    }
}

fn pin_spectre_to_corner(
    windows: Query<&Window, With<PrimaryWindow>>,
    camera: Query<&Projection, With<MainCamera>>,
    mut pinned: Query<&mut Transform, With<PinnedToCorner>>,
) {
    let Ok(projection) = camera.get_single() else {
        return;
    };
    let Some((fov, aspect)) = view_frustum(&windows, projection) else {
        return;
    };
    // Measured on the z = 0 plane, then pushed back.
    let size = viewport_size(fov, aspect, CAMERA_POS.z);
    for mut t in &mut pinned {
        t.translation = Vec3::new(
            size.x / 2.0 - SPECTRE_MARGIN,
            -size.y / 2.0 + SPECTRE_MARGIN,
            SPECTRE_DEPTH,
        );
    }
}

fn begin_exit_fade(
    mut commands: Commands,
    mut requests: EventReader<EnterRequested>,
    fade: Option<Res<ExitFade>>,
    root: Query<Entity, With<ContentRoot>>,
    backdrop: Query<Entity, With<Backdrop>>,
    children: Query<&Children>,
    with_material: Query<(), With<Handle<StandardMaterial>>>,
) {
    if requests.read().count() == 0 || fade.is_some() {
        return;
    }
    let (Ok(root), Ok(backdrop)) = (root.get_single(), backdrop.get_single()) else {
        return;
    };

    let mut targets = Vec::new();
    visit_tree(
        root,
        |e| children.get(e).map(|c| c.to_vec()).unwrap_or_default(),
        &mut |e| {
            if with_material.contains(e) {
                targets.push(e);
            }
        },
    );

    info!("landing exit started, fading {} objects", targets.len());
    commands.insert_resource(ExitFade {
        timeline: exit_timeline(backdrop, targets),
        done: false,
    });
}

fn run_exit_fade(
    time: Res<Time>,
    fade: Option<ResMut<ExitFade>>,
    handles: Query<&Handle<StandardMaterial>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut ev_view: EventWriter<ViewEvent>,
) {
    let Some(mut fade) = fade else {
        return;
    };
    if fade.done {
        return;
    }

    // Stars share one material; tracks on the same handle carry the same opacity.
    let mut written = HashSet::new();
    for (entity, opacity) in fade.timeline.advance(time.delta_seconds()) {
        let Ok(handle) = handles.get(*entity) else {
            continue;
        };
        if !written.insert(handle.id()) {
            continue;
        }
        if let Some(material) = materials.get_mut(handle) {
            material.set_opacity(opacity);
        }
    }

    if fade.timeline.is_finished() {
        debug!("landing exit finished after {:.2}s", fade.timeline.elapsed());
        fade.done = true;
        ev_view.send(ViewEvent::Enter);
    }
}
